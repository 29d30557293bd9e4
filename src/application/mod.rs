// Application layer: the session controller, the presenter that turns
// session state into display strings, and summary export.

pub mod error;
pub mod presenter;
pub mod session;
pub mod summary;

pub use error::*;
pub use presenter::*;
pub use session::*;
pub use summary::*;
