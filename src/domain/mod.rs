mod ledger;
mod money;
mod rates;
mod service;

pub use ledger::*;
pub use money::*;
pub use rates::*;
pub use service::*;
