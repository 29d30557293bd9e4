mod kv;
mod rate_store;

pub use kv::*;
pub use rate_store::*;
