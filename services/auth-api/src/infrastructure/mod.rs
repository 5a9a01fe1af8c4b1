//! 基础设施层：进程内存储

mod credential_store;
mod revocation_registry;

pub use credential_store::*;
pub use revocation_registry::*;
