//! 应用层

mod auth_service;
mod revocation_purger;

pub use auth_service::*;
pub use revocation_purger::*;
