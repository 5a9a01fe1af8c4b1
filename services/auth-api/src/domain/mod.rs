//! 领域层

mod credentials;
mod password;

pub use credentials::*;
pub use password::*;
