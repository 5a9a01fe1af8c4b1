//! keygate-bootstrap - 服务启动骨架

mod runtime;
mod shutdown;

pub use runtime::*;
pub use shutdown::*;
