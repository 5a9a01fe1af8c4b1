//! keygate-auth-core - 认证核心库
//!
//! 访问令牌的 Claims 结构与签名编解码（HS256）

mod claims;
mod codec;

pub use claims::*;
pub use codec::*;
