pub mod auth;
pub mod json;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthMember};
pub use json::{ApiJson, OptionalJson};
pub use response::{ApiResponse, ApiResult};
