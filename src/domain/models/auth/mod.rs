pub mod authenticated_user;
pub mod security_context;

pub use authenticated_user::*;
pub use security_context::*;
