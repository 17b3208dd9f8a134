pub mod auth;
pub mod security_headers;

pub use auth::Authenticated;
pub use security_headers::SecurityHeaders;
