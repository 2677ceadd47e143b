//! HTTP middleware: CORS, security headers, request deadline, panic
//! recovery, and the combined stack applied to every route.

pub mod cors;
pub mod recovery;
pub mod security;
pub mod stack;
pub mod timeout;

pub use cors::{HttpConfig, create_cors_layer, create_permissive_cors_layer};
pub use recovery::{handle_panic, panic_recovery_layer};
pub use security::security_headers;
pub use stack::with_middleware;
pub use timeout::request_timeout;
