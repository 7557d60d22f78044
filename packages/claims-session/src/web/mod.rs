//! actix-web glue: cookie transport, request context, request logging, and
//! the middleware that verifies a session before protected handlers run.

pub mod context;
pub mod cookie;
pub mod middleware;
pub mod request_log;

pub use context::{attach, authenticated, Authenticated};
pub use cookie::{removal_cookie, session_cookie, token_from_request, ACCESS_TOKEN_COOKIE};
pub use middleware::Identify;
pub use request_log::RequestLog;
