pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{encode_claims, issue_claims, sign_claims, verify_claims};
