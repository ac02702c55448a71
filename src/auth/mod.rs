mod helpers;
mod middleware;
mod token;

pub use helpers::{authorize, extract_bearer_token, issue_token, verify_token};
pub use middleware::{AuthError, RequireProject};
pub use token::{TokenGenerator, hash_token};
