pub mod auth;
pub mod ownership;

pub use auth::{authenticate, AuthError, AuthFailure, AuthUser};
pub use ownership::{authorize_owner, load_owned_course, OwnershipError};
