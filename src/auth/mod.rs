//! Authentication module
//!
//! Email/password signup and login backed by bcrypt hashes, stateless JWT
//! access tokens, and per-request session resolution. Capability checks
//! (owner/admin) are deliberately not derived from the token; see
//! `services::capability`.

mod extract;
mod jwt;
mod service;

pub use extract::{CurrentUser, MaybeUser};
pub use jwt::{Claims, JwtKeys};
pub use service::{AuthError, AuthService, AuthTokenResponse, LoginRequest, SignupRequest};
