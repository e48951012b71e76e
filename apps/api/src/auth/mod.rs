//! Identity — bearer-token verification for the maintenance API.
//!
//! Tokens are issued by an external identity provider sharing `JWT_SECRET`;
//! this service only verifies them.

pub mod extractor;
pub mod jwt;

pub use extractor::AuthUser;
pub use jwt::JwtService;
