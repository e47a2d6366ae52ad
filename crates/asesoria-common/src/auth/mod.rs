//! Authentication primitives: JWT access tokens, Argon2 password hashing,
//! and opaque token generation for the refresh-token ledger and email flows.

mod jwt;
mod password;
mod token;

pub use jwt::{Claims, JwtService};
pub use password::{hash_password, validate_password_strength, verify_password};
pub use token::{generate_opaque_token, OPAQUE_TOKEN_LEN};
