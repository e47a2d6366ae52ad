//! Opaque token generation
//!
//! Refresh tokens, email verification tokens and password reset tokens are
//! random strings whose validity is proven by a database row, never by
//! their contents.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated opaque tokens
pub const OPAQUE_TOKEN_LEN: usize = 64;

/// Generate a cryptographically random alphanumeric token
#[must_use]
pub fn generate_opaque_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(OPAQUE_TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length_and_charset() {
        let token = generate_opaque_token();
        assert_eq!(token.len(), OPAQUE_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = generate_opaque_token();
        let b = generate_opaque_token();
        assert_ne!(a, b);
    }
}
