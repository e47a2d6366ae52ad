//! Tenant identifier (propietario) - scopes quote and comment data

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of the business owner (propietario) a request operates on.
///
/// Every cotizacion/comentario query is filtered by this value and every
/// insert is stamped with it. Invariant: strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(i64);

impl TenantId {
    /// Fallback tenant for requests that carry no tenant information.
    /// Preserves single-tenant behavior for legacy deployments.
    pub const FALLBACK: TenantId = TenantId(1);

    /// Create a tenant id, rejecting zero and negative values
    pub fn new(value: i64) -> Result<Self, TenantIdError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TenantIdError::NotPositive(value))
        }
    }

    /// Get the raw i64 value
    #[inline]
    pub fn into_inner(self) -> i64 {
        self.0
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TenantId {
    type Err = TenantIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| TenantIdError::NotANumber(s.to_string()))?;
        Self::new(value)
    }
}

/// Errors when parsing or constructing a tenant id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TenantIdError {
    #[error("Tenant id must be a positive integer, got {0}")]
    NotPositive(i64),

    #[error("Tenant id is not a number: {0}")]
    NotANumber(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_positive() {
        let tenant = TenantId::new(42).unwrap();
        assert_eq!(tenant.into_inner(), 42);
    }

    #[test]
    fn test_new_rejects_zero_and_negative() {
        assert!(matches!(
            TenantId::new(0),
            Err(TenantIdError::NotPositive(0))
        ));
        assert!(matches!(
            TenantId::new(-7),
            Err(TenantIdError::NotPositive(-7))
        ));
    }

    #[test]
    fn test_default_is_fallback() {
        assert_eq!(TenantId::default(), TenantId::FALLBACK);
        assert_eq!(TenantId::default().into_inner(), 1);
    }

    #[test]
    fn test_parse_from_str() {
        let tenant: TenantId = "5".parse().unwrap();
        assert_eq!(tenant.into_inner(), 5);

        let tenant: TenantId = " 12 ".parse().unwrap();
        assert_eq!(tenant.into_inner(), 12);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("abc".parse::<TenantId>().is_err());
        assert!("".parse::<TenantId>().is_err());
        assert!("-1".parse::<TenantId>().is_err());
        assert!("0".parse::<TenantId>().is_err());
        assert!("1.5".parse::<TenantId>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(TenantId::new(9).unwrap().to_string(), "9");
    }
}
