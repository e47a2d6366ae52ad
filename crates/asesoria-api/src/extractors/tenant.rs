//! Tenant resolver
//!
//! Determines which propietario's data a request may touch. Resolution
//! order: `X-Propietario-ID` header, then the `propietario_id` query
//! parameter. Write handlers merge a body-level `propietario_id` through
//! [`TenantScope::or_body`] (a parts extractor cannot read the body). When
//! nothing is present the well-known fallback tenant 1 applies.

use axum::{async_trait, extract::FromRequestParts, extract::Query, http::request::Parts};
use asesoria_core::value_objects::TenantId;
use asesoria_core::DomainError;
use serde::Deserialize;

use crate::response::ApiError;

/// Header carrying the tenant id on quote/comment routes
pub const TENANT_HEADER: &str = "x-propietario-id";

#[derive(Debug, Default, Deserialize)]
struct TenantQuery {
    propietario_id: Option<String>,
}

/// Tenant id as resolved from header and query parameters.
///
/// `None` means neither source was present; the decision between body
/// fallback and the default is left to the handler.
#[derive(Debug, Clone, Copy)]
pub struct TenantScope(pub Option<TenantId>);

impl TenantScope {
    /// Resolve for read verbs: header/query or the fallback tenant
    pub fn resolve(self) -> TenantId {
        self.0.unwrap_or_default()
    }

    /// Resolve for write verbs: header/query, then the body field, then
    /// the fallback tenant. A present-but-invalid body value is a 400.
    pub fn or_body(self, body: Option<i64>) -> Result<TenantId, ApiError> {
        if let Some(tenant) = self.0 {
            return Ok(tenant);
        }
        match body {
            Some(raw) => TenantId::new(raw)
                .map_err(|e| ApiError::Domain(DomainError::InvalidTenantId(e))),
            None => Ok(TenantId::FALLBACK),
        }
    }
}

fn parse_tenant(raw: &str) -> Result<TenantId, ApiError> {
    raw.parse::<TenantId>()
        .map_err(|e| ApiError::Domain(DomainError::InvalidTenantId(e)))
}

#[async_trait]
impl<S> FromRequestParts<S> for TenantScope
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Priority 1: header
        if let Some(value) = parts.headers.get(TENANT_HEADER) {
            let raw = value
                .to_str()
                .map_err(|_| ApiError::invalid_query("ID de propietario invalido"))?;
            return Ok(Self(Some(parse_tenant(raw)?)));
        }

        // Priority 2: query parameter
        let query = Query::<TenantQuery>::from_request_parts(parts, state)
            .await
            .map(|Query(q)| q)
            .unwrap_or_default();

        match query.propietario_id {
            Some(raw) => Ok(Self(Some(parse_tenant(&raw)?))),
            None => Ok(Self(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults_to_fallback() {
        assert_eq!(TenantScope(None).resolve(), TenantId::FALLBACK);
        assert_eq!(
            TenantScope(Some(TenantId::new(4).unwrap())).resolve().into_inner(),
            4
        );
    }

    #[test]
    fn test_or_body_priority() {
        // Header/query wins over body
        let scope = TenantScope(Some(TenantId::new(2).unwrap()));
        assert_eq!(scope.or_body(Some(9)).unwrap().into_inner(), 2);

        // Body fills the gap
        let scope = TenantScope(None);
        assert_eq!(scope.or_body(Some(9)).unwrap().into_inner(), 9);

        // Nothing anywhere: fallback
        assert_eq!(
            TenantScope(None).or_body(None).unwrap(),
            TenantId::FALLBACK
        );
    }

    #[test]
    fn test_or_body_rejects_invalid() {
        assert!(TenantScope(None).or_body(Some(0)).is_err());
        assert!(TenantScope(None).or_body(Some(-3)).is_err());
    }

    #[test]
    fn test_parse_tenant() {
        assert_eq!(parse_tenant("7").unwrap().into_inner(), 7);
        assert!(parse_tenant("abc").is_err());
        assert!(parse_tenant("0").is_err());
        assert!(parse_tenant("-1").is_err());
    }
}
