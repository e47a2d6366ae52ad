//! Cotizacion lifecycle states

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a cotizacion as tracked by the admin panel.
///
/// Uses the extended label set; quotes start in `Pendiente`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoCotizacion {
    #[default]
    Pendiente,
    EnRevision,
    Contactado,
    ClienteIngresado,
    NuncaRespondio,
    Cotizado,
    Cerrado,
}

impl EstadoCotizacion {
    /// All valid states, in workflow order
    pub const ALL: [EstadoCotizacion; 7] = [
        Self::Pendiente,
        Self::EnRevision,
        Self::Contactado,
        Self::ClienteIngresado,
        Self::NuncaRespondio,
        Self::Cotizado,
        Self::Cerrado,
    ];

    /// Wire/database representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pendiente => "pendiente",
            Self::EnRevision => "en_revision",
            Self::Contactado => "contactado",
            Self::ClienteIngresado => "cliente_ingresado",
            Self::NuncaRespondio => "nunca_respondio",
            Self::Cotizado => "cotizado",
            Self::Cerrado => "cerrado",
        }
    }
}

impl fmt::Display for EstadoCotizacion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstadoCotizacion {
    type Err = EstadoParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(Self::Pendiente),
            "en_revision" => Ok(Self::EnRevision),
            "contactado" => Ok(Self::Contactado),
            "cliente_ingresado" => Ok(Self::ClienteIngresado),
            "nunca_respondio" => Ok(Self::NuncaRespondio),
            "cotizado" => Ok(Self::Cotizado),
            "cerrado" => Ok(Self::Cerrado),
            other => Err(EstadoParseError(other.to_string())),
        }
    }
}

/// Error for unknown estado labels
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown estado: {0}")]
pub struct EstadoParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_labels() {
        for estado in EstadoCotizacion::ALL {
            let parsed: EstadoCotizacion = estado.as_str().parse().unwrap();
            assert_eq!(parsed, estado);
        }
    }

    #[test]
    fn test_rejects_unknown_label() {
        let err = "aprobado".parse::<EstadoCotizacion>().unwrap_err();
        assert_eq!(err.0, "aprobado");
        assert!("".parse::<EstadoCotizacion>().is_err());
        assert!("Pendiente".parse::<EstadoCotizacion>().is_err());
    }

    #[test]
    fn test_default_is_pendiente() {
        assert_eq!(EstadoCotizacion::default(), EstadoCotizacion::Pendiente);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&EstadoCotizacion::ClienteIngresado).unwrap();
        assert_eq!(json, "\"cliente_ingresado\"");

        let estado: EstadoCotizacion = serde_json::from_str("\"nunca_respondio\"").unwrap();
        assert_eq!(estado, EstadoCotizacion::NuncaRespondio);
    }
}
