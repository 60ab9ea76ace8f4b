// ============================================================================
// ERRORES - Taxonomía única del dashboard
// ============================================================================

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// Ningún pedido lleva este número de vendedor
    #[error("Numéro non reconnu: {0}")]
    NotFound(String),

    #[error("Numéro invalide")]
    InvalidPhone,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Platform error: {0}")]
    Platform(String),
}

impl DashboardError {
    /// Mensaje para el banner de login
    pub fn banner_message(&self) -> String {
        match self {
            DashboardError::NotFound(_) => "Numéro non reconnu.".to_string(),
            DashboardError::InvalidPhone => "Entre un numéro valide.".to_string(),
            _ => "Connexion impossible, réessaie.".to_string(),
        }
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        DashboardError::Parse(e.to_string())
    }
}

impl From<gloo_net::Error> for DashboardError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(inner) => DashboardError::Parse(inner.to_string()),
            other => DashboardError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_get_generic_banner() {
        assert_eq!(DashboardError::InvalidPhone.banner_message(), "Entre un numéro valide.");
        assert_eq!(
            DashboardError::Http { status: 500, message: "boom".into() }.banner_message(),
            "Connexion impossible, réessaie."
        );
    }

    #[test]
    fn test_banner_message_for_unknown_number() {
        let err = DashboardError::NotFound("225".into());
        assert_eq!(err.banner_message(), "Numéro non reconnu.");
    }
}
