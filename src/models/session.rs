use std::fmt;
use serde::{Deserialize, Serialize};
use crate::error::DashboardError;
use crate::utils::phone::{is_valid_phone, normalize_phone};

/// Número de vendedor normalizado (identidad única de la sesión)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorPhone(String);

impl VendorPhone {
    /// Normaliza y valida lo que escribe el vendedor (o llega por `?v=`)
    pub fn parse(raw: &str, country_code: &str) -> Result<Self, DashboardError> {
        let normalized = normalize_phone(raw, country_code);
        if is_valid_phone(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(DashboardError::InvalidPhone)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compara con el valor crudo de una fila (`phone_vendeur`)
    pub fn matches(&self, vendor_phone: &str) -> bool {
        self.0 == vendor_phone.trim()
    }
}

impl fmt::Display for VendorPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tema visual persistido
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Icono del botón: muestra el tema al que se cambia
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }
}
