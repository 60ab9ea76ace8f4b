use web_sys::{window, Storage};
use crate::error::DashboardError;

/// Almacenamiento clave/valor persistente (localStorage en el navegador)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), DashboardError>;
    fn remove(&self, key: &str) -> Result<(), DashboardError>;
}

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// `localStorage` del navegador (valores en texto plano, sin JSON)
#[derive(Clone, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<Storage, DashboardError> {
        get_local_storage()
            .ok_or_else(|| DashboardError::Storage("No se pudo acceder a localStorage".to_string()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DashboardError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|_| DashboardError::Storage(format!("Error guardando '{}' en localStorage", key)))
    }

    fn remove(&self, key: &str) -> Result<(), DashboardError> {
        self.storage()?
            .remove_item(key)
            .map_err(|_| DashboardError::Storage(format!("Error eliminando '{}' de localStorage", key)))
    }
}
