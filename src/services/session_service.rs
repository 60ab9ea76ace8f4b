// ============================================================================
// SESSION SERVICE - Persistencia del número de vendedor y del tema
// ============================================================================

use std::rc::Rc;
use web_sys::{window, UrlSearchParams};
use crate::error::DashboardError;
use crate::models::{Theme, VendorPhone};
use crate::utils::constants::{ACTIVE_PHONE_KEY, LAST_PHONE_KEY, SESSION_QUERY_PARAM, THEME_KEY};
use crate::utils::storage::KeyValueStore;

/// Barra de direcciones: el número activo se refleja en `?v=<phone>`
pub trait UrlBar {
    fn query_param(&self, name: &str) -> Option<String>;
    /// Nueva entrada de historial con `?name=value` (sesión compartible)
    fn push_query(&self, name: &str, value: &str) -> Result<(), DashboardError>;
    /// Reemplaza la entrada actual con `?name=value`
    fn replace_query(&self, name: &str, value: &str) -> Result<(), DashboardError>;
    /// Vuelve a la raíz sin parámetros
    fn clear_query(&self) -> Result<(), DashboardError>;
}

/// `window.location` + `window.history`
#[derive(Clone, Default)]
pub struct BrowserUrlBar;

impl BrowserUrlBar {
    pub fn new() -> Self {
        Self
    }

    fn path() -> Result<String, DashboardError> {
        window()
            .ok_or_else(|| DashboardError::Platform("No window".to_string()))?
            .location()
            .pathname()
            .map_err(|_| DashboardError::Platform("No se pudo leer location.pathname".to_string()))
    }

    fn write_history(url: &str, push: bool) -> Result<(), DashboardError> {
        let history = window()
            .ok_or_else(|| DashboardError::Platform("No window".to_string()))?
            .history()
            .map_err(|_| DashboardError::Platform("No history".to_string()))?;
        let result = if push {
            history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url))
        } else {
            history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url))
        };
        result.map_err(|_| DashboardError::Platform(format!("No se pudo actualizar la URL a {}", url)))
    }
}

impl UrlBar for BrowserUrlBar {
    fn query_param(&self, name: &str) -> Option<String> {
        let search = window()?.location().search().ok()?;
        UrlSearchParams::new_with_str(&search).ok()?.get(name)
    }

    fn push_query(&self, name: &str, value: &str) -> Result<(), DashboardError> {
        let url = format!("{}?{}={}", Self::path()?, name, value);
        Self::write_history(&url, true)
    }

    fn replace_query(&self, name: &str, value: &str) -> Result<(), DashboardError> {
        let url = format!("{}?{}={}", Self::path()?, name, value);
        Self::write_history(&url, false)
    }

    fn clear_query(&self) -> Result<(), DashboardError> {
        Self::write_history("/", false)
    }
}

/// Session Store: sesión activa, último número conocido y tema
#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStore>,
    url: Rc<dyn UrlBar>,
    country_code: String,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStore>, url: Rc<dyn UrlBar>, country_code: &str) -> Self {
        Self {
            storage,
            url,
            country_code: country_code.to_string(),
        }
    }

    /// Restaura la sesión: el parámetro `?v=` tiene prioridad y se persiste enseguida
    pub fn restore(&self) -> Option<VendorPhone> {
        if let Some(raw) = self.url.query_param(SESSION_QUERY_PARAM) {
            match VendorPhone::parse(&raw, &self.country_code) {
                Ok(phone) => {
                    log::info!("🔗 [SESSION] Sesión tomada de la URL: {}", phone);
                    self.persist(&phone);
                    return Some(phone);
                }
                Err(_) => log::warn!("⚠️ [SESSION] Parámetro v inválido: {:?}", raw),
            }
        }

        let stored = self.storage.get(ACTIVE_PHONE_KEY)?;
        match VendorPhone::parse(&stored, &self.country_code) {
            Ok(phone) => {
                log::info!("💾 [SESSION] Sesión restaurada desde storage: {}", phone);
                if let Err(e) = self.url.replace_query(SESSION_QUERY_PARAM, phone.as_str()) {
                    log::warn!("⚠️ [SESSION] {}", e);
                }
                Some(phone)
            }
            Err(_) => {
                log::warn!("⚠️ [SESSION] Valor guardado inválido, se descarta");
                if let Err(e) = self.storage.remove(ACTIVE_PHONE_KEY) {
                    log::error!("❌ [SESSION] {}", e);
                }
                None
            }
        }
    }

    /// Tras un login aceptado: guarda en ambas claves y refleja en la URL
    pub fn start(&self, phone: &VendorPhone) {
        self.persist(phone);
        if let Err(e) = self.url.push_query(SESSION_QUERY_PARAM, phone.as_str()) {
            log::warn!("⚠️ [SESSION] {}", e);
        }
    }

    /// Logout: solo se borra la sesión activa; el último número se conserva
    pub fn end(&self) {
        if let Err(e) = self.storage.remove(ACTIVE_PHONE_KEY) {
            log::error!("❌ [SESSION] {}", e);
        }
        if let Err(e) = self.url.clear_query() {
            log::warn!("⚠️ [SESSION] {}", e);
        }
    }

    pub fn last_known(&self) -> Option<String> {
        self.storage.get(LAST_PHONE_KEY)
    }

    pub fn load_theme(&self) -> Theme {
        Theme::from_stored(self.storage.get(THEME_KEY).as_deref())
    }

    pub fn save_theme(&self, theme: Theme) {
        if let Err(e) = self.storage.set(THEME_KEY, theme.as_str()) {
            log::error!("❌ [SESSION] {}", e);
        }
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    fn persist(&self, phone: &VendorPhone) {
        for key in [ACTIVE_PHONE_KEY, LAST_PHONE_KEY] {
            if let Err(e) = self.storage.set(key, phone.as_str()) {
                log::error!("❌ [SESSION] {}", e);
            }
        }
    }
}
