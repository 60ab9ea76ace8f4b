// ============================================================================
// NOTIFICATION SERVICE - API Notification del navegador
// ============================================================================

use async_trait::async_trait;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Notification, NotificationOptions, NotificationPermission};
use crate::error::DashboardError;
use crate::models::PermissionState;

/// Plataforma de notificaciones locales
#[async_trait(?Send)]
pub trait NotificationPlatform {
    fn permission(&self) -> PermissionState;
    /// Punto de suspensión: resuelve con el nuevo estado
    async fn request_permission(&self) -> Result<PermissionState, DashboardError>;
    fn show(&self, title: &str, body: &str, icon: &str) -> Result<(), DashboardError>;
}

#[derive(Clone, Default)]
pub struct BrowserNotifications;

impl BrowserNotifications {
    pub fn new() -> Self {
        Self
    }

    /// Safari antiguo / webviews sin `Notification`
    fn is_supported() -> bool {
        web_sys::window()
            .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("Notification")).unwrap_or(false))
            .unwrap_or(false)
    }
}

#[async_trait(?Send)]
impl NotificationPlatform for BrowserNotifications {
    fn permission(&self) -> PermissionState {
        if !Self::is_supported() {
            return PermissionState::Denied;
        }
        match Notification::permission() {
            NotificationPermission::Granted => PermissionState::Granted,
            NotificationPermission::Denied => PermissionState::Denied,
            _ => PermissionState::Default,
        }
    }

    async fn request_permission(&self) -> Result<PermissionState, DashboardError> {
        if !Self::is_supported() {
            return Ok(PermissionState::Denied);
        }
        let promise = Notification::request_permission()
            .map_err(|e| DashboardError::Platform(format!("{:?}", e)))?;
        let result = JsFuture::from(promise)
            .await
            .map_err(|e| DashboardError::Platform(format!("{:?}", e)))?;
        Ok(PermissionState::from_wire(&result.as_string().unwrap_or_default()))
    }

    fn show(&self, title: &str, body: &str, icon: &str) -> Result<(), DashboardError> {
        let options = NotificationOptions::new();
        options.set_body(body);
        options.set_icon(icon);
        Notification::new_with_options(title, &options)
            .map(|_| ())
            .map_err(|e| DashboardError::Platform(format!("{:?}", e)))
    }
}
