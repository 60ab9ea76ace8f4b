// ============================================================================
// NOTIFICATION GATE - Permiso + notificaciones de nuevos pedidos
// ============================================================================

use std::rc::Rc;
use crate::models::{Order, PermissionState};
use crate::services::NotificationPlatform;
use crate::state::AppState;
use crate::utils::format::format_price_label;

pub const NEW_ORDER_TITLE: &str = "Nouvelle commande 🛍️";

/// Banner que la vista debe mostrar según el permiso
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionBanner {
    /// Permiso sin decidir: botón para activarlo
    Prompt,
    /// Denegado: solo los ajustes del navegador lo recuperan
    Guidance,
}

pub fn notification_body(order: &Order) -> String {
    format!(
        "{} • {} • {}",
        order.product_label(),
        order.neighborhood_label(),
        format_price_label(order.price)
    )
}

pub struct NotificationGate {
    platform: Rc<dyn NotificationPlatform>,
    state: AppState,
    icon: String,
}

impl NotificationGate {
    pub fn new(platform: Rc<dyn NotificationPlatform>, state: AppState, icon: &str) -> Self {
        Self {
            platform,
            state,
            icon: icon.to_string(),
        }
    }

    pub fn current(&self) -> PermissionState {
        self.state.get_permission()
    }

    /// Relee el permiso de la plataforma; `true` si cambió (p. ej. desde ajustes)
    pub fn refresh(&self) -> bool {
        let latest = self.platform.permission();
        if latest == self.state.get_permission() {
            return false;
        }
        log::info!("🔔 [NOTIF] Permiso: {:?} -> {:?}", self.state.get_permission(), latest);
        self.state.set_permission(latest);
        true
    }

    pub async fn request(&self) -> PermissionState {
        match self.platform.request_permission().await {
            Ok(permission) => {
                log::info!("🔔 [NOTIF] Respuesta al permiso: {:?}", permission);
                self.state.set_permission(permission);
            }
            Err(e) => log::error!("❌ [NOTIF] {}", e),
        }
        self.state.get_permission()
    }

    /// Notificación local si hay permiso; devuelve si se mostró
    pub fn notify_new_order(&self, order: &Order) -> bool {
        if !self.current().is_granted() {
            return false;
        }
        match self.platform.show(NEW_ORDER_TITLE, &notification_body(order), &self.icon) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("⚠️ [NOTIF] No se pudo mostrar: {}", e);
                false
            }
        }
    }

    pub fn banner(&self) -> Option<PermissionBanner> {
        match self.current() {
            PermissionState::Default => Some(PermissionBanner::Prompt),
            PermissionState::Denied => Some(PermissionBanner::Guidance),
            PermissionState::Granted => None,
        }
    }
}
