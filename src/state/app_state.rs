// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use crate::models::{PermissionState, Tab, Theme};
use crate::state::{OrdersState, SessionState};

/// Estado global: propiedad exclusiva de la app, sin acceso concurrente
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub orders: OrdersState,

    // UI State
    pub active_tab: Rc<RefCell<Tab>>,
    pub theme: Rc<RefCell<Theme>>,
    pub permission: Rc<RefCell<PermissionState>>,

    // Reactivity: callbacks para notificar cambios
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: SessionState::new(),
            orders: OrdersState::new(),
            active_tab: Rc::new(RefCell::new(Tab::default())),
            theme: Rc::new(RefCell::new(Theme::default())),
            permission: Rc::new(RefCell::new(PermissionState::default())),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn set_active_tab(&self, tab: Tab) {
        *self.active_tab.borrow_mut() = tab;
    }

    pub fn get_active_tab(&self) -> Tab {
        *self.active_tab.borrow()
    }

    pub fn set_theme(&self, theme: Theme) {
        *self.theme.borrow_mut() = theme;
    }

    pub fn get_theme(&self) -> Theme {
        *self.theme.borrow()
    }

    pub fn set_permission(&self, permission: PermissionState) {
        *self.permission.borrow_mut() = permission;
    }

    pub fn get_permission(&self) -> PermissionState {
        *self.permission.borrow()
    }

    /// Suscribirse a cambios (la app re-renderiza)
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers
    pub fn notify_subscribers(&self) {
        // Clonar para que un callback pueda suscribir sin conflicto de borrow
        let callbacks: Vec<Rc<dyn Fn()>> = self.change_subscribers.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-render pendiente: varias notificaciones en la misma vuelta del event
/// loop comparten un único render programado
#[derive(Clone, Default)]
pub struct RenderFlag(Rc<Cell<bool>>);

impl RenderFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` si quien llama debe programar el render
    pub fn claim(&self) -> bool {
        !self.0.replace(true)
    }

    /// Llamado al empezar el render programado
    pub fn release(&self) {
        self.0.set(false);
    }
}
