// ============================================================================
// APP - Construcción de dependencias y render completo
// ============================================================================

use std::rc::Rc;
use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{append_child, clear_children, get_element_by_id, release_listeners};
use crate::services::{BrowserNotifications, BrowserUrlBar, OrderGateway, RealtimeSubscriber, SessionStore, SupabaseClient, SupabaseRealtime};
use crate::state::{AppState, RenderFlag};
use crate::utils::storage::LocalStore;
use crate::viewmodels::{DashboardViewModel, NotificationGate};
use crate::views::render_app;

/// Aplicación principal: dueña del ViewModel (y por tanto del gateway y del canal realtime)
pub struct App {
    vm: Rc<DashboardViewModel>,
    root: Element,
    _permission_poll: Interval,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        if CONFIG.supabase_url.is_empty() {
            log::warn!("⚠️ [APP] SUPABASE_URL vacío: revisa el .env");
        }

        let state = AppState::new();
        let gateway: Rc<dyn OrderGateway> = Rc::new(SupabaseClient::new(&CONFIG));
        let session = SessionStore::new(
            Rc::new(LocalStore::new()),
            Rc::new(BrowserUrlBar::new()),
            &CONFIG.country_code,
        );
        let notifications = NotificationGate::new(
            Rc::new(BrowserNotifications::new()),
            state.clone(),
            &CONFIG.logo_url,
        );
        let realtime = RealtimeSubscriber::new(
            Box::new(SupabaseRealtime::new(&CONFIG)),
            &CONFIG.orders_table,
        );
        let vm = DashboardViewModel::new(state.clone(), gateway, session, notifications, realtime);

        // Batchear updates: mientras haya un render programado no se agenda otro
        let render_flag = RenderFlag::new();
        state.subscribe_to_changes(move || {
            if render_flag.claim() {
                let render_flag = render_flag.clone();
                Timeout::new(0, move || {
                    render_flag.release();
                    crate::rerender_app();
                })
                .forget();
            }
        });

        if let Some(phone) = vm.restore() {
            log::info!("💾 [APP] Sesión activa: {}", phone);
            let vm = vm.clone();
            spawn_local(async move { vm.refresh().await });
        }

        // Re-chequeo del permiso (cambios hechos desde los ajustes del navegador)
        let permission_poll = {
            let vm = Rc::downgrade(&vm);
            Interval::new(CONFIG.permission_poll_seconds.saturating_mul(1000), move || {
                if let Some(vm) = vm.upgrade() {
                    vm.poll_permission();
                }
            })
        };

        Ok(Self {
            vm,
            root,
            _permission_poll: permission_poll,
        })
    }

    /// Renderizar aplicación (re-render completo)
    pub fn render(&mut self) -> Result<(), JsValue> {
        release_listeners();
        clear_children(&self.root);
        let tree = render_app(&self.vm)?;
        append_child(&self.root, &tree)
    }
}

impl Drop for App {
    fn drop(&mut self) {
        release_listeners();
        self.vm.shutdown();
        log::info!("🔌 [APP] App liberada");
    }
}
