// ============================================================================
// MAVA DASHBOARD - FRONTEND MVVM (RUST PURO + WASM)
// ============================================================================
// - Views: funciones que renderizan DOM (sin lógica)
// - ViewModels: sesión, pedidos, realtime y permiso de notificaciones
// - Services: Supabase (REST + Realtime), localStorage, URL, Notification
// - State: Rc<RefCell> + subscribers
// - Models: pedido tipado y mensajes realtime
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod viewmodels;
pub mod utils;
mod dom;
mod views;
mod app;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_logger::Config;
use crate::app::App;
use crate::config::CONFIG;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_logging_enabled() { log::Level::Info } else { log::Level::Warn };
    wasm_logger::init(Config::new(level));
    log::info!("🚀 MAVA Dashboard - Rust Puro + MVVM");

    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Re-render completo de la app
pub fn rerender_app() {
    APP.with(|app_cell| {
        if let Some(ref mut app) = *app_cell.borrow_mut() {
            if let Err(e) = app.render() {
                log::error!("❌ Error re-renderizando: {:?}", e);
            }
        } else {
            log::warn!("⚠️ [RERENDER] App no está inicializada");
        }
    });
}

/// Libera la app (cierra el canal realtime y el polling); llamable desde JS en `pagehide`
#[wasm_bindgen]
pub fn shutdown_app() {
    let app = APP.with(|app_cell| app_cell.borrow_mut().take());
    drop(app);
}
