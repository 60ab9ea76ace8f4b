// ============================================================================
// BANNERS - Error de login y permiso de notificaciones
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{on_click, text_element, ElementBuilder};
use crate::viewmodels::{DashboardViewModel, PermissionBanner};

/// Banner no bloqueante; la app lo oculta tras `error_banner_ms`
pub fn render_error_banner(message: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("banner banner--error")
        .attr("role", "alert")?
        .text(message)
        .build())
}

/// Retorna None cuando el permiso ya está concedido
pub fn render_permission_banner(vm: &Rc<DashboardViewModel>) -> Result<Option<Element>, JsValue> {
    let Some(kind) = vm.permission_banner() else {
        return Ok(None);
    };

    let banner = match kind {
        PermissionBanner::Prompt => {
            let button = text_element("button", "banner__action", "Activer")?;
            let vm_click = vm.clone();
            on_click(&button, move |_| {
                let vm = vm_click.clone();
                spawn_local(async move {
                    vm.request_permission().await;
                });
            })?;

            ElementBuilder::new("div")?
                .class("banner banner--notif")
                .child(text_element("span", "banner__text", "🔔 Active les notifications pour être alerté des nouvelles commandes.")?)?
                .child(button)?
                .build()
        }
        PermissionBanner::Guidance => ElementBuilder::new("div")?
            .class("banner banner--muted")
            .text("🔕 Notifications bloquées : autorise-les dans les réglages du navigateur.")
            .build(),
    };

    Ok(Some(banner))
}
