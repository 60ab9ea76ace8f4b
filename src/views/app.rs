// ============================================================================
// APP VIEW - Login o lista de pedidos según la sesión
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::viewmodels::DashboardViewModel;
use crate::views::{render_login, render_orders};

pub fn render_app(vm: &Rc<DashboardViewModel>) -> Result<Element, JsValue> {
    let state = vm.state();
    let theme = state.get_theme();

    let screen = if state.session.is_logged_in() {
        render_orders(vm)?
    } else {
        render_login(vm)?
    };

    Ok(ElementBuilder::new("div")?
        .class(&format!("mava-app theme-{}", theme.as_str()))
        .child(screen)?
        .build())
}
