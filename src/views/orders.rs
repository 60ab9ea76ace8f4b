// ============================================================================
// ORDERS VIEW - Cabecera, pestañas y lista de pedidos
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{on_click, text_element, ElementBuilder};
use crate::models::Tab;
use crate::viewmodels::DashboardViewModel;
use crate::views::{render_order_card, render_permission_banner};

fn render_header(vm: &Rc<DashboardViewModel>) -> Result<Element, JsValue> {
    let theme_btn = text_element("button", "btn-icon", vm.state().get_theme().toggle_icon())?;
    {
        let vm = vm.clone();
        on_click(&theme_btn, move |_| vm.toggle_theme())?;
    }

    let refresh_btn = text_element("button", "btn-icon", "🔄")?;
    {
        let vm = vm.clone();
        on_click(&refresh_btn, move |_| {
            let vm = vm.clone();
            spawn_local(async move { vm.refresh().await });
        })?;
    }

    let logout_btn = text_element("button", "btn-logout", "Déconnexion 🚪")?;
    {
        let vm = vm.clone();
        on_click(&logout_btn, move |_| vm.logout())?;
    }

    Ok(ElementBuilder::new("div")?
        .class("orders-header")
        .child(theme_btn)?
        .child(refresh_btn)?
        .child(logout_btn)?
        .build())
}

fn render_tab(vm: &Rc<DashboardViewModel>, tab: Tab, label: &str, count: usize) -> Result<Element, JsValue> {
    let active = vm.state().get_active_tab() == tab;
    let class = match (tab, active) {
        (Tab::Pending, true) => "tab tab--pending tab--active",
        (Tab::Done, true) => "tab tab--done tab--active",
        _ => "tab",
    };
    let button = text_element("button", class, &format!("{} ({})", label, count))?;
    let vm = vm.clone();
    on_click(&button, move |_| vm.select_tab(tab))?;
    Ok(button)
}

pub fn render_orders(vm: &Rc<DashboardViewModel>) -> Result<Element, JsValue> {
    let state = vm.state();
    let partition = state.orders.partition();
    let active_tab = state.get_active_tab();

    let tabs = ElementBuilder::new("div")?
        .class("tabs")
        .child(render_tab(vm, Tab::Pending, "En cours", partition.pending.len())?)?
        .child(render_tab(vm, Tab::Done, "Livrées", partition.done.len())?)?
        .build();

    let mut list = ElementBuilder::new("div")?.class("order-list");
    if state.orders.get_loading() {
        list = list.child(ElementBuilder::new("div")?.class("order-skeleton").build())?;
    }
    let visible = partition.for_tab(active_tab);
    if visible.is_empty() && !state.orders.get_loading() {
        let empty = match active_tab {
            Tab::Pending => "Aucune commande en cours",
            Tab::Done => "Aucune commande livrée",
        };
        list = list.child(text_element("p", "order-empty", empty)?)?;
    }
    for order in visible {
        list = list.child(render_order_card(vm, order)?)?;
    }

    let mut screen = ElementBuilder::new("div")?
        .class("orders-screen")
        .child(render_header(vm)?)?;
    if let Some(banner) = render_permission_banner(vm)? {
        screen = screen.child(banner)?;
    }

    Ok(screen
        .child(text_element("h1", "orders-title", "Mes Commandes")?)?
        .child(tabs)?
        .child(list.build())?
        .child(text_element("div", "footer", "MAVA © 2026")?)?
        .build())
}
