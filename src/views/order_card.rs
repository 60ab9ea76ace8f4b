// ============================================================================
// ORDER CARD - Tarjeta de un pedido
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{on_click, text_element, ElementBuilder};
use crate::models::{Order, OrderStatus};
use crate::utils::format::{format_price_label, whatsapp_link};
use crate::viewmodels::DashboardViewModel;

fn status_button(
    vm: &Rc<DashboardViewModel>,
    order: &Order,
    target: OrderStatus,
    class: &str,
    label: &str,
) -> Result<Element, JsValue> {
    let button = text_element("button", class, label)?;
    let vm = vm.clone();
    let order_id = order.id.clone();
    on_click(&button, move |_| {
        let vm = vm.clone();
        let order_id = order_id.clone();
        spawn_local(async move {
            vm.set_status(&order_id, target).await;
        });
    })?;
    Ok(button)
}

pub fn render_order_card(vm: &Rc<DashboardViewModel>, order: &Order) -> Result<Element, JsValue> {
    let delivered = order.status.is_delivered();

    let badge = text_element(
        "div",
        if delivered { "order-badge order-badge--done" } else { "order-badge order-badge--pending" },
        if delivered { "Livrée" } else { "À Livrer" },
    )?;

    let details = ElementBuilder::new("div")?
        .class("order-details")
        .child(text_element("p", "order-product", &format!("🛍️ {}", order.product_label()))?)?
        .child(text_element("p", "order-zone", &format!("📍 {}", order.neighborhood_label()))?)?
        .child(text_element("p", "order-price", &format_price_label(order.price))?)?
        .child(text_element(
            "p",
            "order-phone",
            &format!("📞 {}", order.buyer_phone.as_deref().unwrap_or("—")),
        )?)?
        .build();

    let mut actions = ElementBuilder::new("div")?.class("order-actions");
    if delivered {
        actions = actions.child(status_button(vm, order, OrderStatus::ToDeliver, "btn-secondary", "Annuler 🔄")?)?;
    } else {
        actions = actions.child(status_button(vm, order, OrderStatus::Delivered, "btn-primary", "Marquer livrée")?)?;
        if let Some(link) = whatsapp_link(order.buyer_contact_phone.as_deref()) {
            let whatsapp = ElementBuilder::new("a")?
                .class("btn-whatsapp")
                .attr("href", &link)?
                .attr("target", "_blank")?
                .attr("rel", "noreferrer")?
                .text("WhatsApp 💬")
                .build();
            actions = actions.child(whatsapp)?;
        }
    }

    Ok(ElementBuilder::new("div")?
        .class("order-card")
        .attr("data-order-id", &order.id.to_string())?
        .child(badge)?
        .child(text_element("div", "order-number", &order.display_number())?)?
        .child(details)?
        .child(actions.build())?
        .build())
}
