// ============================================================================
// LOGIN VIEW - Acceso por número de teléfono
// ============================================================================

use std::rc::Rc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};
use crate::config::CONFIG;
use crate::dom::{create_element, on_input_value, on_submit, text_element, ElementBuilder};
use crate::viewmodels::DashboardViewModel;
use crate::views::render_error_banner;

pub fn render_login(vm: &Rc<DashboardViewModel>) -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] render_login()");
    let state = vm.state();
    let logging_in = state.session.get_logging_in();

    let logo = ElementBuilder::new("img")?
        .class("login-logo")
        .attr("src", &CONFIG.logo_url)?
        .attr("alt", "Logo")?
        .build();

    // Input (el valor vive en el estado, sin re-render al teclear)
    let input: HtmlInputElement = create_element("input")?.dyn_into()?;
    input.set_type("tel");
    input.set_class_name("login-input");
    input.set_placeholder("07XXXXXXXX");
    input.set_value(&state.session.get_phone_input());
    input.set_disabled(logging_in);
    {
        let vm = vm.clone();
        on_input_value(&input, move |value| vm.set_phone_input(value))?;
    }

    let submit = ElementBuilder::new("button")?
        .class("btn-primary")
        .attr("type", "submit")?
        .text(if logging_in { "Vérification..." } else { "Suivre mes commandes" })
        .build();
    if logging_in {
        submit.set_attribute("disabled", "true")?;
    }

    let form = ElementBuilder::new("form")?
        .class("login-form")
        .child(input.unchecked_into())?
        .child(submit)?
        .build();
    {
        let vm = vm.clone();
        on_submit(&form, move || {
            if vm.state().session.get_logging_in() {
                return;
            }
            let vm = vm.clone();
            spawn_local(async move {
                if vm.login().await.is_err() {
                    let seq = vm.state().session.error_banner_seq();
                    let timer = {
                        let vm = vm.clone();
                        Timeout::new(CONFIG.error_banner_ms, move || vm.dismiss_error_banner(seq))
                    };
                    vm.state().session.replace_banner_timer(Some(timer));
                }
            });
        })?;
    }

    let mut screen = ElementBuilder::new("div")?
        .class("login-screen")
        .child(logo)?
        .child(text_element("h2", "login-title", "Bienvenue")?)?
        .child(text_element("p", "login-subtitle", "Entre ton numéro pour suivre tes ventes")?)?;

    if let Some(message) = state.session.get_error_banner() {
        screen = screen.child(render_error_banner(&message)?)?;
    }

    Ok(screen.child(form)?.build())
}
