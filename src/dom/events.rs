// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// Los closures de los listeners se guardan aquí hasta el siguiente render
// completo: `release_listeners()` los suelta justo antes de vaciar el árbol,
// así no se acumulan referencias al ViewModel entre renders. Los listeners
// de larga vida (websocket, polling) guardan su Closure/Interval en un
// handle propio.
// ============================================================================

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlInputElement, MouseEvent};

thread_local! {
    static LISTENERS: RefCell<Vec<Closure<dyn FnMut(Event)>>> = RefCell::new(Vec::new());
}

fn listen(target: &EventTarget, event: &str, closure: Closure<dyn FnMut(Event)>) -> Result<(), JsValue> {
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    LISTENERS.with(|listeners| listeners.borrow_mut().push(closure));
    Ok(())
}

/// Suelta los closures del render anterior (sus elementos se descartan a continuación)
pub fn release_listeners() {
    let released = LISTENERS.with(|listeners| std::mem::take(&mut *listeners.borrow_mut()));
    drop(released);
}

/// Helper para crear click handler simple
pub fn on_click<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: Event| {
        handler(e.unchecked_into::<MouseEvent>());
    }) as Box<dyn FnMut(Event)>);
    listen(element, "click", closure)
}

/// Input handler: entrega el valor actual del `<input>`
pub fn on_input_value<F>(input: &HtmlInputElement, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    let target = input.clone();
    let closure = Closure::wrap(Box::new(move |_e: Event| {
        handler(target.value());
    }) as Box<dyn FnMut(Event)>);
    listen(input, "input", closure)
}

/// Submit de formulario sin recargar la página
pub fn on_submit<F>(form: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: Event| {
        e.prevent_default();
        handler();
    }) as Box<dyn FnMut(Event)>);
    listen(form, "submit", closure)
}
