// ============================================================================
// SESSION STATE - Número activo + formulario de login
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use gloo_timers::callback::Timeout;
use crate::models::VendorPhone;

#[derive(Clone)]
pub struct SessionState {
    pub phone: Rc<RefCell<Option<VendorPhone>>>,
    pub phone_input: Rc<RefCell<String>>,
    pub logging_in: Rc<RefCell<bool>>,
    /// Banner de error del login (se oculta solo tras unos segundos)
    pub error_banner: Rc<RefCell<Option<String>>>,
    /// Cuántas veces se mostró el banner; el auto-ocultado solo vale para el último
    pub banner_seq: Rc<Cell<u64>>,
    pub banner_timer: Rc<RefCell<Option<Timeout>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phone: Rc::new(RefCell::new(None)),
            phone_input: Rc::new(RefCell::new(String::new())),
            logging_in: Rc::new(RefCell::new(false)),
            error_banner: Rc::new(RefCell::new(None)),
            banner_seq: Rc::new(Cell::new(0)),
            banner_timer: Rc::new(RefCell::new(None)),
        }
    }

    pub fn set_phone(&self, phone: Option<VendorPhone>) {
        *self.phone.borrow_mut() = phone;
    }

    pub fn get_phone(&self) -> Option<VendorPhone> {
        self.phone.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.phone.borrow().is_some()
    }

    pub fn set_phone_input(&self, value: String) {
        *self.phone_input.borrow_mut() = value;
    }

    pub fn get_phone_input(&self) -> String {
        self.phone_input.borrow().clone()
    }

    pub fn set_logging_in(&self, logging_in: bool) {
        *self.logging_in.borrow_mut() = logging_in;
    }

    pub fn get_logging_in(&self) -> bool {
        *self.logging_in.borrow()
    }

    /// Muestra un banner nuevo y devuelve su número
    pub fn show_error_banner(&self, message: String) -> u64 {
        let seq = self.banner_seq.get() + 1;
        self.banner_seq.set(seq);
        *self.error_banner.borrow_mut() = Some(message);
        seq
    }

    pub fn hide_error_banner(&self) {
        *self.error_banner.borrow_mut() = None;
    }

    /// Oculta el banner solo si sigue siendo el número `seq`
    pub fn dismiss_error_banner(&self, seq: u64) -> bool {
        if self.banner_seq.get() != seq || self.error_banner.borrow().is_none() {
            return false;
        }
        self.hide_error_banner();
        true
    }

    pub fn error_banner_seq(&self) -> u64 {
        self.banner_seq.get()
    }

    /// Sustituye el temporizador de auto-ocultado (el anterior se cancela al soltarlo)
    pub fn replace_banner_timer(&self, timer: Option<Timeout>) {
        let previous = self.banner_timer.replace(timer);
        drop(previous);
    }

    pub fn get_error_banner(&self) -> Option<String> {
        self.error_banner.borrow().clone()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
