// ============================================================================
// ORDERS STATE - Lista de pedidos del vendedor activo
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use crate::models::{Order, OrderPartition};

#[derive(Clone)]
pub struct OrdersState {
    pub orders: Rc<RefCell<Vec<Order>>>,
    pub loading: Rc<RefCell<bool>>,
    /// Número del último fetch lanzado; solo ese puede escribir la lista
    pub fetch_seq: Rc<Cell<u64>>,
}

impl OrdersState {
    pub fn new() -> Self {
        Self {
            orders: Rc::new(RefCell::new(Vec::new())),
            loading: Rc::new(RefCell::new(false)),
            fetch_seq: Rc::new(Cell::new(0)),
        }
    }

    /// Registra un fetch nuevo y marca la carga; devuelve su número
    pub fn begin_fetch(&self) -> u64 {
        let seq = self.fetch_seq.get() + 1;
        self.fetch_seq.set(seq);
        self.set_loading(true);
        seq
    }

    pub fn is_latest_fetch(&self, seq: u64) -> bool {
        self.fetch_seq.get() == seq
    }

    /// Cada fetch reemplaza la lista completa (sin merge)
    pub fn replace(&self, orders: Vec<Order>) {
        *self.orders.borrow_mut() = orders;
    }

    /// Vacía la lista e invalida cualquier fetch en vuelo
    pub fn clear(&self) {
        self.orders.borrow_mut().clear();
        self.fetch_seq.set(self.fetch_seq.get() + 1);
        self.set_loading(false);
    }

    pub fn get_orders(&self) -> Vec<Order> {
        self.orders.borrow().clone()
    }

    pub fn partition(&self) -> OrderPartition {
        OrderPartition::from_orders(&self.orders.borrow())
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
    }

    pub fn get_loading(&self) -> bool {
        *self.loading.borrow()
    }
}

impl Default for OrdersState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_fetch_is_current() {
        let orders = OrdersState::new();
        let first = orders.begin_fetch();
        let second = orders.begin_fetch();

        assert!(!orders.is_latest_fetch(first));
        assert!(orders.is_latest_fetch(second));
        assert!(orders.get_loading());
    }

    #[test]
    fn test_clear_invalidates_fetch_in_flight() {
        let orders = OrdersState::new();
        let seq = orders.begin_fetch();
        orders.clear();

        assert!(!orders.is_latest_fetch(seq));
        assert!(!orders.get_loading());
    }
}
