// ============================================================================
// DASHBOARD VIEWMODEL - Sesión + pedidos + realtime
// ============================================================================
// Toda mutación remota termina en un refetch completo: nunca se mezcla la
// fila recibida por realtime ni se hace update optimista.
// ============================================================================

use std::rc::{Rc, Weak};
use crate::error::DashboardError;
use crate::models::{Order, OrderId, OrderStatus, PermissionState, Tab, VendorPhone};
use crate::services::{InsertHandler, OrderGateway, RealtimeSubscriber, SessionStore};
use crate::state::AppState;
use crate::viewmodels::notification_viewmodel::{NotificationGate, PermissionBanner};

pub struct DashboardViewModel {
    state: AppState,
    gateway: Rc<dyn OrderGateway>,
    session: SessionStore,
    notifications: NotificationGate,
    realtime: RealtimeSubscriber,
}

impl DashboardViewModel {
    pub fn new(
        state: AppState,
        gateway: Rc<dyn OrderGateway>,
        session: SessionStore,
        notifications: NotificationGate,
        realtime: RealtimeSubscriber,
    ) -> Rc<Self> {
        Rc::new(Self {
            state,
            gateway,
            session,
            notifications,
            realtime,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Arranque: tema, prefill del login, permiso y sesión (URL > storage).
    /// El fetch inicial lo lanza quien llama con `refresh()`.
    pub fn restore(self: &Rc<Self>) -> Option<VendorPhone> {
        self.state.set_theme(self.session.load_theme());
        if let Some(last) = self.session.last_known() {
            self.state.session.set_phone_input(last);
        }
        self.notifications.refresh();

        let phone = self.session.restore()?;
        self.activate(&phone);
        Some(phone)
    }

    fn activate(self: &Rc<Self>, phone: &VendorPhone) {
        self.state.session.set_phone(Some(phone.clone()));
        if let Err(e) = self.realtime.attach(phone, self.insert_handler()) {
            log::error!("❌ [DASHBOARD] No se pudo suscribir a realtime: {}", e);
        }
    }

    fn insert_handler(self: &Rc<Self>) -> InsertHandler {
        let weak: Weak<Self> = Rc::downgrade(self);
        Rc::new(move |order: Order| {
            let weak = weak.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(vm) = weak.upgrade() {
                    vm.handle_insert(order).await;
                }
            });
        })
    }

    /// Login por número: solo se acepta si algún pedido lleva ese número
    pub async fn login(self: &Rc<Self>) -> Result<VendorPhone, DashboardError> {
        self.state.session.set_logging_in(true);
        self.state.notify_subscribers();

        let result = self.try_login().await;

        self.state.session.set_logging_in(false);
        match &result {
            Ok(phone) => {
                log::info!("✅ [DASHBOARD] Sesión iniciada: {}", phone);
                self.state.session.hide_error_banner();
                self.state.set_active_tab(Tab::Pending);
                self.state.notify_subscribers();
                self.refresh().await;
            }
            Err(e) => {
                log::warn!("⚠️ [DASHBOARD] Login rechazado: {}", e);
                self.state.session.show_error_banner(e.banner_message());
                self.state.notify_subscribers();
            }
        }
        result
    }

    async fn try_login(self: &Rc<Self>) -> Result<VendorPhone, DashboardError> {
        let raw = self.state.session.get_phone_input();
        let phone = VendorPhone::parse(&raw, self.session.country_code())?;

        if !self.gateway.phone_exists(&phone).await? {
            return Err(DashboardError::NotFound(phone.to_string()));
        }

        self.session.start(&phone);
        self.activate(&phone);
        Ok(phone)
    }

    pub fn logout(&self) {
        log::info!("👋 [DASHBOARD] Logout");
        self.session.end();
        self.realtime.detach();
        self.state.session.set_phone(None);
        self.state.session.set_phone_input(self.session.last_known().unwrap_or_default());
        self.state.orders.clear();
        self.state.set_active_tab(Tab::Pending);
        self.state.notify_subscribers();
    }

    /// Refetch completo de la lista del vendedor activo
    pub async fn refresh(&self) {
        let Some(phone) = self.state.session.get_phone() else {
            return;
        };

        let seq = self.state.orders.begin_fetch();
        self.state.notify_subscribers();

        let result = self.gateway.list_by_phone(&phone).await;

        // Un fetch posterior (o un cambio de sesión) ya manda sobre la lista
        if !self.state.orders.is_latest_fetch(seq)
            || self.state.session.get_phone().as_ref() != Some(&phone)
        {
            log::info!("⏭️ [DASHBOARD] Respuesta obsoleta descartada (fetch #{})", seq);
            return;
        }

        match result {
            Ok(orders) => self.state.orders.replace(orders),
            Err(e) => log::error!("❌ [DASHBOARD] Error obteniendo pedidos: {}", e),
        }
        self.state.orders.set_loading(false);
        self.state.notify_subscribers();
    }

    /// Asigna el estado y vuelve a pedir la lista (el error solo se registra)
    pub async fn set_status(&self, order_id: &OrderId, status: OrderStatus) {
        if let Err(e) = self.gateway.set_status(order_id, status).await {
            log::error!("❌ [DASHBOARD] Error actualizando pedido {}: {}", order_id, e);
        }
        self.refresh().await;
    }

    /// Evento INSERT de realtime; `true` si correspondía al vendedor activo
    pub async fn handle_insert(&self, order: Order) -> bool {
        let active = match self.realtime.active_phone() {
            Some(phone) if self.state.session.get_phone().as_ref() == Some(&phone) => phone,
            _ => return false,
        };
        if !active.matches(&order.vendor_phone) {
            log::info!("🙈 [DASHBOARD] INSERT de otro vendedor ignorado");
            return false;
        }

        self.notifications.notify_new_order(&order);
        self.refresh().await;
        true
    }

    pub fn select_tab(&self, tab: Tab) {
        self.state.set_active_tab(tab);
        self.state.notify_subscribers();
    }

    pub fn toggle_theme(&self) {
        let theme = self.state.get_theme().toggled();
        self.state.set_theme(theme);
        self.session.save_theme(theme);
        self.state.notify_subscribers();
    }

    pub fn set_phone_input(&self, value: String) {
        self.state.session.set_phone_input(value);
    }

    /// Auto-ocultado del banner `seq`; un banner más reciente sigue visible
    pub fn dismiss_error_banner(&self, seq: u64) {
        if self.state.session.dismiss_error_banner(seq) {
            self.state.notify_subscribers();
        }
    }

    pub async fn request_permission(&self) -> PermissionState {
        let permission = self.notifications.request().await;
        self.state.notify_subscribers();
        permission
    }

    /// Llamado por el polling: re-render solo si el permiso cambió
    pub fn poll_permission(&self) {
        if self.notifications.refresh() {
            self.state.notify_subscribers();
        }
    }

    pub fn permission_banner(&self) -> Option<PermissionBanner> {
        self.notifications.banner()
    }

    pub fn is_subscribed(&self) -> bool {
        self.realtime.is_attached()
    }

    /// Teardown de la app: los closures del DOM aún pueden retener el ViewModel
    pub fn shutdown(&self) {
        self.realtime.detach();
        self.state.session.replace_banner_timer(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::task::Poll;
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::future::{join3, poll_fn};
    use crate::models::order::sort_newest_first;
    use crate::models::order::tests::order;
    use crate::services::realtime_service::tests::FakeTransport;
    use crate::services::UrlBar;
    use crate::services::session_service::tests::{FakeUrlBar, MemoryStore};
    use crate::utils::constants::{ACTIVE_PHONE_KEY, LAST_PHONE_KEY};
    use crate::utils::storage::KeyValueStore;
    use crate::viewmodels::notification_viewmodel::tests::FakePlatform;

    const PHONE: &str = "2250701020304";

    #[derive(Default)]
    struct FakeGateway {
        rows: RefCell<Vec<Order>>,
        list_calls: Cell<usize>,
        fail_updates: Cell<bool>,
    }

    #[async_trait(?Send)]
    impl OrderGateway for FakeGateway {
        async fn list_by_phone(&self, phone: &VendorPhone) -> Result<Vec<Order>, DashboardError> {
            self.list_calls.set(self.list_calls.get() + 1);
            let mut orders: Vec<Order> = self
                .rows
                .borrow()
                .iter()
                .filter(|o| phone.matches(&o.vendor_phone))
                .cloned()
                .collect();
            sort_newest_first(&mut orders);
            Ok(orders)
        }

        async fn phone_exists(&self, phone: &VendorPhone) -> Result<bool, DashboardError> {
            Ok(self.rows.borrow().iter().any(|o| phone.matches(&o.vendor_phone)))
        }

        async fn set_status(&self, order_id: &OrderId, status: OrderStatus) -> Result<(), DashboardError> {
            if self.fail_updates.get() {
                return Err(DashboardError::Network("offline".to_string()));
            }
            for row in self.rows.borrow_mut().iter_mut().filter(|o| &o.id == order_id) {
                row.status = status;
            }
            Ok(())
        }
    }

    /// Cada `list_by_phone` espera la respuesta que el test le entregue
    #[derive(Default)]
    struct ManualGateway {
        replies: RefCell<VecDeque<oneshot::Receiver<Vec<Order>>>>,
    }

    impl ManualGateway {
        fn expect_list(&self) -> oneshot::Sender<Vec<Order>> {
            let (tx, rx) = oneshot::channel();
            self.replies.borrow_mut().push_back(rx);
            tx
        }
    }

    #[async_trait(?Send)]
    impl OrderGateway for ManualGateway {
        async fn list_by_phone(&self, _phone: &VendorPhone) -> Result<Vec<Order>, DashboardError> {
            let reply = self
                .replies
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| DashboardError::Network("sin respuesta".to_string()))?;
            reply.await.map_err(|_| DashboardError::Network("cancelado".to_string()))
        }

        async fn phone_exists(&self, _phone: &VendorPhone) -> Result<bool, DashboardError> {
            Ok(true)
        }

        async fn set_status(&self, _order_id: &OrderId, _status: OrderStatus) -> Result<(), DashboardError> {
            Ok(())
        }
    }

    async fn yield_once() {
        let mut yielded = false;
        poll_fn(|cx| {
            if yielded {
                Poll::Ready(())
            } else {
                yielded = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        })
        .await
    }

    struct Harness {
        vm: Rc<DashboardViewModel>,
        gateway: Rc<FakeGateway>,
        storage: Rc<MemoryStore>,
        url: Rc<FakeUrlBar>,
        platform: Rc<FakePlatform>,
        transport: FakeTransport,
    }

    fn harness() -> Harness {
        let gateway = Rc::new(FakeGateway::default());
        gateway.rows.borrow_mut().extend([
            order(1, PHONE, OrderStatus::ToDeliver, 5000.0, 30),
            order(2, PHONE, OrderStatus::Delivered, 3000.0, 10),
            order(3, "2250505050505", OrderStatus::ToDeliver, 800.0, 45),
        ]);
        let storage = Rc::new(MemoryStore::default());
        let url = Rc::new(FakeUrlBar::default());
        let platform = Rc::new(FakePlatform::with(PermissionState::Granted));
        let transport = FakeTransport::default();

        let state = AppState::new();
        let vm = DashboardViewModel::new(
            state.clone(),
            gateway.clone(),
            SessionStore::new(storage.clone(), url.clone(), "225"),
            NotificationGate::new(platform.clone(), state, "logo.png"),
            RealtimeSubscriber::new(Box::new(transport.clone()), "orders"),
        );
        vm.poll_permission();
        Harness { vm, gateway, storage, url, platform, transport }
    }

    fn login(h: &Harness, raw: &str) -> Result<VendorPhone, DashboardError> {
        h.vm.set_phone_input(raw.to_string());
        block_on(h.vm.login())
    }

    fn counts(vm: &DashboardViewModel) -> (usize, usize) {
        let partition = vm.state().orders.partition();
        (partition.pending.len(), partition.done.len())
    }

    #[test]
    fn test_login_known_phone_starts_session() {
        let h = harness();
        let phone = login(&h, "07 01 02 03 04").unwrap();

        assert_eq!(phone.as_str(), PHONE);
        assert_eq!(h.vm.state().session.get_phone(), Some(phone));
        assert_eq!(h.storage.get(ACTIVE_PHONE_KEY).as_deref(), Some(PHONE));
        assert_eq!(h.storage.get(LAST_PHONE_KEY).as_deref(), Some(PHONE));
        assert_eq!(h.url.query_param("v").as_deref(), Some(PHONE));
        assert!(h.vm.is_subscribed());
        assert_eq!(h.vm.state().orders.get_orders().len(), 2);
        assert!(!h.vm.state().session.get_logging_in());
    }

    #[test]
    fn test_login_unknown_phone_is_not_found_without_side_effects() {
        let h = harness();
        let err = login(&h, "0799999999").unwrap_err();

        assert_eq!(err, DashboardError::NotFound("2250799999999".to_string()));
        assert!(h.vm.state().session.get_phone().is_none());
        assert!(h.storage.values.borrow().is_empty());
        assert!(h.url.query_param("v").is_none());
        assert!(!h.vm.is_subscribed());
        assert_eq!(
            h.vm.state().session.get_error_banner().as_deref(),
            Some("Numéro non reconnu.")
        );
    }

    #[test]
    fn test_orders_are_newest_first() {
        let h = harness();
        login(&h, "0701020304").unwrap();
        let orders = h.vm.state().orders.get_orders();
        assert!(orders.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(orders[0].id, OrderId::Int(1));
    }

    #[test]
    fn test_tabs_scenario_and_status_round_trip() {
        let h = harness();
        login(&h, "0701020304").unwrap();

        let partition = h.vm.state().orders.partition();
        assert_eq!(counts(&h.vm), (1, 1));
        assert_eq!(partition.for_tab(Tab::Pending)[0].price, Some(5000.0));
        assert_eq!(partition.for_tab(Tab::Done)[0].price, Some(3000.0));

        block_on(h.vm.set_status(&OrderId::Int(1), OrderStatus::Delivered));
        assert_eq!(counts(&h.vm), (0, 2));

        block_on(h.vm.set_status(&OrderId::Int(1), OrderStatus::ToDeliver));
        assert_eq!(counts(&h.vm), (1, 1));
        assert_eq!(h.vm.state().orders.partition().pending[0].id, OrderId::Int(1));
    }

    #[test]
    fn test_set_status_is_a_pure_set() {
        let h = harness();
        login(&h, "0701020304").unwrap();

        block_on(h.vm.set_status(&OrderId::Int(1), OrderStatus::Delivered));
        block_on(h.vm.set_status(&OrderId::Int(1), OrderStatus::Delivered));
        assert_eq!(counts(&h.vm), (0, 2));
    }

    #[test]
    fn test_older_refetch_finishing_last_is_discarded() {
        let gateway = Rc::new(ManualGateway::default());
        let state = AppState::new();
        let vm = DashboardViewModel::new(
            state.clone(),
            gateway.clone(),
            SessionStore::new(Rc::new(MemoryStore::default()), Rc::new(FakeUrlBar::default()), "225"),
            NotificationGate::new(Rc::new(FakePlatform::with(PermissionState::Granted)), state, "logo.png"),
            RealtimeSubscriber::new(Box::new(FakeTransport::default()), "orders"),
        );
        vm.state().session.set_phone(VendorPhone::parse(PHONE, "225").ok());

        let older = gateway.expect_list();
        let newer = gateway.expect_list();
        let one_row = vec![order(1, PHONE, OrderStatus::ToDeliver, 5000.0, 30)];
        let two_rows = vec![
            order(9, PHONE, OrderStatus::ToDeliver, 7000.0, 50),
            order(1, PHONE, OrderStatus::ToDeliver, 5000.0, 30),
        ];

        let loading_after_newer = Cell::new(true);
        block_on(join3(vm.refresh(), vm.refresh(), async {
            let _ = newer.send(two_rows);
            yield_once().await;
            loading_after_newer.set(vm.state().orders.get_loading());
            let _ = older.send(one_row);
        }));

        assert!(!loading_after_newer.get());
        let orders = vm.state().orders.get_orders();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, OrderId::Int(9));
        assert!(!vm.state().orders.get_loading());
    }

    #[test]
    fn test_second_failed_login_keeps_its_own_banner() {
        let h = harness();
        assert!(login(&h, "0799999999").is_err());
        let first = h.vm.state().session.error_banner_seq();
        assert!(login(&h, "0788888888").is_err());

        // El temporizador del primer error no oculta el segundo banner
        h.vm.dismiss_error_banner(first);
        assert!(h.vm.state().session.get_error_banner().is_some());

        h.vm.dismiss_error_banner(h.vm.state().session.error_banner_seq());
        assert!(h.vm.state().session.get_error_banner().is_none());
    }

    #[test]
    fn test_failed_update_still_refetches_and_keeps_list() {
        let h = harness();
        login(&h, "0701020304").unwrap();
        let calls = h.gateway.list_calls.get();

        h.gateway.fail_updates.set(true);
        block_on(h.vm.set_status(&OrderId::Int(1), OrderStatus::Delivered));
        assert_eq!(h.gateway.list_calls.get(), calls + 1);
        assert_eq!(counts(&h.vm), (1, 1));
    }

    #[test]
    fn test_insert_for_active_phone_notifies_and_refetches() {
        let h = harness();
        login(&h, "0701020304").unwrap();
        let calls = h.gateway.list_calls.get();

        let new_order = order(9, PHONE, OrderStatus::ToDeliver, 7000.0, 50);
        h.gateway.rows.borrow_mut().push(new_order.clone());

        assert!(block_on(h.vm.handle_insert(new_order)));
        assert_eq!(h.gateway.list_calls.get(), calls + 1);
        assert_eq!(h.platform.shown.borrow().len(), 1);
        assert_eq!(h.vm.state().orders.get_orders()[0].id, OrderId::Int(9));
    }

    #[test]
    fn test_insert_for_other_phone_is_ignored() {
        let h = harness();
        login(&h, "0701020304").unwrap();
        let calls = h.gateway.list_calls.get();

        let foreign = order(10, "2250505050505", OrderStatus::ToDeliver, 100.0, 55);
        assert!(!block_on(h.vm.handle_insert(foreign)));
        assert_eq!(h.gateway.list_calls.get(), calls);
        assert!(h.platform.shown.borrow().is_empty());
    }

    #[test]
    fn test_insert_without_permission_still_refetches() {
        let h = harness();
        h.platform.permission.set(PermissionState::Denied);
        h.vm.poll_permission();
        login(&h, "0701020304").unwrap();
        let calls = h.gateway.list_calls.get();

        assert!(block_on(h.vm.handle_insert(order(11, PHONE, OrderStatus::ToDeliver, 1.0, 58))));
        assert_eq!(h.gateway.list_calls.get(), calls + 1);
        assert!(h.platform.shown.borrow().is_empty());
    }

    #[test]
    fn test_logout_detaches_and_keeps_last_number() {
        let h = harness();
        login(&h, "0701020304").unwrap();

        h.vm.logout();
        assert!(h.vm.state().session.get_phone().is_none());
        assert!(h.vm.state().orders.get_orders().is_empty());
        assert!(!h.vm.is_subscribed());
        assert_eq!(h.transport.open_count(), 0);
        assert!(h.storage.get(ACTIVE_PHONE_KEY).is_none());
        assert_eq!(h.vm.state().session.get_phone_input(), PHONE);

        // Tras logout un INSERT ya no dispara nada
        let calls = h.gateway.list_calls.get();
        assert!(!block_on(h.vm.handle_insert(order(12, PHONE, OrderStatus::ToDeliver, 1.0, 59))));
        assert_eq!(h.gateway.list_calls.get(), calls);
    }

    #[test]
    fn test_relogin_keeps_single_subscription() {
        let h = harness();
        login(&h, "0701020304").unwrap();
        login(&h, "0505050505").unwrap();
        assert_eq!(h.transport.open_count(), 1);
        assert_eq!(h.vm.state().orders.get_orders().len(), 1);
    }

    #[test]
    fn test_restore_from_query_param() {
        let h = harness();
        h.url.replace_query("v", PHONE).unwrap();
        h.storage.set(crate::utils::constants::THEME_KEY, "light").unwrap();

        let phone = h.vm.restore().unwrap();
        assert_eq!(phone.as_str(), PHONE);
        assert!(h.vm.is_subscribed());
        assert_eq!(h.vm.state().get_theme(), crate::models::Theme::Light);

        block_on(h.vm.refresh());
        assert_eq!(counts(&h.vm), (1, 1));
    }

    #[test]
    fn test_shutdown_closes_channel() {
        let h = harness();
        login(&h, "0701020304").unwrap();
        h.vm.shutdown();
        assert_eq!(h.transport.open_count(), 0);
    }

    #[test]
    fn test_theme_toggle_is_persisted() {
        let h = harness();
        h.vm.toggle_theme();
        assert_eq!(
            h.storage.get(crate::utils::constants::THEME_KEY).as_deref(),
            Some("light")
        );
    }
}
