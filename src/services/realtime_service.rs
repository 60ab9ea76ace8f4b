// ============================================================================
// REALTIME SERVICE - Suscripción a INSERTs de pedidos (Supabase Realtime)
// ============================================================================
// Una sola suscripción activa por sesión montada. Los closures se guardan en
// el canal y se liberan al cerrarlo (no se usa forget()).
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use gloo_timers::callback::Interval;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};
use crate::config::AppConfig;
use crate::error::DashboardError;
use crate::models::{Order, PhoenixMessage, RealtimeFilter, VendorPhone};

pub type InsertHandler = Rc<dyn Fn(Order)>;

/// Canal abierto; `close()` lo da de baja
pub trait RealtimeSubscription {
    fn topic(&self) -> &str;
    fn close(&mut self);
}

pub trait RealtimeTransport {
    fn subscribe(
        &self,
        filter: RealtimeFilter,
        on_insert: InsertHandler,
    ) -> Result<Box<dyn RealtimeSubscription>, DashboardError>;
}

enum SubscriptionState {
    Detached,
    Attached {
        phone: VendorPhone,
        subscription: Box<dyn RealtimeSubscription>,
    },
}

/// Máquina de dos estados: Detached <-> Attached { phone }
pub struct RealtimeSubscriber {
    transport: Box<dyn RealtimeTransport>,
    table: String,
    state: RefCell<SubscriptionState>,
}

impl RealtimeSubscriber {
    pub fn new(transport: Box<dyn RealtimeTransport>, table: &str) -> Self {
        Self {
            transport,
            table: table.to_string(),
            state: RefCell::new(SubscriptionState::Detached),
        }
    }

    /// Se suscribe al número dado; cualquier suscripción previa se cierra antes
    pub fn attach(&self, phone: &VendorPhone, on_insert: InsertHandler) -> Result<(), DashboardError> {
        if self.active_phone().as_ref() == Some(phone) {
            log::info!("🔁 [REALTIME] Ya suscrito a {}", phone);
            return Ok(());
        }
        self.detach();

        let filter = RealtimeFilter::new(&self.table, phone.clone());
        let subscription = self.transport.subscribe(filter, on_insert)?;
        log::info!("📡 [REALTIME] Suscrito a {}", subscription.topic());
        *self.state.borrow_mut() = SubscriptionState::Attached {
            phone: phone.clone(),
            subscription,
        };
        Ok(())
    }

    pub fn detach(&self) {
        let previous = std::mem::replace(&mut *self.state.borrow_mut(), SubscriptionState::Detached);
        if let SubscriptionState::Attached { mut subscription, phone } = previous {
            subscription.close();
            log::info!("🔌 [REALTIME] Desuscrito de {}", phone);
        }
    }

    pub fn active_phone(&self) -> Option<VendorPhone> {
        match &*self.state.borrow() {
            SubscriptionState::Attached { phone, .. } => Some(phone.clone()),
            SubscriptionState::Detached => None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.active_phone().is_some()
    }
}

impl Drop for RealtimeSubscriber {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Transporte WebSocket (protocolo Phoenix) hacia Supabase Realtime
pub struct SupabaseRealtime {
    url: String,
    access_token: String,
    heartbeat_ms: u32,
}

impl SupabaseRealtime {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            url: config.realtime_url(),
            access_token: config.supabase_key.clone(),
            heartbeat_ms: config.realtime_heartbeat_seconds.saturating_mul(1000),
        }
    }
}

struct WebSocketChannel {
    socket: WebSocket,
    topic: String,
    refs: Rc<Cell<u64>>,
    heartbeat: Option<Interval>,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

fn next_ref(refs: &Cell<u64>) -> u64 {
    let value = refs.get() + 1;
    refs.set(value);
    value
}

fn send(socket: &WebSocket, message: &PhoenixMessage) {
    if socket.ready_state() != WebSocket::OPEN {
        return;
    }
    match message.encode() {
        Ok(text) => {
            if let Err(e) = socket.send_with_str(&text) {
                log::warn!("⚠️ [REALTIME] Error enviando {}: {:?}", message.event, e);
            }
        }
        Err(e) => log::error!("❌ [REALTIME] Error serializando {}: {}", message.event, e),
    }
}

impl RealtimeTransport for SupabaseRealtime {
    fn subscribe(
        &self,
        filter: RealtimeFilter,
        on_insert: InsertHandler,
    ) -> Result<Box<dyn RealtimeSubscription>, DashboardError> {
        let socket = WebSocket::new(&self.url)
            .map_err(|e| DashboardError::Network(format!("WebSocket: {:?}", e)))?;
        let refs = Rc::new(Cell::new(0u64));
        let topic = filter.topic();

        let on_open = {
            let socket = socket.clone();
            let refs = refs.clone();
            let token = self.access_token.clone();
            Closure::wrap(Box::new(move |_e: Event| {
                let join = PhoenixMessage::join(&filter, &token, next_ref(&refs));
                send(&socket, &join);
                log::info!("📡 [REALTIME] phx_join enviado ({})", join.topic);
            }) as Box<dyn FnMut(Event)>)
        };

        let on_message = Closure::wrap(Box::new(move |e: MessageEvent| {
            let Some(text) = e.data().as_string() else {
                return;
            };
            match PhoenixMessage::decode(&text) {
                Ok(message) => {
                    if let Some(reason) = message.join_error() {
                        log::error!("❌ [REALTIME] Join rechazado: {}", reason);
                    } else if let Some(order) = message.inserted_order() {
                        log::info!("🆕 [REALTIME] INSERT recibido: pedido {}", order.id);
                        on_insert(order);
                    }
                }
                Err(e) => log::warn!("⚠️ [REALTIME] Trama ilegible: {}", e),
            }
        }) as Box<dyn FnMut(MessageEvent)>);

        let on_close = Closure::wrap(Box::new(move |e: CloseEvent| {
            log::warn!("📴 [REALTIME] Socket cerrado (code {})", e.code());
        }) as Box<dyn FnMut(CloseEvent)>);

        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        let heartbeat = {
            let socket = socket.clone();
            let refs = refs.clone();
            Interval::new(self.heartbeat_ms, move || {
                send(&socket, &PhoenixMessage::heartbeat(next_ref(&refs)));
            })
        };

        Ok(Box::new(WebSocketChannel {
            socket,
            topic,
            refs,
            heartbeat: Some(heartbeat),
            _on_open: on_open,
            _on_message: on_message,
            _on_close: on_close,
        }))
    }
}

impl RealtimeSubscription for WebSocketChannel {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn close(&mut self) {
        // Interval se cancela al soltarse
        self.heartbeat.take();
        send(&self.socket, &PhoenixMessage::leave(&self.topic, next_ref(&self.refs)));
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onclose(None);
        if let Err(e) = self.socket.close() {
            log::warn!("⚠️ [REALTIME] Error cerrando socket: {:?}", e);
        }
    }
}
