// ============================================================================
// REALTIME - Mensajes del canal Phoenix de Supabase Realtime (vsn 1.0.0)
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::models::order::Order;
use crate::models::session::VendorPhone;

pub const EVENT_JOIN: &str = "phx_join";
pub const EVENT_LEAVE: &str = "phx_leave";
pub const EVENT_REPLY: &str = "phx_reply";
pub const EVENT_HEARTBEAT: &str = "heartbeat";
pub const EVENT_POSTGRES_CHANGES: &str = "postgres_changes";
const PHOENIX_TOPIC: &str = "phoenix";

/// Trama del protocolo Phoenix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoenixMessage {
    pub topic: String,
    pub event: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(rename = "ref", default)]
    pub msg_ref: Option<String>,
}

/// Filtro `postgres_changes`: INSERT en la tabla, por número de vendedor
#[derive(Debug, Clone, PartialEq)]
pub struct RealtimeFilter {
    pub table: String,
    pub phone: VendorPhone,
}

impl RealtimeFilter {
    pub fn new(table: &str, phone: VendorPhone) -> Self {
        Self {
            table: table.to_string(),
            phone,
        }
    }

    /// Un canal por vendedor
    pub fn topic(&self) -> String {
        format!("realtime:{}:{}", self.table, self.phone)
    }

    pub fn filter_expr(&self) -> String {
        format!("phone_vendeur=eq.{}", self.phone)
    }
}

impl PhoenixMessage {
    pub fn join(filter: &RealtimeFilter, access_token: &str, msg_ref: u64) -> Self {
        Self {
            topic: filter.topic(),
            event: EVENT_JOIN.to_string(),
            payload: json!({
                "config": {
                    "broadcast": { "ack": false, "self": false },
                    "presence": { "key": "" },
                    "postgres_changes": [{
                        "event": "INSERT",
                        "schema": "public",
                        "table": filter.table,
                        "filter": filter.filter_expr(),
                    }]
                },
                "access_token": access_token,
            }),
            msg_ref: Some(msg_ref.to_string()),
        }
    }

    pub fn leave(topic: &str, msg_ref: u64) -> Self {
        Self {
            topic: topic.to_string(),
            event: EVENT_LEAVE.to_string(),
            payload: json!({}),
            msg_ref: Some(msg_ref.to_string()),
        }
    }

    pub fn heartbeat(msg_ref: u64) -> Self {
        Self {
            topic: PHOENIX_TOPIC.to_string(),
            event: EVENT_HEARTBEAT.to_string(),
            payload: json!({}),
            msg_ref: Some(msg_ref.to_string()),
        }
    }

    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Fila insertada si el mensaje es un INSERT de `postgres_changes`
    pub fn inserted_order(&self) -> Option<Order> {
        if self.event != EVENT_POSTGRES_CHANGES {
            return None;
        }
        let data = self.payload.get("data")?;
        if data.get("type").and_then(Value::as_str) != Some("INSERT") {
            return None;
        }
        let record = data.get("record")?.clone();
        match serde_json::from_value::<Order>(record) {
            Ok(order) => Some(order),
            Err(e) => {
                log::warn!("⚠️ [REALTIME] Fila insertada ilegible: {}", e);
                None
            }
        }
    }

    /// Respuesta de error al join (p. ej. filtro rechazado)
    pub fn join_error(&self) -> Option<String> {
        if self.event != EVENT_REPLY {
            return None;
        }
        if self.payload.get("status").and_then(Value::as_str) == Some("error") {
            Some(self.payload.get("response").map(|r| r.to_string()).unwrap_or_default())
        } else {
            None
        }
    }
}
