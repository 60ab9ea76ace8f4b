use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::utils::constants::{STATUS_DELIVERED, STATUS_TO_DELIVER};

/// Identificador de fila: entero (int8) o texto (uuid) según el esquema
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Int(i64),
    Text(String),
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderId::Int(id) => write!(f, "{}", id),
            OrderId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// Estado de entrega (columna `order_statuts`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    ToDeliver,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::ToDeliver => STATUS_TO_DELIVER,
            OrderStatus::Delivered => STATUS_DELIVERED,
        }
    }

    /// Todo lo que no sea "Livrée" cuenta como pendiente
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some(STATUS_DELIVERED) => OrderStatus::Delivered,
            _ => OrderStatus::ToDeliver,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(OrderStatus::from_wire(value.as_deref()))
    }
}

/// Pedido de la tabla `orders` (creado fuera de este cliente)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "phone_vendeur", default)]
    pub vendor_phone: String,
    /// Revisiones antiguas usaban la columna `articles`
    #[serde(default, alias = "articles")]
    pub product: Option<String>,
    #[serde(rename = "quartier", default)]
    pub neighborhood: Option<String>,
    #[serde(rename = "telephone", default)]
    pub buyer_phone: Option<String>,
    #[serde(rename = "phone_client", default)]
    pub buyer_contact_phone: Option<String>,
    #[serde(rename = "prix", default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub order_number: Option<serde_json::Value>,
    #[serde(rename = "order_statuts", default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Número visible (`#000` cuando falta)
    pub fn display_number(&self) -> String {
        match &self.order_number {
            Some(serde_json::Value::Number(n)) => format!("#{}", n),
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => format!("#{}", s.trim()),
            _ => "#000".to_string(),
        }
    }

    pub fn product_label(&self) -> &str {
        self.product.as_deref().unwrap_or("Commande")
    }

    pub fn neighborhood_label(&self) -> &str {
        self.neighborhood.as_deref().unwrap_or("—")
    }
}

/// Ordena por fecha de creación descendente (filas sin fecha al final)
pub fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Pestaña activa del dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Pending,
    Done,
}

impl Tab {
    pub fn includes(&self, order: &Order) -> bool {
        match self {
            Tab::Pending => !order.status.is_delivered(),
            Tab::Done => order.status.is_delivered(),
        }
    }
}

/// Partición disjunta de la lista: pendientes / entregados
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPartition {
    pub pending: Vec<Order>,
    pub done: Vec<Order>,
}

impl OrderPartition {
    pub fn from_orders(orders: &[Order]) -> Self {
        let (done, pending): (Vec<Order>, Vec<Order>) = orders
            .iter()
            .cloned()
            .partition(|o| Tab::Done.includes(o));
        Self { pending, done }
    }

    pub fn for_tab(&self, tab: Tab) -> &[Order] {
        match tab {
            Tab::Pending => &self.pending,
            Tab::Done => &self.done,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn order(id: i64, phone: &str, status: OrderStatus, price: f64, minute: u32) -> Order {
        Order {
            id: OrderId::Int(id),
            vendor_phone: phone.to_string(),
            product: Some(format!("Produit {}", id)),
            neighborhood: Some("Cocody".to_string()),
            buyer_phone: Some("0505050505".to_string()),
            buyer_contact_phone: Some("225 05 05 05 05 05".to_string()),
            price: Some(price),
            order_number: Some(serde_json::json!(id)),
            status,
            created_at: Some(Utc.with_ymd_and_hms(2026, 1, 15, 10, minute, 0).unwrap()),
        }
    }

    #[test]
    fn test_deserialize_supabase_row() {
        let json = r#"{
            "id": 42,
            "phone_vendeur": "2250701020304",
            "product": "Robe wax",
            "quartier": "Yopougon",
            "telephone": "0102030405",
            "phone_client": "225 01 02 03 04 05",
            "prix": 5000,
            "order_number": 17,
            "order_statuts": "Livrée",
            "created_at": "2026-01-15T10:30:00.123456+00:00"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::Int(42));
        assert_eq!(order.vendor_phone, "2250701020304");
        assert_eq!(order.price, Some(5000.0));
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.display_number(), "#17");
        assert!(order.created_at.is_some());
    }

    #[test]
    fn test_unknown_or_missing_status_is_pending() {
        let json = r#"{"id": "b7e1", "phone_vendeur": "225", "order_statuts": null}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::Text("b7e1".to_string()));
        assert_eq!(order.status, OrderStatus::ToDeliver);

        let json = r#"{"id": 1, "order_statuts": "En route"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::ToDeliver);
        assert_eq!(order.display_number(), "#000");
    }

    #[test]
    fn test_legacy_articles_column() {
        let json = r#"{"id": 3, "articles": "2 pagnes"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.product_label(), "2 pagnes");
    }

    #[test]
    fn test_status_serializes_to_wire_value() {
        let body = serde_json::json!({ "order_statuts": OrderStatus::Delivered });
        assert_eq!(body.to_string(), r#"{"order_statuts":"Livrée"}"#);
        assert_eq!(OrderStatus::ToDeliver.as_str(), "À livrer");
    }

    #[test]
    fn test_sort_newest_first() {
        let mut orders = vec![
            order(1, "225", OrderStatus::ToDeliver, 100.0, 5),
            order(2, "225", OrderStatus::ToDeliver, 100.0, 40),
            order(3, "225", OrderStatus::ToDeliver, 100.0, 20),
        ];
        orders[0].created_at = None;
        sort_newest_first(&mut orders);
        let ids: Vec<String> = orders.iter().map(|o| o.id.to_string()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_partition_is_disjoint_cover() {
        let orders = vec![
            order(1, "225", OrderStatus::ToDeliver, 5000.0, 1),
            order(2, "225", OrderStatus::Delivered, 3000.0, 2),
            order(3, "225", OrderStatus::ToDeliver, 1000.0, 3),
        ];
        let partition = OrderPartition::from_orders(&orders);
        assert_eq!(partition.pending.len() + partition.done.len(), orders.len());
        assert_eq!(partition.pending.len(), 2);
        assert_eq!(partition.done.len(), 1);
        assert!(partition.pending.iter().all(|o| Tab::Pending.includes(o)));
        assert!(partition.done.iter().all(|o| Tab::Done.includes(o)));
        assert!(partition
            .pending
            .iter()
            .all(|p| !partition.done.iter().any(|d| d.id == p.id)));
    }
}
