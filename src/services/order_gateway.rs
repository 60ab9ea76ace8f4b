use async_trait::async_trait;
use crate::error::DashboardError;
use crate::models::{Order, OrderId, OrderStatus, VendorPhone};

/// Fachada sobre la tabla de pedidos remota
#[async_trait(?Send)]
pub trait OrderGateway {
    /// Pedidos del vendedor, del más reciente al más antiguo
    async fn list_by_phone(&self, phone: &VendorPhone) -> Result<Vec<Order>, DashboardError>;

    /// ¿Existe al menos un pedido con este número de vendedor?
    async fn phone_exists(&self, phone: &VendorPhone) -> Result<bool, DashboardError>;

    /// Asigna el estado (no alterna): llamarlo dos veces deja el mismo valor
    async fn set_status(&self, order_id: &OrderId, status: OrderStatus) -> Result<(), DashboardError>;
}
