// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP con Supabase (PostgREST)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use crate::config::AppConfig;
use crate::error::DashboardError;
use crate::models::order::sort_newest_first;
use crate::models::{Order, OrderId, OrderStatus, VendorPhone};
use crate::services::order_gateway::OrderGateway;

#[derive(Serialize)]
struct StatusPatch {
    order_statuts: OrderStatus,
}

#[derive(Deserialize)]
struct PhoneProbe {
    #[allow(dead_code)]
    phone_vendeur: Option<String>,
}

/// Cliente Supabase - se construye una vez al arrancar la app y se pasa al ViewModel
#[derive(Clone)]
pub struct SupabaseClient {
    rest_url: String,
    api_key: String,
    table: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            rest_url: config.rest_url(),
            api_key: config.supabase_key.clone(),
            table: config.orders_table.clone(),
        }
    }

    pub fn list_url(&self, phone: &VendorPhone) -> String {
        format!(
            "{}/{}?select=*&phone_vendeur=eq.{}&order=created_at.desc",
            self.rest_url, self.table, phone
        )
    }

    pub fn probe_url(&self, phone: &VendorPhone) -> String {
        format!(
            "{}/{}?select=phone_vendeur&phone_vendeur=eq.{}&limit=1",
            self.rest_url, self.table, phone
        )
    }

    pub fn update_url(&self, order_id: &OrderId) -> String {
        format!("{}/{}?id=eq.{}", self.rest_url, self.table, order_id)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", &format!("Bearer {}", self.api_key))
    }

    async fn check(response: Response) -> Result<Response, DashboardError> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| response.status_text());
        Err(DashboardError::Http { status, message })
    }
}

#[async_trait(?Send)]
impl OrderGateway for SupabaseClient {
    async fn list_by_phone(&self, phone: &VendorPhone) -> Result<Vec<Order>, DashboardError> {
        log::info!("📦 [API] Obteniendo pedidos de {}", phone);

        let response = self
            .authorize(Request::get(&self.list_url(phone)))
            .send()
            .await?;
        let mut orders = Self::check(response).await?.json::<Vec<Order>>().await?;

        // El servidor ya ordena; se re-asegura aquí
        sort_newest_first(&mut orders);
        log::info!("✅ [API] {} pedidos recibidos", orders.len());
        Ok(orders)
    }

    async fn phone_exists(&self, phone: &VendorPhone) -> Result<bool, DashboardError> {
        let response = self
            .authorize(Request::get(&self.probe_url(phone)))
            .send()
            .await?;
        let rows = Self::check(response).await?.json::<Vec<PhoneProbe>>().await?;
        Ok(!rows.is_empty())
    }

    async fn set_status(&self, order_id: &OrderId, status: OrderStatus) -> Result<(), DashboardError> {
        log::info!("✏️ [API] Pedido {} -> {}", order_id, status.as_str());

        let response = self
            .authorize(Request::patch(&self.update_url(order_id)))
            .header("Prefer", "return=minimal")
            .json(&StatusPatch { order_statuts: status })?
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SupabaseClient {
        SupabaseClient::new(&AppConfig {
            supabase_url: "https://abc.supabase.co".to_string(),
            supabase_key: "anon".to_string(),
            ..AppConfig::default()
        })
    }

    #[test]
    fn test_list_url_filters_by_phone_newest_first() {
        let phone = VendorPhone::parse("0701020304", "225").unwrap();
        assert_eq!(
            client().list_url(&phone),
            "https://abc.supabase.co/rest/v1/orders?select=*&phone_vendeur=eq.2250701020304&order=created_at.desc"
        );
    }

    #[test]
    fn test_probe_url_limits_to_one_row() {
        let phone = VendorPhone::parse("2250701020304", "225").unwrap();
        assert!(client().probe_url(&phone).ends_with("phone_vendeur=eq.2250701020304&limit=1"));
    }

    #[test]
    fn test_update_url_targets_single_row() {
        assert_eq!(
            client().update_url(&OrderId::Int(9)),
            "https://abc.supabase.co/rest/v1/orders?id=eq.9"
        );
    }

    #[test]
    fn test_status_patch_body() {
        let body = serde_json::to_string(&StatusPatch { order_statuts: OrderStatus::Delivered }).unwrap();
        assert_eq!(body, r#"{"order_statuts":"Livrée"}"#);
    }
}
