use serde::{Deserialize, Serialize};

const DEFAULT_LOGO_URL: &str = "https://raw.githubusercontent.com/Romyse226/mon-dashboard-livraison/3fe7b8570c28a48b298698ae7e6f8793f0add98d/mon%20logo%20mava.png";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_key: String,
    pub orders_table: String,
    pub country_code: String,
    pub enable_logging: bool,
    pub permission_poll_seconds: u32,
    pub realtime_heartbeat_seconds: u32,
    pub error_banner_ms: u32,
    pub logo_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_key: String::new(),
            orders_table: "orders".to_string(),
            country_code: "225".to_string(),
            enable_logging: true,
            permission_poll_seconds: 10,
            realtime_heartbeat_seconds: 30,
            error_banner_ms: 4000,
            logo_url: DEFAULT_LOGO_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            supabase_url: option_env!("SUPABASE_URL")
                .unwrap_or("")
                .trim_end_matches('/')
                .to_string(),
            supabase_key: option_env!("SUPABASE_KEY").unwrap_or("").to_string(),
            orders_table: option_env!("ORDERS_TABLE")
                .unwrap_or("orders").to_string(),
            country_code: option_env!("COUNTRY_CODE")
                .unwrap_or("225").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            permission_poll_seconds: option_env!("PERMISSION_POLL_SECONDS")
                .unwrap_or("10").parse().unwrap_or(defaults.permission_poll_seconds),
            realtime_heartbeat_seconds: option_env!("REALTIME_HEARTBEAT_SECONDS")
                .unwrap_or("30").parse().unwrap_or(defaults.realtime_heartbeat_seconds),
            error_banner_ms: option_env!("ERROR_BANNER_MS")
                .unwrap_or("4000").parse().unwrap_or(defaults.error_banner_ms),
            logo_url: option_env!("LOGO_URL")
                .map(|s| s.to_string())
                .unwrap_or(defaults.logo_url),
        }
    }

    /// URL base de la API REST (PostgREST)
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url)
    }

    /// URL del websocket de Realtime (protocolo Phoenix vsn 1.0.0)
    pub fn realtime_url(&self) -> String {
        let ws_base = if let Some(rest) = self.supabase_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.supabase_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            self.supabase_url.clone()
        };
        format!("{}/realtime/v1/websocket?apikey={}&vsn=1.0.0", ws_base, self.supabase_key)
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
