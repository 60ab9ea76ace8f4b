pub mod order_gateway;
pub mod api_client;
pub mod session_service;
pub mod notification_service;
pub mod realtime_service;

pub use order_gateway::OrderGateway;
pub use api_client::SupabaseClient;
pub use session_service::{SessionStore, UrlBar, BrowserUrlBar};
pub use notification_service::{NotificationPlatform, BrowserNotifications};
pub use realtime_service::{RealtimeSubscriber, RealtimeTransport, RealtimeSubscription, SupabaseRealtime, InsertHandler};
