pub mod order;
pub mod session;
pub mod notification;
pub mod realtime;

pub use order::{Order, OrderId, OrderStatus, OrderPartition, Tab};
pub use session::{VendorPhone, Theme};
pub use notification::PermissionState;
pub use realtime::{PhoenixMessage, RealtimeFilter};
