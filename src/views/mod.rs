pub mod app;
pub mod login;
pub mod orders;
pub mod order_card;
pub mod banners;

pub use app::render_app;
pub use login::render_login;
pub use orders::render_orders;
pub use order_card::render_order_card;
pub use banners::{render_error_banner, render_permission_banner};
