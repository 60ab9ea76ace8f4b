pub mod dashboard_viewmodel;
pub mod notification_viewmodel;

pub use dashboard_viewmodel::DashboardViewModel;
pub use notification_viewmodel::{NotificationGate, PermissionBanner};
