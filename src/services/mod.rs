pub mod investment_service;
pub mod notification_service;
pub mod portfolio_service;
pub mod user_service;

pub use investment_service::InvestmentService;
pub use notification_service::{Notifier, Toast, ToastVariant};
pub use user_service::UserService;
