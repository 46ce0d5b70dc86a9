pub mod catalog_service;
pub mod mail_service;
pub mod order_service;
pub mod user_service;

pub use mail_service::{MailRelay, SmtpMailRelay};
