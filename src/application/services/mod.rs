mod email_service;
mod storage_service;

pub use email_service::EmailService;
pub use storage_service::StorageService;
