pub mod file;
pub mod oauth;
