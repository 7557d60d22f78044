pub mod secret_store;
pub mod security_config;

pub use security_config::SecurityConfig;
