mod loader;
mod types;

pub use loader::{ConfigError, BASE_URL_ENV_VAR};
pub use types::ApiConfig;
