mod loader;

pub use loader::{default_config_path, load_settings, ConfigError};
