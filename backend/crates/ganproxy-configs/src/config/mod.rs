pub mod defaults;
mod loader;
mod types;

pub use loader::{ConfigSource, ENV_CONFIG_FILE, ENV_EMBEDDED_CONFIG};
pub use types::*;
