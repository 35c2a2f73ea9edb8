pub mod relay;

pub use relay::{ConfigError, RelayConfig};
