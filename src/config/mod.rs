pub mod traits;
pub mod process;
pub mod logging;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use process::ProcessConfig;
pub use logging::LoggingConfig;
pub use traits::ConfigSection;
