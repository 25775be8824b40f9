pub mod data;
pub mod defaults;
pub mod io;
pub mod printing;

pub use data::{path_display, Config};
pub use defaults::{ChatSettings, SettingsOverrides, CONFIG_KEYS};
pub use io::ConfigError;
