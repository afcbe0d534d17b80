pub mod config;
pub mod resize_config;

pub use config::AppConfig;
pub use resize_config::{ModeSetting, ResizeConfig};
