pub mod settings;

pub use settings::{AppConfig, ClientSettings, ServerSettings};
