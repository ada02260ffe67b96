pub mod settings;

pub use settings::{StreamSettings, load_settings, save_settings};
