pub mod config;
pub mod prompt;
pub mod settings;

pub use config::{Config, config_path, load_config, save_config};
pub use prompt::prompt_password;
pub use settings::{Settings, validate_issue_key};
