mod analyze;
mod auth;
mod config_cmd;
mod prompt;

pub use analyze::{AnalyzeCommand, DetectCommand, PingCommand};
pub use auth::AuthCommand;
pub use config_cmd::ConfigCommand;

use clap::ValueEnum;

#[derive(Debug, Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
