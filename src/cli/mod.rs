use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "feedback-api")]
#[command(about = "Authenticated feedback collection API")]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = ".env.feedback", help = "Secrets file loaded before reading the environment")]
    pub env_file: PathBuf,

    #[arg(long, help = "Bind address (overrides FEEDBACK_API_HOST)")]
    pub host: Option<String>,

    #[arg(long, help = "Listen port (overrides FEEDBACK_API_PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Create the feedback table if it does not exist, then serve")]
    pub init_schema: bool,
}

impl Cli {
    /// Command-line flags win over environment values
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
