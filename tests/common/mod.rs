#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::StatusCode;

pub const USERNAME: &str = "itest-user";
pub const PASSWORD: &str = "itest-pass";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // The database points at a closed port: everything up to the insert
        // works, and the insert itself fails fast.
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_feedback-api"));
        cmd.arg("--env-file")
            .arg("target/.env.feedback.absent")
            .env("FEEDBACK_API_HOST", "127.0.0.1")
            .env("FEEDBACK_API_PORT", port.to_string())
            .env("BASIC_AUTH_USERNAME", USERNAME)
            .env("BASIC_AUTH_PASSWORD", PASSWORD)
            .env("POSTGRES_DB", "feedback")
            .env("POSTGRES_USER", "feedback")
            .env("POSTGRES_PASSWORD", "feedback")
            .env("POSTGRES_HOST", "127.0.0.1")
            .env("POSTGRES_PORT", "1")
            .env("DATABASE_CONNECTION_TIMEOUT", "1")
            .env_remove("APP_ENV")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline { break; }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Database is unreachable on purpose, so degraded counts as up
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn feedback_url(&self) -> String {
        format!("{}/api/feedback", self.base_url)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(15)).await?;
    Ok(server)
}

pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}
