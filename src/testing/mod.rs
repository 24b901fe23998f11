use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::{
    AppConfig, BasicAuthConfig, DatabaseConfig, Environment, SecurityConfig, ServerConfig,
};
use crate::database::{DatabaseError, FeedbackRecord, FeedbackStore};

pub const TEST_USERNAME: &str = "feedback-admin";
pub const TEST_PASSWORD: &str = "correct horse battery staple";
pub const TEST_BODY_LIMIT: usize = 16 * 1024;

/// Configuration that never touches the process environment
pub fn test_config() -> AppConfig {
    AppConfig {
        environment: Environment::Development,
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_request_size_bytes: TEST_BODY_LIMIT,
        },
        auth: BasicAuthConfig {
            username: TEST_USERNAME.to_string(),
            password: TEST_PASSWORD.to_string(),
        },
        database: DatabaseConfig {
            name: "feedback_test".to_string(),
            user: "feedback".to_string(),
            password: "feedback".to_string(),
            host: "127.0.0.1".to_string(),
            port: DatabaseConfig::DEFAULT_PORT,
            max_connections: 1,
            connection_timeout: 1,
        },
        security: SecurityConfig {
            enable_cors: false,
            cors_origins: Vec::new(),
        },
    }
}

/// In-memory store that records every insert attempt
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<FeedbackRecord>>,
    insert_calls: AtomicUsize,
    fail: bool,
}

impl MemoryStore {
    /// A store whose every operation fails like an unreachable database
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<FeedbackRecord> {
        self.rows.lock().unwrap().clone()
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedbackStore for MemoryStore {
    async fn insert(&self, record: &FeedbackRecord) -> Result<(), DatabaseError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        self.rows.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        if self.fail {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}
