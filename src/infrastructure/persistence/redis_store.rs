//! Redis-backed record store implementation.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::info;

use crate::domain::repositories::RecordStore;
use crate::error::AppError;

/// Batch size hint for SCAN iterations.
const SCAN_COUNT: usize = 100;

/// Redis implementation of the record store.
///
/// Uses `ConnectionManager` for automatic reconnection and connection reuse.
/// Values are opaque byte strings; prefix enumeration is a cursored
/// `SCAN MATCH` over a glob-escaped prefix.
pub struct RedisStore {
    client: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        info!("Connecting to Redis record store");

        let client = Client::open(redis_url)
            .map_err(|e| AppError::internal(format!("Failed to create Redis client: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::internal(format!("Failed to connect to Redis: {e}")))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| AppError::internal(format!("Redis PING failed: {e}")))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl RecordStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        let mut conn = self.client.clone();

        conn.get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(|e| AppError::internal(format!("Redis GET failed: {e}")))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), AppError> {
        let mut conn = self.client.clone();

        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| AppError::internal(format!("Redis SET failed: {e}")))
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        let mut conn = self.client.clone();

        conn.del::<_, i64>(key)
            .await
            .map(|_| ())
            .map_err(|e| AppError::internal(format!("Redis DEL failed: {e}")))
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, AppError> {
        let mut conn = self.client.clone();
        let pattern = format!("{}*", escape_match_pattern(prefix));

        let mut keys = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await
                .map_err(|e| AppError::internal(format!("Redis SCAN failed: {e}")))?;

            keys.extend(batch);

            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(keys)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}

/// Escapes glob metacharacters so a literal prefix matches only itself.
///
/// Owner ids come from email local parts and may contain `*`, `?`, or `[`,
/// all of which are special inside a `MATCH` pattern.
fn escape_match_pattern(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '^' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
