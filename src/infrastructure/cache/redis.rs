use async_trait::async_trait;
use deadpool_redis::{Config as RedisConfig, Pool, Runtime};
use redis::AsyncCommands;

use crate::{errors::AuthError, repositories::token::TokenDenyList};

/// Builds the pool lazily; connections are only opened on first use.
pub fn create_redis_pool(url: &str) -> Option<Pool> {
    RedisConfig::from_url(url)
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| tracing::error!("Failed to create Redis pool: {}", e))
        .ok()
}

#[derive(Clone)]
pub struct RedisDenyList {
    pool: Pool,
}

impl RedisDenyList {
    pub fn new(pool: Pool) -> Self {
        RedisDenyList { pool }
    }

    async fn connection(&self) -> Result<deadpool_redis::Connection, AuthError> {
        self.pool
            .get()
            .await
            .map_err(|e| AuthError::RedisOperation(e.to_string()))
    }
}

#[async_trait]
impl TokenDenyList for RedisDenyList {
    async fn deny(&self, key: &str, ttl_seconds: u64) -> Result<(), AuthError> {
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(key, 1, ttl_seconds.max(1))
            .await
            .map_err(|e| AuthError::RedisOperation(e.to_string()))
    }

    async fn is_denied(&self, key: &str) -> Result<bool, AuthError> {
        let mut conn = self.connection().await?;
        conn.exists::<_, bool>(key)
            .await
            .map_err(|e| AuthError::RedisOperation(e.to_string()))
    }

    async fn ping(&self) -> Result<(), AuthError> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| AuthError::RedisOperation(e.to_string()))
    }
}
