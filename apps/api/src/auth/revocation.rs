use async_trait::async_trait;
use redis::aio::ConnectionManager;

/// Signed-out sessions, remembered until they would have expired anyway.
#[async_trait]
pub trait SessionRevocations: Send + Sync {
    async fn revoke(&self, token_id: &str, ttl_secs: u64) -> Result<(), redis::RedisError>;
    async fn is_revoked(&self, token_id: &str) -> Result<bool, redis::RedisError>;
}

/// Backed by one shared, auto-reconnecting connection; each call clones the handle.
pub struct RedisRevocations {
    conn: ConnectionManager,
}

impl RedisRevocations {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

fn revocation_key(token_id: &str) -> String {
    format!("session:revoked:{token_id}")
}

#[async_trait]
impl SessionRevocations for RedisRevocations {
    async fn revoke(&self, token_id: &str, ttl_secs: u64) -> Result<(), redis::RedisError> {
        if ttl_secs == 0 {
            return Ok(());
        }
        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(revocation_key(token_id))
            .arg(1)
            .arg("EX")
            .arg(ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, redis::RedisError> {
        let mut conn = self.conn.clone();
        let exists: bool = redis::cmd("EXISTS")
            .arg(revocation_key(token_id))
            .query_async(&mut conn)
            .await?;
        Ok(exists)
    }
}
