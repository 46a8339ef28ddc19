use std::net::IpAddr;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tokio::sync::Mutex;

/// Detected zones are kept for a day.
pub const CACHE_TTL_SECS: u64 = 86_400;

/// Upper bound on a single cache read or write, connecting included.
pub const CACHE_OP_TIMEOUT: Duration = Duration::from_secs(1);

pub fn cache_key(ip: IpAddr) -> String {
    format!("timezone_{ip}")
}

#[async_trait]
pub trait TimezoneCache: Send + Sync {
    async fn get(&self, ip: IpAddr) -> Result<Option<String>>;
    async fn put(&self, ip: IpAddr, timezone: &str) -> Result<()>;
}

/// Redis-backed cache sharing one multiplexed connection across requests.
///
/// The connection is opened on first use, so start-up does not depend on
/// Redis being reachable. A failed command drops it and the next call
/// reconnects.
pub struct RedisTimezoneCache {
    client: redis::Client,
    conn: Mutex<Option<MultiplexedConnection>>,
}

impl RedisTimezoneCache {
    pub fn new(client: redis::Client) -> Self {
        Self {
            client,
            conn: Mutex::new(None),
        }
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        let mut slot = self.conn.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }
        let conn = self.client.get_multiplexed_async_connection().await?;
        *slot = Some(conn.clone());
        Ok(conn)
    }

    async fn reset(&self) {
        self.conn.lock().await.take();
    }
}

#[async_trait]
impl TimezoneCache for RedisTimezoneCache {
    async fn get(&self, ip: IpAddr) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        match conn.get::<_, Option<String>>(cache_key(ip)).await {
            Ok(cached) => Ok(cached),
            Err(e) => {
                self.reset().await;
                Err(e.into())
            }
        }
    }

    async fn put(&self, ip: IpAddr, timezone: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        if let Err(e) = conn
            .set_ex::<_, _, ()>(cache_key(ip), timezone, CACHE_TTL_SECS)
            .await
        {
            self.reset().await;
            return Err(e.into());
        }
        Ok(())
    }
}

/// In-process cache for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryTimezoneCache {
    pub entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
#[async_trait]
impl TimezoneCache for MemoryTimezoneCache {
    async fn get(&self, ip: IpAddr) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(&cache_key(ip)).cloned())
    }

    async fn put(&self, ip: IpAddr, timezone: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(cache_key(ip), timezone.to_string());
        Ok(())
    }
}
