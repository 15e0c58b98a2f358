//! Redis client and connection management

use crate::config::RedisConfig;
use crate::utils::error::Result;
use redis::{Client, aio::MultiplexedConnection};
use tracing::{debug, info};

/// Redis client with a shared multiplexed connection
#[derive(Clone)]
pub struct RedisPool {
    client: Client,
    shared: MultiplexedConnection,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool").finish_non_exhaustive()
    }
}

impl RedisPool {
    /// Open a client and establish the shared connection
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        info!("Connecting to Redis");
        debug!("Redis URL: {}", Self::sanitize_url(&config.url));

        let client = Client::open(config.url.as_str())?;
        let shared = client.get_multiplexed_async_connection().await?;

        info!("Redis connection established");
        Ok(Self { client, shared })
    }

    /// Connection shared by producers
    pub fn connection(&self) -> MultiplexedConnection {
        self.shared.clone()
    }

    /// Fresh connection for callers that issue blocking commands
    pub async fn dedicated_connection(&self) -> Result<MultiplexedConnection> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        debug!("Performing Redis health check");
        let mut conn = self.connection();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        debug!("Redis health check passed");
        Ok(())
    }

    /// Hide credentials in a Redis URL for logging
    pub(crate) fn sanitize_url(url: &str) -> String {
        match (url.find("://"), url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
            }
            _ => url.to_string(),
        }
    }
}
