use std::str::FromStr;
use std::time::Duration;

use sqlx::{mysql::{MySqlConnectOptions, MySqlPoolOptions}, MySqlPool};

/// Connect to MySQL, retrying once a second while the server comes up.
pub async fn connect_with_retry(database_url: &str, max_retries: u32) -> Result<MySqlPool, sqlx::Error> {
    let connect_options = MySqlConnectOptions::from_str(database_url)?;
    let mut retries = 0;

    loop {
        match MySqlPoolOptions::new()
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(connect_options.clone())
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) if retries < max_retries => {
                retries += 1;
                tracing::warn!(attempt = retries, error = %e, "MySQL not ready yet");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            Err(e) => {
                tracing::error!(max_retries, error = %e, "giving up on MySQL connection");
                return Err(e);
            }
        }
    }
}
