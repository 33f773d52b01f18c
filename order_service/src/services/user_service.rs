// order_service/src/services/user_service.rs

//! Existence checks against the user service.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, StatusCode};
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
  /// Succeeds only when the user service reports the user as found.
  async fn ensure_user_exists(&self, user_id: i32) -> Result<()>;
}

/// `UserDirectory` backed by `GET {base_url}/api/users/{id}`.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
  client: Client,
  base_url: String,
}

impl HttpUserDirectory {
  pub fn new(client: Client, base_url: impl Into<String>) -> Self {
    Self {
      client,
      base_url: base_url.into(),
    }
  }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
  #[instrument(name = "user_service::ensure_user_exists", skip(self), err(Display))]
  async fn ensure_user_exists(&self, user_id: i32) -> Result<()> {
    let url = format!("{}/api/users/{}", self.base_url, user_id);

    let response = self.client.get(&url).send().await.map_err(|e| {
      warn!(%url, error = %e, "User service request failed.");
      AppError::UpstreamUnavailable("Failed to contact user service".to_string())
    })?;

    let status = response.status();
    if status != StatusCode::OK {
      return Err(AppError::UpstreamNotFound {
        message: format!("User with ID {} not found", user_id),
        status: status.as_u16(),
      });
    }

    info!("User validated.");
    Ok(())
  }
}
