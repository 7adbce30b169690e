use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::account::errors::NotifierError;
use crate::config::DirectoryConfig;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Nickname;
use crate::domain::account::ports::DirectoryNotifier;

/// JSON body POSTed to the account directory when an account is created.
#[derive(Debug, Clone, Serialize)]
struct AccountCreatedBody<'a> {
    email: &'a str,
    nickname: &'a str,
}

/// [DirectoryNotifier] that announces new accounts to the external account
/// directory over HTTP. The request timeout is deliberately short; callers
/// treat any failure as ignorable.
pub struct HttpDirectoryNotifier {
    client: Client,
    endpoint: String,
}

impl HttpDirectoryNotifier {
    pub fn new(config: &DirectoryConfig) -> Result<Self, anyhow::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.url.clone(),
        })
    }
}

#[async_trait]
impl DirectoryNotifier for HttpDirectoryNotifier {
    async fn account_created(
        &self,
        email: &EmailAddress,
        nickname: &Nickname,
    ) -> Result<(), NotifierError> {
        let body = AccountCreatedBody {
            email: email.as_str(),
            nickname: nickname.as_str(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifierError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifierError::Rejected {
                status: response.status().as_u16(),
            });
        }

        tracing::debug!(endpoint = %self.endpoint, email = %email, "Account directory notified");

        Ok(())
    }
}
