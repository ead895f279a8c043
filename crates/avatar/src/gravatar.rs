//! Gravatar avatar lookup
//!
//! Probes the Gravatar CDN for an image registered to the address. The
//! probe uses `d=404` so addresses without an image answer with 404
//! instead of a generated placeholder.

use sha2::{Digest, Sha256};

use crate::{AvatarError, AvatarService};

/// Gravatar-backed avatar service
#[derive(Debug, Clone)]
pub struct GravatarService {
    client: reqwest::Client,
    base_url: String,
}

impl GravatarService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Gravatar address digest: SHA-256 over the trimmed, lowercased address
    pub fn address_hash(email: &str) -> String {
        let normalized = email.trim().to_lowercase();
        hex::encode(Sha256::digest(normalized.as_bytes()))
    }

    fn avatar_url(&self, email: &str) -> String {
        format!("{}/avatar/{}", self.base_url, Self::address_hash(email))
    }
}

#[async_trait::async_trait]
impl AvatarService for GravatarService {
    async fn lookup(&self, email: &str) -> Result<Option<String>, AvatarError> {
        let url = self.avatar_url(email);

        let response = self
            .client
            .get(format!("{}?d=404", url))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(Some(url))
        } else {
            tracing::debug!(email, status = %response.status(), "No gravatar image for address");
            Ok(None)
        }
    }
}
