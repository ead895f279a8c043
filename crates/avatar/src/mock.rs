//! Mock avatar service implementation
//!
//! Deterministic responses for testing: addresses registered via
//! `with_avatar` resolve to their URL, everything else resolves to
//! absent. `failing()` builds a service whose lookups always error, for
//! exercising the best-effort degradation path.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{AvatarError, AvatarService};

/// Mock avatar service for testing
#[derive(Debug, Default)]
pub struct MockAvatarService {
    avatars: RwLock<HashMap<String, String>>,
    failing: bool,
}

impl MockAvatarService {
    /// Create a new mock avatar service with no registered avatars
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose lookups always fail
    pub fn failing() -> Self {
        Self {
            avatars: RwLock::new(HashMap::new()),
            failing: true,
        }
    }

    /// Register an avatar URL for an address
    pub fn with_avatar(self, email: &str, url: &str) -> Self {
        self.avatars
            .write()
            .expect("mock avatar lock poisoned")
            .insert(email.to_string(), url.to_string());
        self
    }
}

#[async_trait::async_trait]
impl AvatarService for MockAvatarService {
    async fn lookup(&self, email: &str) -> Result<Option<String>, AvatarError> {
        if self.failing {
            return Err(AvatarError::Configuration(
                "mock avatar service configured to fail".to_string(),
            ));
        }
        Ok(self
            .avatars
            .read()
            .expect("mock avatar lock poisoned")
            .get(email)
            .cloned())
    }
}
