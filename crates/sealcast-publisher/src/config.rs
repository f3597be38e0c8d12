//! Publisher configuration.
//!
//! Produced by an external configuration loader and consumed once, when the
//! publisher is built. The presence of a [`SecurityConfig`] is what selects
//! the secure send strategy; its contents are carried for the key-distribution
//! collaborator and are not interpreted here.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::PublisherError;

/// Settings for one topic publisher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Topic the publisher is bound to
    pub topic: String,

    /// Security template; `None` publishes plaintext
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityConfig>,
}

impl PublisherConfig {
    /// Configuration for a plaintext publisher on `topic`.
    pub fn plain(topic: impl Into<String>) -> Self {
        Self { topic: topic.into(), security: None }
    }

    /// Configuration for an encrypting publisher on `topic`.
    pub fn secure(topic: impl Into<String>, security: SecurityConfig) -> Self {
        Self { topic: topic.into(), security: Some(security) }
    }

    /// Check the configuration before building a publisher.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the topic name is empty or only whitespace
    pub fn validate(&self) -> Result<(), PublisherError> {
        if self.topic.trim().is_empty() {
            return Err(PublisherError::InvalidConfig("topic name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Security template attached to a secure topic.
///
/// The publisher only checks that one is present. The security id sets tell
/// the key-distribution collaborator which peers may publish on, and receive
/// the session key for, this topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Name of the security template this topic uses
    pub template: String,

    /// Security ids allowed to publish on the topic
    #[serde(default)]
    pub publisher_ids: BTreeSet<u32>,

    /// Security ids allowed to receive the topic's session key
    #[serde(default)]
    pub subscriber_ids: BTreeSet<u32>,
}

impl SecurityConfig {
    /// Template with no id restrictions filled in yet.
    pub fn new(template: impl Into<String>) -> Self {
        Self { template: template.into(), ..Self::default() }
    }
}
