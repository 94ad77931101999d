//! Provider-agnostic client contract for instance lookup
//!
//! The matcher never talks to a cloud SDK directly. It is handed a
//! `CloudProviderClient` and issues tag-filtered lookups through it, so the
//! decision logic stays testable against stub and mock clients while the
//! concrete EC2 client lives in `ec2.rs`.

use crate::error::Result;
use crate::instance::ObservedInstance;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reserved tag key correlating a provisioning request with the instances a
/// previous run of that request created.
pub const IDEMPOTENCY_TAG: &str = "ansible_idempotency_id";

/// Mint a fresh idempotency key for a new provisioning request.
pub fn new_idempotency_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Server-side tag filter handed to the provider client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    pub key: String,
    pub value: String,
}

impl TagFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Filter on the reserved idempotency tag.
    pub fn idempotency(id: &str) -> Self {
        Self::new(IDEMPOTENCY_TAG, id)
    }
}

/// Trait abstracting the one provider operation the matcher consumes.
///
/// `region` of `None` means the lookup is not restricted to a region.
/// Implementations must return an empty list (not an error) when nothing
/// matches the filter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CloudProviderClient: Send + Sync {
    /// Provider name (e.g., "aws")
    fn name(&self) -> &'static str;

    /// List instances carrying the given tag, optionally scoped to a region.
    async fn list_instances(
        &self,
        region: Option<String>,
        filter: TagFilter,
    ) -> Result<Vec<ObservedInstance>>;
}
