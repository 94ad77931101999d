//! Desired-state provisioning requests
//!
//! A `ProvisioningRequest` captures every attribute the matcher compares
//! against live instances. Requests are immutable once constructed: build
//! one directly, or derive one from the configuration layer with
//! `from_config`, then stamp the correlation tag with `with_idempotency_id`.

use crate::config::Config;
use crate::error::{ConfigError, ProvmatchError, Result};
use crate::provider::IDEMPOTENCY_TAG;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Desired state for one provisioned instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisioningRequest {
    pub key_name: String,
    pub security_group_name: String,
    pub security_group_id: String,
    pub region: String,
    pub availability_zone: String,
    pub instance_type: String,
    pub image_id: String,
    pub monitoring_enabled: bool,
    pub kernel_id: Option<String>,
    pub ramdisk_id: Option<String>,
    pub tags: HashMap<String, String>,
}

impl ProvisioningRequest {
    /// Build a request from configured provisioning defaults.
    ///
    /// Every field the matcher compares must be present; a config missing
    /// one fails here rather than producing a request that can never match.
    pub fn from_config(config: &Config) -> Result<Self> {
        let p = &config.provisioning;

        let require = |field: &str, value: &Option<String>| -> Result<String> {
            value
                .clone()
                .ok_or_else(|| ProvmatchError::Config(ConfigError::MissingField(field.to_string())))
        };

        let image_id = require("provisioning.image_id", &p.image_id)?;
        validate_image_id(&image_id)?;

        Ok(Self {
            key_name: require("provisioning.key_name", &p.key_name)?,
            security_group_name: require(
                "provisioning.security_group_name",
                &p.security_group_name,
            )?,
            security_group_id: require("provisioning.security_group_id", &p.security_group_id)?,
            region: p.region.clone(),
            availability_zone: require("provisioning.availability_zone", &p.availability_zone)?,
            instance_type: require("provisioning.instance_type", &p.instance_type)?,
            image_id,
            monitoring_enabled: p.monitoring_enabled,
            kernel_id: p.kernel_id.clone(),
            ramdisk_id: p.ramdisk_id.clone(),
            tags: p.tags.clone(),
        })
    }

    /// Stamp the reserved idempotency tag into the request's tag set.
    ///
    /// Instances created for this request carry the same tag, so the full
    /// tag-set comparison in the matcher includes the correlation key.
    pub fn with_idempotency_id(mut self, id: &str) -> Self {
        self.tags.insert(IDEMPOTENCY_TAG.to_string(), id.to_string());
        self
    }

    /// The idempotency key stamped on this request, if any.
    pub fn idempotency_id(&self) -> Option<&str> {
        self.tags.get(IDEMPOTENCY_TAG).map(String::as_str)
    }
}

/// Validate AMI ID format
///
/// Image IDs must start with "ami-" followed by alphanumeric characters.
pub fn validate_image_id(image_id: &str) -> Result<()> {
    if !image_id.starts_with("ami-") {
        return Err(ProvmatchError::Validation {
            field: "image_id".to_string(),
            reason: format!("Image ID must start with 'ami-', got: {}", image_id),
        });
    }

    let id_part = &image_id[4..];
    if id_part.is_empty() || !id_part.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ProvmatchError::Validation {
            field: "image_id".to_string(),
            reason: format!(
                "Image ID must contain only alphanumeric characters after 'ami-', got: {}",
                image_id
            ),
        });
    }

    Ok(())
}
