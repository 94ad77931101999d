//! Observed instance snapshots
//!
//! `ObservedInstance` is the provider's live view of a resource: the same
//! attribute shape as a `ProvisioningRequest` plus identity, lifecycle state,
//! and the full tag set. Instances are read-only snapshots populated by the
//! provider-response mapper; the matcher never mutates them.
//!
//! The mapper (`from_ec2_instance`) is the explicit replacement for reading
//! attributes dynamically off provider objects: every field the matcher
//! compares is extracted here, once, with absent SDK fields mapped to empty
//! values rather than panics.

use aws_sdk_ec2::types::Instance as Ec2Instance;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Instance lifecycle states as EC2 reports them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstanceState {
    Pending,
    Running,
    Stopping,
    Stopped,
    ShuttingDown,
    Terminated,
    Unknown,
}

/// Detailed monitoring state, string-mapped the way EC2 reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitoringState {
    Enabled,
    Disabled,
    Pending,
    Disabling,
    Unknown,
}

impl MonitoringState {
    /// Map a request's monitoring boolean onto the observed state it expects.
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            MonitoringState::Enabled
        } else {
            MonitoringState::Disabled
        }
    }
}

/// One security group attached to an observed instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroupRef {
    pub group_id: String,
    pub group_name: String,
}

/// The provider's live view of an instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedInstance {
    pub instance_id: String,
    pub state: InstanceState,
    pub key_name: String,
    pub security_groups: Vec<SecurityGroupRef>,
    pub region: String,
    pub availability_zone: String,
    pub instance_type: String,
    pub image_id: String,
    pub monitoring: MonitoringState,
    pub kernel_id: Option<String>,
    pub ramdisk_id: Option<String>,
    pub launch_time: Option<DateTime<Utc>>,
    pub tags: HashMap<String, String>,
}

/// Normalize an EC2 lifecycle state string
pub fn normalize_state(state_str: &str) -> InstanceState {
    match state_str.to_lowercase().as_str() {
        "pending" => InstanceState::Pending,
        "running" => InstanceState::Running,
        "stopping" => InstanceState::Stopping,
        "stopped" => InstanceState::Stopped,
        "shutting-down" => InstanceState::ShuttingDown,
        "terminated" => InstanceState::Terminated,
        _ => InstanceState::Unknown,
    }
}

/// Normalize an EC2 detailed-monitoring state string
pub fn normalize_monitoring(state_str: &str) -> MonitoringState {
    match state_str.to_lowercase().as_str() {
        "enabled" => MonitoringState::Enabled,
        "disabled" => MonitoringState::Disabled,
        "pending" => MonitoringState::Pending,
        "disabling" => MonitoringState::Disabling,
        _ => MonitoringState::Unknown,
    }
}

/// Convert an EC2 instance into an `ObservedInstance`
///
/// The region is supplied by the caller: `DescribeInstances` responses do
/// not carry it, the client's endpoint does.
pub fn from_ec2_instance(instance: &Ec2Instance, region: &str) -> ObservedInstance {
    let state = normalize_state(
        instance
            .state()
            .and_then(|s| s.name())
            .map(|s| s.as_str())
            .unwrap_or("unknown"),
    );

    let monitoring = normalize_monitoring(
        instance
            .monitoring()
            .and_then(|m| m.state())
            .map(|s| s.as_str())
            .unwrap_or("unknown"),
    );

    let security_groups: Vec<SecurityGroupRef> = instance
        .security_groups()
        .iter()
        .map(|group| SecurityGroupRef {
            group_id: group.group_id().unwrap_or_default().to_string(),
            group_name: group.group_name().unwrap_or_default().to_string(),
        })
        .collect();

    let tags: HashMap<String, String> = instance
        .tags()
        .iter()
        .filter_map(|tag| {
            tag.key()
                .zip(tag.value())
                .map(|(k, v)| (k.to_string(), v.to_string()))
        })
        .collect();

    let launch_time = instance
        .launch_time()
        .map(|lt| DateTime::<Utc>::from_timestamp(lt.secs(), 0).unwrap_or_else(Utc::now));

    ObservedInstance {
        instance_id: instance.instance_id().unwrap_or_default().to_string(),
        state,
        key_name: instance.key_name().unwrap_or_default().to_string(),
        security_groups,
        region: region.to_string(),
        availability_zone: instance
            .placement()
            .and_then(|p| p.availability_zone())
            .unwrap_or_default()
            .to_string(),
        instance_type: instance
            .instance_type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_default(),
        image_id: instance.image_id().unwrap_or_default().to_string(),
        monitoring,
        kernel_id: instance.kernel_id().map(|s| s.to_string()),
        ramdisk_id: instance.ramdisk_id().map(|s| s.to_string()),
        launch_time,
        tags,
    }
}
