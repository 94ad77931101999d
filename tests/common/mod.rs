//! Shared fixtures for integration tests

#![allow(dead_code)] // Each test binary uses a subset of these fixtures

use async_trait::async_trait;
use provmatch::instance::{InstanceState, MonitoringState, SecurityGroupRef};
use provmatch::{CloudProviderClient, ObservedInstance, ProvisioningRequest, Result, TagFilter};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A request with every compared field populated.
pub fn sample_request() -> ProvisioningRequest {
    ProvisioningRequest {
        key_name: "deploy-key".to_string(),
        security_group_name: "default".to_string(),
        security_group_id: "sg-0123456789abcdef0".to_string(),
        region: "us-east-1".to_string(),
        availability_zone: "us-east-1a".to_string(),
        instance_type: "m1.test".to_string(),
        image_id: "ami-test".to_string(),
        monitoring_enabled: false,
        kernel_id: Some("aki-12345678".to_string()),
        ramdisk_id: Some("ari-12345678".to_string()),
        tags: HashMap::from([("env".to_string(), "test".to_string())]),
    }
}

/// An observed instance whose attributes exactly mirror the request.
pub fn mirrored_instance(request: &ProvisioningRequest) -> ObservedInstance {
    ObservedInstance {
        instance_id: "i-0123456789abcdef0".to_string(),
        state: InstanceState::Running,
        key_name: request.key_name.clone(),
        security_groups: vec![SecurityGroupRef {
            group_id: request.security_group_id.clone(),
            group_name: request.security_group_name.clone(),
        }],
        region: request.region.clone(),
        availability_zone: request.availability_zone.clone(),
        instance_type: request.instance_type.clone(),
        image_id: request.image_id.clone(),
        monitoring: MonitoringState::from_enabled(request.monitoring_enabled),
        kernel_id: request.kernel_id.clone(),
        ramdisk_id: request.ramdisk_id.clone(),
        launch_time: None,
        tags: request.tags.clone(),
    }
}

/// Client returning a fixed list and recording every query it receives.
///
/// Clone it before handing one copy to the matcher: the recorded calls are
/// shared, so the retained copy can be inspected afterwards.
#[derive(Clone)]
pub struct RecordingClient {
    instances: Vec<ObservedInstance>,
    pub calls: Arc<Mutex<Vec<(Option<String>, TagFilter)>>>,
}

impl RecordingClient {
    pub fn returning(instances: Vec<ObservedInstance>) -> Self {
        Self {
            instances,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CloudProviderClient for RecordingClient {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn list_instances(
        &self,
        region: Option<String>,
        filter: TagFilter,
    ) -> Result<Vec<ObservedInstance>> {
        self.calls.lock().unwrap().push((region, filter));
        Ok(self.instances.clone())
    }
}

/// Client failing every call with a transport error.
pub struct FailingClient;

#[async_trait]
impl CloudProviderClient for FailingClient {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn list_instances(
        &self,
        _region: Option<String>,
        _filter: TagFilter,
    ) -> Result<Vec<ObservedInstance>> {
        Err(provmatch::ProvmatchError::CloudProvider {
            provider: "stub".to_string(),
            message: "connection reset by peer".to_string(),
            source: None,
        })
    }
}

/// Client for tests that never reach the provider.
pub struct NullClient;

#[async_trait]
impl CloudProviderClient for NullClient {
    fn name(&self) -> &'static str {
        "null"
    }

    async fn list_instances(
        &self,
        _region: Option<String>,
        _filter: TagFilter,
    ) -> Result<Vec<ObservedInstance>> {
        Ok(Vec::new())
    }
}
