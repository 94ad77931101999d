//! Idempotent provisioning matcher
//!
//! The reuse-or-create decision: look up instances a previous identical
//! request created (correlated by the reserved idempotency tag) and decide
//! whether one of them still satisfies the request. Matching is strict
//! equality on every compared attribute, including the full tag set; one
//! mismatched field disqualifies a candidate.
//!
//! The matcher holds no state beyond the injected client and the request,
//! performs one remote read per lookup, and never retries: provider errors
//! propagate unmodified to the caller.

use crate::error::Result;
use crate::instance::{MonitoringState, ObservedInstance};
use crate::provider::{CloudProviderClient, TagFilter};
use crate::request::ProvisioningRequest;
use tracing::{debug, info};

/// Decides whether a prior instance fulfils a provisioning request
pub struct ProvisioningMatcher<C> {
    client: C,
    request: ProvisioningRequest,
}

impl<C: CloudProviderClient> ProvisioningMatcher<C> {
    pub fn new(client: C, request: ProvisioningRequest) -> Self {
        Self { client, request }
    }

    /// The request this matcher decides for.
    pub fn request(&self) -> &ProvisioningRequest {
        &self.request
    }

    /// Fetch instances created by a previous run of the request with the
    /// given idempotency key.
    ///
    /// Issues exactly one provider query, filtered server-side on the
    /// reserved idempotency tag and unrestricted by region. The provider's
    /// list is returned unmodified; an empty result is normal, not an error.
    pub async fn load_running_instances(
        &self,
        idempotency_id: &str,
    ) -> Result<Vec<ObservedInstance>> {
        let filter = TagFilter::idempotency(idempotency_id);
        debug!(
            provider = self.client.name(),
            tag_key = %filter.key,
            tag_value = %filter.value,
            "Looking up previously provisioned instances"
        );

        let instances = self.client.list_instances(None, filter).await?;
        info!(
            provider = self.client.name(),
            count = instances.len(),
            "Idempotency lookup complete"
        );
        Ok(instances)
    }

    /// Decide whether an observed instance satisfies the request.
    ///
    /// Pure and side-effect-free: true only when every compared attribute
    /// is equal. A candidate must carry exactly one security group; zero or
    /// several never fulfil a single-group request.
    pub fn fulfils_request(&self, instance: &ObservedInstance) -> bool {
        let request = &self.request;

        let group = match instance.security_groups.as_slice() {
            [group] => group,
            groups => {
                debug!(
                    instance_id = %instance.instance_id,
                    group_count = groups.len(),
                    "Candidate rejected: expected exactly one security group"
                );
                return false;
            }
        };

        let checks = [
            ("key_name", instance.key_name == request.key_name),
            (
                "security_group_name",
                group.group_name == request.security_group_name,
            ),
            (
                "security_group_id",
                group.group_id == request.security_group_id,
            ),
            ("region", instance.region == request.region),
            (
                "availability_zone",
                instance.availability_zone == request.availability_zone,
            ),
            (
                "instance_type",
                instance.instance_type == request.instance_type,
            ),
            ("image_id", instance.image_id == request.image_id),
            (
                "monitoring",
                instance.monitoring == MonitoringState::from_enabled(request.monitoring_enabled),
            ),
            ("kernel_id", instance.kernel_id == request.kernel_id),
            ("ramdisk_id", instance.ramdisk_id == request.ramdisk_id),
            ("tags", instance.tags == request.tags),
        ];

        for (field, matched) in checks {
            if !matched {
                debug!(
                    instance_id = %instance.instance_id,
                    field,
                    "Candidate rejected: attribute mismatch"
                );
                return false;
            }
        }

        true
    }

    /// Load prior instances for the key and return the first that fulfils
    /// the request, if any.
    pub async fn find_reusable(&self, idempotency_id: &str) -> Result<Option<ObservedInstance>> {
        let instances = self.load_running_instances(idempotency_id).await?;
        let reusable = instances
            .into_iter()
            .find(|instance| self.fulfils_request(instance));

        match &reusable {
            Some(instance) => info!(
                instance_id = %instance.instance_id,
                "Reusing previously provisioned instance"
            ),
            None => info!("No reusable instance found, new provisioning required"),
        }

        Ok(reusable)
    }
}
