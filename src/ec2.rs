//! EC2-backed provider client
//!
//! Wraps an externally constructed `aws_sdk_ec2::Client`: credential and
//! endpoint setup stay with the caller, this module only translates the
//! provider contract into `DescribeInstances` calls and maps the response
//! through the explicit instance mapper.

use crate::error::{ProvmatchError, Result};
use crate::instance::{from_ec2_instance, ObservedInstance};
use crate::provider::{CloudProviderClient, TagFilter};
use async_trait::async_trait;
use aws_sdk_ec2::types::Filter;
use aws_sdk_ec2::Client as Ec2Client;
use tracing::debug;

/// `CloudProviderClient` implementation over the EC2 SDK
pub struct Ec2ProviderClient {
    client: Ec2Client,
    region: Option<String>,
}

impl Ec2ProviderClient {
    /// Wrap an already-configured EC2 client.
    ///
    /// The client's resolved region is recorded so mapped instances can
    /// report where they were observed.
    pub fn new(client: Ec2Client) -> Self {
        let region = client.config().region().map(|r| r.as_ref().to_string());
        Self { client, region }
    }
}

#[async_trait]
impl CloudProviderClient for Ec2ProviderClient {
    fn name(&self) -> &'static str {
        "aws"
    }

    /// List instances carrying the given tag.
    ///
    /// The tag filter is applied server-side as `tag:<key>`. EC2 clients
    /// are bound to one endpoint, so there is no server-side region filter:
    /// a requested region is applied to the mapped result instead, and
    /// `None` returns everything the endpoint can see.
    async fn list_instances(
        &self,
        region: Option<String>,
        filter: TagFilter,
    ) -> Result<Vec<ObservedInstance>> {
        debug!(
            tag_key = %filter.key,
            tag_value = %filter.value,
            "Describing instances by tag"
        );

        let response = self
            .client
            .describe_instances()
            .filters(
                Filter::builder()
                    .name(format!("tag:{}", filter.key))
                    .values(filter.value.clone())
                    .build(),
            )
            .send()
            .await
            .map_err(|e| ProvmatchError::CloudProvider {
                provider: "aws".to_string(),
                message: format!("Failed to describe instances: {}", e),
                source: Some(Box::new(e)),
            })?;

        let observed_region = self.region.clone().unwrap_or_default();
        let mut instances: Vec<ObservedInstance> = response
            .reservations()
            .iter()
            .flat_map(|r| r.instances())
            .map(|instance| from_ec2_instance(instance, &observed_region))
            .collect();

        if let Some(requested) = region {
            instances.retain(|instance| instance.region == requested);
        }

        Ok(instances)
    }
}
