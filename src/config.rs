use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub provisioning: ProvisioningConfig,
}

/// Default request fields used when building a `ProvisioningRequest` from
/// configuration rather than from caller-supplied values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisioningConfig {
    pub region: String,
    pub availability_zone: Option<String>,
    pub instance_type: Option<String>,
    pub image_id: Option<String>,
    pub key_name: Option<String>,
    pub security_group_name: Option<String>,
    pub security_group_id: Option<String>,
    #[serde(default)]
    pub monitoring_enabled: bool,
    pub kernel_id: Option<String>,
    pub ramdisk_id: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provisioning: ProvisioningConfig {
                region: "us-east-1".to_string(),
                availability_zone: None,
                instance_type: Some("t3.medium".to_string()),
                image_id: None,
                key_name: None,
                security_group_name: None,
                security_group_id: None,
                monitoring_enabled: false,
                kernel_id: None,
                ramdisk_id: None,
                tags: HashMap::new(),
            },
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .provmatch.toml in current dir, then ~/.config/provmatch/config.toml
            let local = PathBuf::from(".provmatch.toml");
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("provmatch").join("config.toml"))
                    .unwrap_or_else(|| PathBuf::from(".provmatch.toml"))
            }
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}
