use std::path::Path;

use serde::{Deserialize, Serialize};

use vitrine_core::{ErrorInfo, VitrineError};

/// Tunable parameters for home feed assembly.
///
/// Everything here shapes pagination, rail sizes and pool caps. The placement
/// rules themselves (the four-item minimum for campaign tiles and the
/// one-tile-per-ten-items density) are part of the layout contract and are
/// deliberately not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Items shown per section before the first "show more".
    #[serde(default = "default_initial_visible")]
    pub initial_visible: usize,
    /// Items added by each "show more".
    #[serde(default = "default_load_step")]
    pub load_step: usize,
    /// Products sampled into each campaign showcase.
    #[serde(default = "default_showcase_size")]
    pub showcase_size: usize,
    /// Campaigns drawn from the promo space pool.
    #[serde(default = "default_campaign_pool_cap")]
    pub campaign_pool_cap: usize,
    /// Products kept per editorial collection.
    #[serde(default = "default_editorial_group_cap")]
    pub editorial_group_cap: usize,
    /// Editorial collections kept per feed.
    #[serde(default = "default_editorial_groups")]
    pub editorial_groups: usize,
    /// Products kept in the personalized rail.
    #[serde(default = "default_recommendation_cap")]
    pub recommendation_cap: usize,
}

fn default_initial_visible() -> usize {
    20
}

fn default_load_step() -> usize {
    30
}

fn default_showcase_size() -> usize {
    6
}

fn default_campaign_pool_cap() -> usize {
    8
}

fn default_editorial_group_cap() -> usize {
    8
}

fn default_editorial_groups() -> usize {
    4
}

fn default_recommendation_cap() -> usize {
    8
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_visible: default_initial_visible(),
            load_step: default_load_step(),
            showcase_size: default_showcase_size(),
            campaign_pool_cap: default_campaign_pool_cap(),
            editorial_group_cap: default_editorial_group_cap(),
            editorial_groups: default_editorial_groups(),
            recommendation_cap: default_recommendation_cap(),
        }
    }
}

impl FeedConfig {
    /// Checks that pagination can make progress.
    pub fn validate(&self) -> Result<(), VitrineError> {
        if self.initial_visible == 0 {
            return Err(VitrineError::Config(
                ErrorInfo::new("config.zero_field", "initial_visible must be positive")
                    .with_hint("sections would render empty and never page"),
            ));
        }
        if self.load_step == 0 {
            return Err(VitrineError::Config(
                ErrorInfo::new("config.zero_field", "load_step must be positive")
                    .with_hint("show more would never reveal further items"),
            ));
        }
        Ok(())
    }

    /// Parses a config from YAML text and validates it.
    pub fn from_yaml_str(text: &str) -> Result<Self, VitrineError> {
        let config: Self = serde_yaml::from_str(text)
            .map_err(|err| VitrineError::Config(ErrorInfo::new("config.parse", err.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a config file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, VitrineError> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            VitrineError::Config(
                ErrorInfo::new("config.read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&text)
    }
}
