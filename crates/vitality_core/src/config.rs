use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::VitalityError;

pub const DEFAULT_MAX_VALUE: i32 = 100;
pub const DEFAULT_DAMAGE_STEP: i32 = 20;
pub const DEFAULT_HEAL_STEP: i32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VitalityConfig {
    #[serde(default)]
    pub vitality: StateConfig,
    #[serde(default)]
    pub presenter: PresenterConfig,
}

impl VitalityConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg = Self::from_toml(&data)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(cfg)
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        let cfg: VitalityConfig = toml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), VitalityError> {
        if self.vitality.max_value <= 0 {
            return Err(VitalityError::NonPositiveMax(self.vitality.max_value));
        }
        for (step, value) in [
            ("damage_step", self.presenter.damage_step),
            ("heal_step", self.presenter.heal_step),
        ] {
            if value <= 0 {
                return Err(VitalityError::NonPositiveStep { step, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    #[serde(default = "default_max_value")]
    pub max_value: i32,
    /// Defaults to `max_value` when omitted.
    #[serde(default)]
    pub starting_value: Option<i32>,
}

impl StateConfig {
    pub fn starting_value(&self) -> i32 {
        self.starting_value.unwrap_or(self.max_value)
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            max_value: DEFAULT_MAX_VALUE,
            starting_value: None,
        }
    }
}

/// Amounts applied by the damage and heal buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenterConfig {
    #[serde(default = "default_damage_step")]
    pub damage_step: i32,
    #[serde(default = "default_heal_step")]
    pub heal_step: i32,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            damage_step: DEFAULT_DAMAGE_STEP,
            heal_step: DEFAULT_HEAL_STEP,
        }
    }
}

fn default_max_value() -> i32 {
    DEFAULT_MAX_VALUE
}

fn default_damage_step() -> i32 {
    DEFAULT_DAMAGE_STEP
}

fn default_heal_step() -> i32 {
    DEFAULT_HEAL_STEP
}
