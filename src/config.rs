//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`VERSOR_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::f64::consts::FRAC_PI_2;
use std::path::Path;

use versor_math::{Element, Field, QuaternionDescriptor};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersorConfig {
    /// Interpolation path between two rotations
    #[serde(default)]
    pub interpolation: InterpolationConfig,
    /// Random rotation sampling
    #[serde(default)]
    pub random: RandomConfig,
    /// Output formatting
    #[serde(default)]
    pub display: DisplayConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl VersorConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`VERSOR_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // VERSOR_INTERPOLATION__STEPS=8 -> interpolation.steps = 8
        figment = figment.merge(Env::prefixed("VERSOR_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Interpolation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpolationConfig {
    /// Starting rotation (number, `[w, x, y, z]`, or named parts)
    pub start: QuaternionDescriptor,
    /// Final rotation
    pub end: QuaternionDescriptor,
    /// Number of rotations strictly between `start` and `end`
    pub steps: usize,
    /// Also print `start` and `end` themselves
    pub include_endpoints: bool,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            start: QuaternionDescriptor::Sequence(
                [1.0, 0.0, 0.0, 0.0].into_iter().map(Element::from).collect(),
            ),
            end: QuaternionDescriptor::named([
                ("axis", Field::from(vec![0.0, 0.0, 1.0])),
                ("angle", Field::from(FRAC_PI_2)),
            ]),
            steps: 4,
            include_endpoints: true,
        }
    }
}

/// Random sampling configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    /// Number of random rotations to print
    pub count: usize,
    /// Fixed seed for reproducible output; drawn from the OS when absent
    pub seed: Option<u64>,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Digits after the decimal point
    pub precision: usize,
    /// Append the rotation angle and axis to each quaternion
    pub show_axis_angle: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: 3,
            show_axis_angle: true,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
