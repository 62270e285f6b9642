use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{ParkError, ParkResult};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[command(flatten)]
    #[serde(default)]
    pub api: ApiParams,
    #[command(flatten)]
    #[serde(default)]
    pub layout: LayoutParams,
    #[command(flatten)]
    #[serde(default)]
    pub notify: NotifyParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiParams {
    /// Base URL of the parking backend
    #[arg(long, default_value = "http://localhost:8080")]
    pub api_url: String,
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Default for ApiParams {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiParams {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Proportions of the spot grid. Everything is relative to the observed
/// container or the loaded background image, never to the window.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    #[arg(long, default_value_t = 9)]
    pub column_count: usize,
    // Gutter = container width / lane_divisor
    #[arg(long, default_value_t = 19.0)]
    pub lane_divisor: f32,
    // Spot size = image dimension / image_divisor
    #[arg(long, default_value_t = 10.0)]
    pub image_divisor: f32,
    #[arg(long, default_value_t = 19.0)]
    pub fallback_width_divisor: f32,
    #[arg(long, default_value_t = 6.0)]
    pub fallback_height_divisor: f32,
    // Share of container height kept free for the header/legend
    #[arg(long, default_value_t = 0.15)]
    pub header_fraction: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            column_count: 9,
            lane_divisor: 19.0,
            image_divisor: 10.0,
            fallback_width_divisor: 19.0,
            fallback_height_divisor: 6.0,
            header_fraction: 0.15,
        }
    }
}

impl LayoutParams {
    pub fn validate(&self) -> ParkResult<()> {
        if self.column_count == 0 {
            return Err(ParkError::Config("column_count must be at least 1".into()));
        }
        let divisors = [
            ("lane_divisor", self.lane_divisor),
            ("image_divisor", self.image_divisor),
            ("fallback_width_divisor", self.fallback_width_divisor),
            ("fallback_height_divisor", self.fallback_height_divisor),
        ];
        for (name, value) in divisors {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParkError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !(0.0..1.0).contains(&self.header_fraction) {
            return Err(ParkError::Config(format!(
                "header_fraction must be in [0, 1), got {}",
                self.header_fraction
            )));
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyParams {
    /// How long a toast stays visible
    #[arg(long, default_value_t = 500)]
    pub toast_ttl_ms: u64,
}

impl Default for NotifyParams {
    fn default() -> Self {
        Self { toast_ttl_ms: 500 }
    }
}

impl NotifyParams {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }
}

impl AppConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ParkResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ParkError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.layout.validate()?;
        Ok(config)
    }

    /// Copies every argument the user typed explicitly on top of `self`.
    /// Defaults filled in by clap never override file values.
    pub fn merge_from_cli(&mut self, cli: &AppConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident, $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(api, api_url);
        update_if_present!(api, timeout_secs);

        update_if_present!(layout, column_count);
        update_if_present!(layout, lane_divisor);
        update_if_present!(layout, image_divisor);
        update_if_present!(layout, fallback_width_divisor);
        update_if_present!(layout, fallback_height_divisor);
        update_if_present!(layout, header_fraction);

        update_if_present!(notify, toast_ttl_ms);
    }
}
