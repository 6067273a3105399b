use crate::error::{SeatForgeError, SfResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/generate-seating";

#[derive(Args, Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the persisted class blob
    #[arg(global = true, long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Endpoint of the seating generation service
    #[arg(global = true, long, default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// How strongly the generator should honour each kind of wish.
/// Opaque to us; forwarded with every request.
#[derive(Args, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    #[arg(long, default_value_t = 0.8)]
    pub medical: f32,
    #[arg(long, default_value_t = 0.4)]
    pub friends: f32,
    #[arg(long, default_value_t = 0.7)]
    pub enemies: f32,
    #[arg(long, default_value_t = 0.5)]
    pub preferences: f32,
    #[arg(long, default_value_t = 0.3)]
    pub fill: f32,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            medical: 0.8,
            friends: 0.4,
            enemies: 0.7,
            preferences: 0.5,
            fill: 0.3,
        }
    }
}

impl PriorityWeights {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SeatForgeError::Config(format!(
                "Failed to read weights file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Every weight must lie in `[0, 1]`.
    pub fn check_range(&self) -> SfResult<()> {
        let named = [
            ("medical", self.medical),
            ("friends", self.friends),
            ("enemies", self.enemies),
            ("preferences", self.preferences),
            ("fill", self.fill),
        ];

        for (name, value) in named {
            if !(0.0..=1.0).contains(&value) {
                return Err(SeatForgeError::Config(format!(
                    "priority '{}' must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Copies over only the weights the user typed on the command line,
    /// leaving file-loaded (or stored) values alone otherwise.
    pub fn merge_from_cli(&mut self, cli_weights: &PriorityWeights, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli_weights.$field;
                }
            };
        }

        update_if_present!(medical);
        update_if_present!(friends);
        update_if_present!(enemies);
        update_if_present!(preferences);
        update_if_present!(fill);
    }
}
