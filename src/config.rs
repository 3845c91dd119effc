use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::catalog;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
    #[serde(default = "default_reveal_answer_on_miss")]
    pub reveal_answer_on_miss: bool,
    /// Rows selected when the app opens.
    #[serde(default)]
    pub default_rows: Vec<String>,
}

fn default_theme() -> String {
    "sumi".to_string()
}
fn default_advance_delay_ms() -> u64 {
    800
}
fn default_reveal_answer_on_miss() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            advance_delay_ms: default_advance_delay_ms(),
            reveal_answer_on_miss: default_reveal_answer_on_miss(),
            default_rows: Vec::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("katadrill")
            .join("config.toml")
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    /// Clamp the delay to a positive value and drop row ids the catalog
    /// does not know, so a hand-edited file can never stall or crash a session.
    pub fn normalize(&mut self) {
        self.advance_delay_ms = self.advance_delay_ms.max(1);
        self.default_rows.retain(|id| match catalog::parse_row(id) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(%err, "dropping row from config");
                false
            }
        });
        for id in &mut self.default_rows {
            *id = id.trim().to_lowercase();
        }
    }
}
