use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::classifier::{EncoderConfig, DEFAULT_THRESHOLD};

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schema_version: u32,

    // HTTP
    pub host: String,
    pub port: u16,

    // Model files
    pub model_path: Option<PathBuf>,
    pub tokenizer_path: Option<PathBuf>,

    // Inference tuning
    pub max_tokens: usize,
    pub threshold: f32,
    pub n_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: 1,
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_path: None,
            tokenizer_path: None,
            max_tokens: 128,
            threshold: DEFAULT_THRESHOLD,
            n_threads: 1,
        }
    }
}

impl Config {
    /// Load config from file, or create default
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .context("Failed to read config file")?;
            serde_json::from_str(&content)
                .context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .context("Failed to write config file")
    }

    /// Get the default config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Failed to get home directory")?;
        Ok(home.join(".moodtune"))
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.json"))
    }

    /// Get the default models directory
    pub fn default_models_dir() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("models"))
    }

    pub fn get_model_path(&self) -> Result<PathBuf> {
        match self.model_path {
            Some(ref path) => Ok(path.clone()),
            None => Ok(Self::default_models_dir()?.join("emotion_classifier.onnx")),
        }
    }

    pub fn get_tokenizer_path(&self) -> Result<PathBuf> {
        match self.tokenizer_path {
            Some(ref path) => Ok(path.clone()),
            None => Ok(Self::default_models_dir()?.join("tokenizer.json")),
        }
    }

    /// Check values that would otherwise fail at request time
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            anyhow::bail!("threshold must be in (0, 1), got {}", self.threshold);
        }
        if self.max_tokens < 2 {
            anyhow::bail!("max_tokens must be at least 2, got {}", self.max_tokens);
        }
        if self.n_threads == 0 {
            anyhow::bail!("n_threads must be at least 1");
        }
        Ok(())
    }

    /// True when the file or CLI moved the decision threshold off 0.5
    pub fn threshold_overridden(&self) -> bool {
        self.threshold != DEFAULT_THRESHOLD
    }

    pub fn encoder_config(&self) -> Result<EncoderConfig> {
        Ok(EncoderConfig {
            model_path: self.get_model_path()?,
            tokenizer_path: self.get_tokenizer_path()?,
            max_tokens: self.max_tokens,
            n_threads: self.n_threads,
        })
    }
}
