//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use hfpef_risk_core::constants::{DEFAULT_BACKGROUND_FILE, DEFAULT_FEATURES_FILE, DEFAULT_MODEL_FILE};
use hfpef_risk_core::{ArtifactPaths, Locale};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Listen address
    pub bind_addr: IpAddr,

    /// Directory holding the three artifacts
    pub artifact_dir: PathBuf,

    pub model_file: String,
    pub background_file: String,
    pub features_file: String,

    /// Locale when the request carries no `lang`
    pub default_locale: Locale,

    /// Load artifacts at startup instead of on first request
    pub preload_artifacts: bool,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8501),

            bind_addr: lookup("BIND_ADDR")
                .and_then(|a| a.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),

            artifact_dir: lookup("ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),

            model_file: lookup("MODEL_FILE")
                .unwrap_or_else(|| DEFAULT_MODEL_FILE.to_string()),

            background_file: lookup("BACKGROUND_FILE")
                .unwrap_or_else(|| DEFAULT_BACKGROUND_FILE.to_string()),

            features_file: lookup("FEATURES_FILE")
                .unwrap_or_else(|| DEFAULT_FEATURES_FILE.to_string()),

            default_locale: lookup("DEFAULT_LOCALE")
                .and_then(|l| l.parse().ok())
                .unwrap_or_default(),

            preload_artifacts: lookup("PRELOAD_ARTIFACTS")
                .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
                .unwrap_or(true),

            environment: lookup("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.artifact_dir.join(&self.model_file),
            background: self.artifact_dir.join(&self.background_file),
            features: self.artifact_dir.join(&self.features_file),
        }
    }
}
