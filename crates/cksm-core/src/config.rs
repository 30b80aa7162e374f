use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/cksm/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CksmConfig {
    /// Optional read chunk size in bytes for the digest engine
    /// (None = built-in 1 MiB default).
    #[serde(default)]
    pub chunk_bytes: Option<usize>,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cksm")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CksmConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CksmConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CksmConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_override() {
        let cfg = CksmConfig::default();
        assert!(cfg.chunk_bytes.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = CksmConfig {
            chunk_bytes: Some(65536),
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: CksmConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.chunk_bytes, Some(65536));
    }

    #[test]
    fn config_toml_empty_file_is_valid() {
        let cfg: CksmConfig = toml::from_str("").unwrap();
        assert!(cfg.chunk_bytes.is_none());
    }

    #[test]
    fn config_toml_custom_chunk() {
        let cfg: CksmConfig = toml::from_str("chunk_bytes = 4096").unwrap();
        assert_eq!(cfg.chunk_bytes, Some(4096));
    }
}
