use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// How the draw history CSV is read and which of its columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub csv_path: PathBuf,
    pub date_column: String,
    /// Administrative columns dropped before analysis.
    pub excluded_columns: Vec<String>,
    pub delimiter: char,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/Miloto.csv"),
            date_column: "Draw Date".to_string(),
            excluded_columns: vec![
                "Draw Number".to_string(),
                "Jackpot".to_string(),
                "Winners".to_string(),
                "Multiplier".to_string(),
            ],
            delimiter: ',',
        }
    }
}

impl LoaderConfig {
    pub fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() {
            bail!("Delimitador no ASCII: {:?}", self.delimiter);
        }
        Ok(self.delimiter as u8)
    }

    /// True for the date column and every excluded column.
    pub fn is_skipped(&self, header: &str) -> bool {
        header == self.date_column || self.excluded_columns.iter().any(|c| c == header)
    }
}

pub fn load_config(path: &Path) -> Result<LoaderConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Imposible leer la configuración {:?}", path))?;
    let config: LoaderConfig = serde_json::from_str(&json)
        .with_context(|| format!("Configuración inválida en {:?}", path))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.date_column, "Draw Date");
        assert_eq!(config.delimiter_byte().unwrap(), b',');
        assert!(config.is_skipped("Draw Date"));
        assert!(config.is_skipped("Jackpot"));
        assert!(!config.is_skipped("Number 1"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LoaderConfig = serde_json::from_str(r#"{"delimiter": ";"}"#).unwrap();
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.date_column, "Draw Date");
        assert_eq!(config.csv_path, PathBuf::from("data/Miloto.csv"));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = LoaderConfig {
            excluded_columns: vec!["Sorteo".to_string()],
            ..LoaderConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored: LoaderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let config = LoaderConfig {
            delimiter: '§',
            ..LoaderConfig::default()
        };
        assert!(config.delimiter_byte().is_err());
    }
}
