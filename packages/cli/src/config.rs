use pagecraft_editor::EditorConfig;
use pagecraft_renderer::RenderOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Options shared by every render target
    #[serde(default)]
    pub render: RenderOptions,

    /// History settings used while a document is loaded
    #[serde(default)]
    pub history: EditorConfig,

    /// Directory rendered files are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Absolute output directory, `out_dir` overriding the configured one
    pub fn get_out_dir(&self, cwd: &Path, out_dir: Option<&str>) -> PathBuf {
        cwd.join(out_dir.unwrap_or(&self.out_dir))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            history: EditorConfig::default(),
            out_dir: default_out_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "render": { "emailWidth": "640px", "pretty": true },
            "history": { "historyLimit": 20 },
            "outDir": "public"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.render.email_width, "640px");
        assert_eq!(config.render.parent_width, "100%");
        assert!(config.render.pretty);
        assert_eq!(config.history.history_limit, 20);
        assert_eq!(config.out_dir, "public");
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.history.history_limit, 50);
        assert_eq!(config.out_dir, "dist");
    }

    #[test]
    fn test_out_dir_override() {
        let config = Config::default();
        let cwd = Path::new("/work");

        assert_eq!(config.get_out_dir(cwd, None), PathBuf::from("/work/dist"));
        assert_eq!(config.get_out_dir(cwd, Some("out")), PathBuf::from("/work/out"));
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let dir = std::env::temp_dir().join("pagecraft-config-missing");
        let config = Config::load(&dir).unwrap();
        assert_eq!(config, Config::default());
    }
}
