//! 配置文件格式：按扩展名选择，TOML 为主，JSON 可选。
//!
//! 同一格式既负责读取也负责写回，保证 `set` / `now` / `unset` 编辑后文件
//! 仍是用户原来的格式。

use std::fmt;
use std::path::Path;

use contracts::ContractError;

use crate::RealtimeConfig;

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// 从文件扩展名推断格式（不区分大小写）
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }

    /// Format of the file at `path`, or a parse error naming the extension
    pub fn from_path(path: &Path) -> Result<Self, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;
        Self::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Decode settings. Malformed `base_time` values survive as `Invalid`.
    pub fn decode(self, content: &str) -> Result<RealtimeConfig, ContractError> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| self.decode_error(e)),
            Self::Json => serde_json::from_str(content).map_err(|e| self.decode_error(e)),
        }
    }

    /// Encode settings for writing back to disk
    pub fn encode(self, config: &RealtimeConfig) -> Result<String, ContractError> {
        let encoded = match self {
            Self::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
            Self::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
        };
        encoded.map_err(|e| ContractError::config_parse(format!("{self} serialize error: {e}")))
    }

    fn decode_error<E>(self, e: E) -> ContractError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ContractError::ConfigParse {
            message: format!("{self} parse error: {e}"),
            source: Some(Box::new(e)),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BaseTimeSetting;

    #[test]
    fn test_parse_toml_full() {
        let content = r#"
base_time = "2024-05-01T12:00:00Z"
use_local_time = true

[engine]
tolerance_s = 5.0
grace_period_s = 2.0
min_catch_up_s = 1.0

[warp]
rates = [1.0, 5.0, 10.0, 50.0]
"#;
        let result = ConfigFormat::Toml.decode(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let config = result.unwrap();
        assert!(matches!(config.base_time, BaseTimeSetting::At(_)));
        assert!(config.use_local_time);
        assert_eq!(config.engine.min_catch_up_s, 1.0);
        assert_eq!(config.warp.rates, vec![1.0, 5.0, 10.0, 50.0]);
    }

    #[test]
    fn test_parse_toml_empty_uses_defaults() {
        let config = ConfigFormat::Toml.decode("").unwrap();
        assert_eq!(config.base_time, BaseTimeSetting::Unset);
        assert!(!config.use_local_time);
        assert_eq!(config.engine.tolerance_s, 10.0);
        assert_eq!(config.warp.rates.len(), 8);
    }

    #[test]
    fn test_parse_json_unset() {
        let content = r#"{ "base_time": "UNSET", "use_local_time": false }"#;
        let config = ConfigFormat::Json.decode(content).unwrap();
        assert_eq!(config.base_time, BaseTimeSetting::Unset);
    }

    #[test]
    fn test_parse_malformed_base_time_is_not_fatal() {
        let config = ConfigFormat::Toml.decode(r#"base_time = "2024-13-45""#).unwrap();
        assert!(matches!(config.base_time, BaseTimeSetting::Invalid(_)));
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = ConfigFormat::Toml.decode(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ContractError::ConfigParse { .. }));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }

    #[test]
    fn test_from_path_requires_extension() {
        let err = ConfigFormat::from_path(Path::new("realtime")).unwrap_err();
        assert!(err.to_string().contains("cannot determine"), "got: {err}");
        assert_eq!(
            ConfigFormat::from_path(Path::new("saves/realtime.Json")).unwrap(),
            ConfigFormat::Json
        );
    }

    #[test]
    fn test_encode_writes_unset_marker() {
        let config = RealtimeConfig::default();
        let toml = ConfigFormat::Toml.encode(&config).unwrap();
        assert!(toml.contains(r#"base_time = "UNSET""#), "got: {toml}");
        let json = ConfigFormat::Json.encode(&config).unwrap();
        assert!(json.contains(r#""base_time": "UNSET""#), "got: {json}");
    }
}
