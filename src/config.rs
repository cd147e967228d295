//! 配置模块，负责通道名到存储字段路径的映射以及加载JSON配置文件

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 存放在 `metadata.*` 下的通道
pub const METADATA_FIELDS: [&str; 4] = ["timestamp", "shotnum", "activeArea", "activeExperiment"];

/// 使用内置规则将通道名解析为字段路径
pub fn resolve_field_path(channel: &str) -> String {
    if METADATA_FIELDS.contains(&channel) {
        format!("metadata.{}", channel)
    } else {
        format!("channels.{}.data", channel)
    }
}

/// 映射配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("配置文件不存在: {}", .0.display())]
    NotFound(PathBuf),

    #[error("无法读取配置文件 {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("无法解析JSON配置文件 {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// 字段映射配置结构
///
/// JSON 中缺省的键使用内置默认值, 例如：
///
/// ```json
/// { "metadataFields": ["timestamp", "shotnum", "epac_ops_data_version"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldMapping {
    /// 映射到元数据路径的通道名
    pub metadata_fields: BTreeSet<String>,
    pub metadata_prefix: String,
    pub channel_prefix: String,
    pub channel_suffix: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            metadata_fields: METADATA_FIELDS.iter().map(|s| s.to_string()).collect(),
            metadata_prefix: "metadata".to_string(),
            channel_prefix: "channels".to_string(),
            channel_suffix: "data".to_string(),
        }
    }
}

impl FieldMapping {
    /// 从JSON文件加载字段映射配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(ConfigError::NotFound(path_ref.to_path_buf()));
        }

        let content = fs::read_to_string(path_ref).map_err(|source| ConfigError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path_ref.to_path_buf(),
            source,
        })
    }

    /// 获取通道对应的字段路径，该映射是全函数, 不会失败
    pub fn resolve_field_path(&self, channel: &str) -> String {
        if self.metadata_fields.contains(channel) {
            format!("{}.{}", self.metadata_prefix, channel)
        } else if self.channel_suffix.is_empty() {
            format!("{}.{}", self.channel_prefix, channel)
        } else {
            format!("{}.{}.{}", self.channel_prefix, channel, self.channel_suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_resolution() {
        assert_eq!(resolve_field_path("timestamp"), "metadata.timestamp");
        assert_eq!(resolve_field_path("shotnum"), "metadata.shotnum");
        assert_eq!(resolve_field_path("activeArea"), "metadata.activeArea");
        assert_eq!(resolve_field_path("activeExperiment"), "metadata.activeExperiment");
        assert_eq!(resolve_field_path("CHANNEL_1"), "channels.CHANNEL_1.data");
        // 大小写敏感
        assert_eq!(resolve_field_path("Timestamp"), "channels.Timestamp.data");
    }

    #[test]
    fn test_default_mapping_matches_builtin() {
        let mapping = FieldMapping::default();
        for channel in ["timestamp", "shotnum", "activeArea", "activeExperiment", "CHANNEL_1", "N_COMP_FF_IMAGE"] {
            assert_eq!(mapping.resolve_field_path(channel), resolve_field_path(channel));
        }
    }

    #[test]
    fn test_load_valid_json_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{
                "metadataFields": ["timestamp", "epac_ops_data_version"],
                "channelPrefix": "ch"
            }}"#
        )
        .unwrap();

        let mapping = FieldMapping::from_json_file(file.path()).unwrap();
        assert_eq!(mapping.resolve_field_path("epac_ops_data_version"), "metadata.epac_ops_data_version");
        assert_eq!(mapping.resolve_field_path("shotnum"), "ch.shotnum.data");
        assert_eq!(mapping.metadata_prefix, "metadata");
    }

    #[test]
    fn test_empty_suffix() {
        let mapping = FieldMapping {
            channel_suffix: String::new(),
            ..Default::default()
        };
        assert_eq!(mapping.resolve_field_path("CHANNEL_1"), "channels.CHANNEL_1");
    }

    #[test]
    fn test_invalid_json_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = FieldMapping::from_json_file(file.path());
        assert!(matches!(result, Err(ConfigError::Json { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = FieldMapping::from_json_file("non_existent_field_mapping.json");
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
