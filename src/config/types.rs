use serde::Deserialize;

use crate::{PostgenError, Result};

/// 入口文件默认名称
pub const DEFAULT_ENTRY_POINT: &str = "manage.py";
/// 集合文件默认名称
pub const DEFAULT_COLLECTION_FILE: &str = "postman_collection.json";
/// 集合中 base_url 变量的默认值（Django 开发服务器）
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// 完整的配置文件
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// 需要设置可执行权限的入口文件
    pub entry_point: String,

    /// API 测试集合配置
    pub collection: CollectionSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            collection: CollectionSettings::default(),
        }
    }
}

/// API 测试集合配置
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionSettings {
    /// 是否生成集合文件
    pub enabled: bool,

    /// 集合文件名（写在项目根目录）
    pub file_name: String,

    /// base_url 变量的默认值
    pub base_url: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            file_name: DEFAULT_COLLECTION_FILE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// 校验配置值
    pub fn validate(&self) -> Result<()> {
        validate_file_name("entry_point", &self.entry_point)?;
        validate_file_name("collection.file_name", &self.collection.file_name)?;

        let url = url::Url::parse(&self.collection.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PostgenError::InvalidUrl(format!(
                "{} (仅支持 http/https)",
                self.collection.base_url
            )));
        }
        if !url.has_host() {
            return Err(PostgenError::InvalidUrl(self.collection.base_url.clone()));
        }

        Ok(())
    }
}

fn validate_file_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PostgenError::ConfigError(format!("{} 不能为空", field)));
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(PostgenError::ConfigError(format!(
            "{} 必须是项目根目录下的文件名: {}",
            field, value
        )));
    }
    Ok(())
}
