use crate::config::types::Settings;
use crate::{PostgenError, Result};
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    pub const CONFIG_FILE: &'static str = "postgen.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PostgenError::ConfigError(format!("无法读取配置文件 {}: {}", path.display(), e))
        })?;

        Self::load_from_str(&content).map_err(|e| match e {
            PostgenError::ConfigError(msg) => {
                PostgenError::ConfigError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// 从字符串解析配置，并解析其中的 ${VAR} 环境变量引用
    pub fn load_from_str(content: &str) -> Result<Settings> {
        let mut settings: Settings = toml::from_str(content)
            .map_err(|e| PostgenError::ConfigError(format!("配置文件格式错误: {}", e)))?;

        settings.entry_point = Self::resolve_env_vars(&settings.entry_point);
        settings.collection.file_name = Self::resolve_env_vars(&settings.collection.file_name);
        settings.collection.base_url = Self::resolve_env_vars(&settings.collection.base_url);

        Ok(settings)
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 项目根目录
    /// 2. 用户配置目录 ~/.config/postgen/
    ///
    /// 都不存在时返回默认配置
    pub fn find_and_load(root: &Path) -> Result<Settings> {
        match Self::locate(root) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading config file");
                Self::load_from_path(&path)
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(Settings::default())
            }
        }
    }

    /// 返回第一个存在的配置文件路径
    pub fn locate(root: &Path) -> Option<PathBuf> {
        let project_config = root.join(Self::CONFIG_FILE);
        if project_config.is_file() {
            return Some(project_config);
        }

        Self::user_config_path().filter(|path| path.is_file())
    }

    fn user_config_path() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        Some(home.join(".config").join("postgen").join(Self::CONFIG_FILE))
    }

    /// 解析并替换系统环境变量 ${VAR}，未设置的变量保持原样
    pub fn resolve_env_vars(text: &str) -> String {
        static ENV_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = ENV_REGEX.get_or_init(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

        re.replace_all(text, |caps: &Captures| {
            let env_name = &caps[1];
            std::env::var(env_name).unwrap_or_else(|_| caps[0].to_string())
        })
        .to_string()
    }
}
