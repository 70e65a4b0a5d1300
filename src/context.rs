use std::path::{Path, PathBuf};

use convert_case::{Case, Casing};

use crate::{PostgenError, Result};

/// 一次收尾运行的上下文：生成项目的根目录及由目录名派生的标识
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldContext {
    /// 生成项目的根目录
    pub root: PathBuf,

    /// 项目标识（根目录的目录名，如 `my_cool_api`）
    pub slug: String,

    /// 人类可读的项目标题（如 `My Cool Api`）
    pub title: String,
}

impl ScaffoldContext {
    /// 从项目根目录构建上下文
    ///
    /// 路径不会被规范化，`.` 这类没有目录名的路径需要调用方先解析为绝对路径
    pub fn from_dir<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let slug = root
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                PostgenError::ConfigError(format!(
                    "无法从路径 '{}' 推导项目名称",
                    root.display()
                ))
            })?
            .to_string();

        let title = Self::title_from_slug(&slug);

        Ok(Self { root, slug, title })
    }

    /// 将项目标识转换为标题：分隔符替换为空格，每个单词首字母大写
    ///
    /// 只在 `_`、`-`、空格处断词，大小写变化和数字不产生新单词
    pub fn title_from_slug(slug: &str) -> String {
        slug.replace(['-', ' '], "_")
            .from_case(Case::Snake)
            .to_case(Case::Title)
    }

    /// 集合显示名称
    pub fn collection_name(&self) -> String {
        format!("{} API", self.title)
    }

    /// 集合标识
    pub fn collection_id(&self) -> String {
        format!("{}-api-collection", self.slug)
    }

    pub fn collection_description(&self) -> String {
        format!(
            "API collection for {}. Run \"Obtain Token Pair\" first; the access and refresh tokens are stored in collection variables automatically.",
            self.title
        )
    }
}
