use std::fmt;

use thiserror::Error;

/// 收尾流程中的步骤，用于在失败时指明进行到了哪一步
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    EnsureDirectories,
    MarkExecutable,
    WriteCollection,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::EnsureDirectories => "创建运行时目录",
            Step::MarkExecutable => "设置入口文件可执行",
            Step::WriteCollection => "写入 API 测试集合",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum PostgenError {
    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 序列化错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("无效的 URL: {0}")]
    InvalidUrl(String),

    #[error("URL 解析错误: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("未声明的变量 '{name}' (位于 {location})")]
    UndeclaredVariable { location: String, name: String },

    #[error("占位符格式错误 '{text}' (位于 {location})")]
    MalformedPlaceholder { location: String, text: String },

    #[error("{step}失败: {source}")]
    StepFailed {
        step: Step,
        #[source]
        source: Box<PostgenError>,
    },

    #[error("{0}")]
    Other(String),
}

impl PostgenError {
    /// 标记错误发生时所处的步骤
    pub fn in_step(self, step: Step) -> Self {
        PostgenError::StepFailed {
            step,
            source: Box::new(self),
        }
    }

    /// 返回失败的步骤（如果有）
    pub fn step(&self) -> Option<Step> {
        match self {
            PostgenError::StepFailed { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Result type for postgen crate
pub type Result<T> = std::result::Result<T, PostgenError>;
