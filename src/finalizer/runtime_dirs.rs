use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// 运行时目录：应用日志、静态资源、用户上传文件
pub const RUNTIME_DIRS: [&str; 3] = ["logs", "static", "media"];

/// 单个目录的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirOutcome {
    Created(PathBuf),
    AlreadyPresent(PathBuf),
}

impl DirOutcome {
    pub fn path(&self) -> &Path {
        match self {
            DirOutcome::Created(path) | DirOutcome::AlreadyPresent(path) => path,
        }
    }

    pub fn created(&self) -> bool {
        matches!(self, DirOutcome::Created(_))
    }
}

/// 确保所有运行时目录存在于 `root` 下
///
/// 已存在的目录直接跳过；同名的普通文件或不存在的 `root` 会导致失败
pub fn ensure_runtime_dirs(root: &Path) -> Result<Vec<DirOutcome>> {
    RUNTIME_DIRS
        .iter()
        .map(|name| ensure_dir(&root.join(name)))
        .collect()
}

fn ensure_dir(path: &Path) -> Result<DirOutcome> {
    if path.is_dir() {
        tracing::debug!(path = %path.display(), "Directory already present");
        return Ok(DirOutcome::AlreadyPresent(path.to_path_buf()));
    }

    fs::create_dir(path)?;
    tracing::debug!(path = %path.display(), "Directory created");
    Ok(DirOutcome::Created(path.to_path_buf()))
}
