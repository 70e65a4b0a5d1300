pub mod runtime_dirs;
pub mod permissions;

pub use runtime_dirs::{DirOutcome, RUNTIME_DIRS, ensure_runtime_dirs};
pub use permissions::{ExecOutcome, executable_mode, make_executable};

use crate::collection::{CollectionBuilder, CollectionWriter};
use crate::config::Settings;
use crate::context::ScaffoldContext;
use crate::error::Step;
use crate::{PostgenError, Result};
use std::path::PathBuf;

/// 集合步骤的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome {
    Written { path: PathBuf, requests: usize },
    Disabled,
}

/// 一次完整运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeReport {
    pub directories: Vec<DirOutcome>,
    pub entry_point: PathBuf,
    pub executable: ExecOutcome,
    pub collection: CollectionOutcome,
}

/// 生成项目后的收尾流程
///
/// 三个步骤按顺序执行一次：创建运行时目录、设置入口文件可执行、写入测试集合。
/// 任一步骤失败即中止，已完成的步骤不回滚
pub struct Finalizer {
    ctx: ScaffoldContext,
    settings: Settings,
}

impl Finalizer {
    pub fn new(ctx: ScaffoldContext, settings: Settings) -> Self {
        Self { ctx, settings }
    }

    pub fn run(&self) -> Result<FinalizeReport> {
        tracing::info!(root = %self.ctx.root.display(), project = %self.ctx.slug, "Finalizing project");

        if !self.ctx.root.is_dir() {
            return Err(PostgenError::ConfigError(format!(
                "项目目录不存在: {}",
                self.ctx.root.display()
            ))
            .in_step(Step::EnsureDirectories));
        }

        let directories =
            ensure_runtime_dirs(&self.ctx.root).map_err(|e| e.in_step(Step::EnsureDirectories))?;
        tracing::info!("Runtime directories ready");

        let entry_point = self.ctx.root.join(&self.settings.entry_point);
        let executable =
            make_executable(&entry_point).map_err(|e| e.in_step(Step::MarkExecutable))?;
        tracing::info!(outcome = ?executable, "Entry point checked");

        let collection = self
            .write_collection()
            .map_err(|e| e.in_step(Step::WriteCollection))?;

        Ok(FinalizeReport {
            directories,
            entry_point,
            executable,
            collection,
        })
    }

    fn write_collection(&self) -> Result<CollectionOutcome> {
        if !self.settings.collection.enabled {
            tracing::info!("Collection generation disabled");
            return Ok(CollectionOutcome::Disabled);
        }

        let collection = CollectionBuilder::build(&self.ctx, &self.settings.collection.base_url);
        let path = self.ctx.root.join(&self.settings.collection.file_name);
        CollectionWriter::write(&collection, &path)?;

        Ok(CollectionOutcome::Written {
            path,
            requests: collection.requests().count(),
        })
    }
}
