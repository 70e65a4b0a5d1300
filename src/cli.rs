use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use postgen::config::{ConfigLoader, Settings};
use postgen::context::ScaffoldContext;
use postgen::finalizer::Finalizer;
use postgen::reporter::Reporter;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// 项目生成后的收尾工具：创建运行时目录、设置 manage.py 可执行、生成 API 测试集合
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 项目根目录（默认当前目录）
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// 配置文件路径（默认查找 postgen.toml）
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// 覆盖集合中 base_url 变量的默认值
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// 覆盖集合文件名
    #[arg(long, value_name = "FILE")]
    pub output: Option<String>,

    /// 不生成 API 测试集合
    #[arg(long)]
    pub no_collection: bool,

    /// 不输出运行报告
    #[arg(short, long)]
    pub quiet: bool,

    /// 禁用彩色输出
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// 合并配置文件与命令行参数，CLI 优先级最高
    fn settings(&self, root: &std::path::Path) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => ConfigLoader::load_from_path(path)?,
            None => ConfigLoader::find_and_load(root)?,
        };

        if let Some(base_url) = &self.base_url {
            settings.collection.base_url = base_url.clone();
        }
        if let Some(output) = &self.output {
            settings.collection.file_name = output.clone();
        }
        if self.no_collection {
            settings.collection.enabled = false;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// 解析项目根目录：显式传入的目录必须存在，`..` 等相对片段会被消解
    fn root(&self) -> Result<PathBuf> {
        let root = match &self.dir {
            Some(dir) => std::fs::canonicalize(dir)
                .with_context(|| format!("无法解析项目目录 {}", dir.display()))?,
            None => std::env::current_dir().context("无法获取当前目录")?,
        };

        anyhow::ensure!(root.is_dir(), "项目路径不是目录: {}", root.display());
        Ok(root)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let root = cli.root()?;
    let settings = cli.settings(&root)?;
    let ctx = ScaffoldContext::from_dir(&root)?;
    let reporter = Reporter::new(cli.quiet);

    reporter.print_header(&ctx.title);
    let finalizer = Finalizer::new(ctx, settings);
    let report = finalizer.run()?;
    reporter.print_report(&report, &root);

    Ok(())
}
