use crate::finalizer::{CollectionOutcome, DirOutcome, ExecOutcome, FinalizeReport};
use colored::Colorize;
use std::path::Path;

/// 生成项目后的后续步骤
const NEXT_STEPS: &[&str] = &[
    "Copy env.example to .env and configure it",
    "Install dependencies: pip install -r requirements.txt",
    "Run migrations: python manage.py migrate",
    "Create superuser: python manage.py createsuperuser",
    "Start server: python manage.py runserver",
];

pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// 打印开始信息
    pub fn print_header(&self, project: &str) {
        if self.quiet {
            return;
        }
        println!("\n🚀 Setting up {}...", project.bold());
    }

    /// 打印运行结果
    pub fn print_report(&self, report: &FinalizeReport, root: &Path) {
        if self.quiet {
            return;
        }
        print!("{}", Self::render_report(report, root));
    }

    /// 将运行结果格式化为多行文本
    pub fn render_report(report: &FinalizeReport, root: &Path) -> String {
        let mut lines = Vec::new();

        for dir in &report.directories {
            let name = display_relative(dir.path(), root);
            lines.push(match dir {
                DirOutcome::Created(_) => format!(" {} Created directory: {}", "✓".green(), name),
                DirOutcome::AlreadyPresent(_) => {
                    format!(" {} Directory present: {}", "✓".green(), name.dimmed())
                }
            });
        }

        let entry = display_relative(&report.entry_point, root);
        lines.push(match report.executable {
            ExecOutcome::Updated { .. } => format!(" {} Made {} executable", "✓".green(), entry),
            ExecOutcome::AlreadyExecutable => {
                format!(" {} {} already executable", "✓".green(), entry.dimmed())
            }
            ExecOutcome::Missing => format!(" {} {} not found (skipped)", "⊘".dimmed(), entry),
        });

        lines.push(match &report.collection {
            CollectionOutcome::Written { path, requests } => format!(
                " {} Wrote API collection: {} ({} requests)",
                "✓".green(),
                display_relative(path, root),
                requests
            ),
            CollectionOutcome::Disabled => format!(" {} API collection disabled", "⊘".dimmed()),
        });

        lines.push(format!("\n{}", "✅ Project setup complete!".green().bold()));
        lines.push(format!("\n📝 {}", "Next steps:".bold()));
        for (i, step) in NEXT_STEPS.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, step));
        }
        lines.push(String::new());

        lines.join("\n") + "\n"
    }
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
