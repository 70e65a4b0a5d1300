use crate::Result;
use std::path::Path;

/// 入口文件权限处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// 文件不存在，跳过
    Missing,
    /// 已经具备所需的执行权限
    AlreadyExecutable,
    /// 权限已更新
    Updated { before: u32, after: u32 },
}

/// 计算添加执行权限后的 mode
///
/// 所有者总是获得执行权限；组和其他用户仅在可读时获得执行权限。
/// 其余位（读写、setuid 等）保持不变
pub fn executable_mode(mode: u32) -> u32 {
    mode | 0o100 | ((mode & 0o044) >> 2)
}

/// 为入口文件添加执行权限，文件不存在时静默跳过
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<ExecOutcome> {
    use std::fs;
    use std::io::ErrorKind;
    use std::os::unix::fs::PermissionsExt;

    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Entry point not found, skipping");
            return Ok(ExecOutcome::Missing);
        }
        Err(e) => return Err(e.into()),
    };

    let before = metadata.permissions().mode() & 0o7777;
    let after = executable_mode(before);
    if after == before {
        return Ok(ExecOutcome::AlreadyExecutable);
    }

    fs::set_permissions(path, fs::Permissions::from_mode(after))?;
    tracing::debug!(
        path = %path.display(),
        before = %format!("{:o}", before),
        after = %format!("{:o}", after),
        "Entry point mode updated"
    );

    Ok(ExecOutcome::Updated { before, after })
}

/// 非 Unix 平台没有执行位，只检查文件是否存在
#[cfg(not(unix))]
pub fn make_executable(path: &Path) -> Result<ExecOutcome> {
    if path.exists() {
        Ok(ExecOutcome::AlreadyExecutable)
    } else {
        Ok(ExecOutcome::Missing)
    }
}
