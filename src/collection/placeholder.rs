use regex::Regex;
use std::sync::OnceLock;

/// 占位符的开闭定界符，整个文档统一使用
pub const OPEN: &str = "{{";
pub const CLOSE: &str = "}}";

/// 集合声明的全部变量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionVariable {
    BaseUrl,
    AccessToken,
    RefreshToken,
}

impl CollectionVariable {
    pub const ALL: [CollectionVariable; 3] = [
        CollectionVariable::BaseUrl,
        CollectionVariable::AccessToken,
        CollectionVariable::RefreshToken,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CollectionVariable::BaseUrl => "base_url",
            CollectionVariable::AccessToken => "access_token",
            CollectionVariable::RefreshToken => "refresh_token",
        }
    }

    /// 变量的初始值：base_url 由配置决定，token 在运行后由脚本写入
    pub fn initial_value<'a>(&self, base_url: &'a str) -> &'a str {
        match self {
            CollectionVariable::BaseUrl => base_url,
            CollectionVariable::AccessToken | CollectionVariable::RefreshToken => "",
        }
    }

    /// 形如 `{{base_url}}` 的占位符
    pub fn placeholder(&self) -> String {
        format!("{}{}{}", OPEN, self.key(), CLOSE)
    }
}

fn placeholder_regex() -> &'static Regex {
    static VAR_REGEX: OnceLock<Regex> = OnceLock::new();
    VAR_REGEX.get_or_init(|| Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}").unwrap())
}

/// 列出文本中所有 {{name}} 占位符的变量名（按出现顺序）
pub fn placeholders(text: &str) -> Vec<&str> {
    placeholder_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// 去掉所有合法占位符后仍残留定界符，说明存在格式不一致的占位符（如 `{{ name }}`）
pub fn has_malformed(text: &str) -> bool {
    let rest = placeholder_regex().replace_all(text, "");
    rest.contains(OPEN) || rest.contains(CLOSE)
}
