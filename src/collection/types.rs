use serde::{Deserialize, Serialize};

use crate::collection::placeholder::{self, CollectionVariable};
use crate::{PostgenError, Result};

/// Postman v2.1 collection schema
pub const SCHEMA_URL: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Patch,
}

/// 完整的测试集合文档
///
/// 字段顺序即序列化顺序，外部客户端依赖这些字段名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub info: Info,
    pub variable: Vec<Variable>,
    pub item: Vec<Folder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(rename = "_postman_id")]
    pub postman_id: String,
    pub name: String,
    pub description: String,
    pub schema: String,
}

/// 集合级变量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Variable {
    pub fn string(var: CollectionVariable, value: impl Into<String>) -> Self {
        Self {
            key: var.key().to_string(),
            value: value.into(),
            kind: "string".to_string(),
        }
    }
}

/// 顶层分组，只包含请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    pub description: String,
    pub item: Vec<RequestItem>,
}

/// 单个请求条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<Event>,

    pub request: Request,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// 保存的示例响应，生成时总是为空
    #[serde(default)]
    pub response: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: Method,
    pub header: Vec<Header>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,

    pub url: RequestUrl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            kind: None,
        }
    }

    /// `Content-Type: application/json`
    pub fn json_content_type() -> Self {
        Self {
            kind: Some("text".to_string()),
            ..Self::new("Content-Type", "application/json")
        }
    }

    /// `Authorization: Bearer {{access_token}}`
    pub fn bearer(var: CollectionVariable) -> Self {
        Self {
            kind: Some("text".to_string()),
            ..Self::new("Authorization", format!("Bearer {}", var.placeholder()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub mode: String,
    pub raw: String,
}

impl Body {
    pub fn raw(raw: impl Into<String>) -> Self {
        Self {
            mode: "raw".to_string(),
            raw: raw.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestUrl {
    pub raw: String,
    pub host: Vec<String>,
    pub path: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<QueryParam>,
}

impl RequestUrl {
    /// 以 `{{base_url}}` 为主机构建 URL，`path` 形如 `/api/users/`
    ///
    /// 末尾的 `/` 保留为一个空路径段，与 Postman 导出的格式一致
    pub fn from_base(path: &str) -> Self {
        let host = CollectionVariable::BaseUrl.placeholder();
        let segments = path
            .strip_prefix('/')
            .unwrap_or(path)
            .split('/')
            .map(str::to_string)
            .collect();

        Self {
            raw: format!("{}{}", host, path),
            host: vec![host],
            path: segments,
            query: Vec::new(),
        }
    }

    /// 追加查询参数，同时更新 raw
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        let sep = if self.query.is_empty() { '?' } else { '&' };
        self.raw.push(sep);
        self.raw.push_str(&format!("{}={}", key, value));
        self.query.push(QueryParam {
            key: key.to_string(),
            value: value.to_string(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

/// 响应后脚本，由外部客户端执行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub listen: String,
    pub script: Script,
}

impl Event {
    pub fn test_script(lines: &[&str]) -> Self {
        Self {
            listen: "test".to_string(),
            script: Script {
                exec: lines.iter().map(|line| line.to_string()).collect(),
                kind: "text/javascript".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub exec: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Collection {
    /// 所有请求条目（按声明顺序）
    pub fn requests(&self) -> impl Iterator<Item = (&Folder, &RequestItem)> {
        self.item
            .iter()
            .flat_map(|folder| folder.item.iter().map(move |item| (folder, item)))
    }

    /// 检查所有 URL 与 header 值中的占位符格式一致，且都引用了已声明的变量
    pub fn validate(&self) -> Result<()> {
        let declared: Vec<&str> = self.variable.iter().map(|v| v.key.as_str()).collect();

        let check = |text: &str, location: String| -> Result<()> {
            if placeholder::has_malformed(text) {
                return Err(PostgenError::MalformedPlaceholder {
                    location,
                    text: text.to_string(),
                });
            }
            match placeholder::placeholders(text)
                .into_iter()
                .find(|name| !declared.contains(name))
            {
                Some(name) => Err(PostgenError::UndeclaredVariable {
                    location,
                    name: name.to_string(),
                }),
                None => Ok(()),
            }
        };

        for (folder, item) in self.requests() {
            check(
                &item.request.url.raw,
                format!("{}/{} url", folder.name, item.name),
            )?;
            for header in &item.request.header {
                check(
                    &header.value,
                    format!("{}/{} header '{}'", folder.name, item.name, header.key),
                )?;
            }
        }

        Ok(())
    }
}
