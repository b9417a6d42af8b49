use std::fmt;

use crate::form::ValidationErrors;
use crate::request::HttpError;

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误状态枚举
///
/// 界面层只区分「字段校验失败」「需要登录」与「请求失败」三类，
/// 其余状态用于日志与调试。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminErrorStatus {
    /// 必填字段为空，未发出任何请求
    Validation,
    /// 会话中没有 token
    AuthRequired,
    /// 网络请求失败 (连接、CORS、请求构建)
    Network,
    /// 服务端返回非 2xx 状态码
    Status,
    /// JSON 解析或序列化错误
    Serialization,
    /// 浏览器本地存储读写失败
    Storage,
}

impl AdminErrorStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            AdminErrorStatus::Validation => "VALIDATION_FAILED",
            AdminErrorStatus::AuthRequired => "AUTH_REQUIRED",
            AdminErrorStatus::Network => "NETWORK_ERROR",
            AdminErrorStatus::Status => "UNEXPECTED_STATUS",
            AdminErrorStatus::Serialization => "JSON_PARSE_ERROR",
            AdminErrorStatus::Storage => "STORAGE_ERROR",
        }
    }

    /// 是否属于「网络或状态码」类错误
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            AdminErrorStatus::Network | AdminErrorStatus::Status | AdminErrorStatus::Serialization
        )
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 记录错误发生时的操作和相关细节
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "customer.load", "session.begin"
    pub operation: String,
    /// 额外的细节信息，如路径、实体 ID 等
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端统一错误类型
///
/// - status: 错误类型/语义
/// - message: 错误消息
/// - http_status: 服务端状态码（仅 `Status` 类错误）
/// - source: 原始错误（可选，用于错误链）
/// - spans: 结构化的调用追踪栈
#[derive(Debug)]
pub struct AdminError {
    pub status: AdminErrorStatus,
    pub message: String,
    http_status: Option<u16>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    spans: Vec<ErrorSpan>,
}

impl AdminError {
    pub fn new(status: AdminErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            http_status: None,
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(AdminErrorStatus::Validation, message)
    }

    pub fn auth_required(message: impl Into<String>) -> Self {
        Self::new(AdminErrorStatus::AuthRequired, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AdminErrorStatus::Network, message)
    }

    pub fn unexpected_status(code: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(AdminErrorStatus::Status, message);
        err.http_status = Some(code);
        err
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(AdminErrorStatus::Serialization, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(AdminErrorStatus::Storage, message)
    }

    // --- Context builders ---

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    /// 设置原始错误源
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 服务端返回的 HTTP 状态码
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for AdminError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

pub type AdminResult<T> = std::result::Result<T, AdminError>;

// =========================================================
// 类型转换实现
// =========================================================

impl From<HttpError> for AdminError {
    fn from(e: HttpError) -> Self {
        let base = match &e {
            HttpError::RequestBuild(_) | HttpError::Network(_) => AdminError::network(e.to_string()),
            HttpError::Decode(_) => AdminError::serialization(e.to_string()),
        };
        base.with_source(e)
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(e: serde_json::Error) -> Self {
        AdminError::serialization(e.to_string()).with_source(e)
    }
}

impl From<ValidationErrors> for AdminError {
    fn from(e: ValidationErrors) -> Self {
        AdminError::validation(e.to_string())
    }
}
