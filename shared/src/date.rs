//! 时间类型模块
//!
//! `created_at` 由服务端生成，格式不受客户端控制。
//! `CreatedAt` 原样保存服务端文本，展示时尽量按 RFC 3339 解析并格式化。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 展示格式 (dd/mm/YYYY HH:MM)
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatedAt(String);

impl CreatedAt {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// 解析为 UTC 时间，失败时返回 None
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.0.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// 用于界面展示的文本
    ///
    /// 无法解析时原样返回
    pub fn display(&self) -> String {
        match self.parse() {
            Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_rfc3339_in_utc() {
        let created = CreatedAt::new("2023-11-05T23:10:00-03:00");
        assert_eq!(created.display(), "06/11/2023 02:10");
    }

    #[test]
    fn test_falls_back_to_raw_text() {
        let created = CreatedAt::new("ontem");
        assert!(created.parse().is_none());
        assert_eq!(created.to_string(), "ontem");
    }
}
