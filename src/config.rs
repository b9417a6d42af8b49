//! 运行时配置
//!
//! 从键值变量中读取配置，缺失或非法时回退到默认值。
//! 浏览器端在编译期通过 `option_env!` 提供变量，测试中直接传入闭包。

use std::time::Duration;

use crate::session::DEFAULT_TOKEN_KEY;

/// 这些是默认值，变量中没有定义时使用
pub const DEFAULT_API_URL: &str = "http://localhost:3333";
/// Toast 自动关闭时间（毫秒）
pub const DEFAULT_TOAST_MS: u64 = 1500;

pub const VAR_API_URL: &str = "OWLSTORAGE_API_URL";
pub const VAR_TOKEN_KEY: &str = "OWLSTORAGE_TOKEN_KEY";
pub const VAR_TOAST_MS: &str = "OWLSTORAGE_TOAST_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 远端 API 基础地址（不含结尾 `/`）
    pub api_url: String,
    /// LocalStorage 中保存 token 的键名
    pub token_key: String,
    /// 通知自动消失的时间
    pub toast_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            toast_timeout: Duration::from_millis(DEFAULT_TOAST_MS),
        }
    }
}

impl ClientConfig {
    /// 通过查找函数读取配置
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        let toast_timeout = match var(VAR_TOAST_MS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(value = %raw, "invalid {VAR_TOAST_MS}, using default");
                    defaults.toast_timeout
                }
            },
            None => defaults.toast_timeout,
        };

        Self {
            api_url: var(VAR_API_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            token_key: var(VAR_TOKEN_KEY).unwrap_or(defaults.token_key),
            toast_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = ClientConfig::from_vars(|_| None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, "http://localhost:3333");
        assert_eq!(config.token_key, "token");
        assert_eq!(config.toast_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_reads_overrides() {
        let env = vars(&[
            (VAR_API_URL, "https://api.owlstorage.dev/"),
            (VAR_TOKEN_KEY, "owl_token"),
            (VAR_TOAST_MS, "3000"),
        ]);
        let config = ClientConfig::from_vars(|k| env.get(k).cloned());

        assert_eq!(config.api_url, "https://api.owlstorage.dev");
        assert_eq!(config.token_key, "owl_token");
        assert_eq!(config.toast_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_blank_or_invalid_values_fall_back() {
        let env = vars(&[(VAR_API_URL, "   "), (VAR_TOAST_MS, "soon")]);
        let config = ClientConfig::from_vars(|k| env.get(k).cloned());

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.toast_timeout, Duration::from_millis(DEFAULT_TOAST_MS));
    }
}
