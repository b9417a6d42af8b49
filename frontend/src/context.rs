//! 应用上下文
//!
//! 会话、API 客户端与通知中心在 `App` 中创建一次，通过 Context 在组件间共享。
//! 这些对象内部使用 `Rc`，因此放入本地存储的 `StoredValue` 中，
//! 组件闭包只捕获可复制的句柄。

use std::rc::Rc;

use leptos::prelude::*;
use owlstorage::config::{ClientConfig, VAR_API_URL, VAR_TOAST_MS, VAR_TOKEN_KEY};
use owlstorage::{ApiClient, Notifier, Session};

use crate::web::{BrowserHttpClient, BrowserStorage};

#[derive(Clone)]
pub struct AppServices {
    pub config: ClientConfig,
    pub session: Session,
    pub api: Rc<ApiClient<BrowserHttpClient>>,
    pub notifier: Notifier,
}

impl AppServices {
    /// 配置在编译期通过环境变量注入
    pub fn init() -> Self {
        let config = ClientConfig::from_vars(|key| {
            let value = match key {
                VAR_API_URL => option_env!("OWLSTORAGE_API_URL"),
                VAR_TOKEN_KEY => option_env!("OWLSTORAGE_TOKEN_KEY"),
                VAR_TOAST_MS => option_env!("OWLSTORAGE_TOAST_MS"),
                _ => None,
            };
            value.map(str::to_string)
        });
        tracing::info!(api_url = %config.api_url, "client configured");

        let session = Session::new(Rc::new(BrowserStorage), config.token_key.clone());
        let api = Rc::new(ApiClient::new(config.api_url.clone(), BrowserHttpClient));

        Self {
            config,
            session,
            api,
            notifier: Notifier::new(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppContext(StoredValue<AppServices, LocalStorage>);

impl AppContext {
    pub fn new(services: AppServices) -> Self {
        Self(StoredValue::new_local(services))
    }

    pub fn services(&self) -> AppServices {
        self.0.get_value()
    }
}

/// 从 Context 获取应用上下文
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
