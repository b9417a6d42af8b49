//! OwlStorage 管理后台核心库
//!
//! 与平台无关的业务层，浏览器端 (`frontend`) 与原生测试共用：
//! - `session`: 会话与 token 持久化
//! - `api` / `request`: REST 客户端与可替换的 HTTP 传输层
//! - `guard` / `route`: 路由定义与认证守卫
//! - `controller` / `resource`: 通用的列表-表单页面控制器
//! - `auth`: 登录与注册
//! - `store` / `view`: 变更通知与视图模型投影

pub mod api;
pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod guard;
pub mod notification;
pub mod request;
pub mod resource;
pub mod route;
pub mod session;
pub mod store;
pub mod view;

pub use api::ApiClient;
pub use auth::{AuthController, AuthMode, AuthOutcome};
pub use config::ClientConfig;
pub use controller::{Lifecycle, ListController, PagePhase, PageState, SubmitOutcome};
pub use error::{AdminError, AdminErrorStatus, AdminResult};
pub use notification::{Notification, NotificationKind, Notifier};
pub use request::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
pub use resource::{DeletePolicy, Resource};
pub use route::AppRoute;
pub use session::{Session, SessionStorage};
pub use store::Store;

#[cfg(not(target_arch = "wasm32"))]
pub use request::ReqwestHttpClient;
