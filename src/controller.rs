//! 列表-表单页面控制器
//!
//! 状态流转: `Unauthenticated -> Loading -> Ready`。
//! 本地列表只是服务端数据的投影：加载时整体替换，创建时追加，删除时按 ID 移除，
//! 不做去重、排序或回滚。

use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use owlstorage_shared::QUERY_ID;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::ApiClient;
use crate::error::{AdminError, AdminResult};
use crate::form::{FormState, ValidationErrors};
use crate::guard::{self, Gate};
use crate::notification::Notifier;
use crate::request::HttpClient;
use crate::resource::{DeletePolicy, Resource};
use crate::route::AppRoute;
use crate::session::Session;
use crate::store::Store;

// =========================================================
// 生命周期句柄
// =========================================================

/// 页面销毁标记
///
/// 控制器只在单线程中使用；标记会被放进要求 `Send + Sync` 的清理回调。
#[derive(Debug, Clone, Default)]
pub struct Lifecycle(Arc<AtomicBool>);

impl Lifecycle {
    pub fn dispose(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_disposed(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// =========================================================
// 页面状态
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePhase {
    Unauthenticated,
    Loading,
    Ready,
}

#[derive(Debug, Clone)]
pub struct PageState<R> {
    pub phase: PagePhase,
    pub items: Vec<R>,
    pub form: FormState,
    pub submitting: bool,
}

impl<R: Resource> PageState<R> {
    pub fn new() -> Self {
        Self {
            phase: PagePhase::Loading,
            items: Vec::new(),
            form: FormState::new(R::CONFIG.fields),
            submitting: false,
        }
    }
}

impl<R: Resource> Default for PageState<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// 表单提交结果
#[derive(Debug)]
pub enum SubmitOutcome {
    /// 存在空白必填字段，未发出请求
    Invalid(ValidationErrors),
    /// 已有提交正在进行，本次忽略
    Busy,
    /// 会话已失效，需要跳转
    Redirect(AppRoute),
    Created,
    Failed(AdminError),
}

// =========================================================
// 控制器
// =========================================================

pub struct ListController<R, C> {
    api: Rc<ApiClient<C>>,
    session: Session,
    notifier: Notifier,
    state: Store<PageState<R>>,
    lifecycle: Lifecycle,
}

impl<R, C> Clone for ListController<R, C> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            session: self.session.clone(),
            notifier: self.notifier.clone(),
            state: self.state.clone(),
            lifecycle: self.lifecycle.clone(),
        }
    }
}

impl<R: Resource, C: HttpClient> ListController<R, C> {
    pub fn new(api: Rc<ApiClient<C>>, session: Session, notifier: Notifier) -> Self {
        Self {
            api,
            session,
            notifier,
            state: Store::new(PageState::new()),
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn state(&self) -> &Store<PageState<R>> {
        &self.state
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }

    pub fn dispose(&self) {
        self.lifecycle.dispose();
    }

    /// 页面销毁后的迟到结果不再写入状态
    fn apply(&self, f: impl FnOnce(&mut PageState<R>)) {
        if self.lifecycle.is_disposed() {
            tracing::debug!(entity = R::CONFIG.entity, "page disposed, dropping late completion");
            return;
        }
        self.state.update(f);
    }

    fn deny(&self) -> AppRoute {
        self.apply(|s| s.phase = PagePhase::Unauthenticated);
        AppRoute::auth_failure_redirect()
    }

    /// 页面挂载时的路由守卫。
    /// 未登录时返回跳转目标，且不会发出任何加载请求。
    pub fn mount(&self) -> Option<AppRoute> {
        match guard::gate(&self.session) {
            Gate::Redirect(route) => {
                tracing::warn!(entity = R::CONFIG.entity, "no session token, redirecting to login");
                self.apply(|s| s.phase = PagePhase::Unauthenticated);
                Some(route)
            }
            Gate::Proceed => {
                self.apply(|s| s.phase = PagePhase::Loading);
                None
            }
        }
    }

    /// 加载列表；失败时提示错误并保留原有数据，不重试
    pub async fn load(&self) -> AdminResult<()> {
        let cfg = R::CONFIG;
        let Some(bearer) = self.session.bearer() else {
            self.deny();
            return Err(AdminError::auth_required("missing session token")
                .in_op_with(format!("{}.load", cfg.entity), cfg.list_path));
        };

        self.apply(|s| s.phase = PagePhase::Loading);

        let result = match self
            .api
            .get(cfg.list_path)
            .bearer(&bearer)
            .fetch::<Value>()
            .await
        {
            Ok(body) => unwrap_list::<R>(body, cfg.list_key),
            Err(e) => Err(e),
        };

        match result {
            Ok(items) => {
                tracing::info!(entity = cfg.entity, count = items.len(), "list loaded");
                self.apply(|s| {
                    s.items = items;
                    s.phase = PagePhase::Ready;
                });
                Ok(())
            }
            Err(e) => {
                let e = e.in_op_with(format!("{}.load", cfg.entity), cfg.list_path);
                tracing::error!(entity = cfg.entity, error = %e, "failed to load list");
                self.notifier.error(cfg.messages.failed);
                self.apply(|s| s.phase = PagePhase::Ready);
                Err(e)
            }
        }
    }

    /// 编辑字段；字段变为非空时清除该字段的错误
    pub fn edit(&self, field: &str, value: impl Into<String>) {
        let value = value.into();
        self.state.update(|s| {
            s.form.set(field, value);
        });
    }

    /// 校验并提交创建请求
    pub async fn submit(&self) -> SubmitOutcome {
        let cfg = R::CONFIG;

        if self.state.with(|s| s.submitting) {
            tracing::debug!(entity = cfg.entity, "submit already in flight");
            return SubmitOutcome::Busy;
        }

        if let Err(errors) = self.state.update(|s| s.form.validate()) {
            tracing::warn!(entity = cfg.entity, fields = errors.len(), "validation rejected");
            return SubmitOutcome::Invalid(errors);
        }

        let Some(bearer) = self.session.bearer() else {
            return SubmitOutcome::Redirect(self.deny());
        };

        let draft = self.state.with(|s| R::draft(s.form.values()));
        self.state.update(|s| s.submitting = true);

        match self.api.request(&draft, Some(&bearer)).await {
            Ok(created) => {
                tracing::info!(entity = cfg.entity, id = created.id(), "created");
                self.notifier.success(cfg.messages.created);
                self.apply(|s| {
                    s.items.push(created);
                    s.form.reset();
                    s.submitting = false;
                });
                SubmitOutcome::Created
            }
            Err(e) => {
                let e = e.in_op(format!("{}.create", cfg.entity));
                tracing::error!(entity = cfg.entity, error = %e, "failed to create");
                self.notifier.error(cfg.messages.failed);
                self.apply(|s| s.submitting = false);
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// 按 ID 删除
    ///
    /// `DeletePolicy::Optimistic` 下无论请求结果如何都会从列表中移除。
    pub async fn delete(&self, id: &str) -> AdminResult<()> {
        let cfg = R::CONFIG;
        let op = format!("{}.delete", cfg.entity);

        let Some(bearer) = self.session.bearer() else {
            self.deny();
            return Err(AdminError::auth_required("missing session token").in_op_with(op, id));
        };

        let result = self
            .api
            .delete(cfg.delete_path)
            .query(QUERY_ID, id)
            .bearer(&bearer)
            .send()
            .await
            .map(|_| ());

        let remove = match cfg.delete_policy {
            DeletePolicy::Optimistic => true,
            DeletePolicy::Confirmed => result.is_ok(),
        };
        if remove {
            self.apply(|s| s.items.retain(|item| item.id() != id));
        }

        match result {
            Ok(()) => {
                tracing::info!(entity = cfg.entity, id, "deleted");
                self.notifier.success(cfg.messages.deleted);
                Ok(())
            }
            Err(e) => {
                let e = e.in_op_with(op, id);
                tracing::error!(entity = cfg.entity, id, error = %e, "failed to delete");
                self.notifier.error(cfg.messages.failed);
                Err(e)
            }
        }
    }
}

/// 从 `{<key>: [...]}` 中取出列表；字段缺失或为 null 视为空列表
fn unwrap_list<R: DeserializeOwned>(mut body: Value, key: &str) -> AdminResult<Vec<R>> {
    match body.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(list) => Ok(serde_json::from_value(list)?),
    }
}
