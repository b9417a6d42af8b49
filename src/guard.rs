//! 路由守卫
//!
//! - `resolve`: 路由器在每次导航（包括浏览器前进/后退）时使用
//! - `gate`: 页面挂载时使用，决定是加载数据还是跳转登录

use crate::route::AppRoute;
use crate::session::Session;

/// 页面挂载时的守卫结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// 已登录，可以加载数据
    Proceed,
    /// 未登录，跳转到指定路由，不发出任何数据请求
    Redirect(AppRoute),
}

pub fn gate(session: &Session) -> Gate {
    if session.is_authenticated() {
        Gate::Proceed
    } else {
        Gate::Redirect(AppRoute::auth_failure_redirect())
    }
}

/// 根据认证状态决定导航的最终目标
pub fn resolve(target: AppRoute, authenticated: bool) -> AppRoute {
    if target.requires_auth() && !authenticated {
        tracing::warn!(target = %target, "access denied, redirecting to login");
        return AppRoute::auth_failure_redirect();
    }

    if target.should_redirect_when_authenticated() && authenticated {
        return AppRoute::auth_success_redirect();
    }

    target
}
