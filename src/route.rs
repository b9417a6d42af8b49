//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 客户列表 (首页，需要认证)
    #[default]
    Clients,
    /// 分类列表 (需要认证)
    Categories,
    /// 商品列表 (需要认证)
    Products,
    /// 登录页面
    Login,
    /// 注册页面
    Register,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 导航栏中展示的页面
    pub const NAV: [AppRoute; 3] = [AppRoute::Clients, AppRoute::Categories, AppRoute::Products];

    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Clients,
            "/categories" => Self::Categories,
            "/products" => Self::Products,
            "/login" => Self::Login,
            "/register" => Self::Register,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Clients => "/",
            Self::Categories => "/categories",
            Self::Products => "/products",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::NotFound => "/404",
        }
    }

    /// 导航栏标签
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clients => "Clients",
            Self::Categories => "Categories",
            Self::Products => "Products",
            Self::Login => "Login",
            Self::Register => "Sign In",
            Self::NotFound => "404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Clients | Self::Categories | Self::Products)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Clients
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_known_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Clients);
        assert_eq!(AppRoute::from_path(""), AppRoute::Clients);
        assert_eq!(AppRoute::from_path("/categories/"), AppRoute::Categories);
        assert_eq!(AppRoute::from_path("/products?page=2"), AppRoute::Products);
        assert_eq!(AppRoute::from_path("/login#top"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/register"), AppRoute::Register);
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::NotFound);
    }

    #[test]
    fn test_paths_round_trip_for_real_pages() {
        for route in [
            AppRoute::Clients,
            AppRoute::Categories,
            AppRoute::Products,
            AppRoute::Login,
            AppRoute::Register,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn test_only_entity_pages_are_gated() {
        assert!(AppRoute::NAV.iter().all(AppRoute::requires_auth));
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::Register.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
    }
}
