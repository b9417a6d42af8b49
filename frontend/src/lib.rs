//! OwlStorage 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `context`: 会话、API 客户端与通知中心
//! - `web::router`: 路由服务（核心引擎）
//! - `components`: UI 组件层
//!
//! 业务状态与守卫规则都在 `owlstorage` 核心库中，本 crate 只负责渲染与浏览器 API。

mod context;
mod components {
    pub mod auth_form;
    pub mod footer;
    pub mod navbar;
    pub mod resource_page;
    pub mod toasts;
}

// 浏览器 API 封装模块
pub mod web {
    pub mod console;
    mod http;
    pub mod router;
    mod storage;

    pub use http::BrowserHttpClient;
    pub use storage::BrowserStorage;
}

use crate::components::auth_form::{LoginPage, RegisterPage};
use crate::components::footer::Footer;
use crate::components::navbar::Navbar;
use crate::components::resource_page::{CategoriesPage, ClientsPage, ProductsPage};
use crate::components::toasts::Toasts;
use crate::context::{AppContext, AppServices};

use leptos::prelude::*;
use owlstorage::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Clients => view! { <ClientsPage /> }.into_any(),
        AppRoute::Categories => view! { <CategoriesPage /> }.into_any(),
        AppRoute::Products => view! { <ProductsPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center py-24">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página não encontrada"</p>
                    <Link to=AppRoute::Clients class="btn btn-link mt-4">"Voltar ao início"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话、API 客户端与通知中心
    let services = AppServices::init();

    // 2. 会话状态 -> 信号，用于注入路由服务
    let (is_authenticated, set_is_authenticated) = signal(services.session.is_authenticated());
    services
        .session
        .watch(move |auth| set_is_authenticated.set(auth));

    provide_context(AppContext::new(services));

    view! {
        <div class="min-h-screen flex flex-col bg-base-200 font-sans">
            <Router is_authenticated=is_authenticated.into()>
                <Show when=move || is_authenticated.get()>
                    <Navbar />
                </Show>
                <main class="flex-1 w-full max-w-5xl mx-auto p-4 md:p-8">
                    <RouterOutlet matcher=route_matcher />
                </main>
                <Footer />
                <Toasts />
            </Router>
        </div>
    }
}
