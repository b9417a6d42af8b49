use leptos::prelude::*;
use owlstorage::auth;
use owlstorage::resource::GENERIC_FAILURE;
use owlstorage::route::AppRoute;

use crate::context::use_app;
use crate::web::router::{Link, use_router};

#[component]
pub fn Navbar() -> impl IntoView {
    let app = use_app();
    let router = use_router();

    let on_logout = move |_| {
        let services = app.services();
        match auth::logout(&services.session) {
            Ok(route) => router.go(route),
            Err(e) => {
                tracing::error!(error = %e, "logout failed");
                services.notifier.error(GENERIC_FAILURE);
            }
        }
    };

    let links = AppRoute::NAV
        .into_iter()
        .map(|route| {
            let class = move || {
                if router.current_route().get() == route {
                    "btn btn-ghost btn-active"
                } else {
                    "btn btn-ghost"
                }
            };
            let on_click = move |ev: leptos::ev::MouseEvent| {
                ev.prevent_default();
                router.go(route);
            };
            view! {
                <li>
                    <a href=route.to_path() class=class on:click=on_click>{route.label()}</a>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="navbar bg-base-100 shadow-xl">
            <div class="flex-1">
                <Link to=AppRoute::Clients class="btn btn-ghost text-xl">"OwlStorage"</Link>
            </div>
            <div class="flex-none gap-2">
                <ul class="menu menu-horizontal px-1">{links}</ul>
                <button on:click=on_logout class="btn btn-outline btn-error">
                    "Logout"
                </button>
            </div>
        </div>
    }
}
