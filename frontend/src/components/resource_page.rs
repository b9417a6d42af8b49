//! 列表-表单页面
//!
//! 三个实体页面共用同一个渲染函数，差异全部来自 `Resource::CONFIG`。

use leptos::prelude::*;
use leptos::task::spawn_local;
use owlstorage::controller::{ListController, SubmitOutcome};
use owlstorage::resource::Resource;
use owlstorage::view::{PageView, project};
use owlstorage_shared::{Category, Customer, Product};

use crate::context::use_app;
use crate::web::BrowserHttpClient;
use crate::web::router::use_router;

#[component]
pub fn ClientsPage() -> impl IntoView {
    resource_page::<Customer>()
}

#[component]
pub fn CategoriesPage() -> impl IntoView {
    resource_page::<Category>()
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    resource_page::<Product>()
}

fn resource_page<R: Resource>() -> impl IntoView {
    let services = use_app().services();
    let router = use_router();

    let ctrl = ListController::<R, BrowserHttpClient>::new(
        services.api,
        services.session,
        services.notifier,
    );

    // 控制器状态 -> 视图模型信号
    let (page, set_page) = signal(ctrl.state().with(project::<R>));
    let lifecycle = ctrl.lifecycle();
    {
        let lifecycle = lifecycle.clone();
        ctrl.state().subscribe(move |state| {
            if !lifecycle.is_disposed() {
                set_page.set(project(state));
            }
        });
    }
    on_cleanup(move || lifecycle.dispose());

    let ctrl = StoredValue::new_local(ctrl);

    // 挂载：守卫 -> 加载
    Effect::new(move |_| {
        let Some(c) = ctrl.try_get_value() else {
            return;
        };
        match c.mount() {
            Some(route) => router.redirect(route),
            None => spawn_local(async move {
                let _ = c.load().await;
            }),
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(c) = ctrl.try_get_value() else {
            return;
        };
        spawn_local(async move {
            if let SubmitOutcome::Redirect(route) = c.submit().await {
                router.redirect(route);
            }
        });
    };

    // 字段是静态声明的，只有值和错误是响应式的，避免输入时重建输入框
    let fields = R::CONFIG
        .fields
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let name = spec.name;
            let value = move || page.with(|p| p.fields[i].value.clone());
            let error = move || page.with(|p| p.fields[i].error.clone());
            let input_class = move || {
                if page.with(|p| p.fields[i].error.is_some()) {
                    "input input-bordered input-error w-full"
                } else {
                    "input input-bordered w-full"
                }
            };
            view! {
                <div class="form-control">
                    <label class="label" for=name>
                        <span class="label-text">{spec.caption}</span>
                    </label>
                    <input
                        id=name
                        type=spec.kind.input_type()
                        placeholder=spec.placeholder
                        class=input_class
                        prop:value=value
                        on:input=move |ev| {
                            if let Some(c) = ctrl.try_get_value() {
                                c.edit(name, event_target_value(&ev));
                            }
                        }
                    />
                    <span class="text-error text-sm mt-1">{error}</span>
                </div>
            }
        })
        .collect_view();

    let rows = Memo::new(move |_| page.with(|p| p.rows.clone()));
    let list = move || {
        rows.get()
            .into_iter()
            .map(|row| {
                let id = row.id.clone();
                let on_delete = move |_| {
                    let Some(c) = ctrl.try_get_value() else {
                        return;
                    };
                    let id = id.clone();
                    spawn_local(async move {
                        let _ = c.delete(&id).await;
                    });
                };

                view! {
                    <div class="card bg-base-100 shadow-md">
                        <div class="card-body">
                            {row
                                .cells
                                .into_iter()
                                .map(|(label, value)| {
                                    view! {
                                        <p>
                                            <span class="font-bold">{label}</span>
                                            " "
                                            {value}
                                        </p>
                                    }
                                })
                                .collect_view()}
                            <div class="card-actions justify-end">
                                <button class="btn btn-error btn-sm" on:click=on_delete>
                                    "Deletar"
                                </button>
                            </div>
                        </div>
                    </div>
                }
            })
            .collect_view()
    };

    let is_loading = move || page.with(PageView::is_loading);
    let is_empty = move || page.with(PageView::is_empty);
    let submitting = move || page.with(|p| p.submitting);

    view! {
        <div class="space-y-8">
            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=on_submit>
                    <h2 class="card-title text-2xl">{R::CONFIG.title}</h2>
                    {fields}
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" disabled=submitting>
                            {move || {
                                if submitting() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    "Cadastrar".into_any()
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>

            <Show when=is_loading>
                <div class="flex justify-center py-8">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>
            <Show when=is_empty>
                <p class="text-center py-8 text-base-content/50">"Nenhum registro encontrado"</p>
            </Show>
            <div class="grid gap-4 md:grid-cols-2">{list}</div>
        </div>
    }
}
