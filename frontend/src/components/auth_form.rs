use leptos::prelude::*;
use leptos::task::spawn_local;
use owlstorage::auth::{AuthController, AuthMode, AuthOutcome};
use owlstorage::route::AppRoute;
use owlstorage::view::project_auth;

use crate::context::use_app;
use crate::web::BrowserHttpClient;
use crate::web::router::{Link, use_router};

#[component]
pub fn LoginPage() -> impl IntoView {
    auth_form(AuthMode::Login)
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    auth_form(AuthMode::Register)
}

fn auth_form(mode: AuthMode) -> impl IntoView {
    let services = use_app().services();
    let router = use_router();

    let ctrl = AuthController::<BrowserHttpClient>::new(
        mode,
        services.api,
        services.session,
        services.notifier,
    );

    let (form, set_form) = signal(ctrl.state().with(|s| project_auth(mode, s)));
    let lifecycle = ctrl.lifecycle();
    {
        let lifecycle = lifecycle.clone();
        ctrl.state().subscribe(move |state| {
            if !lifecycle.is_disposed() {
                set_form.set(project_auth(mode, state));
            }
        });
    }
    on_cleanup(move || lifecycle.dispose());

    let ctrl = StoredValue::new_local(ctrl);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(c) = ctrl.try_get_value() else {
            return;
        };
        spawn_local(async move {
            if let AuthOutcome::Navigate(route) = c.submit().await {
                router.go(route);
            }
        });
    };

    let fields = mode
        .fields()
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let name = spec.name;
            let value = move || form.with(|f| f.fields[i].value.clone());
            let error = move || form.with(|f| f.fields[i].error.clone());

            view! {
                <div class="form-control">
                    <label class="label" for=name>
                        <span class="label-text">{spec.caption}</span>
                    </label>
                    <input
                        id=name
                        type=spec.kind.input_type()
                        placeholder=spec.placeholder
                        class="input input-bordered"
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

    let submitting = move || form.with(|f| f.submitting);
    let (button, link) = match mode {
        AuthMode::Login => (
            "Entrar",
            view! { <Link to=AppRoute::Register class="link link-primary">"Não tem conta? Cadastre-se"</Link> }.into_any(),
        ),
        AuthMode::Register => (
            "Cadastrar",
            view! { <Link to=AppRoute::Login class="link link-primary">"Já tem conta? Faça login"</Link> }.into_any(),
        ),
    };

    view! {
        <div class="hero py-12">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">{mode.title()}</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {fields}
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=submitting>
                                {move || {
                                    if submitting() {
                                        view! { <span class="loading loading-spinner"></span> }.into_any()
                                    } else {
                                        button.into_any()
                                    }
                                }}
                            </button>
                        </div>
                        <div class="text-center mt-2">{link}</div>
                    </form>
                </div>
            </div>
        </div>
    }
}
