use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use owlstorage::notification::NotificationKind;

use crate::context::use_app;

/// 全局通知，每条在配置的时间后自动消失
#[component]
pub fn Toasts() -> impl IntoView {
    let services = use_app().services();
    let (items, set_items) = signal(services.notifier.current());

    let timeout_ms = u32::try_from(services.config.toast_timeout.as_millis()).unwrap_or(u32::MAX);
    let scheduled = Rc::new(RefCell::new(HashSet::new()));
    let notifier = services.notifier.clone();

    services.notifier.subscribe(move |current| {
        set_items.set(current.to_vec());

        let mut scheduled = scheduled.borrow_mut();
        scheduled.retain(|id| current.iter().any(|n| n.id == *id));
        for n in current {
            if scheduled.insert(n.id) {
                let notifier = notifier.clone();
                let id = n.id;
                Timeout::new(timeout_ms, move || notifier.dismiss(id)).forget();
            }
        }
    });

    view! {
        <div class="toast toast-top toast-end z-50">
            {move || {
                items
                    .get()
                    .into_iter()
                    .map(|n| {
                        let class = match n.kind {
                            NotificationKind::Success => "alert alert-success shadow-lg",
                            NotificationKind::Error => "alert alert-error shadow-lg",
                        };
                        view! {
                            <div class=class>
                                <span>{n.message}</span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
