use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer footer-center p-6 bg-base-300 text-base-content">
            <aside>
                <p class="font-bold text-lg">"OwlStorage"</p>
                <p>"© 2023. Desenvolvido por Matheus Ariza"</p>
            </aside>
        </footer>
    }
}
