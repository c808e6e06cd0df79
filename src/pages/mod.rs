//! Server-rendered views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages are Leptos views rendered to HTML strings inside Axum handlers. No
//! WASM bundle ships: the sign-in and mint buttons are plain form posts, so
//! every interaction is a request/redirect round trip. Handlers build small
//! view structs from domain records so views never touch collaborators.

pub mod drop_page;
pub mod home;
pub mod status_page;

use leptos::prelude::*;

const STYLES: &str = r"
body { margin: 0; font-family: system-ui, sans-serif; color: #1f2937; }
a { color: inherit; text-decoration: none; }
.brand { font-weight: 800; text-decoration: underline; text-decoration-color: rgba(219, 39, 119, 0.5); }
.home { max-width: 80rem; margin: 0 auto; padding: 5rem 2.5rem; }
.home__title { text-align: center; font-size: 1.875rem; font-weight: 200; margin-bottom: 2.5rem; }
.home__grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(15rem, 1fr)); gap: 1rem; background: #f1f5f9; padding: 2.5rem; }
.card { display: flex; flex-direction: column; align-items: center; transition: transform 0.2s; }
.card:hover { transform: scale(1.05); }
.card__image { height: 24rem; width: 15rem; border-radius: 1rem; object-fit: cover; }
.card__description { color: #9ca3af; font-size: 0.875rem; }
.drop { display: grid; grid-template-columns: 2fr 3fr; min-height: 100vh; }
.drop__side { background: linear-gradient(to bottom right, #155e75, #f43f5e); display: flex; flex-direction: column; align-items: center; justify-content: center; color: white; text-align: center; }
.drop__preview { width: 18rem; border-radius: 0.75rem; object-fit: cover; }
.drop__main { display: flex; flex-direction: column; padding: 1.5rem; }
.drop__header { display: flex; align-items: center; justify-content: space-between; }
.drop__wallet { text-align: center; font-size: 0.875rem; color: #fb7185; }
.drop__content { flex: 1; display: flex; flex-direction: column; align-items: center; justify-content: center; text-align: center; }
.drop__supply { color: #22c55e; font-size: 1.25rem; }
.drop__supply--pulse { animation: pulse 2s ease-in-out infinite; }
@keyframes pulse { 50% { opacity: 0.5; } }
.btn { border: 0; border-radius: 9999px; color: white; font-weight: 700; cursor: pointer; }
.btn--wallet { background: #fb7185; padding: 0.5rem 1rem; }
.btn--mint { background: #dc2626; width: 100%; height: 4rem; margin-top: 2.5rem; }
.btn:disabled { background: #9ca3af; cursor: not-allowed; }
.toasts { position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); display: flex; flex-direction: column; gap: 0.5rem; }
.toast { padding: 1.25rem; font-weight: 800; font-size: 17px; border-radius: 0.5rem; }
.toast--loading { background: white; color: green; }
.toast--success { background: green; color: white; }
.toast--failure { background: red; color: white; }
.status-page { text-align: center; padding: 5rem; }
";

/// Render a complete HTML document around `body`.
pub fn render_document<F, V>(title: String, body: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    Owner::new().with(move || {
        view! {
            <!DOCTYPE html>
            <html lang="en">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <title>{title}</title>
                    <link rel="icon" href="/favicon.ico"/>
                    <style>{STYLES}</style>
                </head>
                <body>{body()}</body>
            </html>
        }
        .to_html()
    })
}
