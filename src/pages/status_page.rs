//! Not-found and generic failure pages.

use leptos::prelude::*;

pub fn not_found() -> String {
    super::render_document("Not Found".to_owned(), || {
        view! {
            <div class="status-page">
                <h1>"404"</h1>
                <p>"This collection could not be found."</p>
                <a href="/">"Back to the market place"</a>
            </div>
        }
    })
}

pub fn failure() -> String {
    super::render_document("Something went wrong".to_owned(), || {
        view! {
            <div class="status-page">
                <h1>"Whoops! Something went wrong!"</h1>
                <a href="/">"Back to the market place"</a>
            </div>
        }
    })
}
