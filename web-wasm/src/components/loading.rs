//! 処理中インジケータ

use invoice_analyzer_common::view::LOADING_MESSAGE;
use leptos::prelude::*;

#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="loading">
            <div class="spinner" />
            <p class="loading-text">{LOADING_MESSAGE}</p>
        </div>
    }
}
