//! トップレベルのエラー表示

use invoice_analyzer_common::PageView;
use leptos::prelude::*;

#[component]
pub fn ErrorMessage(page: Memo<PageView>) -> impl IntoView {
    move || {
        page.with(|p| p.error.clone()).map(|error| {
            view! {
                <div class="error-message">
                    <p>{error}</p>
                </div>
            }
        })
    }
}
