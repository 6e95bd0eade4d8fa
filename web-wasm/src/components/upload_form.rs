//! アップロードフォームコンポーネント

use invoice_analyzer_common::PageView;
use leptos::prelude::*;
use web_sys::{Event, File, HtmlInputElement, SubmitEvent};

#[component]
pub fn UploadForm<FF, FS>(
    page: Memo<PageView>,
    on_file_selected: FF,
    on_submit: FS,
) -> impl IntoView
where
    FF: Fn(File) + 'static + Clone + Send,
    FS: Fn(()) + 'static + Clone + Send,
{
    let on_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file_selected(file);
        }
    };

    let on_form_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit(());
    };

    view! {
        <form class="upload-form" on:submit=on_form_submit>
            <div class="file-input-container">
                <input
                    type="file"
                    id="file-upload"
                    class="file-input"
                    accept=".pdf"
                    on:change=on_change
                    disabled=move || !page.with(|p| p.input_enabled)
                />
                <label for="file-upload" class="file-upload-label">
                    {move || page.with(|p| p.file_label.clone())}
                </label>
            </div>

            <button
                type="submit"
                class="analyze-button"
                disabled=move || !page.with(|p| p.submit_enabled)
            >
                {move || page.with(|p| p.submit_label)}
            </button>
        </form>
    }
}
