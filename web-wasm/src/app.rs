//! メインアプリケーションコンポーネント

use crate::api::upload::{read_selected_file, upload_invoice};
use crate::components::{
    error_message::ErrorMessage, header::Header, loading::LoadingIndicator,
    result_panel::ResultPanel, upload_form::UploadForm,
};
use invoice_analyzer_common::{interpret, Controller, Outcome, PageView, READ_FAILED_MESSAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 画面状態はコントローラ1つに集約し、表示はそこから導出する
    let controller = RwSignal::new(Controller::new());
    let page = Memo::new(move |_| controller.with(PageView::from_controller));

    // ファイル選択ハンドラ: 選択は即座に反映し、中身は読み終えてから確定する
    let on_file_selected = move |file: File| {
        let Some(ticket) = controller.try_update(|c| c.begin_selection(file.name())).flatten() else {
            return;
        };

        spawn_local(async move {
            match read_selected_file(file).await {
                Ok(selected) => controller.update(|c| {
                    c.finish_selection(ticket, selected);
                }),
                Err(e) => {
                    web_sys::console::error_2(&"Error:".into(), &e);
                    controller.update(|c| {
                        c.fail_selection(ticket, READ_FAILED_MESSAGE);
                    });
                }
            }
        });
    };

    // 解析開始ハンドラ
    let on_submit = move |_: ()| {
        let Some(file) = controller.try_update(|c| c.submit().ok()).flatten() else {
            return;
        };

        spawn_local(async move {
            let outcome = match upload_invoice(&file).await {
                Ok(reply) => interpret(&reply),
                Err(e) => {
                    web_sys::console::error_2(&"Error:".into(), &e);
                    Outcome::transport_failure()
                }
            };
            controller.update(|c| {
                c.complete(outcome);
            });
        });
    };

    view! {
        <div class="app">
            <Header />

            <main class="app-content">
                <UploadForm
                    page=page
                    on_file_selected=on_file_selected
                    on_submit=on_submit
                />

                <ErrorMessage page=page />

                <Show when=move || page.with(|p| p.loading)>
                    <LoadingIndicator />
                </Show>

                <ResultPanel page=page />
            </main>
        </div>
    }
}
