//! 解析結果パネル
//!
//! 4項目の表、またはサーバ側の解析エラー（Raw Response 付き）を表示する。

use invoice_analyzer_common::view::{RAW_RESPONSE_LABEL, RESULT_TITLE};
use invoice_analyzer_common::{PageView, ResultView};
use leptos::prelude::*;

#[component]
pub fn ResultPanel(page: Memo<PageView>) -> impl IntoView {
    move || {
        page.with(|p| p.result.clone()).map(|result| {
            view! {
                <div class="result-container">
                    <h2>{RESULT_TITLE}</h2>
                    {result_body(result)}
                </div>
            }
        })
    }
}

fn result_body(result: ResultView) -> AnyView {
    let error_text = result.error_text();
    match result {
        ResultView::Fields { rows, provenance } => view! {
            <div class="result-details">
                {rows
                    .into_iter()
                    .map(|row| {
                        view! {
                            <div
                                class="result-row"
                                class:total={row.emphasized}
                                class:missing={!row.found}
                            >
                                <span class="result-label">{format!("{}:", row.label)}</span>
                                <span class="result-value">{row.value}</span>
                            </div>
                        }
                    })
                    .collect_view()}
                {provenance.map(|text| view! { <p class="result-provenance">{text}</p> })}
            </div>
        }
        .into_any(),
        ResultView::Error { raw_response, .. } => view! {
            <div class="error-message">
                <p>{error_text}</p>
                {raw_response.map(|raw| {
                    view! {
                        <details>
                            <summary>{RAW_RESPONSE_LABEL}</summary>
                            <pre>{raw}</pre>
                        </details>
                    }
                })}
            </div>
        }
        .into_any(),
    }
}
