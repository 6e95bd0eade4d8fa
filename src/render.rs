//! 表示モデルの端末向け描画

use invoice_analyzer_common::view::{LOADING_MESSAGE, RAW_RESPONSE_LABEL, RESULT_TITLE};
use invoice_analyzer_common::{InvoiceData, PageView, Reply, ResultView};
use std::fmt::Write;

/// 画面全体を描画する
pub fn render_page(view: &PageView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "📄 {}", view.file_label);
    let _ = writeln!(
        out,
        "[{}]{}",
        view.submit_label,
        if view.submit_enabled { "" } else { " (disabled)" }
    );

    if let Some(error) = &view.error {
        let _ = writeln!(out, "\n❌ {}", error);
    }

    if view.loading {
        let _ = writeln!(out, "\n⏳ {}", LOADING_MESSAGE);
    }

    if let Some(result) = &view.result {
        out.push('\n');
        out.push_str(&render_result(result));
    }

    out
}

/// 結果ブロックを描画する
pub fn render_result(result: &ResultView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RESULT_TITLE);
    let _ = writeln!(out, "{}", "-".repeat(RESULT_TITLE.len()));

    match result {
        ResultView::Fields { rows, provenance } => {
            let width = rows.iter().map(|r| r.label.len() + 1).max().unwrap_or(0);
            for row in rows {
                let label = format!("{}:", row.label);
                if row.emphasized {
                    let _ = writeln!(out, "{:<width$} ** {} **", label, row.value);
                } else {
                    let _ = writeln!(out, "{:<width$} {}", label, row.value);
                }
            }
            if let Some(provenance) = provenance {
                let _ = writeln!(out, "\n({})", provenance);
            }
        }
        ResultView::Error { message, raw_response } => {
            let _ = writeln!(out, "Error: {}", message);
            if let Some(raw) = raw_response {
                let _ = writeln!(out, "\n▼ {}", RAW_RESPONSE_LABEL);
                for line in raw.lines() {
                    let _ = writeln!(out, "  {}", line);
                }
            }
        }
    }

    out
}

/// `analyze` コマンドの標準出力
///
/// 通常は画面全体（エラーも画面内に出る）。`--json` では受信ボディを
/// 解析済みレコードに正規化して出し、JSONでなければそのまま出す。
pub fn render_analysis(view: &PageView, reply: Option<&Reply>, json: bool) -> String {
    if !json {
        return render_page(view);
    }

    let Some(reply) = reply else {
        return String::new();
    };
    let normalized = InvoiceData::parse(&reply.body)
        .and_then(|data| Ok(serde_json::to_string_pretty(&data)?));
    match normalized {
        Ok(pretty) => format!("{}\n", pretty),
        Err(_) => format!("{}\n", reply.body),
    }
}
