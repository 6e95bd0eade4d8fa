//! `/api/analyze` の入出力
//!
//! HTTPステータスとボディから、コントローラに渡す `Outcome` を作る。
//! 通信そのものは各フロントエンド（reqwest / fetch）が行う。

use crate::types::{AnalysisResult, InvoiceData};

/// 解析エンドポイントのパス
pub const ANALYZE_PATH: &str = "/api/analyze";

/// multipart のファイルパート名
pub const FILE_FIELD: &str = "file";

pub const PDF_MIME: &str = "application/pdf";

/// エラーメッセージが取れなかったときの固定文言
pub const FALLBACK_ERROR: &str = "An error occurred while processing the invoice";

/// トランスポートが受け取ったHTTPレスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 1回の送信の結末
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// HTTP成功。結果に解析エラーが埋め込まれている場合もある
    Analyzed(AnalysisResult),
    /// トップレベルのエラー
    Failed(String),
}

impl Outcome {
    /// レスポンス自体が得られなかった場合
    pub fn transport_failure() -> Self {
        Outcome::Failed(FALLBACK_ERROR.to_string())
    }
}

/// レスポンスを解釈する
///
/// - 2xx + JSONオブジェクト → `Analyzed`
/// - 2xx だがボディが壊れている → 固定文言で `Failed`
/// - 非2xx → ボディの `error` 文字列、なければ固定文言で `Failed`
pub fn interpret(reply: &Reply) -> Outcome {
    if reply.is_success() {
        return match InvoiceData::parse(&reply.body) {
            Ok(data) => Outcome::Analyzed(data.into()),
            Err(e) => {
                tracing::warn!(status = reply.status, error = %e, "malformed analysis body");
                Outcome::Failed(FALLBACK_ERROR.to_string())
            }
        };
    }

    let message = serde_json::from_str::<serde_json::Value>(&reply.body)
        .ok()
        .and_then(|body| {
            body.get("error")
                .and_then(|e| e.as_str())
                .filter(|e| !e.is_empty())
                .map(str::to_string)
        });

    tracing::debug!(status = reply.status, has_message = message.is_some(), "analysis request failed");
    Outcome::Failed(message.unwrap_or_else(|| FALLBACK_ERROR.to_string()))
}

/// ベースURLと `ANALYZE_PATH` を結合する
///
/// # Examples
/// ```
/// use invoice_analyzer_common::analyze_url;
///
/// assert_eq!(analyze_url("http://localhost:5173/"), "http://localhost:5173/api/analyze");
/// assert_eq!(analyze_url(""), "/api/analyze");
/// ```
pub fn analyze_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), ANALYZE_PATH)
}
