//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - InvoiceData: `/api/analyze` が返すJSONそのもの
//! - InvoiceFields: 抽出された請求書項目
//! - AnalysisResult: 項目 or 解析エラーのどちらか一方

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// `/api/analyze` のレスポンスボディ
///
/// キーの欠落と `null` はどちらも `None` になる。未知のキーは無視。
/// 数値などのスカラーは文字列として受け取る（AIが金額を数値で返すことがある）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceData {
    #[serde(deserialize_with = "lenient_string")]
    pub vendor_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub invoice_number: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub invoice_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub due_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub total_amount: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub raw_response: Option<String>,

    /// 抽出方式（例: "AI (Google Gemini)", "regex (fallback)"）
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub extraction_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub extraction_confidence: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub notes: Option<String>,
}

impl InvoiceData {
    /// レスポンスボディをパースする（JSONオブジェクト以外はエラー）
    pub fn parse(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        if !value.is_object() {
            let kind = match value {
                serde_json::Value::Null => "null",
                serde_json::Value::Bool(_) => "boolean",
                serde_json::Value::Number(_) => "number",
                serde_json::Value::String(_) => "string",
                serde_json::Value::Array(_) => "array",
                serde_json::Value::Object(_) => "object",
            };
            return Err(Error::UnexpectedBody(kind.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// 抽出された請求書項目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFields {
    pub vendor_name: Option<String>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<String>,
    pub due_date: Option<String>,
    pub total_amount: Option<String>,
    pub extraction_method: Option<String>,
    pub extraction_confidence: Option<String>,
    pub notes: Option<String>,
}

impl InvoiceFields {
    /// 抽出方式・信頼度・備考を1行にまとめる（すべて空ならNone）
    pub fn provenance(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(method) = non_empty(&self.extraction_method) {
            parts.push(format!("Extracted via {}", method));
        }
        if let Some(confidence) = non_empty(&self.extraction_confidence) {
            parts.push(format!("confidence: {}", confidence));
        }
        if let Some(notes) = non_empty(&self.notes) {
            parts.push(notes.to_string());
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" / "))
        }
    }
}

/// サーバ側で解析自体が失敗した場合（HTTPは成功）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisError {
    pub message: String,
    /// 診断用の未加工レスポンス
    pub raw_response: Option<String>,
}

/// 解析結果: 項目 or 埋め込みエラーのどちらか一方
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisResult {
    Fields(InvoiceFields),
    Error(AnalysisError),
}

impl AnalysisResult {
    pub fn is_error(&self) -> bool {
        matches!(self, AnalysisResult::Error(_))
    }

    pub fn fields(&self) -> Option<&InvoiceFields> {
        match self {
            AnalysisResult::Fields(fields) => Some(fields),
            AnalysisResult::Error(_) => None,
        }
    }
}

impl From<InvoiceData> for AnalysisResult {
    fn from(data: InvoiceData) -> Self {
        match data.error {
            Some(message) if !message.is_empty() => AnalysisResult::Error(AnalysisError {
                message,
                raw_response: data.raw_response.filter(|raw| !raw.is_empty()),
            }),
            _ => AnalysisResult::Fields(InvoiceFields {
                vendor_name: data.vendor_name,
                invoice_number: data.invoice_number,
                invoice_date: data.invoice_date,
                due_date: data.due_date,
                total_amount: data.total_amount,
                extraction_method: data.extraction_method,
                extraction_confidence: data.extraction_confidence,
                notes: data.notes,
            }),
        }
    }
}

/// 文字列以外のスカラーも文字列化して受け取る
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// 空文字列もNone扱い
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_null_and_missing_fields() {
        let json = r#"{"invoice_number": "INV-1", "due_date": null, "unknown_key": 42}"#;
        let data: InvoiceData = serde_json::from_str(json).unwrap();

        assert_eq!(data.invoice_number.as_deref(), Some("INV-1"));
        assert_eq!(data.due_date, None);
        assert_eq!(data.vendor_name, None);
        assert_eq!(data.error, None);
    }

    #[test]
    fn test_parse_rejects_non_object_bodies() {
        assert!(matches!(InvoiceData::parse("[]"), Err(Error::UnexpectedBody(kind)) if kind == "array"));
        assert!(matches!(InvoiceData::parse("null"), Err(Error::UnexpectedBody(kind)) if kind == "null"));
        assert!(matches!(InvoiceData::parse("<html>"), Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_accepts_numeric_amount() {
        let data = InvoiceData::parse(r#"{"total_amount": 1250.5, "invoice_number": 42}"#).unwrap();
        assert_eq!(data.total_amount.as_deref(), Some("1250.5"));
        assert_eq!(data.invoice_number.as_deref(), Some("42"));
    }

    #[test]
    fn test_error_field_selects_error_variant() {
        let data = InvoiceData {
            invoice_number: Some("INV-9".into()),
            error: Some("unreadable PDF".into()),
            raw_response: Some("<binary garbage>".into()),
            ..Default::default()
        };

        let result = AnalysisResult::from(data);
        assert_eq!(
            result,
            AnalysisResult::Error(AnalysisError {
                message: "unreadable PDF".into(),
                raw_response: Some("<binary garbage>".into()),
            })
        );
        assert!(result.fields().is_none());
    }

    #[test]
    fn test_empty_error_is_not_an_error() {
        let data = InvoiceData {
            invoice_number: Some("INV-1".into()),
            error: Some(String::new()),
            ..Default::default()
        };

        let result = AnalysisResult::from(data);
        assert!(!result.is_error());
        assert_eq!(
            result.fields().and_then(|f| f.invoice_number.as_deref()),
            Some("INV-1")
        );
    }

    #[test]
    fn test_provenance_from_backend_metadata() {
        let json = r#"{
            "vendor_name": "Acme",
            "extraction_method": "regex (fallback)",
            "extraction_confidence": "medium",
            "notes": "Using fallback regex parser - results may be less accurate"
        }"#;
        let data: InvoiceData = serde_json::from_str(json).unwrap();
        let result = AnalysisResult::from(data);

        let provenance = result.fields().and_then(|f| f.provenance()).unwrap();
        assert_eq!(
            provenance,
            "Extracted via regex (fallback) / confidence: medium / Using fallback regex parser - results may be less accurate"
        );
    }

    #[test]
    fn test_provenance_absent() {
        assert_eq!(InvoiceFields::default().provenance(), None);
    }
}
