//! 表示モデル
//!
//! コントローラの状態から、画面に出すラベル・値・有効/無効を決める。
//! Web(Leptos)とCLIはどちらもこのモデルを描画するだけ。

use crate::controller::Controller;
use crate::types::{non_empty, AnalysisResult, InvoiceFields};

/// 値が無い項目の表示
pub const NOT_FOUND: &str = "Not found";

pub const CHOOSE_FILE_LABEL: &str = "Choose PDF file";
pub const SUBMIT_LABEL: &str = "Analyze Invoice";
pub const SUBMITTING_LABEL: &str = "Analyzing . . ";
pub const LOADING_MESSAGE: &str = "Processing your invoice...";
pub const RESULT_TITLE: &str = "Extracted Information";
pub const RAW_RESPONSE_LABEL: &str = "Raw Response";

/// 結果の1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub label: &'static str,
    pub value: String,
    pub found: bool,
    /// 合計行は強調表示
    pub emphasized: bool,
}

impl FieldRow {
    fn new(label: &'static str, value: &Option<String>) -> Self {
        let found = non_empty(value);
        Self {
            label,
            value: found.unwrap_or(NOT_FOUND).to_string(),
            found: found.is_some(),
            emphasized: false,
        }
    }

    fn emphasized(mut self) -> Self {
        self.emphasized = true;
        self
    }
}

/// 結果ブロック
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Fields {
        rows: Vec<FieldRow>,
        provenance: Option<String>,
    },
    Error {
        message: String,
        raw_response: Option<String>,
    },
}

impl ResultView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        match result {
            AnalysisResult::Fields(fields) => ResultView::Fields {
                rows: field_rows(fields),
                provenance: fields.provenance(),
            },
            AnalysisResult::Error(error) => ResultView::Error {
                message: error.message.clone(),
                raw_response: error.raw_response.clone(),
            },
        }
    }

    /// 埋め込みエラーの表示文言
    pub fn error_text(&self) -> Option<String> {
        match self {
            ResultView::Error { message, .. } => Some(format!("Error: {}", message)),
            ResultView::Fields { .. } => None,
        }
    }
}

/// 表示する4項目（取引先名はデータとしては保持するが行には出さない）
pub fn field_rows(fields: &InvoiceFields) -> Vec<FieldRow> {
    vec![
        FieldRow::new("Invoice Number", &fields.invoice_number),
        FieldRow::new("Invoice Date", &fields.invoice_date),
        FieldRow::new("Due Date", &fields.due_date),
        FieldRow::new("Total Amount", &fields.total_amount).emphasized(),
    ]
}

/// 画面全体の表示モデル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub file_label: String,
    pub input_enabled: bool,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    /// トップレベルのエラー
    pub error: Option<String>,
    pub loading: bool,
    pub result: Option<ResultView>,
}

impl PageView {
    pub fn from_controller(controller: &Controller) -> Self {
        let loading = controller.is_loading();
        Self {
            file_label: controller
                .pending_name()
                .or_else(|| controller.file().map(|f| f.name.as_str()))
                .unwrap_or(CHOOSE_FILE_LABEL)
                .to_string(),
            input_enabled: !loading,
            submit_label: if loading { SUBMITTING_LABEL } else { SUBMIT_LABEL },
            submit_enabled: controller.can_submit(),
            error: controller.error().map(str::to_string),
            loading,
            result: controller.result().map(ResultView::from_result),
        }
    }
}
