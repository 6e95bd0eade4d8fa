//! Invoice Analyzer Common Library
//!
//! CLIとWeb(WASM)で共有される型・状態遷移・表示モデル

pub mod types;
pub mod error;
pub mod controller;
pub mod response;
pub mod view;

pub use types::{AnalysisError, AnalysisResult, InvoiceData, InvoiceFields};
pub use error::{Error, Result};
pub use controller::{
    Controller, Phase, SelectedFile, Status, SubmitError, NO_FILE_MESSAGE,
    READ_FAILED_MESSAGE,
};
pub use response::{
    analyze_url, interpret, Outcome, Reply, ANALYZE_PATH, FALLBACK_ERROR, FILE_FIELD, PDF_MIME,
};
pub use view::{FieldRow, PageView, ResultView, NOT_FOUND};
