use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceAnalyzerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("解析に失敗しました: {0}")]
    AnalysisFailed(String),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] invoice_analyzer_common::Error),
}

pub type Result<T> = std::result::Result<T, InvoiceAnalyzerError>;
