//! Invoice Analyzer
//!
//! PDF請求書を `/api/analyze` にアップロードし、抽出された項目を端末に表示する。

pub mod cli;
pub mod config;
pub mod error;
pub mod interactive;
pub mod render;
pub mod session;
pub mod transport;
