//! 送信コントローラ
//!
//! 画面状態を1つの構造体で保持し、3つのイベントで遷移する:
//! - ファイル選択 (`select_file`)
//! - 送信 (`submit`)
//! - レスポンス到着 (`complete`)
//!
//! 中身の読み込みが非同期な環境（ブラウザ）では、選択を
//! `begin_selection` → `finish_selection` / `fail_selection` の2段で行う。
//!
//! 遷移はすべて同期・純粋。通信は呼び出し側が `submit` の戻り値を使って行う。

use crate::response::Outcome;
use crate::types::AnalysisResult;
use thiserror::Error;

/// ファイル未選択で送信したときのメッセージ
pub const NO_FILE_MESSAGE: &str = "Please select a file";

/// 選択したファイルを読み込めなかったときのメッセージ
pub const READ_FAILED_MESSAGE: &str = "Could not read the selected file";

/// 選択中のファイル（ファイル名付きのバイナリ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// `.pdf` 拡張子かどうか（参考情報。送信は拒否しない）
    pub fn looks_like_pdf(&self) -> bool {
        self.name.to_lowercase().ends_with(".pdf")
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// 画面ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Loading => "loading",
            Status::Succeeded => "succeeded",
            Status::Failed => "failed",
        }
    }
}

/// ステータスと、そのステータスでのみ存在するペイロード
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Succeeded(AnalysisResult),
    Failed(String),
}

/// 送信が受け付けられなかった理由
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{}", NO_FILE_MESSAGE)]
    NoFile,

    #[error("the selected file is still being read")]
    Reading,

    #[error("a submission is already in flight")]
    InFlight,
}

/// 読み込み中の選択
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSelection {
    ticket: u64,
    name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controller {
    file: Option<SelectedFile>,
    pending: Option<PendingSelection>,
    next_ticket: u64,
    phase: Phase,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn status(&self) -> Status {
        match self.phase {
            Phase::Idle => Status::Idle,
            Phase::Loading => Status::Loading,
            Phase::Succeeded(_) => Status::Succeeded,
            Phase::Failed(_) => Status::Failed,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// 選択したファイルを読み込み中か
    pub fn is_reading(&self) -> bool {
        self.pending.is_some()
    }

    /// 読み込み中のファイル名
    pub fn pending_name(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.name.as_str())
    }

    /// 送信ボタンが押せるか
    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.is_loading() && !self.is_reading()
    }

    /// トップレベルのエラー（Failed のときのみ）
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// 解析結果（Succeeded のときのみ）
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            Phase::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// ファイルを選択する。以前のエラー・結果は消える。
    ///
    /// 送信中はファイル入力が無効なので無視して `false` を返す。
    pub fn select_file(&mut self, file: SelectedFile) -> bool {
        if self.is_loading() {
            tracing::debug!(file = %file.name, "file selection ignored while loading");
            return false;
        }

        tracing::debug!(file = %file.name, bytes = file.len(), "file selected");
        self.file = Some(file);
        self.pending = None;
        self.phase = Phase::Idle;
        true
    }

    /// 中身の読み込みを待つ選択を始め、完了時に渡すチケットを返す。
    ///
    /// 以前のファイル・エラー・結果はこの時点で消え、読み込みが終わるまで送信できない。
    /// 送信中は `None`。
    pub fn begin_selection(&mut self, name: impl Into<String>) -> Option<u64> {
        let name = name.into();
        if self.is_loading() {
            tracing::debug!(file = %name, "file selection ignored while loading");
            return None;
        }

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        tracing::debug!(file = %name, ticket, "reading selected file");
        self.file = None;
        self.pending = Some(PendingSelection { ticket, name });
        self.phase = Phase::Idle;
        Some(ticket)
    }

    /// 読み込み完了。より新しい選択が始まっていれば無視する。
    pub fn finish_selection(&mut self, ticket: u64, file: SelectedFile) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(file = %file.name, ticket, "stale file read ignored");
            return false;
        }
        self.select_file(file)
    }

    /// 読み込み失敗。エラー欄に表示し、ファイル未選択に戻る。
    pub fn fail_selection(&mut self, ticket: u64, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        let message = message.into();
        tracing::warn!(ticket, error = %message, "failed to read selected file");
        self.pending = None;
        self.phase = Phase::Failed(message);
        true
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.pending.as_ref().is_some_and(|p| p.ticket == ticket)
    }

    /// 送信を開始し、アップロードすべきファイルを返す。
    ///
    /// ファイル未選択なら通信せずローカルのエラーを表示する。
    /// 選択中のファイルは送信後も保持される（同じファイルで再送信できる）。
    pub fn submit(&mut self) -> Result<SelectedFile, SubmitError> {
        if self.is_loading() {
            tracing::debug!("submit ignored: request already in flight");
            return Err(SubmitError::InFlight);
        }

        if self.is_reading() {
            tracing::debug!("submit ignored: selected file is still being read");
            return Err(SubmitError::Reading);
        }

        let Some(file) = self.file.clone() else {
            self.phase = Phase::Failed(NO_FILE_MESSAGE.to_string());
            return Err(SubmitError::NoFile);
        };

        tracing::debug!(file = %file.name, "submission started");
        self.phase = Phase::Loading;
        Ok(file)
    }

    /// レスポンス（または通信失敗）を反映する。
    ///
    /// 送信中でなければ何もしない。
    pub fn complete(&mut self, outcome: Outcome) -> bool {
        if !self.is_loading() {
            tracing::warn!(status = self.status().as_str(), "stray completion ignored");
            return false;
        }

        self.phase = match outcome {
            Outcome::Analyzed(result) => Phase::Succeeded(result),
            Outcome::Failed(message) => Phase::Failed(message),
        };
        tracing::debug!(status = self.status().as_str(), "submission finished");
        true
    }
}
