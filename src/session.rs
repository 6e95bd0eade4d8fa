//! 送信サイクル
//!
//! コントローラの遷移とトランスポートの呼び出しを1か所にまとめる。
//! 同時に送信できるのは1件だけで、通信中は `&mut self` を握ったままになる。

use crate::error::{InvoiceAnalyzerError, Result};
use crate::transport::Transport;
use indicatif::{ProgressBar, ProgressStyle};
use invoice_analyzer_common::{
    interpret, view::LOADING_MESSAGE, Controller, Outcome, PageView, Reply, SelectedFile,
    Status, SubmitError,
};
use std::path::Path;
use std::time::Duration;

pub struct Session<T> {
    controller: Controller,
    transport: T,
    spinner: bool,
    last_reply: Option<Reply>,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T) -> Self {
        Self {
            controller: Controller::new(),
            transport,
            spinner: true,
            last_reply: None,
        }
    }

    /// 通信中スピナーの表示有無（テストでは無効にする）
    pub fn with_spinner(mut self, spinner: bool) -> Self {
        self.spinner = spinner;
        self
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 直近に受け取ったHTTPレスポンス（通信失敗時はNone）
    pub fn last_reply(&self) -> Option<&Reply> {
        self.last_reply.as_ref()
    }

    pub fn view(&self) -> PageView {
        PageView::from_controller(&self.controller)
    }

    pub fn select_file(&mut self, file: SelectedFile) -> bool {
        if !file.looks_like_pdf() {
            tracing::warn!(file = %file.name, "selected file does not have a .pdf extension");
        }
        self.controller.select_file(file)
    }

    /// パスからファイルを読み込んで選択する
    pub fn select_path(&mut self, path: &Path) -> Result<bool> {
        if !path.is_file() {
            return Err(InvoiceAnalyzerError::FileNotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(self.select_file(SelectedFile::new(name, bytes)))
    }

    /// 送信してレスポンスを反映する。失敗はすべて表示用エラーに変換される。
    pub async fn submit(&mut self) -> Status {
        let file = match self.controller.submit() {
            Ok(file) => file,
            Err(SubmitError::NoFile) => {
                tracing::debug!("submit without a file");
                return self.controller.status();
            }
            Err(SubmitError::InFlight | SubmitError::Reading) => return self.controller.status(),
        };

        self.last_reply = None;
        let progress = self.start_spinner();
        let outcome = match self.transport.send(&file).await {
            Ok(reply) => {
                let outcome = interpret(&reply);
                self.last_reply = Some(reply);
                outcome
            }
            Err(e) => {
                tracing::error!(error = %e, file = %file.name, "analysis request failed");
                Outcome::transport_failure()
            }
        };
        progress.finish_and_clear();

        self.controller.complete(outcome);
        self.controller.status()
    }

    fn start_spinner(&self) -> ProgressBar {
        if !self.spinner {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.set_message(LOADING_MESSAGE);
        progress.enable_steady_tick(Duration::from_millis(100));
        progress
    }
}
