//! 解析サービスへのアップロード
//!
//! `Transport` はHTTPの有無を問わない継ぎ目。本番は `HttpTransport`（reqwest）、
//! テストでは台本どおりに応答する実装を差し込む。

use crate::error::Result;
use invoice_analyzer_common::{analyze_url, Reply, SelectedFile, FILE_FIELD, PDF_MIME};
use reqwest::multipart::{Form, Part};
use std::future::Future;

/// 1回のアップロードを行い、HTTPレスポンスを返す
///
/// レスポンスが得られなかった場合（接続失敗など）のみ `Err`。
pub trait Transport {
    fn send(&self, file: &SelectedFile) -> impl Future<Output = Result<Reply>> + Send;
}

/// reqwest による multipart/form-data アップロード
///
/// タイムアウト・リトライは設定しない。
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            url: analyze_url(endpoint),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, file: &SelectedFile) -> Result<Reply> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(PDF_MIME)?;
        let form = Form::new().part(FILE_FIELD, part);

        tracing::debug!(url = %self.url, file = %file.name, bytes = file.len(), "uploading invoice");

        let response = self.client.post(&self.url).multipart(form).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, body_len = body.len(), "analysis response received");
        Ok(Reply { status, body })
    }
}
