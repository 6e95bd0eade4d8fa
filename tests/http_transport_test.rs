//! HttpTransport の結合テスト
//!
//! 127.0.0.1 上に `/api/analyze` を模したサーバを立て、実際の multipart 送信を検証

use anyhow::Result;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use invoice_analyzer::session::Session;
use invoice_analyzer::transport::{HttpTransport, Transport};
use invoice_analyzer_common::{ResultView, SelectedFile, Status, FALLBACK_ERROR};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// サーバが受け取ったパート
#[derive(Debug, Clone)]
struct ReceivedPart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    body: &'static str,
    received: Arc<Mutex<Vec<ReceivedPart>>>,
}

async fn handle_analyze(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> (StatusCode, &'static str) {
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        state.received.lock().await.push(ReceivedPart {
            name,
            file_name,
            content_type,
            bytes,
        });
    }
    (state.status, state.body)
}

async fn spawn_analyze_server(
    status: StatusCode,
    body: &'static str,
) -> Result<(String, Arc<Mutex<Vec<ReceivedPart>>>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        status,
        body,
        received: received.clone(),
    };
    let app = Router::new()
        .route("/api/analyze", post(handle_analyze))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), received))
}

fn invoice() -> SelectedFile {
    SelectedFile::new("march-invoice.pdf", b"%PDF-1.7\n%fake invoice\n".to_vec())
}

#[tokio::test]
async fn uploads_single_file_part() {
    let (url, received) = spawn_analyze_server(StatusCode::OK, r#"{"invoice_number": "INV-1"}"#)
        .await
        .expect("spawn server");
    let transport = HttpTransport::new(&url).unwrap();

    let reply = transport.send(&invoice()).await.unwrap();
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, r#"{"invoice_number": "INV-1"}"#);

    let parts = received.lock().await.clone();
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name, "file");
    assert_eq!(parts[0].file_name.as_deref(), Some("march-invoice.pdf"));
    assert_eq!(parts[0].content_type.as_deref(), Some("application/pdf"));
    assert_eq!(parts[0].bytes, invoice().bytes);
}

#[tokio::test]
async fn session_renders_successful_analysis() {
    let (url, _received) = spawn_analyze_server(
        StatusCode::OK,
        r#"{"invoice_number": "INV-1", "invoice_date": "2024-01-01", "due_date": "2024-02-01", "total_amount": "100.00", "extraction_method": "AI (Google Gemini)", "extraction_confidence": "high"}"#,
    )
    .await
    .expect("spawn server");
    let mut session = Session::new(HttpTransport::new(&url).unwrap()).with_spinner(false);
    session.select_file(invoice());

    assert_eq!(session.submit().await, Status::Succeeded);

    let Some(ResultView::Fields { rows, provenance }) = session.view().result else {
        panic!("expected fields");
    };
    assert_eq!(rows[0].value, "INV-1");
    assert_eq!(rows[3].value, "100.00");
    assert_eq!(
        provenance.as_deref(),
        Some("Extracted via AI (Google Gemini) / confidence: high")
    );
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let (url, _received) = spawn_analyze_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error": "server overloaded"}"#,
    )
    .await
    .expect("spawn server");
    let mut session = Session::new(HttpTransport::new(&url).unwrap()).with_spinner(false);
    session.select_file(invoice());

    assert_eq!(session.submit().await, Status::Failed);
    assert_eq!(session.view().error.as_deref(), Some("server overloaded"));
    assert!(session.view().result.is_none());
}

#[tokio::test]
async fn bad_request_without_json_uses_fallback() {
    let (url, _received) = spawn_analyze_server(StatusCode::BAD_GATEWAY, "upstream unavailable")
        .await
        .expect("spawn server");
    let mut session = Session::new(HttpTransport::new(&url).unwrap()).with_spinner(false);
    session.select_file(invoice());

    assert_eq!(session.submit().await, Status::Failed);
    assert_eq!(session.view().error.as_deref(), Some(FALLBACK_ERROR));
}

#[tokio::test]
async fn connection_refused_uses_fallback() {
    // 空きポートを取得してすぐ閉じる
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(&format!("http://{addr}")).unwrap();
    assert!(transport.send(&invoice()).await.is_err());

    let mut session = Session::new(transport).with_spinner(false);
    session.select_file(invoice());
    assert_eq!(session.submit().await, Status::Failed);
    assert_eq!(session.view().error.as_deref(), Some(FALLBACK_ERROR));
    assert!(session.last_reply().is_none());
}
