//! `/api/analyze` 連携（fetch + FormData）

use invoice_analyzer_common::{Reply, SelectedFile, ANALYZE_PATH, FILE_FIELD, PDF_MIME};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, FormData, Request, RequestInit, Response};

/// 選択された File をメモリに読み込む
pub async fn read_selected_file(file: File) -> Result<SelectedFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(SelectedFile::new(file.name(), bytes))
}

/// ファイルを multipart/form-data で送信し、ステータスとボディを返す
///
/// Content-Type（boundary付き）はブラウザが付ける。
/// `Err` はレスポンスが得られなかった場合のみ。
pub async fn upload_invoice(file: &SelectedFile) -> Result<Reply, JsValue> {
    let bytes = Uint8Array::from(file.bytes.as_slice());
    let options = BlobPropertyBag::new();
    options.set_type(PDF_MIME);
    let blob = Blob::new_with_u8_array_sequence_and_options(&Array::of1(&bytes), &options)?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename(FILE_FIELD, &blob, &file.name)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(ANALYZE_PATH, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let status = resp.status();
    let body = JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    Ok(Reply { status, body })
}
