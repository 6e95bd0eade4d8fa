pub mod error_message;
pub mod header;
pub mod loading;
pub mod result_panel;
pub mod upload_form;
