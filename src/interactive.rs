//! 対話モード
//!
//! 1ページのフォームと同じ操作（ファイル選択・解析・終了）をメニューで繰り返す。
//! 操作のたびに画面全体を描き直す。

use crate::error::Result;
use crate::render::render_page;
use crate::session::Session;
use crate::transport::Transport;
use dialoguer::{Input, Select};
use std::path::PathBuf;

/// メニュー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ChooseFile,
    Analyze,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 3] = [MenuAction::ChooseFile, MenuAction::Analyze, MenuAction::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::ChooseFile => "Choose PDF file",
            MenuAction::Analyze => "Analyze Invoice",
            MenuAction::Quit => "Quit",
        }
    }
}

pub async fn run_interactive<T: Transport>(session: &mut Session<T>) -> Result<()> {
    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();

    loop {
        println!("\n{}", render_page(&session.view()));

        let index = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(if session.controller().can_submit() { 1 } else { 0 })
            .interact()?;

        match MenuAction::ALL[index] {
            MenuAction::ChooseFile => {
                let path: String = Input::new()
                    .with_prompt("PDFファイルのパス")
                    .interact_text()?;
                let path = PathBuf::from(path.trim());

                // 読めないパスは選択前の状態を保つ
                if let Err(e) = session.select_path(&path) {
                    println!("⚠ {}", e);
                }
            }
            MenuAction::Analyze => {
                session.submit().await;
            }
            MenuAction::Quit => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_labels_match_form_controls() {
        let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels, vec!["Choose PDF file", "Analyze Invoice", "Quit"]);
    }
}
