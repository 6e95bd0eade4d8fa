use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "invoice-analyzer")]
#[command(about = "PDF請求書を解析サービスに送り、抽出結果を表示する", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// PDFを1件解析して結果を表示
    Analyze {
        /// 請求書PDFのパス
        #[arg(required = true)]
        file: PathBuf,

        /// 解析サービスのベースURL（設定・環境変数より優先）
        #[arg(short, long)]
        endpoint: Option<String>,

        /// 受信ボディを解析済みレコード（正規化したJSON）として出力
        #[arg(long)]
        json: bool,
    },

    /// 対話モード（ファイル選択→解析を繰り返す）
    Interactive {
        /// 解析サービスのベースURL（設定・環境変数より優先）
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 解析サービスのベースURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
