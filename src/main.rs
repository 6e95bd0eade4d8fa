use clap::Parser;
use invoice_analyzer::{cli, config, error, interactive, render, session, transport};
use cli::{Cli, Commands};
use config::Config;
use error::{InvoiceAnalyzerError, Result};
use invoice_analyzer_common::Status;
use session::Session;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use transport::HttpTransport;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { file, endpoint, json } => {
            let endpoint = config.resolve_endpoint(endpoint.as_deref())?;
            let transport = HttpTransport::new(&endpoint)?;
            tracing::info!(url = transport.url(), "analysis endpoint");

            let mut session = Session::new(transport);
            session.select_path(&file)?;
            let status = session.submit().await;

            let view = session.view();
            print!("{}", render::render_analysis(&view, session.last_reply(), json));

            if status == Status::Failed {
                // テキスト表示ではエラーは画面内に出ている
                if json {
                    let message = view.error.unwrap_or_default();
                    return Err(InvoiceAnalyzerError::AnalysisFailed(message));
                }
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Interactive { endpoint } => {
            let endpoint = config.resolve_endpoint(endpoint.as_deref())?;
            let transport = HttpTransport::new(&endpoint)?;
            println!("🧾 invoice-analyzer - {}", transport.url());

            let mut session = Session::new(transport);
            interactive::run_interactive(&mut session).await?;
        }

        Commands::Config { set_endpoint, show } => {
            let mut config = config;

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                println!("✔ エンドポイントを設定しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.endpoint);
                println!("  設定ファイル: {}", Config::config_path()?.display());
                if let Ok(env) = std::env::var(config::ENDPOINT_ENV) {
                    println!("  {} (優先): {}", config::ENDPOINT_ENV, env);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// `RUST_LOG` があればそれを優先。なければ --verbose で debug、通常は warn。
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
