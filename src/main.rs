use clap::Parser;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use plate_detect::client::{build_client, CliClient};
use plate_detect::error::{PlateDetectError, Result};
use plate_detect::session_file::{open_session, CliSession};
use plate_detect::{cli, config, render, scanner};
use plate_detect_common::{
    DetectBlocked, DetectWorkflow, DetectionId, FetchState, LocalImage, OcrMethod,
    UploadSelector, DETAIL_LOAD_FAILED, HISTORY_LOAD_FAILED,
};
use cli::{Cli, Commands};
use config::Config;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("✖ {}", e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let api = config.resolve_api(cli.api_url.as_deref());
    log::debug!("API base URL: {} (origin: {})", api.base_url(), api.origin());

    match cli.command {
        Commands::Detect { inputs, method, index, interactive } => {
            let client = build_client(api);
            let mut session = open_session(Config::session_dir()?);
            detect(&client, &mut session, &inputs, method, index, interactive).await?;
        }

        Commands::Bulk { inputs, method } => {
            let client = build_client(api);
            let mut session = open_session(Config::session_dir()?);
            bulk(&client, &mut session, &inputs, method).await?;
        }

        Commands::History => {
            let client = build_client(api);
            let state = FetchState::from_result(
                with_spinner("Loading...", client.get_detections()).await,
                HISTORY_LOAD_FAILED,
            );
            let view = render::render_history_view(&state);
            if state.error().is_some() {
                return Err(PlateDetectError::Detection(view.trim_end().to_string()));
            }
            print!("{}", view);
        }

        Commands::Show { id } => {
            let client = build_client(api);
            let id = DetectionId::from(id);
            let state = FetchState::from_result(
                with_spinner("Loading...", client.get_detection(&id)).await,
                DETAIL_LOAD_FAILED,
            );
            let view = render::render_detail_view(&state);
            if state.error().is_some() {
                return Err(PlateDetectError::Detection(view.trim_end().to_string()));
            }
            print!("{}", view);
        }

        Commands::Session { clear, method } => {
            let mut session = open_session(Config::session_dir()?);

            if clear {
                session.clear_all()?;
                println!("✔ セッションを削除しました");
                return Ok(());
            }

            if let Some(method) = method {
                session.set_ocr_method(method)?;
                println!("✔ OCR方式を設定しました: {}", method.label());
            }

            print_session(&session);
        }

        Commands::Config { set_api_url, show } => {
            let mut config = config;

            if let Some(url) = set_api_url {
                config.set_api_url(url)?;
                println!("✔ APIベースURLを設定しました");
            }

            if show {
                let effective = config.resolve_api(cli.api_url.as_deref());
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!(
                    "  apiUrl: {}",
                    config.api_url.as_deref().unwrap_or("未設定")
                );
                println!("  使用するAPI: {}", effective.base_url());
                println!("  メディアのオリジン: {}", effective.origin());
            }
        }

        Commands::About => {
            print!("{}", render::render_about());
        }
    }

    Ok(())
}

/// 選択→検出→結果表示
async fn detect(
    client: &CliClient,
    session: &mut CliSession,
    inputs: &[PathBuf],
    method: Option<OcrMethod>,
    index: Option<usize>,
    interactive: bool,
) -> Result<()> {
    let mut selector = UploadSelector::new();
    let selection = selector
        .select(scanner::collect_images(inputs)?)
        .ok_or(PlateDetectError::NoImageSelected)?;
    session.handle_files_selected(selection.files)?;

    if let Some(method) = method {
        session.set_ocr_method(method)?;
    }

    if interactive && session.files().len() > 1 {
        let names: Vec<String> = session.files().iter().map(|f| f.name()).collect();
        let chosen = Select::new()
            .with_prompt("送信する画像を選択")
            .items(&names)
            .default(0)
            .interact()?;
        session.set_current_image_index(chosen);
    } else if let Some(index) = index {
        let count = session.files().len();
        if index == 0 || !session.set_current_image_index(index - 1) {
            return Err(PlateDetectError::ImageIndexOutOfRange { index, count });
        }
    }

    print!(
        "{}",
        render::render_selection(session.files(), Some(session.current_image_index()))
    );
    println!("OCR Method: {}\n", session.ocr_method().label());

    let mut workflow = DetectWorkflow::new();
    let outcome = with_spinner("Processing...", workflow.run(session, client)).await;

    match outcome {
        Ok(true) => {
            if let Some(record) = session.result() {
                print!("{}", render::render_record(record));
            }
            Ok(())
        }
        Ok(false) => Err(PlateDetectError::Detection(
            session.error().unwrap_or_default().to_string(),
        )),
        Err(DetectBlocked::NoFileSelected) | Err(DetectBlocked::Busy) => {
            Err(PlateDetectError::NoImageSelected)
        }
    }
}

/// 一括検出（結果はセッションに保存しない）
async fn bulk(
    client: &CliClient,
    session: &mut CliSession,
    inputs: &[PathBuf],
    method: Option<OcrMethod>,
) -> Result<()> {
    let files = scanner::collect_images(inputs)?;
    if files.is_empty() {
        return Err(PlateDetectError::NoImageSelected);
    }

    if let Some(method) = method {
        session.set_ocr_method(method)?;
    }
    let ocr_method = session.ocr_method();

    print!("{}", render::render_selection(&files, None));
    println!("OCR Method: {}\n", ocr_method.label());

    let message = format!("Processing {} images...", files.len());
    let records = with_spinner(&message, client.detect_plates_bulk(files, ocr_method)).await?;

    println!("✔ {}件の検出結果\n", records.len());
    for record in &records {
        println!("{}", render::render_record(record));
    }
    Ok(())
}

fn print_session(session: &CliSession) {
    println!("OCR Method: {}", session.ocr_method().label());
    match session.error() {
        Some(error) => println!("Error: {}", error),
        None => println!("Error: -"),
    }
    match session.result() {
        Some(record) => print!("\n{}", render::render_record(record)),
        None => println!("\n保存された検出結果はありません"),
    }
}

/// 待機中のスピナー表示
async fn with_spinner<F: Future>(message: &str, future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = future.await;
    spinner.finish_and_clear();
    output
}
