use clap::Parser;
use std::path::{Path, PathBuf};
use tablecast::config::{ArtifactKind, Cli, Command, Settings};
use tablecast::core::download::ArtifactDownloader;
use tablecast::core::preview::{self, TextTableRenderer};
use tablecast::core::session::Session;
use tablecast::core::{convert::ConverterClient, format, normalize};
use tablecast::domain::model::{ConversionResult, RecordSeq, UploadFile};
use tablecast::domain::ports::{KvStore, RemoteConverter, TableRenderer};
use tablecast::store::FileKvStore;
use tablecast::utils::error::{ConvertError, Result};
use tablecast::utils::{logger, validation::Validate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting tablecast CLI");

    let settings = Settings::resolve(&cli)?;
    if cli.verbose {
        tracing::debug!("Settings: {:?}", settings);
    }

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let session = Session::new(FileKvStore::new(settings.state_dir.clone()));
    let renderer = TextTableRenderer;

    let outcome = match cli.command {
        Command::Preview { ref file } => run_preview(file, &renderer).await,
        Command::Convert { ref file } => run_convert(file, &settings, &session, &renderer).await,
        Command::Result => run_result(&session, &renderer),
        Command::Download { artifact } => run_download(artifact, &settings, &session).await,
        Command::Login { ref token } => run_login(token, &session),
        Command::Logout => run_logout(&session),
    };

    if let Err(e) = outcome {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn read_admitted(file: &Path) -> Result<(UploadFile, String)> {
    let upload = format::admit(file)?;
    let content = tokio::fs::read_to_string(&upload.path).await?;
    Ok((upload, content))
}

async fn run_preview(file: &Path, renderer: &TextTableRenderer) -> Result<()> {
    let (upload, content) = read_admitted(file).await?;
    let records = normalize::normalize(&content, upload.media)?;
    tracing::info!("📥 {}: {} records", upload.file_name, records.len());

    let table = preview::render(&records, 3);
    println!("{}", renderer.render(&table));
    Ok(())
}

async fn run_convert<S: KvStore>(
    file: &Path,
    settings: &Settings,
    session: &Session<S>,
    renderer: &TextTableRenderer,
) -> Result<()> {
    let token = require_token(session)?;
    let (upload, content) = read_admitted(file).await?;
    let records = normalize::normalize(&content, upload.media)?;

    let table = preview::render(&records, 3);
    println!("{}", renderer.render(&table));

    let client = ConverterClient::new(settings.api_base.clone());
    let mut result = client
        .convert(&upload, content.into_bytes(), &token)
        .await?;

    // carry the table the user just saw, not a re-derivation
    let preview_records = table.to_records();
    if !preview_records.is_empty() {
        result.preview = Some(preview_records);
    }
    result.converted_at = Some(chrono::Utc::now());

    session.result_store().write(&result)?;
    tracing::info!("💾 Conversion result stored");

    println!("✅ File converted successfully");
    print_result_details(&result);
    Ok(())
}

fn run_result<S: KvStore>(session: &Session<S>, renderer: &TextTableRenderer) -> Result<()> {
    match session.result_store().read() {
        Some(result) => {
            print_result_details(&result);
            match &result.preview {
                Some(preview_records) => {
                    let sequence = RecordSeq::new(preview_records.clone());
                    let table = preview::render(&sequence, 10);
                    println!("{}", renderer.render(&table));
                }
                None => println!("No preview data available"),
            }
        }
        None => {
            println!("No conversion details available");
            println!("No preview data available");
        }
    }
    Ok(())
}

async fn run_download<S: KvStore>(
    kind: ArtifactKind,
    settings: &Settings,
    session: &Session<S>,
) -> Result<()> {
    let token = require_token(session)?;
    let result = session.result_store().read().ok_or_else(|| ConvertError::Config {
        message: "no stored conversion result; run `tablecast convert` first".to_string(),
    })?;
    let summary = result.summary.ok_or_else(|| ConvertError::Download {
        status: None,
        message: "stored result has no artifact paths".to_string(),
    })?;

    let mut server_paths = Vec::new();
    if matches!(kind, ArtifactKind::Csv | ArtifactKind::Both) {
        server_paths.push(summary.csv_path);
    }
    if matches!(kind, ArtifactKind::Excel | ArtifactKind::Both) {
        server_paths.push(summary.excel_path);
    }

    let downloader = ArtifactDownloader::new(settings.api_base.clone());
    for server_path in server_paths {
        let artifact = downloader.download(&server_path, &token).await?;
        let saved = artifact.save_to(&PathBuf::from(&settings.output_path))?;
        tracing::info!("💾 Saved {}", saved.display());
        println!("📁 Saved {}", saved.display());
    }
    Ok(())
}

fn run_login<S: KvStore>(token: &str, session: &Session<S>) -> Result<()> {
    session.set_token(token)?;
    println!("✅ Session token stored");
    Ok(())
}

fn run_logout<S: KvStore>(session: &Session<S>) -> Result<()> {
    session.logout()?;
    println!("✅ Session cleared");
    Ok(())
}

fn require_token<S: KvStore>(session: &Session<S>) -> Result<String> {
    session.token().ok_or_else(|| ConvertError::Config {
        message: "no session token stored; run `tablecast login <token>` first".to_string(),
    })
}

fn print_result_details(result: &ConversionResult) {
    let size_kb = (result.original_file.file_size as f64 / 1024.0).round() as u64;
    println!("Original file: {}", result.original_file.original_filename);
    println!("File size: {} KB", size_kb);
    match &result.summary {
        Some(summary) => {
            println!("Rows: {}", summary.total_rows);
            println!("Columns: {}", summary.total_columns);
        }
        None => {
            println!("Rows: N/A");
            println!("Columns: N/A");
        }
    }
}
