use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use docchat::backend::HttpBackend;
use docchat::core::config::{self, CliOverrides};
use docchat::{tui, voice};
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "docchat", about = "Chat with your PDF documents from the terminal")]
struct Args {
    /// Base URL of the document backend
    #[arg(long)]
    backend_url: Option<String>,

    /// PDF to preselect for upload
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Command that records one utterance and prints its transcript
    #[arg(long)]
    voice_command: Option<String>,

    /// Directory the file picker opens in
    #[arg(short, long)]
    dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config().map_err(|e| {
        eprintln!("docchat: {e}");
        std::io::Error::other(e.to_string())
    })?;

    let cli = CliOverrides {
        backend_url: args.backend_url,
        voice_command: args.voice_command,
        file: args.file,
        dir: args.dir,
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger; the TUI owns stdout
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    for diagnostic in &resolved.diagnostics {
        log::log!(diagnostic.level, "{}", diagnostic.message);
    }

    let backend = Arc::new(HttpBackend::new(
        resolved.backend_url.clone(),
        resolved.timeout,
    ));
    let recognizer = voice::from_config(&resolved);

    log::info!(
        "docchat starting up: backend={}, voice={}",
        backend.base_url(),
        if recognizer.is_some() { "enabled" } else { "unsupported" }
    );

    tui::run(resolved, backend, recognizer)
}
