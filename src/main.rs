use anyhow::Result;
use cadence::{APP_NAME, LocalBackend, Settings, app_core::Cadence, expand_tilde};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::{fs::File, path::PathBuf};

#[derive(Parser)]
#[command(name = "cadence", about = "Grouped playlist navigation")]
struct Args {
    /// Playlist to load (TOML, one [[track]] table per entry)
    playlist: PathBuf,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Follow the current track after every skip
    #[arg(short, long)]
    auto_scroll: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load_from_file(expand_tilde(path)?)?,
        None => Settings::load()?,
    };
    if args.auto_scroll {
        settings.auto_scroll = true;
    }

    init_logging(settings.level_filter());
    log::info!("{APP_NAME} starting up, auto-scroll {}", settings.auto_scroll);

    let player = LocalBackend::from_file(expand_tilde(&args.playlist)?)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Cadence::new(player, settings).run(stdin.lock(), stdout.lock())
}

fn init_logging(level: LevelFilter) {
    let Some(dir) = dirs::data_local_dir().map(|d| d.join(APP_NAME)) else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(dir.join("cadence.log")) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}
