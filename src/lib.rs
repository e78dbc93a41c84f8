use anyhow::{Result, anyhow};
use std::{path::Path, path::PathBuf, time::Duration};

pub mod app_core;
pub mod config;
pub mod domain;
pub mod key_handler;
pub mod navigation;
pub mod playback;
pub mod player;
pub mod screen;

pub use config::Settings;
pub use domain::{GroupKey, Playlist, SongInfo, Track};
pub use navigation::{Direction, NavigationRequest, Unit};
pub use playback::{Lifecycle, PlaybackController};
pub use player::{LocalBackend, PlayerBackend};
pub use screen::{Screen, TracklistView};

pub const APP_NAME: &str = "cadence";

pub enum DurationStyle {
    Clean,
    Compact,
}

pub fn get_readable_duration(duration: Duration, style: DurationStyle) -> String {
    let mut secs = duration.as_secs();
    let mins = secs / 60;
    secs %= 60;

    match style {
        DurationStyle::Clean => match mins {
            0 => format!("{secs:02}s"),
            _ => format!("{mins}m {secs:02}s"),
        },
        DurationStyle::Compact => format!("{mins}:{secs:02}"),
    }
}

/// Parses either plain seconds (`95`) or `m:ss` (`1:35`).
pub fn parse_timestamp(input: &str) -> Result<u32> {
    let input = input.trim();

    match input.split_once(':') {
        Some((mins, secs)) => {
            let mins = mins.parse::<u32>()?;
            let secs = secs.parse::<u32>()?;
            if secs >= 60 {
                return Err(anyhow!("Invalid timestamp: {input}"));
            }
            mins.checked_mul(60)
                .and_then(|s| s.checked_add(secs))
                .ok_or_else(|| anyhow!("Invalid timestamp: {input}"))
        }
        None => Ok(input.parse::<u32>()?),
    }
}

pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?;
        return Ok(home.join(&path_str[2..]));
    }

    Err(anyhow!("Error reading path with tilde (~): {path_str}"))
}
