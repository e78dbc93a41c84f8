use super::SongInfo;
use crate::{DurationStyle, get_readable_duration};
use std::{fmt::Display, sync::Arc, time::Duration};

/// A single playlist entry. Identity is positional, so there is no id field.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub(crate) title: String,
    pub(crate) artist: Arc<String>,
    pub(crate) album: Arc<String>,
    pub(crate) duration: Option<Duration>,
}

impl Track {
    pub fn new(title: &str, artist: &str, album: &str) -> Self {
        Track {
            title: title.to_string(),
            artist: Arc::new(artist.to_string()),
            album: Arc::new(album.to_string()),
            duration: None,
        }
    }

    /// Build a track that shares its artist and album strings with others.
    pub fn from_shared(title: String, artist: &Arc<String>, album: &Arc<String>) -> Self {
        Track {
            title,
            artist: Arc::clone(artist),
            album: Arc::clone(album),
            duration: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

impl SongInfo for Track {
    fn get_title(&self) -> &str {
        &self.title
    }

    fn get_artist(&self) -> &str {
        &self.artist
    }

    fn get_album(&self) -> &str {
        &self.album
    }

    fn get_duration(&self) -> Option<Duration> {
        self.duration
    }

    fn get_duration_str(&self) -> String {
        match self.duration {
            Some(d) => get_readable_duration(d, DurationStyle::Compact),
            None => String::from("-:--"),
        }
    }
}

impl Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let title = match self.title.is_empty() {
            true => "<untitled>",
            false => self.title.as_str(),
        };
        write!(f, "{title}")?;
        if !self.artist.is_empty() {
            write!(f, " - {}", self.artist)?;
        }
        if !self.album.is_empty() {
            write!(f, " [{}]", self.album)?;
        }
        Ok(())
    }
}
