use super::Track;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, path::Path, sync::Arc, time::Duration};

/// Read-only snapshot of the play queue. Cloning is cheap; the tracks
/// themselves are shared.
#[derive(Default, Debug, Clone)]
pub struct Playlist {
    tracklist: Arc<[Arc<Track>]>,
}

#[derive(Deserialize)]
struct PlaylistImport {
    #[serde(default, rename = "track")]
    tracks: Vec<TrackImport>,
}

#[derive(Deserialize)]
struct TrackImport {
    #[serde(default)]
    title: String,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    album: String,
    duration_secs: Option<u64>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Playlist {
            tracklist: tracks.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_str = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read playlist: \"{}\"", path.display()))?;

        Self::from_toml(&file_str)
            .with_context(|| format!("Malformed playlist: \"{}\"", path.display()))
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let import = toml::from_str::<PlaylistImport>(s)?;

        // Artist and album strings repeat heavily; intern them
        let mut interned: HashMap<String, Arc<String>> = HashMap::new();
        let mut intern = |s: String| {
            Arc::clone(
                interned
                    .entry(s.clone())
                    .or_insert_with(|| Arc::new(s)),
            )
        };

        let tracks = import
            .tracks
            .into_iter()
            .map(|t| {
                let artist = intern(t.artist);
                let album = intern(t.album);
                let track = Track::from_shared(t.title, &artist, &album);
                match t.duration_secs {
                    Some(secs) => track.with_duration(Duration::from_secs(secs)),
                    None => track,
                }
            })
            .collect::<Vec<_>>();

        Ok(Playlist::new(tracks))
    }

    pub fn len(&self) -> usize {
        self.tracklist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracklist.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Arc<Track>> {
        self.tracklist.get(idx)
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracklist
    }

    /// Index of `track` by identity, used to follow a track across a reorder.
    pub fn position_of(&self, track: &Arc<Track>) -> Option<usize> {
        self.tracklist.iter().position(|t| Arc::ptr_eq(t, track))
    }
}

impl From<Vec<Arc<Track>>> for Playlist {
    fn from(tracks: Vec<Arc<Track>>) -> Self {
        Playlist {
            tracklist: tracks.into(),
        }
    }
}
