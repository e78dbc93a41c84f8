mod local;
mod state;

pub use local::LocalBackend;
pub use state::{PlaybackState, PlayerCommand};

use crate::{domain::Playlist, navigation::Direction};
use anyhow::Result;

/// Everything the playback layer needs from whatever actually plays music.
///
/// Reads are snapshots taken at call time. Writes are fire-and-forget from
/// the caller's point of view: an error is reported, never retried.
pub trait PlayerBackend {
    /// `None` when nothing is current.
    fn current_position(&self) -> Option<usize>;
    fn total_tracks(&self) -> usize;
    fn playlist(&self) -> Playlist;

    fn is_random(&self) -> bool;
    fn is_repeat(&self) -> bool;
    fn is_single(&self) -> bool;
    fn is_consume(&self) -> bool;
    fn volume(&self) -> u32;

    fn play_at(&mut self, idx: usize) -> Result<()>;
    /// The player's own next/previous, honouring its random order.
    fn advance(&mut self, direction: Direction) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
    fn seek(&mut self, offset_secs: i32) -> Result<()>;
    fn seek_to(&mut self, secs: u32) -> Result<()>;

    fn set_random(&mut self, on: bool) -> Result<()>;
    fn set_repeat(&mut self, on: bool) -> Result<()>;
    fn set_single(&mut self, on: bool) -> Result<()>;
    fn set_consume(&mut self, on: bool) -> Result<()>;
    fn set_volume(&mut self, volume: u32) -> Result<()>;

    fn shuffle(&mut self) -> Result<()>;
    fn rescan(&mut self) -> Result<()>;
    fn update(&mut self) -> Result<()>;
}
