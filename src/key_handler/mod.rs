mod action;

pub use action::{handle_key_event, key_from_char, parse_command};

use crate::navigation::Direction;

/// Largest count a prefix can build up to.
const MAX_COUNT: u32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Skipping
    SkipTrack(Direction, u32),
    SkipAlbum(Direction, u32),
    SkipArtist(Direction, u32),

    // Transport
    Play(usize),
    TogglePause,
    Stop,
    Seek(i32),
    /// Seek by the configured step, `count` times over.
    SeekStep(Direction, u32),
    SeekTo(u32),
    SetVolume(u32),

    // Modes
    SetRandom(bool),
    SetRepeat(bool),
    SetSingle(bool),
    SetConsume(bool),
    ToggleRandom,
    ToggleRepeat,
    ToggleSingle,
    ToggleConsume,

    // Queue & library
    Shuffle,
    Rescan,
    Update,

    // Display
    Redraw,
    ClearScreen,

    QUIT,
}

/// Vim-style numeric prefix: `3n` skips three tracks.
#[derive(Default, Debug)]
pub struct CountPrefix {
    digits: Option<u32>,
}

impl CountPrefix {
    pub fn new() -> Self {
        CountPrefix::default()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_none()
    }

    pub fn push(&mut self, digit: u32) {
        let count = self.digits.unwrap_or(0);
        self.digits = Some((count * 10 + digit).min(MAX_COUNT));
    }

    /// The accumulated count, or 1 when nothing was typed. Resets the prefix.
    pub fn take(&mut self) -> u32 {
        self.digits.take().filter(|&c| c > 0).unwrap_or(1)
    }

    pub fn clear(&mut self) {
        self.digits = None;
    }
}
