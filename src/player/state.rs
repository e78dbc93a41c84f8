use crate::navigation::Direction;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PlaybackState {
    #[default]
    Stopped = 0,
    Playing = 1,
    Paused = 2,
}

/// A record of one command as the backend received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    Play(usize),
    Advance(Direction),
    TogglePlayback,
    Stop,
    Seek(i32),
    SeekTo(u32),
    SetRandom(bool),
    SetRepeat(bool),
    SetSingle(bool),
    SetConsume(bool),
    SetVolume(u32),
    Shuffle,
    Rescan,
    Update,
}
