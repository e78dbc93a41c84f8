use super::{PlaybackState, PlayerBackend, PlayerCommand};
use crate::{
    domain::{Playlist, SongInfo, Track},
    navigation::Direction,
};
use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use rand::{Rng, seq::SliceRandom};
use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, SystemTime},
};

const MAX_VOLUME: u32 = 100;

/// Commands kept in the history before the oldest are dropped.
const HISTORY_CAPACITY: usize = 256;

/// In-process player. Keeps the queue and transport state in memory and
/// records the most recent commands it receives.
pub struct LocalBackend {
    playlist: Playlist,
    current: Option<usize>,
    state: PlaybackState,
    elapsed: Duration,

    random: bool,
    repeat: bool,
    single: bool,
    consume: bool,
    volume: u32,

    source: Option<PathBuf>,
    source_modified: Option<SystemTime>,
    history: VecDeque<PlayerCommand>,
}

impl LocalBackend {
    pub fn new(playlist: Playlist) -> Self {
        LocalBackend {
            playlist,
            current: None,
            state: PlaybackState::Stopped,
            elapsed: Duration::ZERO,
            random: false,
            repeat: false,
            single: false,
            consume: false,
            volume: MAX_VOLUME,
            source: None,
            source_modified: None,
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Load the queue from a playlist file and remember it for `update`/`rescan`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let playlist = Playlist::load_from_file(&path)?;

        let mut backend = LocalBackend::new(playlist);
        backend.source_modified = modified(&path);
        backend.source = Some(path);
        Ok(backend)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn now_playing(&self) -> Option<Arc<Track>> {
        self.current
            .and_then(|idx| self.playlist.get(idx))
            .map(Arc::clone)
    }

    pub fn history(&self) -> &VecDeque<PlayerCommand> {
        &self.history
    }

    pub fn take_history(&mut self) -> Vec<PlayerCommand> {
        self.history.drain(..).collect()
    }

    pub fn set_playlist(&mut self, playlist: Playlist) {
        let now_playing = self.now_playing();
        self.playlist = playlist;

        // Keep pointing at a real track after the queue shrinks
        self.current = match (now_playing, self.current) {
            (Some(track), _) if self.playlist.position_of(&track).is_some() => {
                self.playlist.position_of(&track)
            }
            (_, Some(idx)) if idx < self.playlist.len() => Some(idx),
            (_, Some(_)) if !self.playlist.is_empty() => Some(self.playlist.len() - 1),
            _ => None,
        };

        if self.current.is_none() {
            self.halt();
        }
    }

    fn record(&mut self, command: PlayerCommand) {
        debug!("Player command: {command:?}");
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(command);
    }

    fn start(&mut self, idx: usize) {
        self.current = Some(idx);
        self.state = PlaybackState::Playing;
        self.elapsed = Duration::ZERO;
    }

    fn halt(&mut self) {
        self.state = PlaybackState::Stopped;
        self.elapsed = Duration::ZERO;
    }

    fn current_duration(&self) -> Option<Duration> {
        self.now_playing().and_then(|t| t.get_duration())
    }

    fn random_index(&self) -> Option<usize> {
        let len = self.playlist.len();
        match (len, self.current) {
            (0, _) => None,
            (1, _) => Some(0),
            (_, Some(current)) => {
                // Never land on the track already playing
                let pick = rand::rng().random_range(0..len - 1);
                Some(if pick >= current { pick + 1 } else { pick })
            }
            (_, None) => Some(rand::rng().random_range(0..len)),
        }
    }

    fn sequential_index(&self, direction: Direction) -> Option<usize> {
        let len = self.playlist.len();
        if len == 0 {
            return None;
        }

        match (direction, self.current) {
            (Direction::Next, None) => Some(0),
            (Direction::Next, Some(idx)) if idx + 1 < len => Some(idx + 1),
            (Direction::Next, Some(_)) => self.repeat.then_some(0),
            (Direction::Previous, None) => Some(len - 1),
            (Direction::Previous, Some(0)) => Some(if self.repeat { len - 1 } else { 0 }),
            (Direction::Previous, Some(idx)) => Some(idx - 1),
        }
    }

    fn reload(&mut self, force: bool) -> Result<()> {
        let Some(path) = self.source.clone() else {
            debug!("No playlist source to reload");
            return Ok(());
        };

        let modified = modified(&path);
        if !force && modified.is_some() && modified == self.source_modified {
            debug!("Playlist source unchanged: {}", path.display());
            return Ok(());
        }

        let playlist = Playlist::load_from_file(&path)
            .with_context(|| format!("Reloading \"{}\"", path.display()))?;
        info!("Reloaded {} tracks from {}", playlist.len(), path.display());

        self.source_modified = modified;
        self.set_playlist(playlist);
        Ok(())
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

impl PlayerBackend for LocalBackend {
    fn current_position(&self) -> Option<usize> {
        self.current.filter(|&idx| idx < self.playlist.len())
    }

    fn total_tracks(&self) -> usize {
        self.playlist.len()
    }

    fn playlist(&self) -> Playlist {
        self.playlist.clone()
    }

    fn is_random(&self) -> bool {
        self.random
    }

    fn is_repeat(&self) -> bool {
        self.repeat
    }

    fn is_single(&self) -> bool {
        self.single
    }

    fn is_consume(&self) -> bool {
        self.consume
    }

    fn volume(&self) -> u32 {
        self.volume
    }

    fn play_at(&mut self, idx: usize) -> Result<()> {
        self.record(PlayerCommand::Play(idx));

        if idx >= self.playlist.len() {
            return Err(anyhow!(
                "No track at position {idx} (playlist has {})",
                self.playlist.len()
            ));
        }
        self.start(idx);
        Ok(())
    }

    fn advance(&mut self, direction: Direction) -> Result<()> {
        self.record(PlayerCommand::Advance(direction));

        let target = match self.random {
            true => self.random_index(),
            false => self.sequential_index(direction),
        };

        match target {
            Some(idx) => self.start(idx),
            None => {
                self.current = None;
                self.halt();
            }
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.record(PlayerCommand::TogglePlayback);

        self.state = match self.state {
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Stopped => PlaybackState::Stopped,
        };
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.record(PlayerCommand::Stop);
        self.halt();
        Ok(())
    }

    fn seek(&mut self, offset_secs: i32) -> Result<()> {
        self.record(PlayerCommand::Seek(offset_secs));

        if self.state == PlaybackState::Stopped {
            return Ok(());
        }

        let offset = Duration::from_secs(offset_secs.unsigned_abs() as u64);
        let mut elapsed = match offset_secs < 0 {
            true => self.elapsed.saturating_sub(offset),
            false => self.elapsed + offset,
        };
        if let Some(duration) = self.current_duration() {
            elapsed = elapsed.min(duration);
        }

        self.elapsed = elapsed;
        Ok(())
    }

    fn seek_to(&mut self, secs: u32) -> Result<()> {
        self.record(PlayerCommand::SeekTo(secs));

        if self.state == PlaybackState::Stopped {
            return Err(anyhow!("Nothing is playing"));
        }

        let target = Duration::from_secs(secs as u64);
        if let Some(duration) = self.current_duration() {
            if target > duration {
                return Err(anyhow!(
                    "Cannot seek to {secs}s in a {}s track",
                    duration.as_secs()
                ));
            }
        }

        self.elapsed = target;
        Ok(())
    }

    fn set_random(&mut self, on: bool) -> Result<()> {
        self.record(PlayerCommand::SetRandom(on));
        self.random = on;
        Ok(())
    }

    fn set_repeat(&mut self, on: bool) -> Result<()> {
        self.record(PlayerCommand::SetRepeat(on));
        self.repeat = on;
        Ok(())
    }

    fn set_single(&mut self, on: bool) -> Result<()> {
        self.record(PlayerCommand::SetSingle(on));
        self.single = on;
        Ok(())
    }

    fn set_consume(&mut self, on: bool) -> Result<()> {
        self.record(PlayerCommand::SetConsume(on));
        self.consume = on;
        Ok(())
    }

    fn set_volume(&mut self, volume: u32) -> Result<()> {
        self.record(PlayerCommand::SetVolume(volume));

        if volume > MAX_VOLUME {
            return Err(anyhow!("Volume must be between 0 and {MAX_VOLUME}"));
        }
        self.volume = volume;
        Ok(())
    }

    fn shuffle(&mut self) -> Result<()> {
        self.record(PlayerCommand::Shuffle);

        let now_playing = self.now_playing();
        let mut tracks = self.playlist.tracks().to_vec();
        tracks.shuffle(&mut rand::rng());
        self.playlist = Playlist::from(tracks);

        self.current = now_playing.and_then(|t| self.playlist.position_of(&t));
        Ok(())
    }

    fn rescan(&mut self) -> Result<()> {
        self.record(PlayerCommand::Rescan);
        self.reload(true)
    }

    fn update(&mut self) -> Result<()> {
        self.record(PlayerCommand::Update);
        if let Err(e) = self.reload(false) {
            warn!("Update failed: {e:#}");
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(n: usize) -> LocalBackend {
        let tracks = (0..n)
            .map(|i| Track::new(&format!("t{i}"), "artist", "album"))
            .collect();
        LocalBackend::new(Playlist::new(tracks))
    }

    #[test]
    fn test_play_at() {
        let mut b = backend(3);
        b.play_at(2).unwrap();
        assert_eq!(b.current_position(), Some(2));
        assert_eq!(b.state(), PlaybackState::Playing);
        assert!(b.play_at(3).is_err());
        assert_eq!(b.current_position(), Some(2));
    }

    #[test]
    fn test_sequential_advance() {
        let mut b = backend(2);
        b.advance(Direction::Next).unwrap();
        assert_eq!(b.current_position(), Some(0));
        b.advance(Direction::Next).unwrap();
        assert_eq!(b.current_position(), Some(1));

        // Off the end without repeat stops playback
        b.advance(Direction::Next).unwrap();
        assert_eq!(b.current_position(), None);
        assert_eq!(b.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_sequential_advance_with_repeat_wraps() {
        let mut b = backend(2);
        b.set_repeat(true).unwrap();
        b.play_at(1).unwrap();
        b.advance(Direction::Next).unwrap();
        assert_eq!(b.current_position(), Some(0));
        b.advance(Direction::Previous).unwrap();
        assert_eq!(b.current_position(), Some(1));
    }

    #[test]
    fn test_random_advance_moves_elsewhere() {
        let mut b = backend(5);
        b.set_random(true).unwrap();
        b.play_at(2).unwrap();
        for _ in 0..20 {
            let before = b.current_position();
            b.advance(Direction::Next).unwrap();
            assert_ne!(b.current_position(), before);
            assert!(b.current_position().unwrap() < 5);
        }
    }

    #[test]
    fn test_pause_toggles() {
        let mut b = backend(1);
        b.pause().unwrap();
        assert_eq!(b.state(), PlaybackState::Stopped);

        b.play_at(0).unwrap();
        b.pause().unwrap();
        assert_eq!(b.state(), PlaybackState::Paused);
        b.pause().unwrap();
        assert_eq!(b.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_seek_saturates() {
        let tracks = vec![Track::new("a", "", "").with_duration(Duration::from_secs(30))];
        let mut b = LocalBackend::new(Playlist::new(tracks));
        b.play_at(0).unwrap();

        b.seek(-10).unwrap();
        assert_eq!(b.elapsed(), Duration::ZERO);
        b.seek(20).unwrap();
        assert_eq!(b.elapsed(), Duration::from_secs(20));
        b.seek(20).unwrap();
        assert_eq!(b.elapsed(), Duration::from_secs(30));

        assert!(b.seek_to(31).is_err());
        b.seek_to(5).unwrap();
        assert_eq!(b.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn test_volume_bounds() {
        let mut b = backend(1);
        b.set_volume(40).unwrap();
        assert_eq!(b.volume(), 40);
        assert!(b.set_volume(101).is_err());
        assert_eq!(b.volume(), 40);
    }

    #[test]
    fn test_shuffle_keeps_current_track() {
        let mut b = backend(10);
        b.play_at(4).unwrap();
        let playing = b.now_playing().unwrap();

        b.shuffle().unwrap();
        assert_eq!(b.total_tracks(), 10);
        let idx = b.current_position().unwrap();
        assert!(Arc::ptr_eq(b.playlist().get(idx).unwrap(), &playing));
    }

    #[test]
    fn test_set_playlist_clamps_current() {
        let mut b = backend(5);
        b.play_at(4).unwrap();
        b.set_playlist(Playlist::new(vec![Track::new("x", "", "")]));
        assert_eq!(b.current_position(), Some(0));

        b.set_playlist(Playlist::default());
        assert_eq!(b.current_position(), None);
        assert_eq!(b.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_history_records_commands() {
        let mut b = backend(3);
        b.play_at(1).unwrap();
        b.set_random(true).unwrap();
        b.rescan().unwrap();
        assert_eq!(
            b.take_history(),
            vec![
                PlayerCommand::Play(1),
                PlayerCommand::SetRandom(true),
                PlayerCommand::Rescan
            ]
        );
        assert!(b.history().is_empty());
    }

    #[test]
    fn test_history_keeps_most_recent_commands() {
        let mut b = backend(1);
        for volume in 0..HISTORY_CAPACITY as u32 + 10 {
            b.set_volume(volume % (MAX_VOLUME + 1)).unwrap();
        }
        b.stop().unwrap();

        let history = b.history();
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.back(), Some(&PlayerCommand::Stop));
        assert_eq!(history.front(), Some(&PlayerCommand::SetVolume(11)));
    }
}
