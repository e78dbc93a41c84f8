use super::Lifecycle;
use crate::{
    config::Settings,
    domain::GroupKey,
    navigation::{self, Direction},
    player::PlayerBackend,
    screen::Screen,
};
use anyhow::Result;
use crossbeam_channel::Sender;
use log::{debug, info, warn};

/// Turns user intents into player commands.
///
/// Holds no navigation state of its own. Position, queue length and mode
/// are read from the player at the start of every call.
pub struct PlaybackController<P: PlayerBackend, S: Screen> {
    player: P,
    screen: S,
    settings: Settings,
    lifecycle: Sender<Lifecycle>,
}

impl<P: PlayerBackend, S: Screen> PlaybackController<P, S> {
    pub fn new(player: P, screen: S, settings: Settings, lifecycle: Sender<Lifecycle>) -> Self {
        PlaybackController {
            player,
            screen,
            settings,
            lifecycle,
        }
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

// ============
//   SKIPPING
// ============
impl<P: PlayerBackend, S: Screen> PlaybackController<P, S> {
    pub fn skip_track(&mut self, direction: Direction, count: u32) -> Result<()> {
        info!("Skip {direction} track x{count}");

        let result = match self.player.is_random() {
            // The player owns the order; one primitive call whatever the count
            true => self.player.advance(direction),
            false => self.skip_sequential(direction, count),
        };

        self.handle_auto_scroll();
        result
    }

    pub fn skip_album(&mut self, direction: Direction, count: u32) -> Result<()> {
        self.skip_group(direction, count, GroupKey::Album)
    }

    pub fn skip_artist(&mut self, direction: Direction, count: u32) -> Result<()> {
        self.skip_group(direction, count, GroupKey::Artist)
    }

    /// Grouped skip. With nothing current this issues no command at all,
    /// but the screen still follows.
    pub fn skip_group(&mut self, direction: Direction, count: u32, key: GroupKey) -> Result<()> {
        info!("Skip {direction} {key} x{count}");

        let result = match self.player.is_random() {
            true => self.player.advance(direction),
            false => self.skip_grouped(direction, count, key),
        };

        self.handle_auto_scroll();
        result
    }

    fn skip_sequential(&mut self, direction: Direction, count: u32) -> Result<()> {
        let total = self.player.total_tracks();
        if total == 0 {
            debug!("Empty playlist, nothing to skip to");
            return Ok(());
        }

        let current = self
            .player
            .current_position()
            .map(|pos| pos as i64)
            .unwrap_or(-1);

        let target = navigation::clamp_offset(current, direction, count, total);
        self.player.play_at(target)
    }

    fn skip_grouped(&mut self, direction: Direction, count: u32, key: GroupKey) -> Result<()> {
        let playlist = self.player.playlist();

        match self.player.current_position() {
            Some(start) if start < playlist.len() => {
                let target = navigation::advance(playlist.tracks(), start, direction, count, key);
                self.player.play_at(target)
            }
            _ => {
                debug!("No current track, {key} skip ignored");
                Ok(())
            }
        }
    }

    fn handle_auto_scroll(&mut self) {
        if self.settings.auto_scroll {
            let current = self.player.current_position();
            self.screen.scroll_to_current(current);
        }
    }
}

// ================
//   PASS-THROUGH
// ================
impl<P: PlayerBackend, S: Screen> PlaybackController<P, S> {
    pub fn play(&mut self, idx: usize) -> Result<()> {
        info!("Play position {idx}");
        self.player.play_at(idx)
    }

    pub fn pause(&mut self) -> Result<()> {
        info!("Toggle pause");
        self.player.pause()
    }

    pub fn stop(&mut self) -> Result<()> {
        info!("Stop");
        self.player.stop()
    }

    pub fn seek(&mut self, offset_secs: i32) -> Result<()> {
        info!("Seek {offset_secs:+}s");
        self.player.seek(offset_secs)
    }

    pub fn seek_to(&mut self, secs: u32) -> Result<()> {
        info!("Seek to {secs}s");
        self.player.seek_to(secs)
    }

    pub fn set_random(&mut self, on: bool) -> Result<()> {
        info!("Random {}", on_off(on));
        self.player.set_random(on)
    }

    pub fn set_repeat(&mut self, on: bool) -> Result<()> {
        info!("Repeat {}", on_off(on));
        self.player.set_repeat(on)
    }

    pub fn set_single(&mut self, on: bool) -> Result<()> {
        info!("Single {}", on_off(on));
        self.player.set_single(on)
    }

    pub fn set_consume(&mut self, on: bool) -> Result<()> {
        info!("Consume {}", on_off(on));
        self.player.set_consume(on)
    }

    pub fn toggle_random(&mut self) -> Result<()> {
        self.set_random(!self.player.is_random())
    }

    pub fn toggle_repeat(&mut self) -> Result<()> {
        self.set_repeat(!self.player.is_repeat())
    }

    pub fn toggle_single(&mut self) -> Result<()> {
        self.set_single(!self.player.is_single())
    }

    pub fn toggle_consume(&mut self) -> Result<()> {
        self.set_consume(!self.player.is_consume())
    }

    pub fn set_volume(&mut self, volume: u32) -> Result<()> {
        info!("Volume {volume}");
        self.player.set_volume(volume)
    }

    pub fn shuffle(&mut self) -> Result<()> {
        info!("Shuffle");
        self.player.shuffle()
    }

    pub fn rescan(&mut self) -> Result<()> {
        info!("Rescan");
        self.player.rescan()
    }

    pub fn update(&mut self) -> Result<()> {
        info!("Update");
        self.player.update()
    }

    pub fn redraw(&mut self) {
        self.screen.redraw();
    }

    pub fn clear_screen(&mut self) {
        self.screen.clear();
    }

    /// Ask the owning loop to wind down. Nothing stops here.
    pub fn quit(&mut self) {
        info!("Quit requested");
        if self.lifecycle.send(Lifecycle::Quit).is_err() {
            warn!("Quit requested but nothing is listening");
        }
    }
}

fn on_off(on: bool) -> &'static str {
    match on {
        true => "on",
        false => "off",
    }
}
