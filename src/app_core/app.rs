use crate::{
    DurationStyle, Settings,
    domain::SongInfo,
    get_readable_duration,
    key_handler::{Action, CountPrefix, handle_key_event, key_from_char, parse_command},
    navigation::Direction,
    playback::{Lifecycle, PlaybackController, lifecycle_channel},
    player::{LocalBackend, PlaybackState, PlayerBackend},
    screen::TracklistView,
};
use anyhow::Result;
use crossbeam_channel::Receiver;
use log::{info, warn};
use std::io::{BufRead, Write};

/// Rows listed when the track list is repainted.
const VIEW_HEIGHT: usize = 10;

pub struct Cadence {
    controller: PlaybackController<LocalBackend, TracklistView>,
    lifecycle: Receiver<Lifecycle>,
    prefix: CountPrefix,
}

impl Cadence {
    pub fn new(player: LocalBackend, settings: Settings) -> Self {
        let (tx, rx) = lifecycle_channel();
        Cadence {
            controller: PlaybackController::new(player, TracklistView::new(), settings, tx),
            lifecycle: rx,
            prefix: CountPrefix::new(),
        }
    }

    pub fn controller(&self) -> &PlaybackController<LocalBackend, TracklistView> {
        &self.controller
    }

    /// Read input line by line until quit or end of input. A line starting
    /// with `:` is a command such as `:next-album 2`; any other line is a
    /// run of key presses such as `3N`. A failing action is reported and
    /// the loop carries on.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        info!(
            "Starting with {} tracks",
            self.controller.player().total_tracks()
        );

        // MAIN ROUTINE
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let quit = match line.strip_prefix(':') {
                Some(command) => self.run_command(command.trim(), &mut output)?,
                None => self.run_keys(line, &mut output)?,
            };

            if quit {
                break;
            }
            self.render(&mut output)?;
        }

        info!("Shutting down");
        Ok(())
    }

    /// Returns whether the command asked to quit.
    fn run_command<W: Write>(&mut self, command: &str, output: &mut W) -> Result<bool> {
        if let Err(e) = parse_command(command).and_then(|action| self.handle_action(action)) {
            warn!("Command \"{command}\" failed: {e:#}");
            writeln!(output, "error: {e:#}")?;
        }
        Ok(self.quit_requested())
    }

    /// A count left pending at the end of the line is dropped.
    fn run_keys<W: Write>(&mut self, keys: &str, output: &mut W) -> Result<bool> {
        for c in keys.chars() {
            let Some(action) = handle_key_event(key_from_char(c), &mut self.prefix) else {
                continue;
            };

            if let Err(e) = self.handle_action(action) {
                warn!("Key {c:?} failed: {e:#}");
                writeln!(output, "error: {e:#}")?;
            }
            if self.quit_requested() {
                self.prefix.clear();
                return Ok(true);
            }
        }

        self.prefix.clear();
        Ok(false)
    }

    fn quit_requested(&self) -> bool {
        self.lifecycle
            .try_iter()
            .any(|event| event == Lifecycle::Quit)
    }

    #[rustfmt::skip]
    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        let c = &mut self.controller;
        match action {
            // Skipping
            Action::SkipTrack(dir, n)  => c.skip_track(dir, n)?,
            Action::SkipAlbum(dir, n)  => c.skip_album(dir, n)?,
            Action::SkipArtist(dir, n) => c.skip_artist(dir, n)?,

            // Transport
            Action::Play(idx)          => c.play(idx)?,
            Action::TogglePause        => c.pause()?,
            Action::Stop               => c.stop()?,
            Action::Seek(s)            => c.seek(s)?,
            Action::SeekStep(dir, n)   => {
                let step = c.settings().seek_step.saturating_mul(n).min(i32::MAX as u32) as i32;
                match dir {
                    Direction::Next     => c.seek(step)?,
                    Direction::Previous => c.seek(-step)?,
                }
            }
            Action::SeekTo(s)          => c.seek_to(s)?,
            Action::SetVolume(v)       => c.set_volume(v)?,

            // Modes
            Action::SetRandom(on)      => c.set_random(on)?,
            Action::SetRepeat(on)      => c.set_repeat(on)?,
            Action::SetSingle(on)      => c.set_single(on)?,
            Action::SetConsume(on)     => c.set_consume(on)?,
            Action::ToggleRandom       => c.toggle_random()?,
            Action::ToggleRepeat       => c.toggle_repeat()?,
            Action::ToggleSingle       => c.toggle_single()?,
            Action::ToggleConsume      => c.toggle_consume()?,

            // Queue & library
            Action::Shuffle            => c.shuffle()?,
            Action::Rescan             => c.rescan()?,
            Action::Update             => c.update()?,

            // Display
            Action::Redraw             => c.redraw(),
            Action::ClearScreen        => c.clear_screen(),

            Action::QUIT               => c.quit(),
        }
        Ok(())
    }

    fn render<W: Write>(&mut self, output: &mut W) -> Result<()> {
        let (clear, redraw) = {
            let view = self.controller.screen_mut();
            (view.take_clear(), view.take_redraw())
        };

        if clear {
            writeln!(output)?;
        }
        if redraw {
            self.render_tracklist(output)?;
        }
        self.render_status(output)
    }

    fn render_tracklist<W: Write>(&self, output: &mut W) -> Result<()> {
        let playlist = self.controller.player().playlist();
        let current = self.controller.player().current_position();
        let offset = self.controller.screen().offset();

        for (idx, track) in playlist
            .tracks()
            .iter()
            .enumerate()
            .skip(offset)
            .take(VIEW_HEIGHT)
        {
            let marker = match Some(idx) == current {
                true => '>',
                false => ' ',
            };
            writeln!(output, "{marker} {idx:>4}  {track}")?;
        }
        Ok(())
    }

    fn render_status<W: Write>(&self, output: &mut W) -> Result<()> {
        let player = self.controller.player();

        let state = match player.state() {
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Stopped => "stopped",
        };

        let flags = [
            (player.is_random(), 'z'),
            (player.is_repeat(), 'r'),
            (player.is_single(), 's'),
            (player.is_consume(), 'c'),
        ]
        .iter()
        .map(|&(on, flag)| if on { flag } else { '-' })
        .collect::<String>();

        match (player.current_position(), player.now_playing()) {
            (Some(idx), Some(track)) if player.state() != PlaybackState::Stopped => {
                let elapsed = get_readable_duration(player.elapsed(), DurationStyle::Compact);
                writeln!(
                    output,
                    "[{state}] {}/{} {track} {elapsed}/{} [{flags}] vol {}",
                    idx + 1,
                    player.total_tracks(),
                    track.get_duration_str(),
                    player.volume()
                )?;
            }
            _ => writeln!(
                output,
                "[{state}] {} tracks [{flags}] vol {}",
                player.total_tracks(),
                player.volume()
            )?,
        }
        Ok(())
    }
}
