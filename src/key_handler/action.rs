use crate::{key_handler::*, navigation::Direction, parse_timestamp};
use anyhow::{Result, anyhow, bail};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::str::FromStr;

use Direction::*;
use KeyCode::*;

const X: KeyModifiers = KeyModifiers::NONE;
const S: KeyModifiers = KeyModifiers::SHIFT;
const C: KeyModifiers = KeyModifiers::CONTROL;

/// Map a key press to an action. Digits only feed `prefix` and yield
/// nothing; any other key consumes the prefix.
pub fn handle_key_event(key: KeyEvent, prefix: &mut CountPrefix) -> Option<Action> {
    if let (X, Char(d)) = (key.modifiers, key.code) {
        if let Some(digit) = d.to_digit(10) {
            // A bare leading zero is not a count
            if digit > 0 || !prefix.is_empty() {
                prefix.push(digit);
            }
            return None;
        }
    }

    let count = prefix.take();

    match (key.modifiers, key.code) {
        (C, Char('c')) | (X, Char('q')) => Some(Action::QUIT),

        // SKIPPING
        (X, Char('n')) => Some(Action::SkipTrack(Next, count)),
        (X, Char('p')) => Some(Action::SkipTrack(Previous, count)),
        (S, Char('N')) => Some(Action::SkipAlbum(Next, count)),
        (S, Char('P')) => Some(Action::SkipAlbum(Previous, count)),
        (C, Char('n')) => Some(Action::SkipArtist(Next, count)),
        (C, Char('p')) => Some(Action::SkipArtist(Previous, count)),

        // PLAYBACK COMMANDS
        (X, Char(' ')) => Some(Action::TogglePause),
        (X, Char('s')) => Some(Action::Stop),
        (X, Char('l')) | (X, Right) => Some(Action::SeekStep(Next, count)),
        (X, Char('h')) | (X, Left) => Some(Action::SeekStep(Previous, count)),

        // MODES
        (X, Char('r')) => Some(Action::ToggleRandom),
        (S, Char('R')) => Some(Action::ToggleRepeat),
        (S, Char('S')) => Some(Action::ToggleSingle),
        (X, Char('c')) => Some(Action::ToggleConsume),
        (X, Char('z')) => Some(Action::Shuffle),

        (C, Char('u')) | (X, F(5)) => Some(Action::Update),
        (C, Char('l')) => Some(Action::Redraw),

        _ => None,
    }
}

/// The key a typed character stands for. Control characters map back to
/// their `Ctrl-<letter>` chord and uppercase letters carry shift.
pub fn key_from_char(c: char) -> KeyEvent {
    match c {
        '\u{1b}' => KeyEvent::new(Esc, X),
        '\t' => KeyEvent::new(Tab, X),
        '\u{1}'..='\u{1a}' => {
            let letter = (b'a' + c as u8 - 1) as char;
            KeyEvent::new(Char(letter), C)
        }
        _ if c.is_ascii_uppercase() => KeyEvent::new(Char(c), S),
        _ => KeyEvent::new(Char(c), X),
    }
}

/// Parse one textual command such as `next-album 2` or `random off`.
pub fn parse_command(input: &str) -> Result<Action> {
    let mut words = input.split_whitespace();
    let command = words
        .next()
        .ok_or_else(|| anyhow!("Empty command"))?
        .to_ascii_lowercase();
    let arg = words.next();

    if let Some(extra) = words.next() {
        bail!("Unexpected argument: {extra}");
    }

    let action = match command.as_str() {
        "next" => Action::SkipTrack(Next, parse_count(arg)?),
        "previous" | "prev" => Action::SkipTrack(Previous, parse_count(arg)?),
        "next-album" => Action::SkipAlbum(Next, parse_count(arg)?),
        "previous-album" | "prev-album" => Action::SkipAlbum(Previous, parse_count(arg)?),
        "next-artist" => Action::SkipArtist(Next, parse_count(arg)?),
        "previous-artist" | "prev-artist" => Action::SkipArtist(Previous, parse_count(arg)?),

        "play" => Action::Play(required(arg, "play")?.parse()?),
        "pause" => Action::TogglePause,
        "stop" => Action::Stop,
        "seek" => match arg {
            Some(secs) => Action::Seek(secs.parse()?),
            None => Action::SeekStep(Next, 1),
        },
        "forward" => Action::SeekStep(Next, parse_count(arg)?),
        "rewind" => Action::SeekStep(Previous, parse_count(arg)?),
        "seekto" => Action::SeekTo(parse_timestamp(required(arg, "seekto")?)?),
        "volume" => Action::SetVolume(required(arg, "volume")?.parse()?),

        "random" => toggle(arg, Action::ToggleRandom, Action::SetRandom)?,
        "repeat" => toggle(arg, Action::ToggleRepeat, Action::SetRepeat)?,
        "single" => toggle(arg, Action::ToggleSingle, Action::SetSingle)?,
        "consume" => toggle(arg, Action::ToggleConsume, Action::SetConsume)?,

        "shuffle" => Action::Shuffle,
        "rescan" => Action::Rescan,
        "update" => Action::Update,
        "redraw" => Action::Redraw,
        "clear" => Action::ClearScreen,
        "quit" | "q" => Action::QUIT,

        _ => bail!("Unknown command: {command}"),
    };

    Ok(action)
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_command(s)
    }
}

fn parse_count(arg: Option<&str>) -> Result<u32> {
    match arg {
        None => Ok(1),
        Some(s) => match s.parse::<u32>()? {
            0 => Err(anyhow!("Count must be at least 1")),
            n => Ok(n),
        },
    }
}

fn required<'a>(arg: Option<&'a str>, command: &str) -> Result<&'a str> {
    arg.ok_or_else(|| anyhow!("`{command}` needs an argument"))
}

fn toggle(arg: Option<&str>, flip: Action, set: fn(bool) -> Action) -> Result<Action> {
    match arg.map(|a| a.to_ascii_lowercase()).as_deref() {
        None => Ok(flip),
        Some("on" | "true" | "1") => Ok(set(true)),
        Some("off" | "false" | "0") => Ok(set(false)),
        Some(other) => Err(anyhow!("Expected on or off, got: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(prefix: &mut CountPrefix, modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
        handle_key_event(KeyEvent::new(code, modifiers), prefix)
    }

    #[test]
    fn test_skip_keys() {
        let mut prefix = CountPrefix::new();
        assert_eq!(press(&mut prefix, X, Char('n')), Some(Action::SkipTrack(Next, 1)));
        assert_eq!(press(&mut prefix, S, Char('P')), Some(Action::SkipAlbum(Previous, 1)));
        assert_eq!(press(&mut prefix, C, Char('n')), Some(Action::SkipArtist(Next, 1)));
    }

    #[test]
    fn test_count_prefix_applies_to_next_key() {
        let mut prefix = CountPrefix::new();
        assert_eq!(press(&mut prefix, X, Char('1')), None);
        assert_eq!(press(&mut prefix, X, Char('0')), None);
        assert_eq!(press(&mut prefix, S, Char('N')), Some(Action::SkipAlbum(Next, 10)));
        assert_eq!(press(&mut prefix, X, Char('n')), Some(Action::SkipTrack(Next, 1)));
    }

    #[test]
    fn test_leading_zero_ignored() {
        let mut prefix = CountPrefix::new();
        assert_eq!(press(&mut prefix, X, Char('0')), None);
        assert!(prefix.is_empty());
    }

    #[test]
    fn test_unbound_key_drops_prefix() {
        let mut prefix = CountPrefix::new();
        press(&mut prefix, X, Char('4'));
        assert_eq!(press(&mut prefix, X, Char('x')), None);
        assert!(prefix.is_empty());
    }

    #[test]
    fn test_seek_scales_with_count() {
        let mut prefix = CountPrefix::new();
        assert_eq!(press(&mut prefix, X, Right), Some(Action::SeekStep(Next, 1)));
        press(&mut prefix, X, Char('3'));
        assert_eq!(
            press(&mut prefix, X, Char('h')),
            Some(Action::SeekStep(Previous, 3))
        );
    }

    #[test]
    fn test_key_from_char() {
        assert_eq!(key_from_char('n'), KeyEvent::new(Char('n'), X));
        assert_eq!(key_from_char('N'), KeyEvent::new(Char('N'), S));
        assert_eq!(key_from_char('\u{e}'), KeyEvent::new(Char('n'), C));
        assert_eq!(key_from_char('\u{3}'), KeyEvent::new(Char('c'), C));
        assert_eq!(key_from_char(' '), KeyEvent::new(Char(' '), X));
    }

    #[test]
    fn test_typed_keys_reach_actions() {
        let mut prefix = CountPrefix::new();
        let actions = "2N\u{10}"
            .chars()
            .filter_map(|c| handle_key_event(key_from_char(c), &mut prefix))
            .collect::<Vec<_>>();
        assert_eq!(
            actions,
            vec![Action::SkipAlbum(Next, 2), Action::SkipArtist(Previous, 1)]
        );
    }

    #[test]
    fn test_quit_keys() {
        let mut prefix = CountPrefix::new();
        assert_eq!(press(&mut prefix, X, Char('q')), Some(Action::QUIT));
        assert_eq!(press(&mut prefix, C, Char('c')), Some(Action::QUIT));
    }

    #[test]
    fn test_parse_skips() {
        assert_eq!(parse_command("next").unwrap(), Action::SkipTrack(Next, 1));
        assert_eq!(parse_command("prev 3").unwrap(), Action::SkipTrack(Previous, 3));
        assert_eq!(parse_command("next-album 2").unwrap(), Action::SkipAlbum(Next, 2));
        assert_eq!(
            parse_command("Previous-Artist").unwrap(),
            Action::SkipArtist(Previous, 1)
        );
        assert!(parse_command("next 0").is_err());
        assert!(parse_command("next -1").is_err());
    }

    #[test]
    fn test_parse_transport() {
        assert_eq!(parse_command("play 4").unwrap(), Action::Play(4));
        assert_eq!(parse_command("seek -10").unwrap(), Action::Seek(-10));
        assert_eq!(parse_command("seek +10").unwrap(), Action::Seek(10));
        assert_eq!(parse_command("seek").unwrap(), Action::SeekStep(Next, 1));
        assert_eq!(parse_command("rewind 4").unwrap(), Action::SeekStep(Previous, 4));
        assert_eq!(parse_command("forward").unwrap(), Action::SeekStep(Next, 1));
        assert_eq!(parse_command("seekto 1:30").unwrap(), Action::SeekTo(90));
        assert_eq!(parse_command("volume 70").unwrap(), Action::SetVolume(70));
        assert!(parse_command("play").is_err());
    }

    #[test]
    fn test_parse_toggles() {
        assert_eq!(parse_command("random").unwrap(), Action::ToggleRandom);
        assert_eq!(parse_command("repeat on").unwrap(), Action::SetRepeat(true));
        assert_eq!(parse_command("single OFF").unwrap(), Action::SetSingle(false));
        assert!(parse_command("consume maybe").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_command("").is_err());
        assert!(parse_command("dance").is_err());
        assert!(parse_command("next 1 2").is_err());
    }

    #[test]
    fn test_from_str() {
        let action: Action = "q".parse().unwrap();
        assert_eq!(action, Action::QUIT);
    }
}
