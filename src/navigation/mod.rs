//! Position arithmetic over a playlist snapshot.
//!
//! Nothing in here touches the player. Given where playback is and what the
//! user asked for, these functions say where it should go next. Grouped
//! movement re-reads group boundaries on every single step, so a count of
//! three is exactly three independent hops.

mod group;

pub use group::{group_start, step_back_to_prior_group, step_to_next_group};

use crate::domain::{GroupKey, SongInfo};
use log::debug;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub fn signed(self, count: u32) -> i64 {
        match self {
            Direction::Next => count as i64,
            Direction::Previous => -(count as i64),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Next => write!(f, "next"),
            Direction::Previous => write!(f, "previous"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Track,
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationRequest {
    pub direction: Direction,
    pub unit: Unit,
    pub count: u32,
    pub start: usize,
}

impl NavigationRequest {
    pub fn new(direction: Direction, unit: Unit, count: u32, start: usize) -> Self {
        NavigationRequest {
            direction,
            unit,
            count,
            start,
        }
    }

    pub fn target<S: SongInfo>(&self, tracks: &[S], key: GroupKey) -> usize {
        let key = match self.unit {
            Unit::Track => GroupKey::None,
            Unit::Group => key,
        };
        advance(tracks, self.start, self.direction, self.count, key)
    }
}

/// Move `count` steps from `start`.
///
/// # Panics
/// If `tracks` is empty or `start` is not a valid index. Both are caller
/// errors and are never clamped away.
pub fn advance<S: SongInfo>(
    tracks: &[S],
    start: usize,
    direction: Direction,
    count: u32,
    key: GroupKey,
) -> usize {
    assert!(!tracks.is_empty(), "cannot navigate an empty playlist");
    assert!(
        start < tracks.len(),
        "start position {start} outside playlist of {} tracks",
        tracks.len()
    );

    let target = match key {
        GroupKey::None => clamp_offset(start as i64, direction, count, tracks.len()),
        _ => (0..count).fold(start, |pos, _| step(tracks, pos, direction, key)),
    };

    debug!("advance {direction} x{count} by {key}: {start} -> {target}");
    target
}

/// One grouped hop. Backwards first rewinds to the head of the current
/// group and only leaves it when already standing on that head.
pub fn step<S: SongInfo>(tracks: &[S], pos: usize, direction: Direction, key: GroupKey) -> usize {
    match direction {
        Direction::Next => step_to_next_group(tracks, pos, key),
        Direction::Previous => match group_start(tracks, pos, key) {
            start if start < pos => start,
            _ => step_back_to_prior_group(tracks, pos, key),
        },
    }
}

/// `current + signed(count)` pinned to `[0, len)`. `current` may be -1 for
/// "nothing playing".
pub fn clamp_offset(current: i64, direction: Direction, count: u32, len: usize) -> usize {
    assert!(len > 0, "cannot navigate an empty playlist");

    let last = len as i64 - 1;
    current
        .saturating_add(direction.signed(count))
        .clamp(0, last) as usize
}
