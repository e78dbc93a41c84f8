use super::SongInfo;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Which track field decides where one group ends and the next begins.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    /// Every track is a group of its own.
    #[default]
    None,
    Album,
    Artist,
}

impl GroupKey {
    /// The grouping value of `song`. `None` has no field to read and yields
    /// the empty string.
    pub fn key<'a, S: SongInfo + ?Sized>(&self, song: &'a S) -> &'a str {
        match self {
            GroupKey::None => "",
            GroupKey::Album => song.get_album(),
            GroupKey::Artist => song.get_artist(),
        }
    }

    pub fn is_grouped(&self) -> bool {
        *self != GroupKey::None
    }

    /// Exact string equality; empty values match each other. Under `None`
    /// no two tracks share a group.
    pub fn same_group<S: SongInfo + ?Sized>(&self, a: &S, b: &S) -> bool {
        match self {
            GroupKey::None => false,
            _ => self.key(a) == self.key(b),
        }
    }
}

impl FromStr for GroupKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "track" => Ok(GroupKey::None),
            "album" => Ok(GroupKey::Album),
            "artist" => Ok(GroupKey::Artist),
            _ => Err(anyhow!("Unknown grouping: {s}")),
        }
    }
}

impl Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::None => write!(f, "track"),
            GroupKey::Album => write!(f, "album"),
            GroupKey::Artist => write!(f, "artist"),
        }
    }
}
