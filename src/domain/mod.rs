mod group_key;
mod playlist;
mod track;

pub use group_key::GroupKey;
pub use playlist::Playlist;
pub use track::Track;

use std::{sync::Arc, time::Duration};

pub trait SongInfo {
    fn get_title(&self) -> &str;
    fn get_artist(&self) -> &str;
    fn get_album(&self) -> &str;
    fn get_duration(&self) -> Option<Duration>;
    fn get_duration_str(&self) -> String;
}

impl<T: SongInfo + ?Sized> SongInfo for Arc<T> {
    fn get_title(&self) -> &str {
        (**self).get_title()
    }

    fn get_artist(&self) -> &str {
        (**self).get_artist()
    }

    fn get_album(&self) -> &str {
        (**self).get_album()
    }

    fn get_duration(&self) -> Option<Duration> {
        (**self).get_duration()
    }

    fn get_duration_str(&self) -> String {
        (**self).get_duration_str()
    }
}
