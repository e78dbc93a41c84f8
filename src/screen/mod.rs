mod tracklist_view;

pub use tracklist_view::TracklistView;

/// The visible side of playback. The controller only ever asks a screen to
/// follow the current track or repaint itself.
pub trait Screen {
    /// Bring `current` into view. `None` means nothing is current.
    fn scroll_to_current(&mut self, current: Option<usize>);
    fn redraw(&mut self);
    fn clear(&mut self);
}
