use super::Screen;
use ratatui::widgets::TableState;

/// Rows kept above the selection when scrolling to it.
const SCROLL_CONTEXT: usize = 7;

#[derive(Default)]
pub struct TracklistView {
    pub table_pos: TableState,
    needs_redraw: bool,
    needs_clear: bool,
}

impl TracklistView {
    pub fn new() -> Self {
        TracklistView::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_pos.selected()
    }

    pub fn offset(&self) -> usize {
        self.table_pos.offset()
    }

    /// Returns true once per `redraw` request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn take_clear(&mut self) -> bool {
        std::mem::take(&mut self.needs_clear)
    }
}

impl Screen for TracklistView {
    fn scroll_to_current(&mut self, current: Option<usize>) {
        self.table_pos.select(current);

        // Select song and try to visually center it
        *self.table_pos.offset_mut() = current
            .map(|idx| idx.saturating_sub(SCROLL_CONTEXT))
            .unwrap_or(0);
        self.needs_redraw = true;
    }

    fn redraw(&mut self) {
        self.needs_redraw = true;
    }

    fn clear(&mut self) {
        self.needs_clear = true;
        self.needs_redraw = true;
    }
}
