mod controller;

pub use controller::PlaybackController;

use crossbeam_channel::{Receiver, Sender};

/// Signals from the controller to whatever loop owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Quit,
}

pub fn lifecycle_channel() -> (Sender<Lifecycle>, Receiver<Lifecycle>) {
    crossbeam_channel::unbounded()
}
