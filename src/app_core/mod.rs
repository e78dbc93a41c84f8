mod app;
pub use app::Cadence;
