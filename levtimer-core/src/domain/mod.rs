//! Domain types for levtimer

pub mod bar;
pub mod position;
pub mod snapshot;

pub use bar::Bar;
pub use position::{ParsePositionError, Position};
pub use snapshot::SignalSnapshot;
