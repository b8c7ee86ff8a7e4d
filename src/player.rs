//! Playback controller: the state machine between token scans, transport
//! commands, the catalog and the audio/display collaborators.
//!
//! `Player` lives in `player::model`; it owns the catalog and the one
//! playback session, and is driven only from the control loop.

mod model;
mod status;

pub use model::*;
pub use status::StatusReport;

#[cfg(test)]
mod tests;
