use std::fmt;

use crate::audio::Volume;

use super::PlaybackState;

/// Snapshot printed by the status command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub volume: Volume,
    pub state: PlaybackState,
    /// Label and id of the active card.
    pub active: Option<(String, String)>,
    /// Number of cards, or `None` without a catalog.
    pub cards: Option<usize>,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlaybackState::Idle => "Idle",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        };
        f.write_str(s)
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Current Status ===")?;
        writeln!(f, "Current volume: {}", self.volume)?;
        writeln!(f, "Current state: {}", self.state)?;
        match &self.active {
            Some((label, id)) if !label.is_empty() => writeln!(f, "Active card: {label} ({id})")?,
            Some((_, id)) => writeln!(f, "Active card: {id}")?,
            None => writeln!(f, "No active card")?,
        }
        match self.cards {
            Some(n) => write!(f, "Cards loaded: {n}"),
            None => write!(f, "No catalog loaded"),
        }
    }
}
