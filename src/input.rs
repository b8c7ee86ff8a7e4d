//! Input sources: single-character commands, the rotary encoder and the
//! token reader.
//!
//! None of these call into the player. They produce `Command`s or token ids
//! that the control loop applies once per iteration.

mod encoder;
mod token;

pub use encoder::{EncoderSample, RotaryEncoder};
pub use token::{KeyboardTokenReader, TokenReader, format_uid, normalize_token_id};

/// Transport intents.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    TogglePlayPause,
    VolumeUp,
    VolumeDown,
    Stop,
    Status,
}

impl Command {
    /// Map a console character to its command.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'p' => Some(Self::TogglePlayPause),
            '+' => Some(Self::VolumeUp),
            '-' => Some(Self::VolumeDown),
            's' => Some(Self::Stop),
            'i' => Some(Self::Status),
            _ => None,
        }
    }
}
