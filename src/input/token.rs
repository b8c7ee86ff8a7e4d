//! Token (card) reader collaborator.

use std::time::{Duration, Instant};

use tracing::debug;

pub trait TokenReader {
    /// Whether a new token is waiting to be read.
    fn is_token_present(&mut self) -> bool;

    fn read_token_id(&mut self) -> Option<String>;

    /// Finish with the current token.
    fn release(&mut self);
}

/// Render raw UID bytes as upper-case hex pairs joined by `:`.
pub fn format_uid(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Bring an id into reader format when it is a hex byte string (`aabb`,
/// `aa:bb`, `AA-BB`); anything else is only trimmed. Typed ids and catalog
/// ids both go through this before they are compared.
pub fn normalize_token_id(raw: &str) -> String {
    let raw = raw.trim();
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, ':' | '-' | ' '))
        .collect();

    if digits.is_empty()
        || !digits.len().is_multiple_of(2)
        || !digits.chars().all(|c| c.is_ascii_hexdigit())
    {
        return raw.to_string();
    }

    let bytes: Option<Vec<u8>> = (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
        .collect();
    match bytes {
        Some(b) => format_uid(&b),
        None => raw.to_string(),
    }
}

/// Reader fed by typed ids on the desktop.
///
/// After a token is released, further tokens are ignored for `cooldown` so a
/// card left on the reader does not retrigger.
pub struct KeyboardTokenReader {
    pending: Option<String>,
    held: Option<String>,
    cooldown: Duration,
    quiet_until: Option<Instant>,
}

impl KeyboardTokenReader {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            pending: None,
            held: None,
            cooldown,
            quiet_until: None,
        }
    }

    /// Place a token on the reader.
    pub fn present(&mut self, raw: &str) {
        let id = normalize_token_id(raw);
        if !id.is_empty() {
            self.pending = Some(id);
        }
    }

    fn quiet(&self) -> bool {
        self.quiet_until.is_some_and(|t| Instant::now() < t)
    }
}

impl TokenReader for KeyboardTokenReader {
    fn is_token_present(&mut self) -> bool {
        if self.pending.is_some() && self.quiet() {
            if let Some(id) = self.pending.take() {
                debug!("Ignoring token {id} during cooldown");
            }
        }
        self.pending.is_some()
    }

    fn read_token_id(&mut self) -> Option<String> {
        self.held = self.pending.take();
        self.held.clone()
    }

    fn release(&mut self) {
        if self.held.take().is_some() {
            self.quiet_until = Some(Instant::now() + self.cooldown);
        }
    }
}
