use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::audio::AudioOutput;
use crate::config;
use crate::display::{Canvas, FrameBuffer};
use crate::input::{Command, KeyboardTokenReader, RotaryEncoder, TokenReader};
use crate::player::Player;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Id being typed after `t`; `None` outside token entry.
    pub token_entry: Option<String>,
}

/// Control loop: token reader, encoder, audio pump, redraw, then wait for a
/// key. Returns `Ok(())` when shutdown is requested.
pub fn run<A: AudioOutput>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut Player<A, FrameBuffer>,
    encoder: &RotaryEncoder,
    tokens: &mut KeyboardTokenReader,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        step(player, encoder, tokens);

        terminal.draw(|f| ui::draw(f, player, state.token_entry.as_deref()))?;

        if event::poll(settings.input.poll_interval())? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, player, encoder, tokens, state) {
                    break;
                }
            }
        }
    }

    player.stop();
    Ok(())
}

/// One pass over the inputs: a presented token, then encoder activity, then
/// the audio output.
pub fn step<A: AudioOutput, C: Canvas, R: TokenReader>(
    player: &mut Player<A, C>,
    encoder: &RotaryEncoder,
    tokens: &mut R,
) {
    if tokens.is_token_present() {
        if let Some(id) = tokens.read_token_id().filter(|id| !id.is_empty()) {
            info!("Card detected: {id}");
            player.play(&id);
        }
        tokens.release();
    }

    for cmd in encoder.drain().commands() {
        player.apply(cmd);
    }

    player.pump();
}

/// Returns `true` when the user asked to quit.
fn handle_key_event<A: AudioOutput, C: Canvas>(
    key: KeyEvent,
    player: &mut Player<A, C>,
    encoder: &RotaryEncoder,
    tokens: &mut KeyboardTokenReader,
    state: &mut EventLoopState,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if let Some(buf) = state.token_entry.as_mut() {
        match key.code {
            KeyCode::Esc => state.token_entry = None,
            KeyCode::Backspace => {
                buf.pop();
            }
            KeyCode::Enter => {
                tokens.present(buf);
                state.token_entry = None;
            }
            KeyCode::Char(c) if !c.is_control() => buf.push(c),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('t') => state.token_entry = Some(String::new()),
        KeyCode::Up | KeyCode::Right => {
            encoder.record_step(true);
        }
        KeyCode::Down | KeyCode::Left => {
            encoder.record_step(false);
        }
        KeyCode::Char(' ') => {
            encoder.record_press();
        }
        KeyCode::Char(c) => {
            if let Some(cmd) = Command::from_char(c) {
                player.apply(cmd);
            }
        }
        _ => {}
    }
    false
}
