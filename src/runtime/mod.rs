use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::input::{KeyboardTokenReader, RotaryEncoder};
use crate::logging;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    if let Err(e) = logging::init(&settings.logging) {
        eprintln!("tailpod: logging disabled: {e}");
    }
    info!("tailpod starting");

    let mut player = startup::build_player(&settings);
    let encoder = RotaryEncoder::new(
        settings.input.rotary_debounce(),
        settings.input.button_debounce(),
    );
    let mut tokens = KeyboardTokenReader::new(settings.input.token_cooldown());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(
            &mut terminal,
            &settings,
            &mut player,
            &encoder,
            &mut tokens,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("tailpod stopped");
    run_result
}
