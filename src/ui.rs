//! Terminal rendering of the device: the display panel, the session status
//! and the control legend.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::audio::AudioOutput;
use crate::display::{Frame as Picture, FrameBuffer};
use crate::player::Player;

const CONTROLS: &[(&str, &str)] = &[
    ("t", "present token"),
    ("space/p", "play/pause"),
    ("↑↓←→", "turn knob"),
    ("+/-", "volume"),
    ("s", "stop"),
    ("i", "status"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// The committed panel drawn with half blocks, one cell per two pixel rows.
pub fn panel_lines(picture: &Picture) -> Vec<String> {
    (0..picture.height().div_ceil(2))
        .map(|cy| {
            (0..picture.width())
                .map(|x| match (picture.pixel(x, cy * 2), picture.pixel(x, cy * 2 + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                })
                .collect()
        })
        .collect()
}

/// A `width`-column strip of `r`, centered horizontally.
fn centered_columns(width: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    Rect {
        x: r.x + (r.width - width) / 2,
        width,
        ..r
    }
}

pub fn draw<A: AudioOutput>(
    frame: &mut Frame,
    player: &Player<A, FrameBuffer>,
    token_entry: Option<&str>,
) {
    let canvas = player.canvas();
    let picture = canvas.frame();
    let panel_height = u16::try_from(picture.height().div_ceil(2)).unwrap_or(u16::MAX);
    let panel_width = u16::try_from(picture.width()).unwrap_or(u16::MAX);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(panel_height.saturating_add(2)),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(frame.area());

    let source = match player.catalog() {
        Some(c) => format!("{} cards from {}", c.entries.len(), c.source),
        None => "no catalog loaded".to_string(),
    };
    let header = Paragraph::new(source).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" tailpod ")
            .title_alignment(Alignment::Center),
    );
    frame.render_widget(header, chunks[0]);

    let panel = Paragraph::new(panel_lines(picture).join("\n"))
        .block(Block::bordered().title(format!(" display · frame {} ", canvas.flushes())));
    frame.render_widget(panel, centered_columns(panel_width.saturating_add(2), chunks[1]));

    let session = player.session();
    let card = match player.active_entry() {
        Some(e) if !e.label.is_empty() => format!("CARD: {} ({})", e.label, e.id),
        Some(e) => format!("CARD: {}", e.id),
        None => "CARD: -".to_string(),
    };
    let status = [
        format!("STATE: {}", session.state),
        format!("VOLUME: {}", session.volume),
        card,
    ]
    .join(" • ");
    let status_par = Paragraph::new(status).block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" status "),
    );
    frame.render_widget(status_par, chunks[2]);

    let (title, footer_text) = match token_entry {
        Some(buf) => (
            " token ",
            format!("id: {buf}_   [enter] present | [esc] cancel"),
        ),
        None => (" controls ", controls_text()),
    };
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
