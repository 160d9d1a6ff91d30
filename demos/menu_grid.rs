//! # Menu Grid Example
//!
//! A two-column settings grid running entirely in the menu context:
//! - Arrow keys move focus, wrapping within rows and columns
//! - Select toggles the focused setting; disabled rows swallow it
//! - Back (Esc) or `q` quits
//!
//! Menus act on press edges only, so this demo skips the release-edge
//! negotiation that [`RemoteInputGuard`](tenfoot::RemoteInputGuard) does for
//! hold-to-zoom hosts. It works on any terminal.
//!
//! Run with: `cargo run --example menu_grid`

use tenfoot::crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use tenfoot::nav::{self, FocusNavigator, FocusRestore, GateSignals, RemoteControl};
use tenfoot::ratatui::layout::{Alignment, Constraint, Layout};
use tenfoot::ratatui::style::{Color, Style};
use tenfoot::ratatui::text::{Line, Span};
use tenfoot::ratatui::widgets::{Block, Borders, Paragraph};
use tenfoot::ratatui::Frame;
use tenfoot::{key_events, Command, Controller, Driver, KeyInput, Subscription};

const COLUMNS: usize = 2;

#[derive(Clone)]
struct Setting {
    label: &'static str,
    on: bool,
    enabled: bool,
}

impl nav::FocusTarget for Setting {
    fn is_live(&self) -> bool {
        self.enabled
    }
}

fn settings() -> Vec<Setting> {
    let entry = |label, on, enabled| Setting { label, on, enabled };
    vec![
        entry("Subtitles", true, true),
        entry("Autoplay", false, true),
        entry("HDR output", false, false),
        entry("Reduce motion", false, true),
        entry("Screen reader", false, true),
        entry("Parental lock", false, true),
        entry("Diagnostics", false, true),
    ]
}

struct MenuGrid {
    remote: RemoteControl<Setting>,
    settings: Vec<Setting>,
    status: String,
}

#[derive(Debug)]
enum Msg {
    Remote(nav::Message),
    Quit,
}

impl Controller for MenuGrid {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Remote(nav::Message::Activated(index)) => {
                if let Some(setting) = self.settings.get_mut(index) {
                    setting.on = !setting.on;
                    self.status = format!(
                        "{}: {}",
                        setting.label,
                        if setting.on { "on" } else { "off" }
                    );
                    // Rebuild the targets from the source of truth, keeping
                    // focus where it was.
                    self.remote
                        .set_targets(self.settings.clone(), FocusRestore::Retain);
                }
                Command::none()
            }
            Msg::Remote(nav::Message::Back) => Command::quit(),
            Msg::Remote(nav::Message::FocusChanged(_)) => Command::none(),
            Msg::Remote(msg) => self.remote.update(msg).map(Msg::Remote),
            Msg::Quit => Command::quit(),
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![key_events(|key| {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') => return Some(Msg::Quit),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Some(Msg::Quit)
                    }
                    _ => {}
                }
            }
            KeyInput::from_key_event(&key).map(|input| Msg::Remote(nav::Message::Key(input)))
        })];
        subs.extend(
            self.remote
                .subscriptions()
                .into_iter()
                .map(|sub| sub.map(Msg::Remote)),
        );
        subs
    }
}

fn view(app: &MenuGrid, frame: &mut Frame) {
    let rows = app.settings.len().div_ceil(COLUMNS);
    let height = (rows * 2 + 4) as u16;
    let [_, mid, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(frame.area());

    let focused = app.remote.navigator().current_index();
    let mut lines = Vec::new();
    for (row_index, row) in app.settings.chunks(COLUMNS).enumerate() {
        let mut spans = Vec::new();
        for (col_index, setting) in row.iter().enumerate() {
            let index = row_index * COLUMNS + col_index;
            let marker = if setting.on { "[x]" } else { "[ ]" };
            let style = if !setting.enabled {
                Style::default().fg(Color::DarkGray)
            } else if index == focused {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            spans.push(Span::styled(
                format!(" {marker} {:<18}", setting.label),
                style,
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled(
        format!("{}  ·  arrows move · select toggles · q quits", app.status),
        Style::default().fg(Color::DarkGray),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Settings ");
    frame.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center),
        mid,
    );
}

#[tenfoot::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tenfoot::ratatui::init();

    let settings = settings();
    let focus = FocusNavigator::new(settings.clone()).with_columns(COLUMNS);
    let app = MenuGrid {
        remote: RemoteControl::new("grid", focus).with_signals(GateSignals {
            remote_profile: true,
            menu_open: true,
            manual_camera: false,
        }),
        settings,
        status: "ready".into(),
    };

    let finished = Driver::new(app)
        .run(|app| {
            if let Err(err) = terminal.draw(|frame| view(app, frame)) {
                log::error!("draw failed: {err}");
            }
        })
        .await;

    tenfoot::ratatui::restore();

    let on = finished.settings.iter().filter(|s| s.on).count();
    println!("{on} of {} settings on", finished.settings.len());
    Ok(())
}
