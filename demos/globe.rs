//! # Globe Example
//!
//! A satellite-view globe driven end to end by the remote-control subsystem:
//! - The d-pad rotates the camera; a full select press switches to zoom,
//!   where holding up/down ramps an accelerating zoom
//! - An overlay menu takes the same keys over while it is open
//! - Gate signals (profile, menu, camera ownership) are toggled live so the
//!   routing can be watched as it happens
//!
//! On terminals without key-release reporting (no kitty keyboard protocol)
//! the demo degrades holds to taps: select synthesizes its own release, and
//! tapping the key that sustains a zoom stops it.
//!
//! Run with: `cargo run --example globe`
//! Watch the gate decisions with: `RUST_LOG=debug cargo run --example globe`
//! (logs land in `globe.log` so the alternate screen stays clean)

use std::time::Duration;

use tenfoot::crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use tenfoot::nav::{
    self, CameraCommand, ControlMode, FocusNavigator, GateSignals, RemoteControl, RotateDirection,
    ZoomDirection,
};
use tenfoot::ratatui::layout::{Constraint, Layout};
use tenfoot::ratatui::style::{Color, Modifier, Style};
use tenfoot::ratatui::text::{Line, Span};
use tenfoot::ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use tenfoot::ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tenfoot::ratatui::Frame;
use tenfoot::{
    key_events, subscribe, Command, Controller, Driver, KeyInput, Pulse, RemoteInputGuard,
    RemoteKey, Subscription,
};

/// Degrees of rotation per rotate command.
const ROTATE_STEP: f64 = 6.0;

struct MenuEntry {
    label: &'static str,
    enabled: bool,
}

impl nav::FocusTarget for MenuEntry {
    fn is_live(&self) -> bool {
        self.enabled
    }
}

fn menu_entries() -> Vec<MenuEntry> {
    vec![
        MenuEntry { label: "Recenter", enabled: true },
        MenuEntry { label: "Drop pin", enabled: true },
        MenuEntry { label: "Night lights", enabled: false },
        MenuEntry { label: "Reset zoom", enabled: true },
        MenuEntry { label: "Close menu", enabled: true },
    ]
}

struct Globe {
    remote: RemoteControl<MenuEntry>,
    signals: GateSignals,
    /// True when the terminal cannot report release edges.
    tap_mode: bool,
    longitude: f64,
    latitude: f64,
    /// View span multiplier; smaller is closer.
    altitude: f64,
    /// Orbit phase of the decorative satellite, in radians.
    satellite: f64,
    status: String,
}

#[derive(Debug)]
enum Msg {
    Remote(nav::Message),
    Orbit,
    ToggleMenu,
    ToggleProfile,
    ToggleCamera,
    Quit,
}

impl Globe {
    fn sync_signals(&mut self) -> Command<Msg> {
        self.remote
            .update(nav::Message::Signals(self.signals))
            .map(Msg::Remote)
    }

    /// Tap-mode stand-in for holds: select synthesizes its release, and a
    /// tap on the key sustaining a zoom releases it instead.
    fn remote_tap(&mut self, input: KeyInput) -> Command<Msg> {
        if !input.is_down() {
            return Command::none();
        }
        if input.key == RemoteKey::Select {
            return Command::batch(vec![
                self.remote
                    .update(nav::Message::Key(input))
                    .map(Msg::Remote),
                self.remote
                    .update(nav::Message::Key(KeyInput::up(RemoteKey::Select)))
                    .map(Msg::Remote),
            ]);
        }
        if let Some(active) = self.remote.zoom_direction() {
            if zoom_key(active) == input.key {
                return self
                    .remote
                    .update(nav::Message::Key(KeyInput::up(input.key)))
                    .map(Msg::Remote);
            }
        }
        self.remote
            .update(nav::Message::Key(input))
            .map(Msg::Remote)
    }

    fn apply_camera(&mut self, cmd: CameraCommand) {
        match cmd {
            CameraCommand::Rotate(direction) => match direction {
                RotateDirection::North => self.latitude = (self.latitude + ROTATE_STEP).min(80.0),
                RotateDirection::South => self.latitude = (self.latitude - ROTATE_STEP).max(-80.0),
                RotateDirection::East => {
                    self.longitude = wrap_degrees(self.longitude + ROTATE_STEP)
                }
                RotateDirection::West => {
                    self.longitude = wrap_degrees(self.longitude - ROTATE_STEP)
                }
            },
            CameraCommand::ZoomTick { direction, speed } => {
                let factor = match direction {
                    ZoomDirection::In => 1.0 - speed,
                    ZoomDirection::Out => 1.0 + speed,
                };
                self.altitude = (self.altitude * factor).clamp(0.05, 4.0);
            }
        }
    }

    fn activate(&mut self, index: usize) -> Command<Msg> {
        let Some(entry) = self.remote.navigator().targets().get(index) else {
            return Command::none();
        };
        match entry.label {
            "Recenter" => {
                self.latitude = 0.0;
                self.longitude = 0.0;
                self.status = "recentered".into();
                Command::none()
            }
            "Drop pin" => {
                self.status = format!(
                    "pin dropped at {:.1}°, {:.1}°",
                    self.latitude, self.longitude
                );
                Command::none()
            }
            "Reset zoom" => {
                self.altitude = 1.0;
                self.status = "zoom reset".into();
                Command::none()
            }
            _ => {
                self.signals.menu_open = false;
                self.sync_signals()
            }
        }
    }
}

impl Controller for Globe {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            // Events the remote emits for us.
            Msg::Remote(nav::Message::Camera(cmd)) => {
                self.apply_camera(cmd);
                Command::none()
            }
            Msg::Remote(nav::Message::ModeChanged(mode)) => {
                self.status = match mode {
                    ControlMode::Navigate => "navigate: d-pad rotates".into(),
                    ControlMode::Zoom => "zoom: hold up/down".into(),
                };
                Command::none()
            }
            Msg::Remote(nav::Message::Activated(index)) => self.activate(index),
            Msg::Remote(nav::Message::Back) => {
                if self.signals.menu_open {
                    self.signals.menu_open = false;
                    self.sync_signals()
                } else {
                    Command::quit()
                }
            }
            // The view reads focus straight off the navigator.
            Msg::Remote(nav::Message::FocusChanged(_)) => Command::none(),
            Msg::Remote(nav::Message::Key(input)) if self.tap_mode => self.remote_tap(input),
            Msg::Remote(msg) => self.remote.update(msg).map(Msg::Remote),
            Msg::Orbit => {
                self.satellite = (self.satellite + 0.05) % std::f64::consts::TAU;
                Command::none()
            }
            Msg::ToggleMenu => {
                self.signals.menu_open = !self.signals.menu_open;
                self.sync_signals()
            }
            Msg::ToggleProfile => {
                self.signals.remote_profile = !self.signals.remote_profile;
                self.sync_signals()
            }
            Msg::ToggleCamera => {
                self.signals.manual_camera = !self.signals.manual_camera;
                self.status = if self.signals.manual_camera {
                    "camera: manual".into()
                } else {
                    "camera: follow mode".into()
                };
                self.sync_signals()
            }
            Msg::Quit => Command::quit(),
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![
            key_events(|key| {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => return Some(Msg::Quit),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Some(Msg::Quit)
                        }
                        KeyCode::Char('m') => return Some(Msg::ToggleMenu),
                        KeyCode::Char('p') => return Some(Msg::ToggleProfile),
                        KeyCode::Char('f') => return Some(Msg::ToggleCamera),
                        _ => {}
                    }
                }
                KeyInput::from_key_event(&key).map(|input| Msg::Remote(nav::Message::Key(input)))
            }),
            subscribe(Pulse::new(Duration::from_millis(100), "orbit")).map(|_| Msg::Orbit),
        ];
        subs.extend(
            self.remote
                .subscriptions()
                .into_iter()
                .map(|sub| sub.map(Msg::Remote)),
        );
        subs
    }
}

fn zoom_key(direction: ZoomDirection) -> RemoteKey {
    match direction {
        ZoomDirection::In => RemoteKey::Up,
        ZoomDirection::Out => RemoteKey::Down,
    }
}

fn wrap_degrees(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

fn view(app: &Globe, frame: &mut Frame) {
    let [main, bar] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

    let span = app.altitude;
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(" globe "))
        .x_bounds([app.longitude - 180.0 * span, app.longitude + 180.0 * span])
        .y_bounds([app.latitude - 90.0 * span, app.latitude + 90.0 * span])
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::Green,
                resolution: MapResolution::High,
            });
            let sat_lon = wrap_degrees(app.satellite.to_degrees());
            let sat_lat = 35.0 * app.satellite.sin();
            ctx.print(
                sat_lon,
                sat_lat,
                Line::styled("✦", Style::default().fg(Color::Yellow)),
            );
        });
    frame.render_widget(canvas, main);

    if app.signals.menu_open {
        let [_, panel] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(26)]).areas(main);
        frame.render_widget(Clear, panel);
        let focused = app.remote.navigator().current_index();
        let lines: Vec<Line> = app
            .remote
            .navigator()
            .targets()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if !entry.enabled {
                    Style::default().fg(Color::DarkGray)
                } else if i == focused {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default()
                };
                Line::styled(format!(" {} ", entry.label), style)
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" menu ")),
            panel,
        );
    }

    let mode_tag = match app.remote.mode() {
        ControlMode::Navigate => Span::styled(
            " NAV ",
            Style::default().fg(Color::Black).bg(Color::Green),
        ),
        ControlMode::Zoom => Span::styled(
            " ZOOM ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    };
    let mut spans = vec![
        mode_tag,
        Span::raw(format!(
            " {:.1}°, {:.1}° ×{:.2}  ",
            app.latitude, app.longitude, app.altitude
        )),
        Span::styled(
            format!(
                "profile:{} menu:{} cam:{}",
                if app.signals.remote_profile { "on" } else { "off" },
                if app.signals.menu_open { "open" } else { "closed" },
                if app.signals.manual_camera { "manual" } else { "follow" },
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if app.tap_mode {
        spans.push(Span::styled(
            "  (tap mode)",
            Style::default().fg(Color::Magenta),
        ));
    }
    spans.push(Span::raw(format!("  {}", app.status)));
    spans.push(Span::styled(
        "  m menu · f follow · p profile · q quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), bar);
}

#[tenfoot::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Route debug logging to a file so the alternate screen stays clean.
    if std::env::var_os("RUST_LOG").is_some() {
        let log_file = std::fs::File::create("globe.log")?;
        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .init();
    }

    let mut terminal = tenfoot::ratatui::init();
    let input = match RemoteInputGuard::acquire() {
        Ok(guard) => guard,
        Err(err) => {
            tenfoot::ratatui::restore();
            return Err(err.into());
        }
    };

    let signals = GateSignals {
        remote_profile: true,
        menu_open: false,
        manual_camera: true,
    };
    let app = Globe {
        remote: RemoteControl::new("globe-zoom", FocusNavigator::new(menu_entries()))
            .with_signals(signals),
        signals,
        tap_mode: !input.edge_reporting(),
        longitude: -30.0,
        latitude: 25.0,
        altitude: 1.0,
        satellite: 0.0,
        status: "d-pad rotates; select toggles zoom".into(),
    };

    let globe = Driver::new(app)
        .run(|app| {
            if let Err(err) = terminal.draw(|frame| view(app, frame)) {
                log::error!("draw failed: {err}");
            }
        })
        .await;

    let released = input.release();
    tenfoot::ratatui::restore();
    released?;

    println!(
        "camera parked at {:.1}°, {:.1}° (×{:.2})",
        globe.latitude, globe.longitude, globe.altitude
    );
    Ok(())
}
