use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// The six-button vocabulary of a television remote control.
///
/// Everything in this crate speaks in terms of these keys. Hosts that read
/// input from somewhere other than a terminal (an HDMI-CEC bridge, a WebSocket,
/// a test script) construct [`KeyInput`] values directly; terminal hosts get
/// them for free via [`KeyInput::from_key_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteKey {
    /// Directional pad up.
    Up,
    /// Directional pad down.
    Down,
    /// Directional pad left.
    Left,
    /// Directional pad right.
    Right,
    /// The OK / confirm button.
    Select,
    /// The back / dismiss button.
    Back,
}

/// Which edge of a physical key transition an input reports.
///
/// Remote-control semantics care about both edges: a zoom hold runs from a
/// `Down` edge to the matching `Up` edge, and a select toggle fires only once
/// a full press (down followed by up) completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEdge {
    /// The key went down (or auto-repeated while held).
    Down,
    /// The key was released.
    Up,
}

/// A single remote-control input: which key, and which edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    /// The remote key that changed state.
    pub key: RemoteKey,
    /// Whether this is the press or the release edge.
    pub edge: KeyEdge,
}

impl KeyInput {
    /// A press edge for `key`.
    pub fn down(key: RemoteKey) -> Self {
        Self {
            key,
            edge: KeyEdge::Down,
        }
    }

    /// A release edge for `key`.
    pub fn up(key: RemoteKey) -> Self {
        Self {
            key,
            edge: KeyEdge::Up,
        }
    }

    /// Return whether this input is a press edge.
    pub fn is_down(&self) -> bool {
        self.edge == KeyEdge::Down
    }

    /// Translate a crossterm key event into a remote-control input.
    ///
    /// Arrow keys map to the directional pad, `Enter` to [`RemoteKey::Select`],
    /// and `Esc` or `Backspace` to [`RemoteKey::Back`]. Key repeat is reported
    /// as another `Down` edge, matching what a held remote button produces.
    /// Returns `None` for keys outside the remote vocabulary.
    ///
    /// Release edges only arrive when the terminal reports them; see
    /// [`RemoteInputGuard`](crate::input::RemoteInputGuard) for how that is
    /// negotiated.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        let key = match event.code {
            KeyCode::Up => RemoteKey::Up,
            KeyCode::Down => RemoteKey::Down,
            KeyCode::Left => RemoteKey::Left,
            KeyCode::Right => RemoteKey::Right,
            KeyCode::Enter => RemoteKey::Select,
            KeyCode::Esc | KeyCode::Backspace => RemoteKey::Back,
            _ => return None,
        };
        let edge = match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => KeyEdge::Down,
            KeyEventKind::Release => KeyEdge::Up,
        };
        Some(Self { key, edge })
    }
}
