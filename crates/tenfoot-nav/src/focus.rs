//! Directional focus movement over an ordered set of on-screen targets.
//!
//! `FocusNavigator` tracks which of a menu's controls currently holds focus
//! and moves it in response to directional keys. Movement is linear by
//! default; configuring a column count makes up/down/left/right grid-aware,
//! with the last row allowed to be ragged. Boundary behavior (wrap to the far
//! side, or stay put) is a constructor parameter because both appear in
//! ten-foot UIs: carousels wrap, settings columns clamp.

/// An on-screen interactive element eligible for focus.
///
/// The navigator treats targets as opaque; hosts attach whatever payload
/// their renderer needs (labels, callbacks, entity ids) and implement the
/// liveness predicate.
pub trait FocusTarget: Send + 'static {
    /// Whether the target can currently be activated (visible and enabled).
    ///
    /// A target that is focused but not live swallows activation instead of
    /// producing one.
    fn is_live(&self) -> bool {
        true
    }
}

impl FocusTarget for String {}
impl FocusTarget for &'static str {}

/// Boundary behavior for focus movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapPolicy {
    /// Moving past either end wraps to the opposite end.
    #[default]
    Wrap,
    /// Moving past either end stays at the boundary.
    Clamp,
}

/// What to focus after the target list is rebuilt.
///
/// The list is owned and rebuilt by the host on every content change; the
/// restore request travels with the new list so a reopened menu can land on
/// the control the viewer left from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRestore {
    /// Focus index 0.
    Reset,
    /// Restore a remembered index, clamped into the new list.
    Remember(usize),
    /// Keep the current index, clamped into the new list.
    Retain,
}

/// Tracks the focused index over an ordered, possibly 2-D, list of targets.
///
/// Invariant: `current_index < len()` whenever the list is non-empty, and 0
/// when it is empty. Every operation is total; out-of-range indexes clamp
/// and empty-list operations are no-ops.
pub struct FocusNavigator<T: FocusTarget> {
    targets: Vec<T>,
    current: usize,
    columns: Option<usize>,
    policy: WrapPolicy,
}

impl<T: FocusTarget> FocusNavigator<T> {
    /// Create a linear navigator over `targets`, wrapping at both ends.
    pub fn new(targets: Vec<T>) -> Self {
        Self {
            targets,
            current: 0,
            columns: None,
            policy: WrapPolicy::default(),
        }
    }

    /// Set the boundary policy.
    pub fn with_policy(mut self, policy: WrapPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Lay the targets out as a grid with the given column count, making
    /// up/down/left/right two-dimensional. A zero column count disables grid
    /// movement.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = if columns == 0 { None } else { Some(columns) };
        self
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The focused target, if the list is non-empty.
    pub fn current(&self) -> Option<&T> {
        self.targets.get(self.current)
    }

    pub fn targets(&self) -> &[T] {
        &self.targets
    }

    pub fn columns(&self) -> Option<usize> {
        self.columns
    }

    pub fn policy(&self) -> WrapPolicy {
        self.policy
    }

    /// Replace the target list and resolve where focus lands.
    ///
    /// Shrinking the list clamps the index to the new last target; growing it
    /// leaves a retained index unchanged. Returns the resulting index.
    pub fn set_targets(&mut self, targets: Vec<T>, restore: FocusRestore) -> usize {
        self.targets = targets;
        if self.targets.is_empty() {
            self.current = 0;
            return 0;
        }
        let last = self.targets.len() - 1;
        self.current = match restore {
            FocusRestore::Reset => 0,
            FocusRestore::Remember(index) => index.min(last),
            FocusRestore::Retain => self.current.min(last),
        };
        self.current
    }

    /// Focus an explicit index, clamped to the valid range.
    ///
    /// Returns the resulting index (0 for an empty list).
    pub fn focus(&mut self, index: usize) -> usize {
        if self.targets.is_empty() {
            self.current = 0;
            return 0;
        }
        self.current = index.min(self.targets.len() - 1);
        self.current
    }

    /// Move to the next target. Returns the new index if focus moved.
    pub fn move_next(&mut self) -> Option<usize> {
        if self.targets.is_empty() {
            return None;
        }
        let last = self.targets.len() - 1;
        let next = match self.policy {
            WrapPolicy::Wrap => {
                if self.current == last {
                    0
                } else {
                    self.current + 1
                }
            }
            WrapPolicy::Clamp => (self.current + 1).min(last),
        };
        self.commit(next)
    }

    /// Move to the previous target. Returns the new index if focus moved.
    pub fn move_previous(&mut self) -> Option<usize> {
        if self.targets.is_empty() {
            return None;
        }
        let last = self.targets.len() - 1;
        let previous = match self.policy {
            WrapPolicy::Wrap => {
                if self.current == 0 {
                    last
                } else {
                    self.current - 1
                }
            }
            WrapPolicy::Clamp => self.current.saturating_sub(1),
        };
        self.commit(previous)
    }

    /// Move focus up one row (grid) or to the previous target (linear).
    pub fn move_up(&mut self) -> Option<usize> {
        if self.targets.is_empty() {
            return None;
        }
        match self.columns {
            Some(columns) => self.grid_up(columns),
            None => self.move_previous(),
        }
    }

    /// Move focus down one row (grid) or to the next target (linear).
    pub fn move_down(&mut self) -> Option<usize> {
        if self.targets.is_empty() {
            return None;
        }
        match self.columns {
            Some(columns) => self.grid_down(columns),
            None => self.move_next(),
        }
    }

    /// Move focus left one column (grid) or to the previous target (linear).
    pub fn move_left(&mut self) -> Option<usize> {
        if self.targets.is_empty() {
            return None;
        }
        match self.columns {
            Some(columns) => self.grid_left(columns),
            None => self.move_previous(),
        }
    }

    /// Move focus right one column (grid) or to the next target (linear).
    pub fn move_right(&mut self) -> Option<usize> {
        if self.targets.is_empty() {
            return None;
        }
        match self.columns {
            Some(columns) => self.grid_right(columns),
            None => self.move_next(),
        }
    }

    /// Activate the focused target: returns its index for the host to press,
    /// or `None` when the list is empty or the target is not live.
    pub fn activate_current(&self) -> Option<usize> {
        let target = self.targets.get(self.current)?;
        target.is_live().then_some(self.current)
    }

    fn grid_up(&mut self, columns: usize) -> Option<usize> {
        let len = self.targets.len();
        let total_rows = len.div_ceil(columns);
        let row = self.current / columns;
        let col = self.current % columns;
        let new_row = if row == 0 {
            match self.policy {
                WrapPolicy::Wrap => total_rows - 1,
                WrapPolicy::Clamp => return None,
            }
        } else {
            row - 1
        };
        // Ragged last row: clamp a landing past the end to the last target.
        self.commit((new_row * columns + col).min(len - 1))
    }

    fn grid_down(&mut self, columns: usize) -> Option<usize> {
        let len = self.targets.len();
        let total_rows = len.div_ceil(columns);
        let row = self.current / columns;
        let col = self.current % columns;
        let new_row = if row == total_rows - 1 {
            match self.policy {
                WrapPolicy::Wrap => 0,
                WrapPolicy::Clamp => return None,
            }
        } else {
            row + 1
        };
        self.commit((new_row * columns + col).min(len - 1))
    }

    fn grid_left(&mut self, columns: usize) -> Option<usize> {
        let len = self.targets.len();
        let row = self.current / columns;
        let col = self.current % columns;
        let new_col = if col == 0 {
            match self.policy {
                WrapPolicy::Wrap => columns - 1,
                WrapPolicy::Clamp => return None,
            }
        } else {
            col - 1
        };
        self.commit((row * columns + new_col).min(len - 1))
    }

    fn grid_right(&mut self, columns: usize) -> Option<usize> {
        let len = self.targets.len();
        let row = self.current / columns;
        let col = self.current % columns;
        // The last target ends its row even when the row is not full.
        let new_col = if col == columns - 1 || self.current == len - 1 {
            match self.policy {
                WrapPolicy::Wrap => 0,
                WrapPolicy::Clamp => return None,
            }
        } else {
            col + 1
        };
        self.commit((row * columns + new_col).min(len - 1))
    }

    fn commit(&mut self, index: usize) -> Option<usize> {
        if index == self.current {
            None
        } else {
            self.current = index;
            Some(index)
        }
    }
}
