/// Keys the navigator interprets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    /// Move the highlight up.
    Up,
    /// Move the highlight down.
    Down,
    /// Choose the highlighted row, or submit the raw text when nothing is highlighted.
    Enter,
}

/// What a key press resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// Navigator disarmed; the key was not consumed.
    Ignored,
    /// Highlight changed (or stayed put at a bound).
    Moved,
    /// Enter on the highlighted row.
    Select(usize),
    /// Enter with nothing highlighted.
    Submit,
}

/// Highlight state over the visible list.
///
/// `highlighted` is `None` for "no selection" and otherwise always below `len`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardNavigator {
    /// Highlighted row.
    highlighted: Option<usize>,
    /// Rows currently visible.
    len: usize,
    /// Keys are interpreted only while armed.
    armed: bool,
}

impl KeyboardNavigator {
    /// Disarmed navigator over an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            highlighted: None,
            len: 0,
            armed: false,
        }
    }

    /// Start interpreting keys (panel opened).
    pub const fn arm(&mut self) {
        self.armed = true;
    }

    /// Stop interpreting keys (panel closed). Leaves the highlight as is.
    pub const fn disarm(&mut self) {
        self.armed = false;
    }

    /// Whether keys are interpreted.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Clear the highlight.
    pub const fn reset(&mut self) {
        self.highlighted = None;
    }

    /// What: Update the number of visible rows.
    ///
    /// Details:
    /// - A highlight at or beyond the new length is clamped to the last row, or cleared when
    ///   the list became empty.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.highlighted = match self.highlighted {
            Some(_) if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            other => other,
        };
    }

    /// Highlight `index` directly (pointer hover). Out-of-range indices are ignored.
    pub const fn hover(&mut self, index: usize) {
        if index < self.len {
            self.highlighted = Some(index);
        }
    }

    /// Highlighted row.
    #[must_use]
    pub const fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Rows currently visible.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no rows are visible.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// What: Apply a key press.
    ///
    /// Output:
    /// - `Ignored` while disarmed; `Moved` for arrows; `Select`/`Submit` for Enter.
    ///
    /// Details:
    /// - Down from no selection lands on the first row; Up from no selection also lands on the
    ///   first row. Both stay at no selection when the list is empty.
    pub const fn handle(&mut self, key: NavKey) -> NavOutcome {
        if !self.armed {
            return NavOutcome::Ignored;
        }
        match key {
            NavKey::Down => {
                if self.len > 0 {
                    self.highlighted = Some(match self.highlighted {
                        Some(i) if i + 1 < self.len => i + 1,
                        Some(i) => i,
                        None => 0,
                    });
                }
                NavOutcome::Moved
            }
            NavKey::Up => {
                if self.len > 0 {
                    self.highlighted = Some(match self.highlighted {
                        Some(i) => i.saturating_sub(1),
                        None => 0,
                    });
                }
                NavOutcome::Moved
            }
            NavKey::Enter => match self.highlighted {
                Some(i) => NavOutcome::Select(i),
                None => NavOutcome::Submit,
            },
        }
    }
}
