//! Navigation events and the session history stack

/// A request to move the router somewhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Add a new entry (link click, programmatic push)
    Push(String),
    /// Overwrite the current entry
    Replace(String),
    /// One entry back
    Back,
    /// One entry forward
    Forward,
    /// Move by `n` entries; negative goes back
    Go(isize),
}

/// Session history: a list of entries and a cursor into it
///
/// Mirrors the browser's behaviour: pushing after going back drops the
/// forward entries, and moving past either end does nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStack {
    entries: Vec<String>,
    cursor: usize,
}

impl HistoryStack {
    /// Starts a history with a single entry
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
        }
    }

    /// The entry the cursor is on
    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Index of the current entry
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Adds an entry after the current one, discarding forward entries
    ///
    /// ```
    /// use character_router::HistoryStack;
    ///
    /// let mut history = HistoryStack::new("/characters");
    /// history.push("/characters/1");
    /// history.push("/characters/2");
    /// history.go(-2);
    /// history.push("/characters/3");
    /// assert_eq!(history.entries(), ["/characters", "/characters/3"]);
    /// ```
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry.into());
        self.cursor = self.entries.len() - 1;
    }

    /// Overwrites the current entry
    pub fn replace(&mut self, entry: impl Into<String>) {
        self.entries[self.cursor] = entry.into();
    }

    /// Moves the cursor by `delta`
    ///
    /// Returns the new current entry, or None (and stays put) when the
    /// move would leave the history.
    pub fn go(&mut self, delta: isize) -> Option<&str> {
        let target = self.cursor.checked_add_signed(delta)?;
        if target >= self.entries.len() {
            return None;
        }
        self.cursor = target;
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_and_forward() {
        let mut history = HistoryStack::new("/characters");
        history.push("/characters/42");

        assert_eq!(history.go(-1), Some("/characters"));
        assert!(history.can_go_forward());
        assert_eq!(history.go(1), Some("/characters/42"));
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut history = HistoryStack::new("/characters");
        assert_eq!(history.go(-1), None);
        assert_eq!(history.go(3), None);
        assert_eq!(history.position(), 0);
        assert_eq!(history.current(), "/characters");
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut history = HistoryStack::new("/");
        history.replace("/characters");
        assert_eq!(history.entries(), ["/characters"]);
        assert!(!history.can_go_back());
    }

    #[test]
    fn test_zero_delta_stays() {
        let mut history = HistoryStack::new("/characters");
        assert_eq!(history.go(0), Some("/characters"));
    }
}
