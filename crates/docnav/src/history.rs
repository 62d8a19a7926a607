//! Session History
//!
//! pushState/back/forward over a list of entries with a cursor.

use url::Url;

/// History entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: Url,
    pub title: String,
}

/// Session history for one browsing context
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
    current: usize,
}

impl SessionHistory {
    pub fn new(initial_url: Url, title: &str) -> Self {
        Self {
            entries: vec![HistoryEntry { url: initial_url, title: title.to_string() }],
            current: 0,
        }
    }

    /// Push a new entry, dropping any forward history
    pub fn push_state(&mut self, url: Url, title: &str) {
        self.entries.truncate(self.current + 1);
        self.entries.push(HistoryEntry { url, title: title.to_string() });
        self.current = self.entries.len() - 1;
    }

    /// Replace the current entry
    pub fn replace_state(&mut self, url: Url, title: &str) {
        self.entries[self.current] = HistoryEntry { url, title: title.to_string() };
    }

    /// Go back
    pub fn back(&mut self) -> Option<&HistoryEntry> {
        self.go(-1)
    }

    /// Go forward
    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        self.go(1)
    }

    /// Move the cursor by `delta`; out-of-range moves are ignored
    pub fn go(&mut self, delta: isize) -> Option<&HistoryEntry> {
        let target = self.current.checked_add_signed(delta)?;
        if delta == 0 || target >= self.entries.len() {
            return None;
        }
        self.current = target;
        Some(&self.entries[self.current])
    }

    /// Get current entry
    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.current]
    }

    pub fn index(&self) -> usize {
        self.current
    }

    /// Get history length
    pub fn length(&self) -> usize {
        self.entries.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse("https://d.test/").unwrap().join(path).unwrap()
    }

    #[test]
    fn test_push_and_back() {
        let mut history = SessionHistory::new(url("index.html"), "Home");
        history.push_state(url("guide.html"), "Guide");

        assert_eq!(history.length(), 2);
        assert_eq!(history.current().title, "Guide");

        let entry = history.back().unwrap();
        assert_eq!(entry.url, url("index.html"));
        assert!(history.back().is_none());
        assert!(history.can_go_forward());
    }

    #[test]
    fn test_push_truncates_forward() {
        let mut history = SessionHistory::new(url("a.html"), "A");
        history.push_state(url("b.html"), "B");
        history.push_state(url("c.html"), "C");
        history.back();
        history.back();
        history.push_state(url("d.html"), "D");

        assert_eq!(history.length(), 2);
        assert!(history.forward().is_none());
        assert_eq!(history.current().url, url("d.html"));
    }

    #[test]
    fn test_go_out_of_range() {
        let mut history = SessionHistory::new(url("a.html"), "A");
        assert!(history.go(-3).is_none());
        assert!(history.go(2).is_none());
        assert!(history.go(0).is_none());
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn test_replace_state() {
        let mut history = SessionHistory::new(url("a.html"), "");
        history.replace_state(url("a.html"), "A");
        assert_eq!(history.current().title, "A");
        assert_eq!(history.length(), 1);
    }
}
