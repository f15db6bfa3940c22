//! Bounded query text buffer.

/// Maximum number of characters the query can hold.
pub const QUERY_CAPACITY: usize = 255;

/// The user's filter text.
///
/// Only supports appending at the end and removing the last character; there
/// is no cursor inside the text. Every accepted character is printable ASCII,
/// so the length in bytes equals the length in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    text: String,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: String::with_capacity(QUERY_CAPACITY),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.text.len() >= QUERY_CAPACITY
    }

    /// Appends a printable ASCII character.
    ///
    /// Returns `false` (and leaves the text unchanged) when the buffer is full
    /// or the character is not in `' '..='~'`.
    pub fn push(&mut self, c: char) -> bool {
        if self.is_full() || !is_printable(c) {
            return false;
        }
        self.text.push(c);
        true
    }

    /// Removes the last character. Returns `false` if the query was empty.
    pub fn pop(&mut self) -> bool {
        self.text.pop().is_some()
    }
}

/// Printable ASCII range accepted into the query.
#[must_use]
pub const fn is_printable(c: char) -> bool {
    matches!(c, ' '..='~')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_stops_at_capacity() {
        let mut query = Query::new();
        for _ in 0..QUERY_CAPACITY {
            assert!(query.push('a'));
        }
        assert!(query.is_full());
        assert!(!query.push('b'));
        assert_eq!(query.len(), QUERY_CAPACITY);
        assert!(query.as_str().chars().all(|c| c == 'a'));
    }

    #[test]
    fn push_rejects_non_printable_characters() {
        let mut query = Query::new();
        assert!(!query.push('\t'));
        assert!(!query.push('é'));
        assert!(!query.push('\u{7f}'));
        assert!(query.push(' '));
        assert!(query.push('~'));
        assert_eq!(query.as_str(), " ~");
    }

    #[test]
    fn pop_on_empty_reports_no_change() {
        let mut query = Query::new();
        assert!(!query.pop());
        query.push('x');
        assert!(query.pop());
        assert!(query.is_empty());
    }
}
