//! Selection and scroll window over the filtered view.
//!
//! [`Viewport`] owns the selected position and the first visible position,
//! both offsets into the filtered view. Every transition takes the current
//! filtered count so the invariants hold without the viewport keeping a copy:
//!
//! - `selected < max(1, count)`, and `selected == 0` when `count == 0`
//! - `scroll_offset <= selected < scroll_offset + height`
//!
//! With an empty filtered view every movement is a no-op.

use std::ops::Range;

/// Selection cursor plus scroll window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    selected: usize,
    scroll_offset: usize,
    height: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Viewport {
    /// Creates a viewport at the top of the list. A height of 0 counts as 1.
    #[must_use]
    pub const fn new(height: usize) -> Self {
        Self {
            selected: 0,
            scroll_offset: 0,
            height: if height == 0 { 1 } else { height },
        }
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns to the top of the list.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    /// Applies a new visible height and re-derives the scroll offset so the
    /// selection stays inside the window.
    pub fn resize(&mut self, height: usize, count: usize) {
        self.height = height.max(1);

        if count == 0 {
            self.reset();
            return;
        }

        self.selected = self.selected.min(count - 1);
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.height {
            self.scroll_offset = self.selected + 1 - self.height;
        }
    }

    pub fn move_down(&mut self, count: usize) {
        if self.selected + 1 >= count {
            return;
        }
        self.selected += 1;
        if self.selected >= self.scroll_offset + self.height {
            self.scroll_offset += 1;
        }
    }

    pub fn move_up(&mut self, count: usize) {
        if count == 0 || self.selected == 0 {
            return;
        }
        self.selected -= 1;
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.scroll_offset.saturating_sub(1);
        }
    }

    pub fn page_up(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.selected = self.selected.saturating_sub(self.height);
        self.scroll_offset = self.scroll_offset.min(self.selected);
    }

    pub fn page_down(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.selected = (self.selected + self.height).min(count - 1);
        if self.selected >= self.scroll_offset + self.height {
            self.scroll_offset = self.selected + 1 - self.height;
        }
    }

    /// Positions in the filtered view that are currently on screen.
    #[must_use]
    pub fn visible_range(&self, count: usize) -> Range<usize> {
        let start = self.scroll_offset.min(count);
        let end = (self.scroll_offset + self.height).min(count);
        start..end
    }

    /// `true` when rows exist above the window.
    #[must_use]
    pub const fn has_more_above(&self) -> bool {
        self.scroll_offset > 0
    }

    /// `true` when rows exist below the window.
    #[must_use]
    pub const fn has_more_below(&self, count: usize) -> bool {
        self.scroll_offset + self.height < count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_invariants(viewport: &Viewport, count: usize) {
        if count == 0 {
            assert_eq!(viewport.selected(), 0);
        } else {
            assert!(viewport.selected() < count, "{viewport:?} count {count}");
        }
        assert!(viewport.scroll_offset() <= viewport.selected(), "{viewport:?}");
        assert!(
            viewport.selected() < viewport.scroll_offset() + viewport.height(),
            "{viewport:?}"
        );
    }

    #[test]
    fn six_moves_down_scroll_by_two() {
        let mut viewport = Viewport::new(5);
        for _ in 0..6 {
            viewport.move_down(10);
        }
        assert_eq!(viewport.selected(), 6);
        assert_eq!(viewport.scroll_offset(), 2);
    }

    #[test]
    fn move_down_stops_at_last_row() {
        let mut viewport = Viewport::new(3);
        for _ in 0..10 {
            viewport.move_down(4);
        }
        assert_eq!(viewport.selected(), 3);
        assert_eq!(viewport.scroll_offset(), 1);
    }

    #[test]
    fn move_up_scrolls_back_into_view() {
        let mut viewport = Viewport::new(3);
        for _ in 0..5 {
            viewport.move_down(10);
        }
        assert_eq!((viewport.selected(), viewport.scroll_offset()), (5, 3));
        for _ in 0..4 {
            viewport.move_up(10);
        }
        assert_eq!((viewport.selected(), viewport.scroll_offset()), (1, 1));
        viewport.move_up(10);
        viewport.move_up(10);
        assert_eq!((viewport.selected(), viewport.scroll_offset()), (0, 0));
    }

    #[test]
    fn page_down_clamps_to_last_row() {
        let mut viewport = Viewport::new(5);
        viewport.page_down(12);
        assert_eq!((viewport.selected(), viewport.scroll_offset()), (5, 1));
        viewport.page_down(12);
        assert_eq!((viewport.selected(), viewport.scroll_offset()), (10, 6));
        viewport.page_down(12);
        assert_eq!((viewport.selected(), viewport.scroll_offset()), (11, 7));
    }

    #[test]
    fn page_up_clamps_to_top() {
        let mut viewport = Viewport::new(5);
        viewport.page_down(12);
        viewport.page_down(12);
        viewport.page_up(12);
        assert_eq!((viewport.selected(), viewport.scroll_offset()), (5, 5));
        viewport.page_up(12);
        assert_eq!((viewport.selected(), viewport.scroll_offset()), (0, 0));
    }

    #[test]
    fn empty_view_ignores_all_movement() {
        let mut viewport = Viewport::new(4);
        viewport.move_down(0);
        viewport.move_up(0);
        viewport.page_down(0);
        viewport.page_up(0);
        assert_eq!((viewport.selected(), viewport.scroll_offset()), (0, 0));
    }

    #[test]
    fn shrinking_height_keeps_selection_visible() {
        let mut viewport = Viewport::new(10);
        for _ in 0..8 {
            viewport.move_down(20);
        }
        assert_eq!((viewport.selected(), viewport.scroll_offset()), (8, 0));
        viewport.resize(4, 20);
        assert_eq!((viewport.selected(), viewport.scroll_offset()), (8, 5));
        assert_invariants(&viewport, 20);
    }

    #[test]
    fn zero_height_is_treated_as_one_row() {
        let mut viewport = Viewport::new(0);
        assert_eq!(viewport.height(), 1);
        viewport.move_down(3);
        assert_eq!((viewport.selected(), viewport.scroll_offset()), (1, 1));
        viewport.resize(0, 3);
        assert_eq!(viewport.height(), 1);
        assert_invariants(&viewport, 3);
    }

    #[test]
    fn visible_range_and_scroll_hints() {
        let mut viewport = Viewport::new(3);
        assert_eq!(viewport.visible_range(2), 0..2);
        assert!(!viewport.has_more_below(2));
        assert!(viewport.has_more_below(5));
        for _ in 0..4 {
            viewport.move_down(5);
        }
        assert_eq!(viewport.visible_range(5), 2..5);
        assert!(viewport.has_more_above());
        assert!(!viewport.has_more_below(5));
    }

    #[derive(Debug, Clone, Copy)]
    enum Nav {
        Down,
        Up,
        PageDown,
        PageUp,
        Resize(usize),
    }

    fn nav() -> impl Strategy<Value = Nav> {
        prop_oneof![
            Just(Nav::Down),
            Just(Nav::Up),
            Just(Nav::PageDown),
            Just(Nav::PageUp),
            (0usize..60).prop_map(Nav::Resize),
        ]
    }

    proptest! {
        #[test]
        fn navigation_keeps_selection_in_window(
            count in 0usize..200,
            height in 1usize..50,
            ops in prop::collection::vec(nav(), 0..200),
        ) {
            let mut viewport = Viewport::new(height);
            for op in ops {
                match op {
                    Nav::Down => viewport.move_down(count),
                    Nav::Up => viewport.move_up(count),
                    Nav::PageDown => viewport.page_down(count),
                    Nav::PageUp => viewport.page_up(count),
                    Nav::Resize(rows) => viewport.resize(rows, count),
                }
                if count == 0 {
                    prop_assert_eq!((viewport.selected(), viewport.scroll_offset()), (0, 0));
                } else {
                    prop_assert!(viewport.selected() < count, "{:?} count {}", viewport, count);
                }
                prop_assert!(viewport.scroll_offset() <= viewport.selected(), "{:?}", viewport);
                prop_assert!(
                    viewport.selected() < viewport.scroll_offset() + viewport.height(),
                    "{:?}", viewport
                );
            }
        }

        #[test]
        fn reset_returns_to_top(
            count in 1usize..100,
            height in 1usize..20,
            downs in 0usize..150,
        ) {
            let mut viewport = Viewport::new(height);
            for _ in 0..downs {
                viewport.move_down(count);
            }
            viewport.reset();
            prop_assert_eq!((viewport.selected(), viewport.scroll_offset()), (0, 0));
        }
    }
}
