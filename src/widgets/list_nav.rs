//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
// -----------------------------------------------------------------------------
// Ported to rust from https://github.com/rxi/microui/ and the original license
//
// Copyright (c) 2020 rxi
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.
//
use crate::layout::{visible_rows, ListPlacement};
use crate::Vec2i;

#[derive(Clone, Debug)]
/// Hover, selection and scroll state over a list of `len` entries showing at most `max_visible` rows.
///
/// Indices address the filtered view. `scroll` always stays within `0..=max(0, len - max_visible)`.
pub struct ListNavigator {
    len: usize,
    max_visible: usize,
    hovered: Option<usize>,
    selected: Option<usize>,
    scroll: usize,
}

impl ListNavigator {
    /// Creates an empty navigator.
    pub fn new(max_visible: usize) -> Self {
        Self {
            len: 0,
            max_visible: max_visible.max(1),
            hovered: None,
            selected: None,
            scroll: 0,
        }
    }

    /// Number of entries navigated.
    pub fn len(&self) -> usize { self.len }

    /// Returns `true` when there is nothing to navigate.
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Maximum number of rows on screen.
    pub fn max_visible(&self) -> usize { self.max_visible }

    /// Hovered entry.
    pub fn hovered(&self) -> Option<usize> { self.hovered }

    /// Committed entry as stored; may be stale after the view changed.
    pub fn selected(&self) -> Option<usize> { self.selected }

    /// Committed entry, or `None` when it no longer fits the view.
    pub fn valid_selected(&self) -> Option<usize> { self.selected.filter(|idx| *idx < self.len) }

    /// First visible entry.
    pub fn scroll(&self) -> usize { self.scroll }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> usize { self.len.saturating_sub(self.max_visible) }

    /// Number of rows currently on screen.
    pub fn visible_rows(&self) -> usize { visible_rows(self.len, self.scroll, self.max_visible) }

    /// Returns `true` when the list is longer than the window.
    pub fn is_scrollable(&self) -> bool { self.len > self.max_visible }

    /// Changes the window size, keeping the scroll offset valid.
    pub fn set_max_visible(&mut self, max_visible: usize) {
        self.max_visible = max_visible.max(1);
        self.clamp_scroll();
    }

    /// Switches to a new view of `len` entries: hover and scroll reset, the committed index is left as is.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.hovered = None;
        self.scroll = 0;
    }

    /// Overrides the committed index.
    pub fn set_selected(&mut self, selected: Option<usize>) { self.selected = selected; }

    /// Overrides the hovered index, dropping it if out of range.
    pub fn set_hovered(&mut self, hovered: Option<usize>) { self.hovered = hovered.filter(|idx| *idx < self.len); }

    fn follow_hover(&mut self) {
        if let Some(h) = self.hovered {
            if h < self.scroll {
                self.scroll = h;
            } else if h >= self.scroll + self.max_visible {
                self.scroll = h + 1 - self.max_visible;
            }
        }
        self.clamp_scroll();
    }

    /// Moves the hover by `delta` rows, clamped to the list. Without a hover, any move lands on the first entry.
    pub fn move_hover(&mut self, delta: i32) -> bool {
        if self.len == 0 {
            return false;
        }
        let next = match self.hovered {
            None => 0,
            Some(h) if delta < 0 => h.saturating_sub(delta.unsigned_abs() as usize),
            Some(h) => (h + delta as usize).min(self.len - 1),
        };
        if self.hovered == Some(next) {
            return false;
        }
        self.hovered = Some(next);
        self.follow_hover();
        true
    }

    /// Recomputes the hover from a pointer position over the visible rows of `placement`.
    pub fn set_hover_from_pointer(&mut self, placement: &ListPlacement, pointer: Vec2i) {
        self.hovered = placement.hit_row(pointer).map(|row| row + self.scroll).filter(|idx| *idx < self.len);
    }

    /// Commits the hovered entry as the selection and returns it.
    pub fn commit_hover(&mut self) -> Option<usize> {
        let idx = self.hovered.filter(|idx| *idx < self.len)?;
        self.selected = Some(idx);
        Some(idx)
    }

    /// Scrolls by `rows`, only when the list is longer than the window.
    pub fn scroll_by(&mut self, rows: i32) -> bool {
        if !self.is_scrollable() || rows == 0 {
            return false;
        }
        let before = self.scroll;
        let target = self.scroll as i64 + rows as i64;
        self.scroll = target.clamp(0, self.max_scroll() as i64) as usize;
        self.scroll != before
    }

    /// Pulls the scroll offset back into range.
    pub fn clamp_scroll(&mut self) { self.scroll = self.scroll.min(self.max_scroll()); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rect, vec2, OpenDirection};

    fn nav(len: usize, max_visible: usize) -> ListNavigator {
        let mut n = ListNavigator::new(max_visible);
        n.reset(len);
        n
    }

    #[test]
    fn hover_enters_at_first_entry_and_clamps() {
        let mut n = nav(3, 8);
        assert!(n.move_hover(-1));
        assert_eq!(n.hovered(), Some(0));
        assert!(!n.move_hover(-1));
        n.move_hover(1);
        n.move_hover(1);
        assert!(!n.move_hover(1));
        assert_eq!(n.hovered(), Some(2));
        let mut empty = nav(0, 8);
        assert!(!empty.move_hover(1));
        assert_eq!(empty.hovered(), None);
    }

    #[test]
    fn window_follows_hover_one_step_at_a_time() {
        let mut n = nav(10, 3);
        for _ in 0..3 {
            n.move_hover(1);
        }
        assert_eq!((n.hovered(), n.scroll()), (Some(2), 0));
        n.move_hover(1);
        assert_eq!((n.hovered(), n.scroll()), (Some(3), 1));
        n.move_hover(1);
        assert_eq!(n.scroll(), 2);
        for _ in 0..3 {
            n.move_hover(-1);
        }
        assert_eq!((n.hovered(), n.scroll()), (Some(1), 1));
    }

    #[test]
    fn scroll_stays_in_range() {
        let mut n = nav(10, 8);
        assert!(n.scroll_by(5));
        assert_eq!(n.scroll(), 2);
        assert!(!n.scroll_by(1));
        assert!(n.scroll_by(-9));
        assert_eq!(n.scroll(), 0);

        let mut short = nav(4, 8);
        assert!(!short.scroll_by(1));
        assert_eq!(short.scroll(), 0);

        n.scroll_by(2);
        n.set_max_visible(9);
        assert_eq!(n.scroll(), 1);
    }

    #[test]
    fn reset_drops_hover_and_scroll_but_not_selection() {
        let mut n = nav(10, 3);
        n.set_hovered(Some(6));
        n.scroll_by(4);
        n.commit_hover();
        n.reset(2);
        assert_eq!((n.hovered(), n.scroll()), (None, 0));
        assert_eq!(n.selected(), Some(6));
        assert_eq!(n.valid_selected(), None);
    }

    #[test]
    fn pointer_hover_uses_row_geometry() {
        let mut n = nav(10, 3);
        n.scroll_by(2);
        let placement = ListPlacement::new(rect(0, 0, 100, 20), 20, OpenDirection::Down, n.visible_rows());
        n.set_hover_from_pointer(&placement, vec2(5, 45));
        assert_eq!(n.hovered(), Some(3));
        n.set_hover_from_pointer(&placement, vec2(5, 5));
        assert_eq!(n.hovered(), None);
        assert_eq!(n.commit_hover(), None);
    }
}
