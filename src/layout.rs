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
//! Placement of drop-down lists relative to their anchor.
//!
//! A list opens below its anchor when it fits there, otherwise above when it fits there, otherwise towards the
//! side with more room. Row geometry is produced here so drawing and hit-testing share the exact same rectangles.
use crate::*;
use std::cmp::{max, min};

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
/// Side of the anchor a list opens on.
pub enum OpenDirection {
    #[default]
    /// Rows are stacked below the anchor.
    Down,
    /// Rows are stacked above the anchor.
    Up,
}

impl OpenDirection {
    /// Returns `true` for [`OpenDirection::Up`].
    pub fn is_upward(self) -> bool { self == Self::Up }
}

/// Number of rows shown for `len` entries scrolled by `scroll`, capped at `max_visible`.
pub fn visible_rows(len: usize, scroll: usize, max_visible: usize) -> usize { min(max_visible, len.saturating_sub(scroll)) }

/// Pixel height needed to show `visible_count` rows, capped at `max_visible` rows.
pub fn required_height(visible_count: usize, max_visible: usize, item_height: i32) -> i32 { min(visible_count, max_visible) as i32 * item_height }

/// Free pixels between the anchor's bottom edge and the container's bottom edge.
pub fn space_below(anchor: Recti, container: Recti) -> i32 { container.y + container.height - (anchor.y + anchor.height) }

/// Free pixels between the container's top edge and the anchor's top edge.
pub fn space_above(anchor: Recti, container: Recti) -> i32 { anchor.y - container.y }

/// Chooses the side a list of `visible_count` entries opens on.
///
/// An empty container means the host never supplied bounds, so the list opens downward.
pub fn decide_direction(anchor: Recti, container: Recti, item_height: i32, visible_count: usize, max_visible: usize) -> OpenDirection {
    if container.width <= 0 || container.height <= 0 {
        return OpenDirection::Down;
    }
    let required = required_height(visible_count, max_visible, item_height);
    let below = max(0, space_below(anchor, container));
    let above = max(0, space_above(anchor, container));
    if below >= required {
        OpenDirection::Down
    } else if above >= required {
        OpenDirection::Up
    } else if below >= above {
        OpenDirection::Down
    } else {
        OpenDirection::Up
    }
}

/// Like [`decide_direction`], but when neither side fits the full list the row count shrinks to what fits on the
/// chosen side, never below `min_rows`.
pub fn fit_rows(anchor: Recti, container: Recti, item_height: i32, count: usize, max_visible: usize, min_rows: usize) -> (OpenDirection, usize) {
    let direction = decide_direction(anchor, container, item_height, count, max_visible);
    let wanted = min(count, max_visible);
    if container.width <= 0 || container.height <= 0 || item_height <= 0 {
        return (direction, wanted);
    }
    let room = match direction {
        OpenDirection::Down => space_below(anchor, container),
        OpenDirection::Up => space_above(anchor, container),
    };
    let fitting = max(0, room / item_height) as usize;
    if fitting >= wanted {
        (direction, wanted)
    } else {
        (direction, min(wanted, max(fitting, min_rows)))
    }
}

#[derive(Copy, Clone, Debug)]
/// Geometry of the visible rows of an open list.
pub struct ListPlacement {
    /// Rectangle the list is attached to.
    pub anchor: Recti,
    /// Height of one row.
    pub item_height: i32,
    /// Side of the anchor the rows occupy.
    pub direction: OpenDirection,
    /// Number of rows on screen.
    pub visible_rows: usize,
}

impl ListPlacement {
    /// Creates a placement for `visible_rows` rows next to `anchor`.
    pub fn new(anchor: Recti, item_height: i32, direction: OpenDirection, visible_rows: usize) -> Self {
        Self { anchor, item_height, direction, visible_rows }
    }

    /// Rectangle of the `row`-th visible row, counted from the top of the list.
    pub fn row_rect(&self, row: usize) -> Recti {
        let a = self.anchor;
        let y = match self.direction {
            OpenDirection::Down => a.y + a.height + row as i32 * self.item_height,
            OpenDirection::Up => a.y - (self.visible_rows as i32 - row as i32) * self.item_height,
        };
        rect(a.x, y, a.width, self.item_height)
    }

    /// Rectangle covering every visible row.
    pub fn bounds(&self) -> Recti {
        let top = self.row_rect(0);
        rect(top.x, top.y, top.width, self.visible_rows as i32 * self.item_height)
    }

    /// Visible row under `p`, if any.
    pub fn hit_row(&self, p: Vec2i) -> Option<usize> { (0..self.visible_rows).find(|row| rect_contains(self.row_rect(*row), p)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuple(r: Recti) -> (i32, i32, i32, i32) { (r.x, r.y, r.width, r.height) }

    #[test]
    fn opens_upward_when_only_above_fits() {
        let container = rect(0, 0, 300, 200);
        let anchor = rect(0, 160, 100, 20);
        assert_eq!(space_below(anchor, container), 20);
        assert_eq!(space_above(anchor, container), 160);
        assert_eq!(required_height(8, 8, 20), 160);
        assert_eq!(decide_direction(anchor, container, 20, 8, 8), OpenDirection::Up);
    }

    #[test]
    fn prefers_downward_and_breaks_ties_downward() {
        let container = rect(0, 0, 300, 200);
        assert_eq!(decide_direction(rect(0, 10, 100, 20), container, 20, 8, 8), OpenDirection::Down);
        // neither side fits 8 rows, both have 90px
        assert_eq!(decide_direction(rect(0, 90, 100, 20), container, 20, 8, 8), OpenDirection::Down);
        // neither fits, above is larger
        assert_eq!(decide_direction(rect(0, 100, 100, 20), container, 20, 8, 8), OpenDirection::Up);
    }

    #[test]
    fn degenerate_container_still_decides() {
        assert_eq!(decide_direction(rect(0, 0, 100, 20), rect(0, 0, 0, 0), 20, 8, 8), OpenDirection::Down);
        // anchor taller than the container leaves no room anywhere
        assert_eq!(decide_direction(rect(0, -10, 100, 40), rect(0, 0, 100, 20), 20, 3, 8), OpenDirection::Down);
        assert_eq!(decide_direction(rect(0, 0, 100, 20), rect(0, 0, 100, 20), 20, 0, 8), OpenDirection::Down);
    }

    #[test]
    fn fit_rows_shrinks_but_keeps_two() {
        let container = rect(0, 0, 300, 100);
        assert_eq!(fit_rows(rect(0, 40, 100, 20), container, 20, 10, 8, 2), (OpenDirection::Down, 2));
        assert_eq!(fit_rows(rect(0, 90, 100, 10), container, 20, 10, 8, 2), (OpenDirection::Up, 4));
        assert_eq!(fit_rows(rect(0, 0, 100, 20), rect(0, 0, 100, 400), 20, 3, 8, 2), (OpenDirection::Down, 3));
    }

    #[test]
    fn upward_rows_are_ordered_top_to_bottom() {
        let p = ListPlacement::new(rect(10, 100, 50, 20), 20, OpenDirection::Up, 3);
        assert_eq!(tuple(p.row_rect(0)), (10, 40, 50, 20));
        assert_eq!(tuple(p.row_rect(2)), (10, 80, 50, 20));
        assert_eq!(tuple(p.bounds()), (10, 40, 50, 60));
        assert_eq!(p.hit_row(vec2(20, 85)), Some(2));
        assert_eq!(p.hit_row(vec2(20, 100)), None);
    }

    #[test]
    fn downward_rows_start_below_anchor() {
        let p = ListPlacement::new(rect(0, 0, 50, 20), 20, OpenDirection::Down, 2);
        assert_eq!(tuple(p.row_rect(0)), (0, 20, 50, 20));
        assert_eq!(p.hit_row(vec2(49, 59)), Some(1));
        assert_eq!(p.hit_row(vec2(50, 30)), None);
        assert_eq!(visible_rows(10, 7, 8), 3);
        assert_eq!(visible_rows(2, 5, 8), 0);
    }
}
