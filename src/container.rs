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
use std::{cell::RefCell, rc::Rc};

use crate::draw_context::DrawCtx;
use crate::{rect, vec2, ControlColor, Id, Recti, Style, UpdateCtx, Widget};

/// Shared handle to a hosted widget. The host keeps its own typed clone.
pub type WidgetHandle = Rc<RefCell<dyn Widget>>;

/// Vertical stack of widgets inside a rectangle.
///
/// Children live in the container's local space: `(0, 0)` is the container's top-left corner.
pub struct Container {
    rect: Recti,
    padding: i32,
    spacing: i32,
    children: Vec<WidgetHandle>,
    content_height: i32,
}

impl Container {
    /// Creates an empty container at `rect` using the style's padding and spacing.
    pub fn new(rect: Recti, style: &Style) -> Self {
        Self {
            rect,
            padding: style.padding,
            spacing: style.spacing,
            children: Vec::new(),
            content_height: 0,
        }
    }

    /// Appends a widget and returns the same handle for chaining.
    pub fn add<W: Widget + 'static>(&mut self, widget: Rc<RefCell<W>>) -> Rc<RefCell<W>> {
        self.children.push(widget.clone());
        widget
    }

    /// Appends an already type-erased handle.
    pub fn push(&mut self, widget: WidgetHandle) { self.children.push(widget); }

    /// Removes the child sharing `widget`'s allocation and returns its handle.
    ///
    /// A child drawn this frame may still have a list layer queued; use [`crate::Context::remove_child`] to drop it
    /// together with the child.
    pub fn remove<W: Widget + ?Sized>(&mut self, widget: &Rc<RefCell<W>>) -> Option<WidgetHandle> {
        let target = Rc::as_ptr(widget).cast::<()>();
        let idx = self.children.iter().position(|c| Rc::as_ptr(c).cast::<()>() == target)?;
        Some(self.children.remove(idx))
    }

    /// Hosted widgets in stacking order.
    pub fn children(&self) -> &[WidgetHandle] { &self.children }

    /// Number of hosted widgets.
    pub fn len(&self) -> usize { self.children.len() }

    /// Returns `true` when nothing is hosted.
    pub fn is_empty(&self) -> bool { self.children.is_empty() }

    /// Height used by the stacked children, padding included.
    pub fn content_height(&self) -> i32 { self.content_height }

    /// Local bounds handed to children for their open-direction planning.
    pub fn local_bounds(&self) -> Recti { rect(0, 0, self.rect.width, self.rect.height) }

    /// Stacks children top to bottom and pushes the local bounds to each of them.
    pub fn layout(&mut self) {
        let bounds = self.local_bounds();
        let width = (self.rect.width - self.padding * 2).max(0);
        let mut y = self.padding;
        for child in &self.children {
            let mut w = child.borrow_mut();
            let h = w.min_height();
            w.set_rect(rect(self.padding, y, width, h));
            w.set_container_bounds(bounds);
            y += h + self.spacing;
        }
        if !self.children.is_empty() {
            y -= self.spacing;
        }
        self.content_height = y + self.padding;
    }
}

impl Widget for Container {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> bool {
        self.layout();
        let p = ctx.pointer();
        let mut local = ctx.reborrow_at(vec2(p.x - self.rect.x, p.y - self.rect.y));

        // open lists and focused fields get first pick
        let mut visited = vec![false; self.children.len()];
        for (idx, child) in self.children.iter().enumerate() {
            let mut w = child.borrow_mut();
            if !w.is_capturing() {
                continue;
            }
            visited[idx] = true;
            if w.update(&mut local) {
                return true;
            }
        }
        for (idx, child) in self.children.iter().enumerate() {
            if visited[idx] {
                continue;
            }
            if child.borrow_mut().update(&mut local) {
                return true;
            }
        }
        false
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) -> i32 {
        self.layout();
        let panel = ctx.style().color(ControlColor::PanelBG);
        ctx.push_scissor(self.rect);
        ctx.draw_rect(self.local_bounds(), panel);
        for child in &self.children {
            child.borrow_mut().draw(ctx);
        }
        ctx.pop_scissor();
        self.rect.height
    }

    fn min_height(&self) -> i32 { self.rect.height }

    fn rect(&self) -> Recti { self.rect }

    fn set_rect(&mut self, rect: Recti) { self.rect = rect; }

    fn is_capturing(&self) -> bool { self.children.iter().any(|c| c.borrow().is_capturing()) }

    fn overlay_ids(&self, ids: &mut Vec<Id>) {
        for child in &self.children {
            child.borrow().overlay_ids(ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::harness::*;
    use crate::{Command, DropdownOption, FilterableDropdown, Key, OpenDirection, Textbox, TextboxConfig};

    fn greek() -> Vec<DropdownOption> {
        vec![DropdownOption::new("Alpha", "a"), DropdownOption::new("Echo", "e"), DropdownOption::new("Gamma", "g")]
    }

    #[test]
    fn children_stack_with_padding_and_spacing() {
        let style = Style::default();
        let mut c = Container::new(rect(10, 10, 200, 300), &style);
        let a = c.add(Rc::new(RefCell::new(Textbox::new(rect(0, 0, 0, 24), TextboxConfig::default()))));
        let b = c.add(Rc::new(RefCell::new(FilterableDropdown::without_callback(rect(0, 0, 0, 20), greek()))));
        c.layout();
        let ra = a.borrow().rect();
        let rb = b.borrow().rect();
        assert_eq!((ra.x, ra.y, ra.width, ra.height), (5, 5, 190, 24));
        assert_eq!((rb.x, rb.y, rb.width, rb.height), (5, 33, 190, 20));
        assert_eq!(c.content_height(), 5 + 24 + 4 + 20 + 5);
    }

    #[test]
    fn pointer_is_translated_into_local_space() {
        let style = Style::default();
        let mut c = Container::new(rect(100, 50, 200, 300), &style);
        let tb = c.add(Rc::new(RefCell::new(Textbox::new(rect(0, 0, 0, 24), TextboxConfig::default()))));
        let mut h = Harness::new();
        // global (110, 60) is local (10, 10), inside the textbox at (5, 5)
        assert!(h.update(&mut c, click(110, 60)));
        assert!(tb.borrow().is_focused());
        assert!(!h.update(&mut c, click(10, 10)));
        assert!(!tb.borrow().is_focused());
    }

    #[test]
    fn open_list_gets_first_pick_over_overlapped_sibling() {
        let style = Style::default();
        let mut c = Container::new(rect(0, 0, 200, 300), &style);
        let dd = c.add(Rc::new(RefCell::new(FilterableDropdown::without_callback(rect(0, 0, 0, 20), greek()))));
        let tb = c.add(Rc::new(RefCell::new(Textbox::new(rect(0, 0, 0, 24), TextboxConfig::default()))));
        let mut h = Harness::new();

        h.update(&mut c, click(20, 15));
        assert!(dd.borrow().is_open());
        assert!(c.is_capturing());
        // the second row of the list (y 45..65) covers the textbox (y 29..53)
        assert!(h.update(&mut c, click(20, 50)));
        assert_eq!(dd.borrow().get_input_text(), "Echo");
        assert!(!tb.borrow().is_focused());
    }

    #[test]
    fn container_bounds_reach_children() {
        let style = Style::default();
        let mut c = Container::new(rect(0, 0, 200, 120), &style);
        for _ in 0..4 {
            c.push(Rc::new(RefCell::new(Textbox::new(rect(0, 0, 0, 20), TextboxConfig::default()))));
        }
        let dd = c.add(Rc::new(RefCell::new(FilterableDropdown::without_callback(rect(0, 0, 0, 20), greek()))));
        let mut h = Harness::new();
        c.layout();
        let r = dd.borrow().rect();
        h.update(&mut c, click(20, r.y + 5));
        assert_eq!(dd.borrow().open_direction(), OpenDirection::Up);
        h.update(&mut c, keys(&[Key::Escape]));
        assert!(!c.is_capturing());
    }

    #[test]
    fn draw_clips_children_and_defers_the_list() {
        let style = Style::default();
        let mut c = Container::new(rect(100, 100, 200, 60), &style);
        let dd = c.add(Rc::new(RefCell::new(FilterableDropdown::without_callback(rect(0, 0, 0, 20), greek()))));
        let mut h = Harness::new();
        h.update(&mut c, click(120, 115));
        assert!(dd.borrow().is_open());
        let (normal, overlay) = h.draw(&mut c);
        // panel background is translated to the container origin
        let panel = style.color(ControlColor::PanelBG);
        assert!(normal.iter().any(|cmd| matches!(cmd, Command::Rect { rect, color } if *color == panel && rect.x == 100 && rect.y == 100)));
        // rows overflow the 60px container but stay unclipped in the overlay
        assert_eq!(texts(&overlay), vec!["Alpha", "Echo", "Gamma"]);
        assert_eq!(text_pos(&overlay, "Gamma"), Some((100 + 5 + 8, 100 + 5 + 20 * 3 + 2)));
    }
}
