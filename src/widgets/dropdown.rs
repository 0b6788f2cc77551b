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
use super::*;
use crate::draw_context::DrawCtx;
use crate::layout::{fit_rows, ListPlacement, OpenDirection};
use crate::scrollbar::{list_scrollbar_track, scrollbar_thumb, LIST_SCROLLBAR_WIDTH};
use crate::{rect_contains, truncate_to_width, Id, Key, Widget, WidgetOption};

const INDICATOR_WIDTH: i32 = 20;
const MIN_ROWS: usize = 2;

/// Non-editable select: a header showing the chosen label and a list toggled by clicking it.
pub struct Dropdown {
    id: Id,
    rect: Recti,
    opt: WidgetOption,
    labels: Vec<String>,
    selected: Option<usize>,
    nav: ListNavigator,
    max_visible_items: usize,
    item_height: Option<i32>,
    placeholder: String,
    is_open: bool,
    hover_header: bool,
    container: Recti,
    direction: OpenDirection,
    on_selected: Option<Box<dyn FnMut(&str, usize)>>,
}

impl Dropdown {
    /// Creates a closed dropdown over `labels`; `on_selected` receives the label and its index.
    pub fn new<F: FnMut(&str, usize) + 'static>(rect: Recti, labels: Vec<String>, on_selected: F) -> Self {
        let mut dd = Self::without_callback(rect, labels);
        dd.on_selected = Some(Box::new(on_selected));
        dd
    }

    /// Creates a dropdown polled through [`Dropdown::selected`].
    pub fn without_callback(rect: Recti, labels: Vec<String>) -> Self {
        let mut nav = ListNavigator::new(8);
        nav.reset(labels.len());
        Self {
            id: Id::next(),
            rect,
            opt: WidgetOption::NONE,
            labels,
            selected: None,
            nav,
            max_visible_items: 8,
            item_height: None,
            placeholder: "Select...".to_string(),
            is_open: false,
            hover_header: false,
            container: Recti::default(),
            direction: OpenDirection::Down,
            on_selected: None,
        }
    }

    /// Sets the maximum rows shown before the list scrolls.
    pub fn with_max_visible_items(mut self, n: usize) -> Self {
        self.max_visible_items = n.max(1);
        self
    }

    /// Sets an explicit row height.
    pub fn with_item_height(mut self, h: i32) -> Self {
        self.item_height = Some(h);
        self
    }

    /// Replaces the widget options.
    pub fn with_widget_option(mut self, opt: WidgetOption) -> Self {
        self.opt = opt;
        self
    }

    /// Header text shown while nothing is selected.
    pub fn set_placeholder(&mut self, text: &str) { self.placeholder = text.to_string(); }

    /// Entries in display order.
    pub fn labels(&self) -> &[String] { &self.labels }

    /// Replaces the entries, dropping the selection and closing the list.
    pub fn set_labels(&mut self, labels: Vec<String>) {
        self.labels = labels;
        self.selected = None;
        self.nav.set_selected(None);
        self.close();
    }

    /// Index of the chosen entry.
    pub fn selected(&self) -> Option<usize> { self.selected }

    /// Label of the chosen entry.
    pub fn selected_label(&self) -> Option<&str> { self.selected.and_then(|idx| self.labels.get(idx)).map(String::as_str) }

    /// Chooses an entry without firing the callback. Out-of-range indices clear the selection.
    pub fn set_selected(&mut self, idx: Option<usize>) {
        self.selected = idx.filter(|i| *i < self.labels.len());
        self.nav.set_selected(self.selected);
    }

    /// Returns `true` while the list is open.
    pub fn is_open(&self) -> bool { self.is_open }

    /// Side the list opened on.
    pub fn open_direction(&self) -> OpenDirection { self.direction }

    /// Rows on screen while open.
    pub fn visible_rows(&self) -> usize { self.nav.visible_rows() }

    /// List navigation state.
    pub fn navigator(&self) -> &ListNavigator { &self.nav }

    fn item_height(&self) -> i32 { self.item_height.unwrap_or(self.rect.height) }

    /// Opens the list, fitting the row count to the container.
    pub fn open(&mut self) {
        let (direction, rows) = fit_rows(self.rect, self.container, self.item_height(), self.labels.len(), self.max_visible_items, MIN_ROWS);
        self.direction = direction;
        self.nav.set_max_visible(rows.max(1));
        self.nav.reset(self.labels.len());
        self.is_open = true;
    }

    /// Closes the list.
    pub fn close(&mut self) {
        self.is_open = false;
        self.nav.reset(self.labels.len());
    }

    fn placement(&self) -> ListPlacement { ListPlacement::new(self.rect, self.item_height(), self.direction, self.nav.visible_rows()) }

    fn choose(&mut self, idx: usize) {
        self.selected = Some(idx);
        self.close();
        tracing::debug!("dropdown {:?}: selected {:?}", self.id, self.labels[idx]);
        if let Some(cb) = self.on_selected.as_mut() {
            cb(&self.labels[idx], idx);
        }
    }

    fn commit_hover(&mut self) -> bool {
        match self.nav.commit_hover() {
            Some(idx) => {
                self.choose(idx);
                true
            }
            None => false,
        }
    }

    fn draw_list(&self, ctx: &mut DrawCtx<'_>) {
        let placement = self.placement();
        if placement.visible_rows == 0 {
            return;
        }
        let style = *ctx.style();
        let bounds = placement.bounds();
        ctx.draw_frame(bounds, ControlColor::Base, ControlColor::Border);
        let bar = if self.nav.is_scrollable() { LIST_SCROLLBAR_WIDTH + 2 } else { 0 };
        let line_height = ctx.metrics().line_height(style.font);
        for row in 0..placement.visible_rows {
            let idx = self.nav.scroll() + row;
            let rr = placement.row_rect(row);
            if self.selected == Some(idx) {
                ctx.draw_rect(rr, style.color(ControlColor::RowSelected));
            } else if self.nav.hovered() == Some(idx) {
                ctx.draw_rect(rr, style.color(ControlColor::BaseHover));
            }
            let label = truncate_to_width(ctx.metrics(), style.font, &self.labels[idx], rr.width - style.padding * 2 - bar);
            ctx.draw_text(style.font, &label, vec2(rr.x + style.padding, DrawCtx::centered_top(rr, line_height)), style.color(ControlColor::Text));
        }
        if self.nav.is_scrollable() {
            let track = list_scrollbar_track(bounds);
            ctx.draw_rect(track, style.color(ControlColor::ScrollBase));
            let thumb = scrollbar_thumb(track, self.nav.max_visible() as i32, self.nav.len() as i32, self.nav.scroll() as i32);
            ctx.draw_rect(thumb, style.color(ControlColor::ScrollThumb));
        }
    }
}

impl Widget for Dropdown {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> bool {
        if self.opt.is_not_interactive() {
            return false;
        }
        let input = ctx.input();
        let pointer = ctx.pointer();
        self.hover_header = rect_contains(self.rect, pointer);

        if ctx.clicked() {
            if self.hover_header {
                if self.is_open {
                    self.close();
                } else {
                    self.open();
                }
                return true;
            }
            if self.is_open {
                if let Some(row) = self.placement().hit_row(pointer) {
                    self.nav.set_hovered(Some(self.nav.scroll() + row));
                    self.commit_hover();
                    return true;
                }
                self.close();
            }
            return false;
        }

        if !self.is_open {
            return false;
        }

        if input.scroll_delta.y != 0 {
            self.nav.scroll_by(input.scroll_delta.y.signum());
        }
        if input.mouse_moved() || input.scrolled() {
            let placement = self.placement();
            self.nav.set_hover_from_pointer(&placement, pointer);
        }
        for key in &input.pressed_keys {
            match key {
                Key::Up => {
                    self.nav.move_hover(-1);
                }
                Key::Down => {
                    self.nav.move_hover(1);
                }
                Key::Enter => {
                    self.commit_hover();
                }
                Key::Escape => self.close(),
                _ => (),
            }
            if !self.is_open {
                break;
            }
        }
        true
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) -> i32 {
        let r = self.rect;
        let style = *ctx.style();
        ctx.draw_widget_frame(self.is_open, self.hover_header, r, self.opt);
        let label_rect = rect(r.x, r.y, r.width - INDICATOR_WIDTH, r.height);
        match self.selected_label() {
            Some(label) => ctx.draw_control_text(label, label_rect, ControlColor::Text, self.opt),
            None => ctx.draw_control_text(&self.placeholder, label_rect, ControlColor::Placeholder, self.opt),
        }
        let indicator = if self.is_open { "^" } else { "v" };
        let line_height = ctx.metrics().line_height(style.font);
        let iw = ctx.metrics().text_width(style.font, indicator);
        let ipos = vec2(r.x + r.width - (INDICATOR_WIDTH + iw) / 2, DrawCtx::centered_top(r, line_height));
        ctx.draw_text(style.font, indicator, ipos, style.color(ControlColor::Text));
        if self.is_open {
            ctx.defer_overlay(self.id, |layer| self.draw_list(layer));
        }
        r.height
    }

    fn min_height(&self) -> i32 { self.rect.height }

    fn rect(&self) -> Recti { self.rect }

    fn set_rect(&mut self, rect: Recti) { self.rect = rect; }

    fn set_container_bounds(&mut self, bounds: Recti) { self.container = bounds; }

    fn is_capturing(&self) -> bool { self.is_open }

    fn overlay_ids(&self, ids: &mut Vec<Id>) { ids.push(self.id); }
}

#[cfg(test)]
mod tests {
    use super::super::harness::*;
    use super::*;
    use crate::rect;
    use std::{cell::RefCell, rc::Rc};

    fn colors() -> Vec<String> { ["Red", "Green", "Blue"].iter().map(|s| s.to_string()).collect() }

    fn many(n: usize) -> Vec<String> { (0..n).map(|i| format!("Row {}", i)).collect() }

    #[test]
    fn header_click_toggles_and_row_click_selects() {
        let picked = Rc::new(RefCell::new(None));
        let sink = picked.clone();
        let mut dd = Dropdown::new(rect(0, 0, 100, 20), colors(), move |label, idx| *sink.borrow_mut() = Some((label.to_string(), idx)));
        let mut h = Harness::new();

        assert!(h.update(&mut dd, click(10, 10)));
        assert!(dd.is_open());
        let (normal, overlay) = h.draw(&mut dd);
        assert!(texts(&normal).contains(&"Select...".to_string()));
        assert_eq!(texts(&overlay), vec!["Red", "Green", "Blue"]);

        assert!(h.update(&mut dd, click(10, 50)));
        assert!(!dd.is_open());
        assert_eq!(*picked.borrow(), Some(("Green".to_string(), 1)));
        assert_eq!(dd.selected_label(), Some("Green"));

        h.update(&mut dd, click(10, 10));
        assert!(h.update(&mut dd, click(10, 10)));
        assert!(!dd.is_open());
    }

    #[test]
    fn keyboard_navigation_and_escape() {
        let mut dd = Dropdown::without_callback(rect(0, 0, 100, 20), colors());
        let mut h = Harness::new();
        // keys are ignored while closed
        assert!(!h.update(&mut dd, keys(&[Key::Down, Key::Enter])));
        h.update(&mut dd, click(10, 10));
        h.update(&mut dd, keys(&[Key::Down, Key::Down, Key::Down, Key::Down]));
        assert_eq!(dd.navigator().hovered(), Some(2));
        h.update(&mut dd, keys(&[Key::Enter]));
        assert_eq!(dd.selected(), Some(2));

        h.update(&mut dd, click(10, 10));
        h.update(&mut dd, keys(&[Key::Down, Key::Escape]));
        assert!(!dd.is_open());
        assert_eq!(dd.selected(), Some(2));
    }

    #[test]
    fn outside_click_closes_without_consuming() {
        let mut dd = Dropdown::without_callback(rect(0, 0, 100, 20), colors());
        let mut h = Harness::new();
        h.update(&mut dd, click(10, 10));
        assert!(!h.update(&mut dd, click(300, 300)));
        assert!(!dd.is_open());
        assert_eq!(dd.selected(), None);
    }

    #[test]
    fn shrinks_rows_to_fit_but_keeps_two() {
        let mut dd = Dropdown::without_callback(rect(0, 40, 100, 20), many(10));
        let mut h = Harness::new();
        Widget::set_container_bounds(&mut dd, rect(0, 0, 100, 100));
        h.update(&mut dd, click(10, 50));
        assert_eq!(dd.open_direction(), OpenDirection::Down);
        assert_eq!(dd.visible_rows(), 2);
        h.update(&mut dd, click(10, 50));

        Widget::set_container_bounds(&mut dd, rect(0, 0, 100, 70));
        h.update(&mut dd, click(10, 50));
        assert_eq!(dd.open_direction(), OpenDirection::Up);
        assert_eq!(dd.visible_rows(), 2);
        h.update(&mut dd, click(10, 50));

        // a roomier container gets the full window back
        Widget::set_container_bounds(&mut dd, rect(0, 0, 100, 400));
        h.update(&mut dd, click(10, 50));
        assert_eq!(dd.visible_rows(), 8);
    }

    #[test]
    fn wheel_scrolls_long_lists() {
        let mut dd = Dropdown::without_callback(rect(0, 0, 100, 20), many(12));
        let mut h = Harness::new();
        h.update(&mut dd, click(10, 10));
        h.update(&mut dd, wheel(10, 30, 1));
        h.update(&mut dd, wheel(10, 30, 1));
        assert_eq!(dd.navigator().scroll(), 2);
        assert_eq!(dd.navigator().hovered(), Some(2));
        h.update(&mut dd, click(10, 30));
        assert_eq!(dd.selected_label(), Some("Row 2"));
    }

    #[test]
    fn set_labels_drops_selection() {
        let mut dd = Dropdown::without_callback(rect(0, 0, 100, 20), colors());
        dd.set_selected(Some(1));
        assert_eq!(dd.selected_label(), Some("Green"));
        dd.set_selected(Some(9));
        assert_eq!(dd.selected(), None);
        dd.set_selected(Some(0));
        dd.set_labels(many(2));
        assert_eq!(dd.selected(), None);
    }
}
