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
use super::text_edit::apply_text_input;
use super::*;
use crate::draw_context::DrawCtx;
use crate::layout::{decide_direction, ListPlacement, OpenDirection};
use crate::scrollbar::{list_scrollbar_track, scrollbar_thumb, LIST_SCROLLBAR_WIDTH};
use crate::{caret_from_x, rect_contains, truncate_to_width, vec2, Id, Key, Widget, WidgetOption};

/// Width of the open/close indicator zone at the right end of the header.
const INDICATOR_WIDTH: i32 = 20;

#[derive(Clone, Debug)]
/// Tuning knobs for [`FilterableDropdown`].
pub struct DropdownConfig {
    /// Maximum rows shown before the list scrolls.
    pub max_visible_items: usize,
    /// Row height; `None` uses the header height.
    pub item_height: Option<i32>,
    /// Rows scrolled per wheel notch.
    pub scroll_step: i32,
    /// Updates between caret blink toggles.
    pub blink_frames: u32,
    /// Hint shown while the field is empty and unfocused.
    pub placeholder: String,
    /// Horizontal inset of the text inside the header and rows.
    pub text_padding: i32,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            max_visible_items: 8,
            item_height: None,
            scroll_step: 1,
            blink_frames: 30,
            placeholder: "Select or type...".to_string(),
            text_padding: 8,
        }
    }
}

impl DropdownConfig {
    /// Sets the maximum number of visible rows.
    pub fn with_max_visible_items(mut self, n: usize) -> Self {
        self.max_visible_items = n.max(1);
        self
    }

    /// Sets an explicit row height.
    pub fn with_item_height(mut self, h: i32) -> Self {
        self.item_height = Some(h);
        self
    }

    /// Sets the rows scrolled per wheel notch.
    pub fn with_scroll_step(mut self, step: i32) -> Self {
        self.scroll_step = step.max(1);
        self
    }

    /// Sets the placeholder text.
    pub fn with_placeholder(mut self, text: &str) -> Self {
        self.placeholder = text.to_string();
        self
    }
}

/// Inline-editable select: a text field whose content live-filters a list of options.
///
/// While open, the list is drawn into a deferred overlay layer so it paints above sibling widgets. Input is
/// consumed whenever the field is focused or the list is open.
pub struct FilterableDropdown<T = ()> {
    id: Id,
    rect: Recti,
    opt: WidgetOption,
    config: DropdownConfig,
    options: Vec<DropdownOption<T>>,
    filtered: Vec<usize>,
    buffer: TextEditBuffer,
    nav: ListNavigator,
    committed: Option<usize>,
    is_open: bool,
    focused: bool,
    container: Recti,
    direction: OpenDirection,
    blink: u32,
    scroll_x: i32,
    on_selected: Option<Box<dyn FnMut(&DropdownOption<T>)>>,
}

impl<T> FilterableDropdown<T> {
    /// Creates a closed dropdown at `rect` (local to its host) showing every option.
    pub fn new<F: FnMut(&DropdownOption<T>) + 'static>(rect: Recti, options: Vec<DropdownOption<T>>, on_selected: F) -> Self {
        let mut dd = Self::without_callback(rect, options);
        dd.on_selected = Some(Box::new(on_selected));
        dd
    }

    /// Creates a dropdown that only reports its selection through [`FilterableDropdown::get_selected`].
    pub fn without_callback(rect: Recti, options: Vec<DropdownOption<T>>) -> Self {
        let config = DropdownConfig::default();
        let filtered = (0..options.len()).collect::<Vec<_>>();
        let mut nav = ListNavigator::new(config.max_visible_items);
        nav.reset(filtered.len());
        Self {
            id: Id::next(),
            rect,
            opt: WidgetOption::NONE,
            config,
            options,
            filtered,
            buffer: TextEditBuffer::new(),
            nav,
            committed: None,
            is_open: false,
            focused: false,
            container: Recti::default(),
            direction: OpenDirection::Down,
            blink: 0,
            scroll_x: 0,
            on_selected: None,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: DropdownConfig) -> Self {
        self.nav.set_max_visible(config.max_visible_items);
        self.config = config;
        self.plan();
        self
    }

    /// Replaces the widget options.
    pub fn with_widget_option(mut self, opt: WidgetOption) -> Self {
        self.opt = opt;
        self
    }

    /// Installs a validation predicate for typed text.
    pub fn with_validator<F: Fn(&str) -> bool + 'static>(mut self, validator: F) -> Self {
        self.buffer.set_validator(Some(Box::new(validator)));
        self
    }

    /// Overrides the placeholder text.
    pub fn set_placeholder(&mut self, text: &str) { self.config.placeholder = text.to_string(); }

    /// Identity used for the overlay layer.
    pub fn id(&self) -> Id { self.id }

    /// Returns `true` while the list is open.
    pub fn is_open(&self) -> bool { self.is_open }

    /// Returns `true` while the text field has focus.
    pub fn is_focused(&self) -> bool { self.focused }

    /// Side the list opens on, as last planned.
    pub fn open_direction(&self) -> OpenDirection { self.direction }

    /// All candidates in insertion order.
    pub fn options(&self) -> &[DropdownOption<T>] { &self.options }

    /// Candidates matching the current text, in original order.
    pub fn filtered_options(&self) -> Vec<&DropdownOption<T>> { self.filtered.iter().map(|idx| &self.options[*idx]).collect() }

    /// Text buffer state.
    pub fn buffer(&self) -> &TextEditBuffer { &self.buffer }

    /// List navigation state.
    pub fn navigator(&self) -> &ListNavigator { &self.nav }

    fn item_height(&self) -> i32 { self.config.item_height.unwrap_or(self.rect.height) }

    fn plan(&mut self) {
        self.direction = decide_direction(self.rect, self.container, self.item_height(), self.filtered.len(), self.config.max_visible_items);
    }

    fn placement(&self) -> ListPlacement { ListPlacement::new(self.rect, self.item_height(), self.direction, self.nav.visible_rows()) }

    fn refilter(&mut self) {
        self.filtered = filter_options(&self.options, self.buffer.text());
        self.nav.reset(self.filtered.len());
        tracing::trace!("dropdown {:?}: {} of {} options match {:?}", self.id, self.filtered.len(), self.options.len(), self.buffer.text());
        self.plan();
    }

    /// Replaces the candidates, dropping the selection and closing the list.
    pub fn set_options(&mut self, options: Vec<DropdownOption<T>>) {
        self.options = options;
        self.refilter();
        self.nav.set_selected(None);
        self.committed = None;
        self.is_open = false;
    }

    /// Records the host's bounds (local to the widget's parent) and re-plans the open direction.
    pub fn set_container_bounds(&mut self, bounds: Recti) {
        self.container = bounds;
        self.plan();
    }

    /// Opens the list and focuses the field, re-running the filter and layout. The keyboard drives an open list,
    /// so it is never left open without focus.
    pub fn open(&mut self) {
        self.is_open = true;
        self.focused = true;
        self.blink = 0;
        self.refilter();
    }

    /// Closes the list, keeping focus and text.
    pub fn close(&mut self) { self.is_open = false; }

    fn close_and_blur(&mut self) {
        self.is_open = false;
        self.focused = false;
    }

    /// Selected option, or `None` when the committed index no longer addresses it in the current view.
    pub fn get_selected(&self) -> Option<&DropdownOption<T>> {
        let idx = *self.filtered.get(self.nav.valid_selected()?)?;
        if self.committed != Some(idx) {
            return None;
        }
        self.options.get(idx)
    }

    /// Selects the first option whose value or display equals `key`. Returns `false` (and clears the selection)
    /// when no option matches.
    pub fn set_selected(&mut self, key: &str) -> bool {
        match self.options.iter().position(|o| o.is_keyed_by(key)) {
            Some(idx) => {
                self.buffer.set_text(&self.options[idx].display);
                self.buffer.take_dirty();
                self.filtered = (0..self.options.len()).collect();
                self.nav.reset(self.filtered.len());
                self.nav.set_selected(Some(idx));
                self.committed = Some(idx);
                self.plan();
                true
            }
            None => {
                self.nav.set_selected(None);
                self.committed = None;
                false
            }
        }
    }

    /// Drops the selection and empties the field.
    pub fn clear_selection(&mut self) {
        self.nav.set_selected(None);
        self.committed = None;
        self.buffer.set_text("");
        self.buffer.take_dirty();
        self.refilter();
    }

    /// Current field text.
    pub fn get_input_text(&self) -> &str { self.buffer.text() }

    /// Replaces the field text and re-filters.
    pub fn set_input_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.buffer.take_dirty();
        self.refilter();
    }

    /// Commits the hovered row: copies its label into the field, closes the list, drops focus and fires the
    /// callback. Does nothing while the list is closed.
    pub fn commit_hover(&mut self) -> bool {
        if !self.is_open {
            return false;
        }
        let idx = match self.nav.commit_hover() {
            Some(fi) => self.filtered[fi],
            None => return false,
        };
        self.committed = Some(idx);
        self.buffer.set_text(&self.options[idx].display);
        self.buffer.take_dirty();
        self.close_and_blur();
        tracing::debug!("dropdown {:?}: selected {:?}", self.id, self.options[idx].value);
        if let Some(cb) = self.on_selected.as_mut() {
            cb(&self.options[idx]);
        }
        true
    }

    fn click_header(&mut self, ctx: &UpdateCtx<'_>) {
        self.blink = 0;
        if !self.is_open || !self.focused {
            self.buffer.select_all();
            self.open();
            return;
        }
        let local_x = ctx.pointer().x - self.rect.x;
        if local_x >= self.rect.width - INDICATOR_WIDTH {
            self.close();
            return;
        }
        let text_x = local_x - self.config.text_padding + self.scroll_x;
        let pos = caret_from_x(ctx.metrics(), ctx.style().font, self.buffer.text(), text_x);
        self.buffer.set_caret(pos, ctx.input().key_mods.is_shift());
    }

    fn is_committed_row(&self, fi: usize) -> bool { self.committed.is_some() && self.committed == self.filtered.get(fi).copied() }

    fn draw_list(&self, ctx: &mut DrawCtx<'_>) {
        let placement = self.placement();
        if placement.visible_rows == 0 {
            return;
        }
        let style = *ctx.style();
        let font = style.font;
        let bounds = placement.bounds();
        ctx.draw_frame(bounds, ControlColor::Base, ControlColor::Border);

        let line_height = ctx.metrics().line_height(font);
        let pad = self.config.text_padding;
        let bar = if self.nav.is_scrollable() { LIST_SCROLLBAR_WIDTH + 2 } else { 0 };
        for row in 0..placement.visible_rows {
            let fi = self.nav.scroll() + row;
            let rr = placement.row_rect(row);
            if self.nav.hovered() == Some(fi) {
                ctx.draw_rect(rr, style.color(ControlColor::BaseHover));
            }
            if self.is_committed_row(fi) {
                ctx.draw_rect(rr, style.color(ControlColor::RowSelected));
            }
            let label = truncate_to_width(ctx.metrics(), font, &self.options[self.filtered[fi]].display, rr.width - pad * 2 - bar);
            let ty = DrawCtx::centered_top(rr, line_height);
            ctx.draw_text(font, &label, vec2(rr.x + pad, ty), style.color(ControlColor::Text));
        }

        if self.nav.is_scrollable() {
            let track = list_scrollbar_track(bounds);
            ctx.draw_rect(track, style.color(ControlColor::ScrollBase));
            let thumb = scrollbar_thumb(track, self.nav.max_visible() as i32, self.nav.len() as i32, self.nav.scroll() as i32);
            ctx.draw_rect(thumb, style.color(ControlColor::ScrollThumb));
        }
    }
}

impl<T> Widget for FilterableDropdown<T> {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> bool {
        if self.opt.is_not_interactive() {
            return false;
        }
        self.blink = self.blink.wrapping_add(1);
        let input = ctx.input();
        let pointer = ctx.pointer();

        if ctx.clicked() {
            if rect_contains(self.rect, pointer) {
                self.click_header(ctx);
                return true;
            }
            if self.is_open {
                if let Some(row) = self.placement().hit_row(pointer) {
                    self.nav.set_hovered(Some(self.nav.scroll() + row));
                    self.commit_hover();
                    return true;
                }
            }
            self.close_and_blur();
        }

        if self.is_open && input.scroll_delta.y != 0 {
            self.nav.scroll_by(input.scroll_delta.y.signum() * self.config.scroll_step);
        }

        if self.is_open && (input.mouse_moved() || input.scrolled()) {
            let placement = self.placement();
            self.nav.set_hover_from_pointer(&placement, pointer);
        }

        if self.focused {
            let edit = apply_text_input(&mut self.buffer, input, ctx.clipboard());
            if edit.changed || edit.moved {
                self.blink = 0;
            }
            if self.buffer.take_dirty() {
                self.is_open = true;
                self.refilter();
            }
            for key in &input.pressed_keys {
                match key {
                    Key::Up if self.is_open => {
                        self.nav.move_hover(-1);
                    }
                    Key::Down if self.is_open => {
                        self.nav.move_hover(1);
                    }
                    Key::Enter => {
                        self.commit_hover();
                    }
                    Key::Escape => self.close_and_blur(),
                    _ => (),
                }
                if !self.focused {
                    break;
                }
            }
        }

        self.focused || self.is_open
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) -> i32 {
        let r = self.rect;
        let style = *ctx.style();
        ctx.draw_widget_frame(self.focused, false, r, self.opt);

        let pad = self.config.text_padding;
        let area = rect(r.x + pad, r.y, r.width - pad - INDICATOR_WIDTH, r.height);
        self.scroll_x = edit_scroll(ctx.metrics(), &style, self.buffer.text(), self.buffer.caret(), self.scroll_x, area.width);
        let blink_frames = self.config.blink_frames.max(1);
        let view = EditView {
            area,
            text: self.buffer.text(),
            caret: self.buffer.caret(),
            selection: self.buffer.selection(),
            focused: self.focused,
            caret_visible: (self.blink / blink_frames) % 2 == 0,
            placeholder: &self.config.placeholder,
            scroll_x: self.scroll_x,
        };
        draw_edit_text(ctx, &view);

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

    fn set_rect(&mut self, rect: Recti) {
        self.rect = rect;
        self.plan();
    }

    fn set_container_bounds(&mut self, bounds: Recti) { FilterableDropdown::set_container_bounds(self, bounds); }

    fn is_capturing(&self) -> bool { self.focused || self.is_open }

    fn overlay_ids(&self, ids: &mut Vec<Id>) { ids.push(self.id); }
}
