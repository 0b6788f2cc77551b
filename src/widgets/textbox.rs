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
use super::text_edit::{apply_text_input, Validator};
use super::*;
use crate::draw_context::DrawCtx;
use crate::{caret_from_x, rect_contains, Key, Widget, WidgetOption};

/// Construction parameters for [`Textbox`].
pub struct TextboxConfig {
    /// Maximum length in chars; `None` lifts the ceiling.
    pub max_len: Option<usize>,
    /// Hint shown while the field is empty and unfocused.
    pub placeholder: String,
    /// Predicate over the prospective text of every edit.
    pub validator: Option<Validator>,
    /// Updates between caret blink toggles.
    pub blink_frames: u32,
}

impl Default for TextboxConfig {
    fn default() -> Self {
        Self {
            max_len: Some(100),
            placeholder: String::new(),
            validator: None,
            blink_frames: 30,
        }
    }
}

impl TextboxConfig {
    /// Sets the length ceiling.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Sets the placeholder text.
    pub fn with_placeholder(mut self, text: &str) -> Self {
        self.placeholder = text.to_string();
        self
    }

    /// Installs a validation predicate.
    pub fn with_validator<F: Fn(&str) -> bool + 'static>(mut self, validator: F) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }
}

/// Single-line text field.
pub struct Textbox {
    rect: Recti,
    opt: WidgetOption,
    buffer: TextEditBuffer,
    placeholder: String,
    blink_frames: u32,
    focused: bool,
    blink: u32,
    scroll_x: i32,
    on_change: Option<Box<dyn FnMut(&str)>>,
    on_submit: Option<Box<dyn FnMut(&str)>>,
}

impl Textbox {
    /// Creates an empty, unfocused field at `rect`.
    pub fn new(rect: Recti, config: TextboxConfig) -> Self {
        let mut buffer = TextEditBuffer::new();
        buffer.set_max_len(config.max_len);
        buffer.set_validator(config.validator);
        Self {
            rect,
            opt: WidgetOption::NONE,
            buffer,
            placeholder: config.placeholder,
            blink_frames: config.blink_frames.max(1),
            focused: false,
            blink: 0,
            scroll_x: 0,
            on_change: None,
            on_submit: None,
        }
    }

    /// Installs the callback fired after every edit.
    pub fn on_change<F: FnMut(&str) + 'static>(mut self, f: F) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Installs the callback fired when Enter is pressed.
    pub fn on_submit<F: FnMut(&str) + 'static>(mut self, f: F) -> Self {
        self.on_submit = Some(Box::new(f));
        self
    }

    /// Replaces the widget options.
    pub fn with_widget_option(mut self, opt: WidgetOption) -> Self {
        self.opt = opt;
        self
    }

    /// Current text.
    pub fn value(&self) -> &str { self.buffer.text() }

    /// Replaces the text without firing `on_change`.
    pub fn set_value(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.buffer.take_dirty();
    }

    /// Returns `true` while the field has focus.
    pub fn is_focused(&self) -> bool { self.focused }

    /// Gives or removes focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.blink = 0;
    }

    /// Text buffer state.
    pub fn buffer(&self) -> &TextEditBuffer { &self.buffer }

    fn text_area(&self, style: &Style) -> Recti {
        let r = self.rect;
        rect(r.x + style.padding, r.y, r.width - style.padding * 2, r.height)
    }
}

impl Widget for Textbox {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> bool {
        if self.opt.is_not_interactive() {
            return false;
        }
        self.blink = self.blink.wrapping_add(1);
        let input = ctx.input();
        let pointer = ctx.pointer();

        if ctx.clicked() {
            if rect_contains(self.rect, pointer) {
                let text_x = pointer.x - self.text_area(ctx.style()).x + self.scroll_x;
                let pos = caret_from_x(ctx.metrics(), ctx.style().font, self.buffer.text(), text_x);
                let extend = self.focused && input.key_mods.is_shift();
                self.set_focused(true);
                self.buffer.set_caret(pos, extend);
                return true;
            }
            if self.focused {
                self.set_focused(false);
                return false;
            }
        }

        if !self.focused {
            return false;
        }

        let edit = apply_text_input(&mut self.buffer, input, ctx.clipboard());
        if edit.changed || edit.moved {
            self.blink = 0;
        }
        if self.buffer.take_dirty() {
            if let Some(cb) = self.on_change.as_mut() {
                cb(self.buffer.text());
            }
        }
        if edit.submit {
            if let Some(cb) = self.on_submit.as_mut() {
                cb(self.buffer.text());
            }
            self.set_focused(false);
        } else if input.is_pressed(Key::Escape) {
            self.set_focused(false);
        }
        true
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) -> i32 {
        let style = *ctx.style();
        ctx.draw_widget_frame(self.focused, false, self.rect, self.opt);
        let area = self.text_area(&style);
        self.scroll_x = edit_scroll(ctx.metrics(), &style, self.buffer.text(), self.buffer.caret(), self.scroll_x, area.width);
        let view = EditView {
            area,
            text: self.buffer.text(),
            caret: self.buffer.caret(),
            selection: self.buffer.selection(),
            focused: self.focused,
            caret_visible: (self.blink / self.blink_frames) % 2 == 0,
            placeholder: &self.placeholder,
            scroll_x: self.scroll_x,
        };
        draw_edit_text(ctx, &view);
        self.rect.height
    }

    fn min_height(&self) -> i32 { self.rect.height }

    fn rect(&self) -> Recti { self.rect }

    fn set_rect(&mut self, rect: Recti) { self.rect = rect; }

    fn is_capturing(&self) -> bool { self.focused }
}
