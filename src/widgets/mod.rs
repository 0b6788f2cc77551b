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
mod dropdown;
mod filter;
mod filterable_dropdown;
mod list_nav;
mod text_edit;
mod textbox;

pub use dropdown::*;
pub use filter::*;
pub use filterable_dropdown::*;
pub use list_nav::*;
pub use text_edit::*;
pub use textbox::*;

use crate::draw_context::DrawCtx;
use crate::{caret_x, rect, vec2, Clipboard, ControlColor, InputSnapshot, Real, Recti, Style, TextMetrics, Vec2i};

/// Per-update context handed to [`crate::Widget::update`].
///
/// The pointer is already expressed in the widget's local coordinate space.
pub struct UpdateCtx<'a> {
    pointer: Vec2i,
    input: &'a InputSnapshot,
    dt: Real,
    style: &'a Style,
    metrics: &'a dyn TextMetrics,
    clipboard: &'a mut dyn Clipboard,
}

impl<'a> UpdateCtx<'a> {
    /// Creates an update context. Hosts driving widgets without a [`crate::Context`] build one per frame.
    pub fn new(pointer: Vec2i, input: &'a InputSnapshot, dt: Real, style: &'a Style, metrics: &'a dyn TextMetrics, clipboard: &'a mut dyn Clipboard) -> Self {
        Self { pointer, input, dt, style, metrics, clipboard }
    }

    /// Pointer position in local coordinates.
    pub fn pointer(&self) -> Vec2i { self.pointer }

    /// This frame's input.
    pub fn input(&self) -> &'a InputSnapshot { self.input }

    /// Seconds since the previous frame.
    pub fn dt(&self) -> Real { self.dt }

    /// Active style.
    pub fn style(&self) -> &'a Style { self.style }

    /// Active text metrics.
    pub fn metrics(&self) -> &'a dyn TextMetrics { self.metrics }

    /// Clipboard capability.
    pub fn clipboard(&mut self) -> &mut dyn Clipboard { &mut *self.clipboard }

    /// Returns `true` if the left button went down this frame.
    pub fn clicked(&self) -> bool { self.input.mouse_pressed.is_left() }

    /// Reborrows the context with the pointer moved into a nested space.
    pub fn reborrow_at(&mut self, pointer: Vec2i) -> UpdateCtx<'_> {
        UpdateCtx {
            pointer,
            input: self.input,
            dt: self.dt,
            style: self.style,
            metrics: self.metrics,
            clipboard: &mut *self.clipboard,
        }
    }
}

/// Horizontal text scroll that keeps the caret inside a field `avail_w` pixels wide.
pub(crate) fn edit_scroll(metrics: &dyn TextMetrics, style: &Style, text: &str, caret: usize, scroll_x: i32, avail_w: i32) -> i32 {
    let avail_w = (avail_w - 1).max(0);
    let cx = caret_x(metrics, style.font, text, caret);
    let mut scroll = scroll_x;
    if cx - scroll > avail_w {
        scroll = cx - avail_w;
    }
    if cx - scroll < 0 {
        scroll = cx;
    }
    let max_scroll = (metrics.text_width(style.font, text) - avail_w).max(0);
    scroll.clamp(0, max_scroll)
}

/// Text area of an edit field: where the run, selection and caret are drawn.
pub(crate) struct EditView<'b> {
    pub area: Recti,
    pub text: &'b str,
    pub caret: usize,
    pub selection: Option<(usize, usize)>,
    pub focused: bool,
    pub caret_visible: bool,
    pub placeholder: &'b str,
    pub scroll_x: i32,
}

/// Draws an edit field's text, selection highlight, caret and placeholder, clipped to `view.area`.
pub(crate) fn draw_edit_text(ctx: &mut DrawCtx<'_>, view: &EditView<'_>) {
    let style = *ctx.style();
    let font = style.font;
    let area = view.area;
    ctx.push_scissor(area);
    let line_height = ctx.metrics().line_height(font);
    let ty = DrawCtx::centered_top(rect(0, 0, area.width, area.height), line_height);

    if view.text.is_empty() && !view.focused {
        ctx.draw_text(font, view.placeholder, vec2(0, ty), style.color(ControlColor::Placeholder));
    } else {
        if view.focused {
            if let Some((lo, hi)) = view.selection {
                let x0 = caret_x(ctx.metrics(), font, view.text, lo) - view.scroll_x;
                let x1 = caret_x(ctx.metrics(), font, view.text, hi) - view.scroll_x;
                ctx.draw_rect(rect(x0, 3, x1 - x0, area.height - 6), style.color(ControlColor::TextSelection));
            }
        }
        ctx.draw_text(font, view.text, vec2(-view.scroll_x, ty), style.color(ControlColor::Text));
    }

    if view.focused && view.caret_visible {
        let cx = caret_x(ctx.metrics(), font, view.text, view.caret) - view.scroll_x;
        ctx.draw_rect(rect(cx, 5, 1, area.height - 10), style.color(ControlColor::Text));
    }
    ctx.pop_scissor();
}

#[cfg(test)]
pub(crate) mod harness {
    use crate::*;

    /// Owns everything a widget needs for update/draw in tests.
    pub(crate) struct Harness {
        pub style: Style,
        pub metrics: MonospaceMetrics,
        pub clipboard: MemoryClipboard,
        pub commands: Vec<Command>,
        pub overlays: OverlayQueue,
    }

    impl Harness {
        pub fn new() -> Self {
            Self {
                style: Style::default(),
                metrics: MonospaceMetrics::default(),
                clipboard: MemoryClipboard::new(),
                commands: Vec::new(),
                overlays: OverlayQueue::new(),
            }
        }

        pub fn update(&mut self, w: &mut dyn Widget, input: InputSnapshot) -> bool {
            let mut ctx = UpdateCtx::new(input.mouse_pos, &input, 1.0 / 60.0, &self.style, &self.metrics, &mut self.clipboard);
            w.update(&mut ctx)
        }

        /// Draws `w` and returns the normal commands followed by the flushed overlay commands.
        pub fn draw(&mut self, w: &mut dyn Widget) -> (Vec<Command>, Vec<Command>) {
            self.commands.clear();
            let mut scissor = ScissorStack::new(rect(0, 0, 1000, 1000));
            {
                let mut ctx = DrawCtx::new(&mut self.commands, &mut scissor, &mut self.overlays, &self.style, &self.metrics);
                w.draw(&mut ctx);
            }
            let mut overlay = Vec::new();
            self.overlays.flush(&mut overlay);
            (std::mem::take(&mut self.commands), overlay)
        }
    }

    pub fn click(x: i32, y: i32) -> InputSnapshot {
        InputSnapshot {
            mouse_pos: vec2(x, y),
            mouse_down: MouseButton::LEFT,
            mouse_pressed: MouseButton::LEFT,
            ..InputSnapshot::default()
        }
    }

    pub fn shift_click(x: i32, y: i32) -> InputSnapshot {
        InputSnapshot { key_mods: KeyMode::SHIFT, ..click(x, y) }
    }

    pub fn hover(x: i32, y: i32) -> InputSnapshot {
        InputSnapshot {
            mouse_pos: vec2(x, y),
            mouse_delta: vec2(1, 1),
            ..InputSnapshot::default()
        }
    }

    pub fn wheel(x: i32, y: i32, dy: i32) -> InputSnapshot {
        InputSnapshot {
            mouse_pos: vec2(x, y),
            scroll_delta: vec2(0, dy),
            ..InputSnapshot::default()
        }
    }

    pub fn typed(text: &str) -> InputSnapshot {
        InputSnapshot {
            mouse_pos: vec2(-100, -100),
            text_input: text.to_string(),
            ..InputSnapshot::default()
        }
    }

    pub fn keys(keys: &[Key]) -> InputSnapshot {
        InputSnapshot {
            mouse_pos: vec2(-100, -100),
            pressed_keys: keys.to_vec(),
            ..InputSnapshot::default()
        }
    }

    pub fn texts(commands: &[Command]) -> Vec<String> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn text_pos(commands: &[Command], needle: &str) -> Option<(i32, i32)> {
        commands.iter().find_map(|c| match c {
            Command::Text { text, pos, .. } if text == needle => Some((pos.x, pos.y)),
            _ => None,
        })
    }
}
