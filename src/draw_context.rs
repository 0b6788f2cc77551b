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
use crate::*;

#[derive(Clone, Debug)]
/// Draw command recorded during a frame, in root coordinates.
pub enum Command {
    /// Restricts subsequent commands to `rect`.
    Clip {
        /// Clip rectangle.
        rect: Recti,
    },
    /// Solid rectangle fill.
    Rect {
        /// Destination rectangle.
        rect: Recti,
        /// Fill color.
        color: Color,
    },
    /// Run of text with its line box starting at `pos`.
    Text {
        /// Font used for the run.
        font: FontId,
        /// UTF-8 text.
        text: String,
        /// Top-left of the line box.
        pos: Vec2i,
        /// Text color.
        color: Color,
    },
}

/// Per-draw recording context handed to [`Widget::draw`].
///
/// All positions passed in are local to the innermost scissor frame; the context translates them to root space,
/// clips them and appends the resulting [`Command`]s.
pub struct DrawCtx<'a> {
    commands: &'a mut Vec<Command>,
    scissor: &'a mut ScissorStack,
    overlays: &'a mut OverlayQueue,
    style: &'a Style,
    metrics: &'a dyn TextMetrics,
}

impl<'a> DrawCtx<'a> {
    pub(crate) fn new(
        commands: &'a mut Vec<Command>,
        scissor: &'a mut ScissorStack,
        overlays: &'a mut OverlayQueue,
        style: &'a Style,
        metrics: &'a dyn TextMetrics,
    ) -> Self {
        Self { commands, scissor, overlays, style, metrics }
    }

    /// Returns the active style.
    pub fn style(&self) -> &Style { self.style }

    /// Returns the active text metrics.
    pub fn metrics(&self) -> &dyn TextMetrics { self.metrics }

    /// Returns the global position of the local origin.
    pub fn origin(&self) -> Vec2i { self.scissor.origin() }

    /// Returns the current global clip rectangle.
    pub fn current_clip_rect(&self) -> Recti { self.scissor.clip() }

    /// Enters a nested coordinate space for `local`, clipping to it.
    pub fn push_scissor(&mut self, local: Recti) { self.scissor.push(local); }

    /// Leaves the innermost nested coordinate space.
    pub fn pop_scissor(&mut self) { self.scissor.pop(); }

    /// Appends a raw command.
    pub fn push_command(&mut self, cmd: Command) { self.commands.push(cmd); }

    fn set_clip(&mut self, rect: Recti) { self.push_command(Command::Clip { rect }); }

    /// Classifies a global rectangle against the current clip.
    pub fn check_clip(&self, r: Recti) -> Clip {
        let cr = self.current_clip_rect();
        if r.x > cr.x + cr.width || r.x + r.width < cr.x || r.y > cr.y + cr.height || r.y + r.height < cr.y {
            return Clip::All;
        }
        if r.x >= cr.x && r.x + r.width <= cr.x + cr.width && r.y >= cr.y && r.y + r.height <= cr.y + cr.height {
            return Clip::None;
        }
        Clip::Part
    }

    /// Fills a local rectangle.
    pub fn draw_rect(&mut self, local: Recti, color: Color) {
        let rect = self.scissor.rect_to_global(local);
        let rect = rect.intersect(&self.current_clip_rect()).unwrap_or_default();
        if rect.width > 0 && rect.height > 0 {
            self.push_command(Command::Rect { rect, color });
        }
    }

    /// Outlines a local rectangle with a 1px border.
    pub fn draw_box(&mut self, r: Recti, color: Color) {
        self.draw_rect(rect(r.x + 1, r.y, r.width - 2, 1), color);
        self.draw_rect(rect(r.x + 1, r.y + r.height - 1, r.width - 2, 1), color);
        self.draw_rect(rect(r.x, r.y, 1, r.height), color);
        self.draw_rect(rect(r.x + r.width - 1, r.y, 1, r.height), color);
    }

    /// Draws a run of text with its line box at the local position `pos`.
    pub fn draw_text(&mut self, font: FontId, text: &str, pos: Vec2i, color: Color) {
        if text.is_empty() {
            return;
        }
        let gpos = self.scissor.to_global(pos);
        let r = rect(gpos.x, gpos.y, self.metrics.text_width(font, text), self.metrics.line_height(font));
        let clipped = self.check_clip(r);
        match clipped {
            Clip::All => return,
            Clip::Part => {
                let clip = self.current_clip_rect();
                self.set_clip(clip)
            }
            _ => (),
        }

        self.push_command(Command::Text {
            text: String::from(text),
            pos: gpos,
            color,
            font,
        });
        if clipped != Clip::None {
            self.set_clip(UNCLIPPED_RECT);
        }
    }

    /// Fills a local rectangle with a palette color and outlines it with the given border color.
    pub fn draw_frame(&mut self, rect: Recti, fill: ControlColor, border: ControlColor) {
        let color = self.style.color(fill);
        self.draw_rect(rect, color);
        let border_color = self.style.color(border);
        if border_color.a != 0 {
            self.draw_box(expand_rect(rect, 1), border_color);
        }
    }

    /// Draws the standard field frame, switching colors on focus and hover.
    pub fn draw_widget_frame(&mut self, focused: bool, hovered: bool, rect: Recti, opt: WidgetOption) {
        if opt.has_no_frame() {
            return;
        }
        let fill = if hovered && !focused { ControlColor::BaseHover } else { ControlColor::Base };
        let mut border = ControlColor::Border;
        if focused {
            border.focus()
        }
        self.draw_frame(rect, fill, border);
    }

    /// Draws a label inside `rect` using the style font, honoring alignment options.
    pub fn draw_control_text(&mut self, text: &str, r: Recti, colorid: ControlColor, opt: WidgetOption) {
        let font = self.style.font;
        let width = self.metrics.text_width(font, text);
        let padding = self.style.padding;
        let color = self.style.color(colorid);
        let line_height = self.metrics.line_height(font);

        self.push_scissor(r);
        let y = Self::centered_top(rect(0, 0, r.width, r.height), line_height);
        let x = if opt.is_aligned_center() {
            (r.width - width) / 2
        } else if opt.is_aligned_right() {
            r.width - width - padding
        } else {
            padding
        };
        self.draw_text(font, text, vec2(x, y), color);
        self.pop_scissor();
    }

    /// Returns the top of a line box vertically centered in `rect`.
    pub fn centered_top(rect: Recti, line_height: i32) -> i32 { rect.y + (rect.height - line_height) / 2 }

    /// Records commands into a deferred overlay layer for `id`.
    ///
    /// The closure sees the current local origin with clipping lifted; its commands are replayed after every
    /// normal command of the frame. Queueing the same id twice in a frame replaces the earlier layer.
    pub fn defer_overlay<F: FnOnce(&mut DrawCtx<'_>)>(&mut self, id: Id, f: F) {
        let mut commands = Vec::new();
        let mut scissor = ScissorStack::unclipped(self.scissor.origin());
        {
            let mut layer = DrawCtx::new(&mut commands, &mut scissor, &mut *self.overlays, self.style, self.metrics);
            f(&mut layer);
        }
        self.overlays.queue(id, commands);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_ctx<F: FnOnce(&mut DrawCtx<'_>)>(f: F) -> (Vec<Command>, OverlayQueue) {
        let mut commands = Vec::new();
        let mut scissor = ScissorStack::new(rect(0, 0, 200, 100));
        let mut overlays = OverlayQueue::default();
        let style = Style::default();
        let metrics = MonospaceMetrics::default();
        {
            let mut ctx = DrawCtx::new(&mut commands, &mut scissor, &mut overlays, &style, &metrics);
            f(&mut ctx);
        }
        (commands, overlays)
    }

    #[test]
    fn rects_are_translated_and_clipped() {
        let (commands, _) = with_ctx(|ctx| {
            ctx.push_scissor(rect(10, 10, 50, 50));
            ctx.draw_rect(rect(40, 40, 30, 30), color(1, 2, 3, 255));
            ctx.pop_scissor();
        });
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            Command::Rect { rect, .. } => assert_eq!((rect.x, rect.y, rect.width, rect.height), (50, 50, 10, 10)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn partially_clipped_text_is_wrapped_in_clip_commands() {
        let (commands, _) = with_ctx(|ctx| {
            ctx.push_scissor(rect(0, 0, 20, 20));
            ctx.draw_text(FontId(0), "wide label", vec2(0, 0), color(255, 255, 255, 255));
            ctx.draw_text(FontId(0), "gone", vec2(100, 100), color(255, 255, 255, 255));
            ctx.pop_scissor();
        });
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], Command::Clip { .. }));
        assert!(matches!(commands[1], Command::Text { .. }));
        assert!(matches!(commands[2], Command::Clip { .. }));
    }

    #[test]
    fn deferred_layers_escape_the_clip() {
        let id = Id::next();
        let (commands, mut overlays) = with_ctx(|ctx| {
            ctx.push_scissor(rect(10, 10, 20, 20));
            ctx.defer_overlay(id, |layer| layer.draw_rect(rect(0, 30, 40, 40), color(9, 9, 9, 255)));
            ctx.pop_scissor();
        });
        assert!(commands.is_empty());
        let mut out = Vec::new();
        overlays.flush(&mut out);
        let rects: Vec<_> = out
            .iter()
            .filter_map(|c| match c {
                Command::Rect { rect, .. } => Some((rect.x, rect.y, rect.width, rect.height)),
                _ => None,
            })
            .collect();
        assert_eq!(rects, vec![(10, 40, 40, 40)]);
    }

    #[test]
    fn centered_top_splits_the_slack() {
        assert_eq!(DrawCtx::centered_top(rect(0, 0, 20, 10), 16), -3);
        assert_eq!(DrawCtx::centered_top(rect(0, 10, 20, 30), 16), 17);
    }
}
