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

/// Replays recorded [`Command`]s onto a renderer, tracking the active clip rectangle.
pub struct Canvas<R: Renderer> {
    current_dim: Dimensioni,
    renderer: RendererHandle<R>,
    clip: Recti,
}

impl<R: Renderer> Canvas<R> {
    /// Creates a canvas around the provided renderer handle.
    pub fn from(renderer: RendererHandle<R>, dim: Dimensioni) -> Self {
        Self {
            current_dim: dim,
            renderer,
            clip: Recti::new(0, 0, dim.width, dim.height),
        }
    }

    /// Returns the text metrics exposed by the renderer.
    pub fn metrics(&self) -> MetricsHandle { self.renderer.scope(|r| r.metrics()) }

    #[inline(never)]
    /// Computes the visible part of `dst_r` inside `clip_r`, or `None` when nothing remains.
    pub fn clip_rect(dst_r: Recti, clip_r: Recti) -> Option<Recti> {
        match dst_r.intersect(&clip_r) {
            Some(rect) if rect.width > 0 && rect.height > 0 => Some(rect),
            _ => None,
        }
    }

    /// Draws a solid colored rectangle.
    pub fn draw_rect(&mut self, rect: Recti, color: Color) {
        if let Some(rect) = Self::clip_rect(rect, self.clip) {
            self.renderer.scope_mut(move |r| r.draw_rect(rect, color));
        }
    }

    #[inline(never)]
    /// Draws UTF-8 text using the supplied font.
    pub fn draw_chars(&mut self, font: FontId, text: &str, pos: Vec2i, color: Color) {
        let metrics = self.metrics();
        let bounds = rect(pos.x, pos.y, metrics.text_width(font, text), metrics.line_height(font));
        if Self::clip_rect(bounds, self.clip).is_none() {
            return;
        }
        self.renderer.scope_mut(|r| r.draw_text(font, text, pos, color));
    }

    /// Sets the clip rectangle used for subsequent draw calls, bounded by the viewport.
    pub fn set_clip_rect(&mut self, rect: Recti) {
        let viewport = Recti::new(0, 0, self.current_dim.width, self.current_dim.height);
        let clip = rect.intersect(&viewport).unwrap_or_default();
        self.clip = clip;
        self.renderer.scope_mut(move |r| r.set_clip(clip));
    }

    /// Returns the clip rectangle currently applied to draw commands.
    pub fn current_clip_rect(&self) -> Recti { self.clip }

    /// Begins a new drawing pass and resets the clip rectangle.
    pub fn begin(&mut self, width: i32, height: i32, clr: Color) {
        self.current_dim = Dimensioni::new(width, height);
        self.clip = Recti::new(0, 0, width, height);
        self.renderer.scope_mut(move |r| r.begin(width, height, clr));
    }

    /// Ends the current drawing pass.
    pub fn end(&mut self) { self.renderer.scope_mut(|r| r.end()) }

    /// Flushes any buffered geometry without ending the frame.
    pub fn flush(&mut self) { self.renderer.scope_mut(|r| r.flush()) }

    /// Returns the last viewport dimensions passed to [`Canvas::begin`].
    pub fn current_dimension(&self) -> Dimensioni { self.current_dim }

    /// Returns a clone of the underlying renderer handle.
    pub fn renderer_handle(&self) -> RendererHandle<R> { self.renderer.clone() }

    /// Replays a command list in order.
    pub fn replay(&mut self, commands: &[Command]) {
        for cmd in commands {
            match cmd {
                Command::Clip { rect } => self.set_clip_rect(*rect),
                Command::Rect { rect, color } => self.draw_rect(*rect, *color),
                Command::Text { font, text, pos, color } => self.draw_chars(*font, text, *pos, *color),
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum Call {
        Begin(i32, i32),
        Rect((i32, i32, i32, i32)),
        Text(String, (i32, i32)),
        Clip((i32, i32, i32, i32)),
        End,
    }

    fn tuple(r: Recti) -> (i32, i32, i32, i32) { (r.x, r.y, r.width, r.height) }

    #[derive(Default)]
    pub(crate) struct RecordingRenderer {
        pub(crate) calls: Vec<Call>,
    }

    impl Renderer for RecordingRenderer {
        fn metrics(&self) -> MetricsHandle { Rc::new(MonospaceMetrics::default()) }
        fn begin(&mut self, width: i32, height: i32, _clr: Color) { self.calls.push(Call::Begin(width, height)); }
        fn draw_rect(&mut self, rect: Recti, _color: Color) { self.calls.push(Call::Rect(tuple(rect))); }
        fn draw_text(&mut self, _font: FontId, text: &str, pos: Vec2i, _color: Color) { self.calls.push(Call::Text(text.to_string(), (pos.x, pos.y))); }
        fn set_clip(&mut self, rect: Recti) { self.calls.push(Call::Clip(tuple(rect))); }
        fn flush(&mut self) {}
        fn end(&mut self) { self.calls.push(Call::End); }
    }

    #[test]
    fn clip_rect_partial() {
        let res = Canvas::<RecordingRenderer>::clip_rect(Recti::new(0, 0, 100, 100), Recti::new(20, 20, 40, 40));
        assert_eq!(res.map(tuple), Some((20, 20, 40, 40)));
    }

    #[test]
    fn clip_rect_none() {
        assert!(Canvas::<RecordingRenderer>::clip_rect(Recti::new(0, 0, 10, 10), Recti::new(50, 50, 10, 10)).is_none());
    }

    #[test]
    fn replay_applies_clip_to_later_commands() {
        let handle = RendererHandle::new(RecordingRenderer::default());
        let mut canvas = Canvas::from(handle.clone(), Dimensioni::new(100, 100));
        canvas.begin(100, 100, Color::default());
        canvas.replay(&[
            Command::Clip { rect: rect(0, 0, 10, 10) },
            Command::Rect { rect: rect(5, 5, 20, 20), color: Color::default() },
            Command::Text { font: FontId(0), text: "far".into(), pos: vec2(50, 50), color: Color::default() },
            Command::Clip { rect: UNCLIPPED_RECT },
            Command::Text { font: FontId(0), text: "near".into(), pos: vec2(50, 50), color: Color::default() },
        ]);
        canvas.end();
        let calls = handle.scope(|r| r.calls.clone());
        assert_eq!(
            calls,
            vec![
                Call::Begin(100, 100),
                Call::Clip((0, 0, 10, 10)),
                Call::Rect((5, 5, 5, 5)),
                Call::Clip((0, 0, 100, 100)),
                Call::Text("near".into(), (50, 50)),
                Call::End,
            ]
        );
    }
}
