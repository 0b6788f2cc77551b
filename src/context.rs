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
use crate::{
    rect, vec2, Canvas, Clipboard, Color, Command, Container, Dimensioni, Id, Input, InputSnapshot, MemoryClipboard, MetricsHandle,
    OverlayQueue, Real, Renderer, RendererHandle, ScissorStack, Style, UpdateCtx, Vec2i, Widget,
};

/// Primary entry point used to drive widgets over a renderer implementation.
pub struct Context<R: Renderer> {
    canvas: Canvas<R>,
    style: Style,
    metrics: MetricsHandle,
    clipboard: Box<dyn Clipboard>,
    commands: Vec<Command>,
    overlays: OverlayQueue,
    snapshot: InputSnapshot,
    dt: Real,
    frame: usize,

    /// Shared pointer to the input state driving this context.
    pub input: Rc<RefCell<Input>>,
}

impl<R: Renderer> Context<R> {
    /// Creates a new UI context around the provided renderer and dimensions.
    pub fn new(renderer: RendererHandle<R>, dim: Dimensioni) -> Self {
        let canvas = Canvas::from(renderer, dim);
        let metrics = canvas.metrics();
        Self {
            canvas,
            style: Style::default(),
            metrics,
            clipboard: Box::new(MemoryClipboard::new()),
            commands: Vec::new(),
            overlays: OverlayQueue::new(),
            snapshot: InputSnapshot::default(),
            dt: 1.0 / 60.0,
            frame: 0,

            input: Rc::new(RefCell::new(Input::default())),
        }
    }

    /// Returns the active style.
    pub fn style(&self) -> &Style { &self.style }

    /// Replaces the active style.
    pub fn set_style(&mut self, style: Style) { self.style = style; }

    /// Swaps the clipboard capability, e.g. for a system clipboard.
    pub fn set_clipboard(&mut self, clipboard: Box<dyn Clipboard>) { self.clipboard = clipboard; }

    /// Sets the frame time handed to widgets.
    pub fn set_delta_time(&mut self, dt: Real) { self.dt = dt; }

    /// Number of frames run so far.
    pub fn frame_count(&self) -> usize { self.frame }

    /// Overlay layers waiting for [`Context::render`].
    pub fn pending_overlays(&self) -> usize { self.overlays.len() }

    /// Drops the pending overlay layer queued under `id`. Returns `true` if one was queued.
    pub fn discard_overlay(&mut self, id: Id) -> bool { self.overlays.discard(id) }

    /// Drops every pending overlay layer of `widget` and its children. Call it for a widget torn down between
    /// [`Context::draw_widget`] and [`Context::render`]. Returns the number of layers dropped.
    pub fn discard_widget(&mut self, widget: &dyn Widget) -> usize {
        let mut ids = Vec::new();
        widget.overlay_ids(&mut ids);
        let dropped = ids.into_iter().filter(|id| self.overlays.discard(*id)).count();
        if dropped > 0 {
            tracing::debug!("frame {}: discarded {} overlay layer(s) of a removed widget", self.frame, dropped);
        }
        dropped
    }

    /// Removes `widget` from `container` and drops any list layer it queued this frame. Returns `false` if the
    /// container did not host it.
    pub fn remove_child<W: Widget + ?Sized>(&mut self, container: &mut Container, widget: &Rc<RefCell<W>>) -> bool {
        match container.remove(widget) {
            Some(child) => {
                self.discard_widget(&*child.borrow());
                true
            }
            None => false,
        }
    }

    /// Returns the canvas commands are replayed on.
    pub fn canvas(&mut self) -> &mut Canvas<R> { &mut self.canvas }

    /// Returns a handle to the underlying renderer.
    pub fn renderer_handle(&self) -> RendererHandle<R> { self.canvas.renderer_handle() }

    #[inline(never)]
    fn frame_begin(&mut self) {
        self.frame += 1;
        self.input.borrow_mut().prelude();
        self.snapshot = self.input.borrow().snapshot();
        if !self.overlays.is_empty() {
            tracing::warn!("frame {}: {} overlay layer(s) were never rendered; dropping them", self.frame, self.overlays.len());
            self.overlays.clear();
            self.commands.clear();
        }
    }

    #[inline(never)]
    fn frame_end(&mut self) { self.input.borrow_mut().epilogue(); }

    /// Runs the UI for a single frame by wrapping input bookkeeping.
    /// Rendering still requires calling [`Context::render`].
    pub fn frame<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.frame_begin();

        // execute the frame function
        f(self);

        self.frame_end();
    }

    /// Feeds this frame's input to `widget`, whose rect is local to `origin`. Returns `true` if it consumed input.
    pub fn update_widget(&mut self, widget: &mut dyn Widget, origin: Vec2i) -> bool {
        let p = self.snapshot.mouse_pos;
        let mut ctx = UpdateCtx::new(vec2(p.x - origin.x, p.y - origin.y), &self.snapshot, self.dt, &self.style, &*self.metrics, &mut *self.clipboard);
        widget.update(&mut ctx)
    }

    /// Records `widget`'s draw commands with its local space placed at `origin`. Returns the height it used.
    pub fn draw_widget(&mut self, widget: &mut dyn Widget, origin: Vec2i) -> i32 {
        let dim = self.canvas.current_dimension();
        let mut scissor = ScissorStack::with_origin(rect(0, 0, dim.width, dim.height), origin);
        let mut ctx = DrawCtx::new(&mut self.commands, &mut scissor, &mut self.overlays, &self.style, &*self.metrics);
        widget.draw(&mut ctx)
    }

    /// Updates then draws a root container. Returns `true` if a child consumed input.
    pub fn with_container(&mut self, container: &mut Container) -> bool {
        let consumed = self.update_widget(container, vec2(0, 0));
        self.draw_widget(container, vec2(0, 0));
        consumed
    }

    /// Replays the recorded commands, then every overlay layer, onto the renderer.
    pub fn render(&mut self, width: i32, height: i32, clr: Color) {
        self.canvas.begin(width, height, clr);
        self.canvas.replay(&self.commands);
        let mut overlay = Vec::new();
        let layers = self.overlays.flush(&mut overlay);
        if layers > 0 {
            tracing::trace!("frame {}: flushing {} overlay layer(s)", self.frame, layers);
        }
        self.canvas.replay(&overlay);
        self.canvas.flush();
        self.canvas.end();
        self.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::tests::{Call, RecordingRenderer};
    use crate::{DropdownOption, FilterableDropdown, Key, MouseButton, Textbox, TextboxConfig};

    fn context() -> (Context<RecordingRenderer>, RendererHandle<RecordingRenderer>) {
        let handle = RendererHandle::new(RecordingRenderer::default());
        (Context::new(handle.clone(), Dimensioni::new(400, 300)), handle)
    }

    fn greek() -> Vec<DropdownOption> {
        vec![DropdownOption::new("Alpha", "a"), DropdownOption::new("Echo", "e"), DropdownOption::new("Gamma", "g")]
    }

    fn position(calls: &[Call], wanted: &Call) -> Option<usize> { calls.iter().position(|c| c == wanted) }

    #[test]
    fn open_list_renders_after_later_sibling() {
        let (mut ctx, handle) = context();
        let mut dd = FilterableDropdown::without_callback(rect(0, 0, 200, 20), greek());
        let mut tb = Textbox::new(rect(0, 30, 200, 24), TextboxConfig::default());

        ctx.input.borrow_mut().mousedown(10, 10, MouseButton::LEFT);
        ctx.frame(|ui| {
            ui.update_widget(&mut dd, vec2(0, 0));
            ui.update_widget(&mut tb, vec2(0, 0));
            ui.draw_widget(&mut dd, vec2(0, 0));
            ui.draw_widget(&mut tb, vec2(0, 0));
        });
        assert!(dd.is_open());
        assert_eq!(ctx.pending_overlays(), 1);
        ctx.render(400, 300, Color::default());
        assert_eq!(ctx.pending_overlays(), 0);

        let calls = handle.scope(|r| r.calls.clone());
        let textbox_frame = position(&calls, &Call::Rect((0, 30, 200, 24)));
        let first_row = position(&calls, &Call::Text("Alpha".to_string(), (8, 22)));
        assert!(textbox_frame.is_some() && first_row.is_some());
        assert!(first_row > textbox_frame);
        assert_eq!(calls.last(), Some(&Call::End));
    }

    #[test]
    fn origin_translates_pointer() {
        let (mut ctx, _) = context();
        let mut tb = Textbox::new(rect(0, 0, 100, 20), TextboxConfig::default());
        ctx.input.borrow_mut().mousedown(60, 60, MouseButton::LEFT);
        let mut consumed = false;
        ctx.frame(|ui| consumed = ui.update_widget(&mut tb, vec2(50, 50)));
        assert!(consumed);
        assert!(tb.is_focused());

        ctx.input.borrow_mut().text("hey");
        ctx.input.borrow_mut().keydown(Key::Home);
        ctx.frame(|ui| {
            ui.update_widget(&mut tb, vec2(50, 50));
        });
        assert_eq!(tb.value(), "hey");
        assert_eq!(tb.buffer().caret(), 0);
        // per-frame input is gone after the epilogue
        ctx.frame(|ui| {
            ui.update_widget(&mut tb, vec2(50, 50));
        });
        assert_eq!(tb.value(), "hey");
    }

    #[test]
    fn missed_render_drops_stale_overlays() {
        let (mut ctx, handle) = context();
        let mut dd = FilterableDropdown::without_callback(rect(0, 0, 200, 20), greek());
        ctx.input.borrow_mut().mousedown(10, 10, MouseButton::LEFT);
        ctx.frame(|ui| {
            ui.update_widget(&mut dd, vec2(0, 0));
            ui.draw_widget(&mut dd, vec2(0, 0));
        });
        assert_eq!(ctx.pending_overlays(), 1);

        ctx.frame(|_| ());
        assert_eq!(ctx.pending_overlays(), 0);
        ctx.render(400, 300, Color::default());
        let calls = handle.scope(|r| r.calls.clone());
        assert!(!calls.iter().any(|c| matches!(c, Call::Text(..))));
    }

    #[test]
    fn container_drives_children() {
        let (mut ctx, _) = context();
        let mut root = Container::new(rect(20, 20, 240, 200), ctx.style());
        let dd = root.add(Rc::new(RefCell::new(FilterableDropdown::without_callback(rect(0, 0, 0, 20), greek()))));
        ctx.input.borrow_mut().mousedown(40, 35, MouseButton::LEFT);
        let mut consumed = false;
        ctx.frame(|ui| consumed = ui.with_container(&mut root));
        assert!(consumed);
        assert!(dd.borrow().is_open());
        assert_eq!(ctx.pending_overlays(), 1);
    }

    fn painted_alpha(handle: &RendererHandle<RecordingRenderer>) -> bool {
        handle.scope(|r| r.calls.iter().any(|c| matches!(c, Call::Text(t, _) if t == "Alpha")))
    }

    #[test]
    fn dropped_widget_list_is_not_painted() {
        let (mut ctx, handle) = context();
        let mut dd = FilterableDropdown::without_callback(rect(0, 0, 200, 20), greek());
        dd.open();
        ctx.frame(|ui| {
            ui.draw_widget(&mut dd, vec2(0, 0));
        });
        assert_eq!(ctx.pending_overlays(), 1);
        assert_eq!(ctx.discard_widget(&dd), 1);
        drop(dd);
        assert!(!ctx.discard_overlay(Id::next()));
        ctx.render(400, 300, Color::default());
        assert!(!painted_alpha(&handle));
    }

    #[test]
    fn removed_child_list_is_not_painted() {
        let (mut ctx, handle) = context();
        let mut root = Container::new(rect(0, 0, 240, 200), ctx.style());
        let tb = root.add(Rc::new(RefCell::new(Textbox::new(rect(0, 0, 0, 24), TextboxConfig::default()))));
        let dd = root.add(Rc::new(RefCell::new(FilterableDropdown::without_callback(rect(0, 0, 0, 20), greek()))));
        dd.borrow_mut().open();
        ctx.frame(|ui| {
            ui.draw_widget(&mut root, vec2(0, 0));
        });
        assert_eq!(ctx.pending_overlays(), 1);

        assert!(ctx.remove_child(&mut root, &dd));
        assert!(!ctx.remove_child(&mut root, &dd));
        assert_eq!(root.len(), 1);
        assert_eq!(Rc::as_ptr(&root.children()[0]).cast::<()>(), Rc::as_ptr(&tb).cast::<()>());
        assert_eq!(ctx.pending_overlays(), 0);
        ctx.render(400, 300, Color::default());
        assert!(!painted_alpha(&handle));
    }
}
