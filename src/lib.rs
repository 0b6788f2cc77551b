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
#![deny(missing_docs)]
//! `dropfilter` provides an immediate-mode widget engine centred on a filterable, inline-editable dropdown.
//! Widgets record draw commands against a per-frame context, open lists are deferred to an overlay pass so they
//! always paint above their siblings, and rendering, font metrics and the clipboard stay behind small capability
//! traits so the crate can be embedded inside custom render backends.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, RwLock,
    },
};

mod canvas;
mod clipboard;
mod container;
mod context;
mod draw_context;
mod layout;
mod metrics;
mod overlay;
mod scissor;
mod scrollbar;
mod widgets;

pub use canvas::*;
pub use clipboard::*;
pub use container::*;
pub use context::Context;
pub use draw_context::{Command, DrawCtx};
pub use layout::*;
pub use metrics::*;
pub use overlay::OverlayQueue;
pub use rs_math3d::*;
pub use scissor::*;
pub use widgets::*;

use bitflags::*;

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
/// Numeric identifier value.
pub struct Id(usize);

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

impl Id {
    /// Allocates a fresh process-unique ID.
    pub fn next() -> Self { Self(NEXT_ID.fetch_add(1, Ordering::Relaxed)) }

    /// Returns the raw numeric value wrapped by this ID.
    pub fn raw(self) -> usize { self.0 }
}

/// Trait implemented by render backends used by the UI context.
pub trait Renderer {
    /// Returns the text metrics matching the fonts this backend draws with.
    fn metrics(&self) -> MetricsHandle;
    /// Begins a new frame with the viewport size and clear color.
    fn begin(&mut self, width: i32, height: i32, clr: Color);
    /// Fills a rectangle with a solid color.
    fn draw_rect(&mut self, rect: Recti, color: Color);
    /// Draws a run of text with its line box starting at `pos`.
    fn draw_text(&mut self, font: FontId, text: &str, pos: Vec2i, color: Color);
    /// Restricts subsequent draws to `rect`.
    fn set_clip(&mut self, rect: Recti);
    /// Flushes any buffered geometry.
    fn flush(&mut self);
    /// Ends the frame, finalizing any outstanding work.
    fn end(&mut self);
}

/// Thread-safe handle that shares ownership of a [`Renderer`].
pub struct RendererHandle<R: Renderer> {
    handle: Arc<RwLock<R>>,
}

// seems there's a bug in #[derive(Clone)] as it's unable to induce that Arc is sufficient
impl<R: Renderer> Clone for RendererHandle<R> {
    fn clone(&self) -> Self { Self { handle: self.handle.clone() } }
}

impl<R: Renderer> RendererHandle<R> {
    /// Wraps a renderer inside an [`Arc<RwLock<...>>`] so it can be shared.
    pub fn new(renderer: R) -> Self { Self { handle: Arc::new(RwLock::new(renderer)) } }

    /// Executes the provided closure with a shared reference to the renderer.
    pub fn scope<Res, F: Fn(&R) -> Res>(&self, f: F) -> Res {
        match self.handle.read() {
            Ok(guard) => f(&*guard),
            // a panic while drawing leaves the renderer usable for reads
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }

    /// Executes the provided closure with a mutable reference to the renderer.
    pub fn scope_mut<Res, F: FnMut(&mut R) -> Res>(&mut self, mut f: F) -> Res {
        match self.handle.write() {
            Ok(mut guard) => f(&mut *guard),
            Err(poisoned) => f(&mut *poisoned.into_inner()),
        }
    }
}

#[derive(PartialEq, Copy, Clone, Debug)]
#[repr(u32)]
/// Describes whether a rectangle is clipped by the current scissor.
pub enum Clip {
    /// Rectangle is fully visible.
    None = 0,
    /// Rectangle is partially visible.
    Part = 1,
    /// Rectangle is fully clipped away.
    All = 2,
}

#[derive(PartialEq, Copy, Clone, Debug)]
#[repr(u32)]
/// Identifiers for each of the built-in style colors.
pub enum ControlColor {
    /// Number of color entries in [`Style::colors`].
    Max = 11,
    /// Background of container panels.
    PanelBG = 10,
    /// Thumb of list scroll indicators.
    ScrollThumb = 9,
    /// Track of list scroll indicators.
    ScrollBase = 8,
    /// Hint text shown in empty, unfocused fields.
    Placeholder = 7,
    /// Highlight behind selected text in edit fields.
    TextSelection = 6,
    /// Highlight of the committed row in an open list.
    RowSelected = 5,
    /// Highlight of the hovered row in an open list.
    BaseHover = 4,
    /// Default field and list background.
    Base = 3,
    /// Outline of a focused widget.
    BorderFocus = 2,
    /// Outline/border color.
    Border = 1,
    /// Default text color.
    Text = 0,
}

impl ControlColor {
    /// Promotes a border color to its focused variant.
    pub fn focus(&mut self) {
        *self = match self {
            Self::Border => Self::BorderFocus,
            _ => *self,
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug)]
    /// Widget specific options that influence drawing and interactivity.
    pub struct WidgetOption : u32 {
        /// Draws the widget without its frame/background.
        const NO_FRAME = 128;
        /// Disables interaction for the widget.
        const NO_INTERACT = 4;
        /// Aligns the widget label to the right side of its rect.
        const ALIGN_RIGHT = 2;
        /// Centers the widget label inside its rect.
        const ALIGN_CENTER = 1;
        /// No special options.
        const NONE = 0;
    }
}

impl WidgetOption {
    /// Returns `true` if the widget shouldn't draw its frame.
    pub fn has_no_frame(&self) -> bool { self.intersects(WidgetOption::NO_FRAME) }

    /// Returns `true` if the widget is non-interactive.
    pub fn is_not_interactive(&self) -> bool { self.intersects(WidgetOption::NO_INTERACT) }
    /// Returns `true` if the widget prefers right alignment.
    pub fn is_aligned_right(&self) -> bool { self.intersects(WidgetOption::ALIGN_RIGHT) }
    /// Returns `true` if the widget prefers centered alignment.
    pub fn is_aligned_center(&self) -> bool { self.intersects(WidgetOption::ALIGN_CENTER) }
    /// Returns `true` if the option set is empty.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse button state as reported by the input system.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons pressed.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the middle mouse button is pressed.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
    /// Returns `true` if the right mouse button is pressed.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the left mouse button is pressed.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if no mouse buttons are pressed.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Modifier key state tracked by the input system.
    pub struct KeyMode : u32 {
        /// Alt key held.
        const ALT = 4;
        /// Control (or command) key held.
        const CTRL = 2;
        /// Shift key held.
        const SHIFT = 1;
        /// No modifiers active.
        const NONE = 0;
    }
}

impl KeyMode {
    /// Returns `true` if no modifiers are active.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Returns `true` if Alt is held.
    pub fn is_alt(&self) -> bool { self.intersects(Self::ALT) }
    /// Returns `true` if Control is held.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
    /// Returns `true` if Shift is held.
    pub fn is_shift(&self) -> bool { self.intersects(Self::SHIFT) }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Logical keys the widgets react to. Printable text arrives separately through [`Input::text`].
pub enum Key {
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Return/Enter.
    Enter,
    /// Escape.
    Escape,
    /// The `A` key, used for select-all with Ctrl.
    A,
    /// The `C` key, used for copy with Ctrl.
    C,
    /// The `V` key, used for paste with Ctrl.
    V,
    /// The `X` key, used for cut with Ctrl.
    X,
}

#[derive(Clone, Debug)]
/// Snapshot of the per-frame input state handed to widgets.
pub struct InputSnapshot {
    /// Absolute mouse position in root coordinates.
    pub mouse_pos: Vec2i,
    /// Mouse movement delta since the previous frame.
    pub mouse_delta: Vec2i,
    /// Currently held mouse buttons.
    pub mouse_down: MouseButton,
    /// Mouse buttons pressed this frame.
    pub mouse_pressed: MouseButton,
    /// Wheel movement this frame. Positive `y` scrolls towards later rows.
    pub scroll_delta: Vec2i,
    /// Active modifier keys.
    pub key_mods: KeyMode,
    /// Keys pressed this frame, in arrival order.
    pub pressed_keys: Vec<Key>,
    /// UTF-8 text input collected this frame.
    pub text_input: String,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2i::default(),
            mouse_delta: Vec2i::default(),
            mouse_down: MouseButton::NONE,
            mouse_pressed: MouseButton::NONE,
            scroll_delta: Vec2i::default(),
            key_mods: KeyMode::NONE,
            pressed_keys: Vec::new(),
            text_input: String::new(),
        }
    }
}

impl InputSnapshot {
    /// Returns `true` if `key` was pressed this frame.
    pub fn is_pressed(&self, key: Key) -> bool { self.pressed_keys.contains(&key) }

    /// Returns `true` if the pointer moved since the previous frame.
    pub fn mouse_moved(&self) -> bool { self.mouse_delta.x != 0 || self.mouse_delta.y != 0 }

    /// Returns `true` if the wheel moved this frame.
    pub fn scrolled(&self) -> bool { self.scroll_delta.x != 0 || self.scroll_delta.y != 0 }
}

#[derive(Clone, Debug)]
/// Aggregates raw input collected between frames.
pub struct Input {
    mouse_pos: Vec2i,
    last_mouse_pos: Vec2i,
    mouse_delta: Vec2i,
    scroll_delta: Vec2i,
    mouse_down: MouseButton,
    mouse_pressed: MouseButton,
    key_mods: KeyMode,
    keys_down: Vec<Key>,
    pressed_keys: Vec<Key>,
    input_text: String,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2i::default(),
            last_mouse_pos: Vec2i::default(),
            mouse_delta: Vec2i::default(),
            scroll_delta: Vec2i::default(),
            mouse_down: MouseButton::NONE,
            mouse_pressed: MouseButton::NONE,
            key_mods: KeyMode::NONE,
            keys_down: Vec::new(),
            pressed_keys: Vec::new(),
            input_text: String::default(),
        }
    }
}

impl Input {
    /// Returns the current pointer position.
    pub fn mouse_pos(&self) -> Vec2i { self.mouse_pos }

    /// Returns the state of all modifier keys.
    pub fn key_state(&self) -> KeyMode { self.key_mods }

    /// Returns `true` while `key` is held.
    pub fn is_key_down(&self, key: Key) -> bool { self.keys_down.contains(&key) }

    /// Returns the accumulated UTF-8 text entered this frame.
    pub fn text_input(&self) -> &str { &self.input_text }

    /// Updates the current mouse pointer position.
    pub fn mousemove(&mut self, x: i32, y: i32) { self.mouse_pos = vec2(x, y); }

    /// Returns the currently held mouse buttons.
    pub fn get_mouse_buttons(&self) -> MouseButton { self.mouse_down }

    /// Records that the specified mouse button was pressed.
    pub fn mousedown(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down |= btn;
        self.mouse_pressed |= btn;
    }

    /// Records that the specified mouse button was released.
    pub fn mouseup(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down &= !btn;
    }

    /// Accumulates scroll wheel movement.
    pub fn scroll(&mut self, x: i32, y: i32) {
        self.scroll_delta.x += x;
        self.scroll_delta.y += y;
    }

    /// Replaces the held modifier set.
    pub fn set_modifiers(&mut self, mods: KeyMode) { self.key_mods = mods; }

    /// Records that a key was pressed. Platform key repeat may call this again while held.
    pub fn keydown(&mut self, key: Key) {
        self.pressed_keys.push(key);
        if !self.keys_down.contains(&key) {
            self.keys_down.push(key);
        }
    }

    /// Records that a key was released.
    pub fn keyup(&mut self, key: Key) { self.keys_down.retain(|k| *k != key); }

    /// Appends UTF-8 text to the input buffer.
    pub fn text(&mut self, text: &str) { self.input_text.push_str(text); }

    pub(crate) fn prelude(&mut self) {
        self.mouse_delta.x = self.mouse_pos.x - self.last_mouse_pos.x;
        self.mouse_delta.y = self.mouse_pos.y - self.last_mouse_pos.y;
    }

    /// Captures the events gathered since the last epilogue.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            mouse_pos: self.mouse_pos,
            mouse_delta: self.mouse_delta,
            mouse_down: self.mouse_down,
            mouse_pressed: self.mouse_pressed,
            scroll_delta: self.scroll_delta,
            key_mods: self.key_mods,
            pressed_keys: self.pressed_keys.clone(),
            text_input: self.input_text.clone(),
        }
    }

    pub(crate) fn epilogue(&mut self) {
        self.pressed_keys.clear();
        self.input_text.clear();
        self.mouse_pressed = MouseButton::NONE;
        self.scroll_delta = vec2(0, 0);
        self.last_mouse_pos = self.mouse_pos;
    }
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

#[derive(Copy, Clone, Debug)]
/// Collection of visual constants that drive widget appearance.
pub struct Style {
    /// Font used for all text rendering.
    pub font: FontId,
    /// Inner padding applied by containers.
    pub padding: i32,
    /// Vertical spacing between stacked widgets.
    pub spacing: i32,
    /// Palette of [`ControlColor`] entries.
    pub colors: [Color; 11],
}

impl Style {
    /// Returns the palette entry for `id`.
    pub fn color(&self, id: ControlColor) -> Color { self.colors[id as usize] }
}

/// Floating-point type used for frame timing.
pub type Real = f32;

pub(crate) static UNCLIPPED_RECT: Recti = Recti {
    x: 0,
    y: 0,
    width: i32::MAX,
    height: i32::MAX,
};

impl Default for Style {
    fn default() -> Self {
        Self {
            font: FontId::default(),
            padding: 5,
            spacing: 4,
            colors: [
                Color { r: 200, g: 200, b: 200, a: 255 },
                Color { r: 100, g: 100, b: 100, a: 255 },
                Color { r: 150, g: 150, b: 255, a: 255 },
                Color { r: 40, g: 40, b: 40, a: 255 },
                Color { r: 80, g: 80, b: 80, a: 255 },
                Color { r: 100, g: 150, b: 255, a: 100 },
                Color { r: 100, g: 150, b: 255, a: 128 },
                Color { r: 120, g: 120, b: 120, a: 255 },
                Color { r: 60, g: 60, b: 60, a: 255 },
                Color { r: 120, g: 120, b: 120, a: 255 },
                Color { r: 30, g: 30, b: 45, a: 255 },
            ],
        }
    }
}

/// Trait implemented by every widget driven by the per-frame loop.
pub trait Widget {
    /// Handles this frame's input. Returns `true` when the input was consumed and must not reach background widgets.
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> bool;
    /// Records the widget's draw commands and returns the height it used.
    fn draw(&mut self, ctx: &mut DrawCtx<'_>) -> i32;
    /// Returns the height the widget needs when stacked by a container.
    fn min_height(&self) -> i32;
    /// Returns the widget rectangle in its parent's local coordinates.
    fn rect(&self) -> Recti;
    /// Moves or resizes the widget.
    fn set_rect(&mut self, rect: Recti);
    /// Receives the bounds of the hosting container, in the widget's local coordinates.
    fn set_container_bounds(&mut self, _bounds: Recti) {}
    /// Returns `true` while the widget holds focus or an open list and should see input before its siblings.
    fn is_capturing(&self) -> bool { false }
    /// Appends the ids of the overlay layers this widget (or anything it hosts) may queue.
    fn overlay_ids(&self, _ids: &mut Vec<Id>) {}
}

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Expands (or shrinks) a rectangle uniformly on all sides.
pub fn expand_rect(r: Recti, n: i32) -> Recti { rect(r.x - n, r.y - n, r.width + n * 2, r.height + n * 2) }

/// Half-open point-in-rectangle test shared by hit-testing and drawing.
pub fn rect_contains(r: Recti, p: Vec2i) -> bool { p.x >= r.x && p.x < r.x + r.width && p.y >= r.y && p.y < r.y + r.height }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_snapshot_keeps_key_order_until_epilogue() {
        let mut input = Input::default();
        input.keydown(Key::Down);
        input.keydown(Key::Enter);
        input.text("ab");
        input.prelude();
        let snap = input.snapshot();
        assert_eq!(snap.pressed_keys, vec![Key::Down, Key::Enter]);
        assert_eq!(snap.text_input, "ab");
        assert!(input.is_key_down(Key::Enter));

        input.epilogue();
        let snap = input.snapshot();
        assert!(snap.pressed_keys.is_empty());
        assert!(snap.text_input.is_empty());
        assert!(input.is_key_down(Key::Enter));
        input.keyup(Key::Enter);
        assert!(!input.is_key_down(Key::Enter));
    }

    #[test]
    fn mouse_delta_tracks_previous_frame() {
        let mut input = Input::default();
        input.mousemove(10, 20);
        input.prelude();
        assert!(input.snapshot().mouse_moved());
        input.epilogue();
        input.prelude();
        assert!(!input.snapshot().mouse_moved());
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = rect(0, 0, 10, 10);
        assert!(rect_contains(r, vec2(0, 0)));
        assert!(rect_contains(r, vec2(9, 9)));
        assert!(!rect_contains(r, vec2(10, 5)));
        assert!(!rect_contains(r, vec2(5, 10)));
    }

    #[test]
    fn ids_are_unique() {
        let a = Id::next();
        assert_ne!(a, Id::next());
        assert_eq!(a, Id(a.raw()));
    }
}
