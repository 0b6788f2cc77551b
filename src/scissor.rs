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

#[derive(Copy, Clone, Debug)]
/// One level of the coordinate transform: where local `(0, 0)` sits in root space and what is visible.
pub struct ScissorFrame {
    /// Global position of the local origin.
    pub origin: Vec2i,
    /// Global clip rectangle.
    pub clip: Recti,
}

#[derive(Clone, Debug)]
/// Stack of nested coordinate spaces, pushed when entering a container and popped on exit.
///
/// The root frame is never popped, so `origin()` and `clip()` are always defined.
pub struct ScissorStack {
    frames: Vec<ScissorFrame>,
}

impl ScissorStack {
    /// Creates a stack whose root frame clips to `viewport`.
    pub fn new(viewport: Recti) -> Self {
        Self {
            frames: vec![ScissorFrame { origin: vec2(0, 0), clip: viewport }],
        }
    }

    /// Creates a stack clipping to `viewport` whose local space starts at `origin`.
    pub fn with_origin(viewport: Recti, origin: Vec2i) -> Self {
        Self {
            frames: vec![ScissorFrame { origin, clip: viewport }],
        }
    }

    /// Creates an unclipped stack rooted at `origin`.
    pub fn unclipped(origin: Vec2i) -> Self {
        let clip = rect(i32::MIN / 2, i32::MIN / 2, i32::MAX, i32::MAX);
        Self { frames: vec![ScissorFrame { origin, clip }] }
    }

    fn top(&self) -> ScissorFrame {
        // the root frame is always present
        self.frames.last().copied().unwrap_or(ScissorFrame { origin: vec2(0, 0), clip: UNCLIPPED_RECT })
    }

    /// Global position of the current local origin.
    pub fn origin(&self) -> Vec2i { self.top().origin }

    /// Current global clip rectangle.
    pub fn clip(&self) -> Recti { self.top().clip }

    /// Number of frames above the root.
    pub fn depth(&self) -> usize { self.frames.len() - 1 }

    /// Enters the nested space described by `local` (a rectangle in the current local space).
    pub fn push(&mut self, local: Recti) {
        let global = self.rect_to_global(local);
        let clip = global.intersect(&self.clip()).unwrap_or(rect(global.x, global.y, 0, 0));
        self.frames.push(ScissorFrame { origin: vec2(global.x, global.y), clip });
    }

    /// Leaves the innermost nested space. Returns `false` if only the root frame remains.
    pub fn pop(&mut self) -> bool {
        if self.frames.len() > 1 {
            self.frames.pop();
            true
        } else {
            false
        }
    }

    /// Converts a root-space point to the current local space.
    pub fn to_local(&self, global: Vec2i) -> Vec2i {
        let o = self.origin();
        vec2(global.x - o.x, global.y - o.y)
    }

    /// Converts a local point to root space.
    pub fn to_global(&self, local: Vec2i) -> Vec2i {
        let o = self.origin();
        vec2(local.x + o.x, local.y + o.y)
    }

    /// Converts a local rectangle to root space.
    pub fn rect_to_global(&self, r: Recti) -> Recti {
        let o = self.origin();
        rect(r.x + o.x, r.y + o.y, r.width, r.height)
    }

    /// Returns `true` if the local point lies inside the current clip.
    pub fn is_visible(&self, local: Vec2i) -> bool { rect_contains(self.clip(), self.to_global(local)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_push_accumulates_origin_and_clip() {
        let mut s = ScissorStack::new(rect(0, 0, 800, 600));
        s.push(rect(100, 50, 300, 200));
        s.push(rect(10, 10, 500, 20));
        let o = s.origin();
        assert_eq!((o.x, o.y), (110, 60));
        let c = s.clip();
        assert_eq!((c.x, c.y, c.width, c.height), (110, 60, 290, 20));
        assert_eq!(s.depth(), 2);

        let p = s.to_local(vec2(115, 65));
        assert_eq!((p.x, p.y), (5, 5));
        let g = s.to_global(p);
        assert_eq!((g.x, g.y), (115, 65));

        assert!(s.pop());
        assert!(s.pop());
        assert!(!s.pop());
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn translated_root_keeps_viewport_clip() {
        let s = ScissorStack::with_origin(rect(0, 0, 100, 100), vec2(40, 40));
        let g = s.rect_to_global(rect(-10, 0, 5, 5));
        assert_eq!((g.x, g.y), (30, 40));
        assert!(s.is_visible(vec2(-10, 0)));
        assert!(!s.is_visible(vec2(70, 0)));
    }

    #[test]
    fn disjoint_push_clips_everything() {
        let mut s = ScissorStack::new(rect(0, 0, 100, 100));
        s.push(rect(200, 200, 10, 10));
        assert!(!s.is_visible(vec2(1, 1)));
        assert_eq!(s.clip().width, 0);
    }
}
