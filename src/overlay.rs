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

struct OverlayLayer {
    id: Id,
    commands: Vec<Command>,
}

#[derive(Default)]
/// Frame-scoped queue of deferred command layers.
///
/// Open lists record themselves here during the normal draw pass; the layers are appended after every other
/// command of the frame so they paint on top regardless of widget nesting.
pub struct OverlayQueue {
    layers: Vec<OverlayLayer>,
}

impl OverlayQueue {
    /// Creates an empty queue.
    pub fn new() -> Self { Self::default() }

    /// Queues a layer for `id`, replacing any layer it already queued this frame.
    pub fn queue(&mut self, id: Id, commands: Vec<Command>) {
        match self.layers.iter_mut().find(|l| l.id == id) {
            Some(layer) => layer.commands = commands,
            None => self.layers.push(OverlayLayer { id, commands }),
        }
    }

    /// Removes the pending layer of a torn-down widget. Returns `true` if one was queued.
    pub fn discard(&mut self, id: Id) -> bool {
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        self.layers.len() != before
    }

    /// Returns `true` if `id` has a pending layer.
    pub fn contains(&self, id: Id) -> bool { self.layers.iter().any(|l| l.id == id) }

    /// Number of pending layers.
    pub fn len(&self) -> usize { self.layers.len() }

    /// Returns `true` when nothing is pending.
    pub fn is_empty(&self) -> bool { self.layers.is_empty() }

    /// Drops every pending layer without drawing it.
    pub fn clear(&mut self) { self.layers.clear(); }

    /// Appends every pending layer to `out` in queue order and empties the queue. Returns the number of layers flushed.
    pub fn flush(&mut self, out: &mut Vec<Command>) -> usize {
        let count = self.layers.len();
        if count == 0 {
            return 0;
        }
        out.push(Command::Clip { rect: UNCLIPPED_RECT });
        for layer in self.layers.drain(..) {
            out.extend(layer.commands);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(x: i32) -> Command { Command::Rect { rect: rect(x, 0, 1, 1), color: Color::default() } }

    fn xs(out: &[Command]) -> Vec<i32> {
        out.iter()
            .filter_map(|c| match c {
                Command::Rect { rect, .. } => Some(rect.x),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn flush_preserves_queue_order_and_empties() {
        let mut q = OverlayQueue::new();
        let (a, b) = (Id::next(), Id::next());
        q.queue(a, vec![fill(1)]);
        q.queue(b, vec![fill(2)]);
        let mut out = vec![fill(0)];
        assert_eq!(q.flush(&mut out), 2);
        assert_eq!(xs(&out), vec![0, 1, 2]);
        assert!(q.is_empty());
        assert_eq!(q.flush(&mut out), 0);
    }

    #[test]
    fn requeue_replaces_and_discard_removes() {
        let mut q = OverlayQueue::new();
        let (a, b) = (Id::next(), Id::next());
        q.queue(a, vec![fill(1)]);
        q.queue(b, vec![fill(2)]);
        q.queue(a, vec![fill(3)]);
        assert_eq!(q.len(), 2);
        assert!(q.discard(b));
        assert!(!q.discard(b));
        let mut out = Vec::new();
        q.flush(&mut out);
        assert_eq!(xs(&out), vec![3]);
    }
}
