/// Input event types the engine understands.
/// The host translates DOM events into these; no app-specific meaning is attached here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press began at canvas coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A press ended at canvas coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// The pointer moved to canvas coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// Scroll wheel. Positive `delta` zooms in.
    Wheel { delta: f32 },
    /// A key was pressed. `key_code` is the DOM key code.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// The drawing surface changed size (pixels).
    Resize { width: u32, height: u32 },
}

/// A queue of input events.
/// The host pushes events between frames; the app reads and the runner drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if a key-down for `key_code` is pending.
    pub fn key_pressed(&self, key_code: u32) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, InputEvent::KeyDown { key_code: k } if *k == key_code))
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: 67 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn key_pressed_matches_only_key_down() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyUp { key_code: 67 });
        assert!(!q.key_pressed(67));
        q.push(InputEvent::KeyDown { key_code: 67 });
        assert!(q.key_pressed(67));
        assert!(!q.key_pressed(32));
    }

    #[test]
    fn preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Wheel { delta: 1.0 });
        q.push(InputEvent::Resize { width: 800, height: 600 });
        let events: Vec<_> = q.iter().copied().collect();
        assert_eq!(events[0], InputEvent::Wheel { delta: 1.0 });
        assert_eq!(events[1], InputEvent::Resize { width: 800, height: 600 });
    }
}
