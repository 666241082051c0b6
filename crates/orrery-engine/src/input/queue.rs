/// Input event types the engine understands.
/// Pointer coordinates are CSS pixels relative to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began. `button`: 0 = primary, 1 = middle, 2 = secondary.
    PointerDown { x: f32, y: f32, button: u32 },
    /// A touch/click ended.
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved.
    PointerMove { x: f32, y: f32 },
    /// Mouse wheel; negative `delta_y` means "away from the user" (zoom in).
    Wheel { delta_y: f32 },
    /// The page scrolled. `top` is the body's bounding-rect top: zero at the
    /// top of the page, negative once scrolled down.
    Scroll { top: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
