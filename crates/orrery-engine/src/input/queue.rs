use glam::Vec2;

/// Browser input, forwarded by the page through the bridge exports.
/// Pointer coordinates are window pixels with the origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// Positive `delta_y` scrolls down (away from the page).
    Wheel { delta_y: f32 },
    /// New viewport size in CSS pixels.
    Resize { width: f32, height: f32 },
    /// Page-defined event (DOM buttons and the like). The engine never looks
    /// at `kind`; `a`, `b`, `c` are free payload.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    /// Window position for pointer events.
    pub fn pointer(&self) -> Option<Vec2> {
        match *self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerUp { x, y }
            | InputEvent::PointerMove { x, y } => Some(Vec2::new(x, y)),
            _ => None,
        }
    }
}

/// Events collected between two ticks. The page pushes at any time; the
/// runner shows the whole batch to the game once, then clears it.
#[derive(Debug, Default)]
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

    /// Take the pending batch, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_is_taken_once() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Wheel { delta_y: -120.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events[1], InputEvent::Wheel { delta_y: -120.0 });
        assert!(q.is_empty());
        assert!(q.drain().is_empty());
    }

    #[test]
    fn pointer_position_only_for_pointer_events() {
        assert_eq!(
            InputEvent::PointerUp { x: 3.0, y: 4.0 }.pointer(),
            Some(Vec2::new(3.0, 4.0))
        );
        assert_eq!(InputEvent::Resize { width: 1.0, height: 1.0 }.pointer(), None);
        assert_eq!(InputEvent::Custom { kind: 2, a: 1.5, b: 0.0, c: 0.0 }.pointer(), None);
    }
}
