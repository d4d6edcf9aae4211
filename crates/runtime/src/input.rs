use crate::frame::Frame;

/// Pointer input in viewport pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
}

/// An input event tagged with the frame it arrived during.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QueuedInput {
    pub frame_index: u64,
    pub event: InputEvent,
}

/// FIFO of pointer input waiting for the next frame.
///
/// Event listeners only push; the frame callback drains the queue once, in
/// arrival order, before it reads rotation state.
#[derive(Debug, Default)]
pub struct InputQueue {
    frame_index: u64,
    events: Vec<QueuedInput>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the frame that subsequent events belong to.
    pub fn begin_frame(&mut self, frame: Frame) {
        self.frame_index = frame.index;
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(QueuedInput {
            frame_index: self.frame_index,
            event,
        });
    }

    pub fn events(&self) -> &[QueuedInput] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<QueuedInput> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{InputEvent, InputQueue};
    use crate::frame::Frame;

    #[test]
    fn records_events_with_frame_index() {
        let mut queue = InputQueue::new();
        queue.begin_frame(Frame::new(2, 0.1));
        queue.push(InputEvent::PointerDown { x: 1.0, y: 2.0 });
        assert_eq!(queue.events().len(), 1);
        assert_eq!(queue.events()[0].frame_index, 2);
    }

    #[test]
    fn drain_preserves_order_and_clears() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        queue.push(InputEvent::PointerMove { x: 5.0, y: 0.0 });
        queue.push(InputEvent::PointerUp);

        let drained: Vec<_> = queue.drain().into_iter().map(|q| q.event).collect();
        assert_eq!(
            drained,
            vec![
                InputEvent::PointerDown { x: 0.0, y: 0.0 },
                InputEvent::PointerMove { x: 5.0, y: 0.0 },
                InputEvent::PointerUp,
            ]
        );
        assert!(queue.is_empty());
    }
}
