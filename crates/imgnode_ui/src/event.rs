use crate::Point;

/// Pointer and touch events delivered by the host surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer button pressed.
    PointerDown {
        button: MouseButton,
        position: Point,
    },
    /// Pointer moved.
    PointerMove { position: Point },
    /// Pointer button released.
    PointerUp {
        button: MouseButton,
        position: Point,
    },
    /// Pointer left the tracked surface.
    PointerLeave,
    /// Touch point moved.
    TouchMove { position: Point },
    /// Touch ended.
    TouchEnd,
}

impl Event {
    /// The listener category this event is dispatched to.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::PointerDown { .. } => EventKind::PointerDown,
            Event::PointerMove { .. } => EventKind::PointerMove,
            Event::PointerUp { .. } => EventKind::PointerUp,
            Event::PointerLeave => EventKind::PointerLeave,
            Event::TouchMove { .. } => EventKind::TouchMove,
            Event::TouchEnd => EventKind::TouchEnd,
        }
    }

    /// Position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            Event::PointerDown { position, .. }
            | Event::PointerMove { position }
            | Event::PointerUp { position, .. }
            | Event::TouchMove { position } => Some(*position),
            Event::PointerLeave | Event::TouchEnd => None,
        }
    }
}

/// Event categories listeners can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerLeave,
    TouchMove,
    TouchEnd,
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Whether an event keeps bubbling to container-level handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Let ancestors see the event.
    #[default]
    Continue,
    /// Swallow the event.
    Stop,
}

impl Propagation {
    /// Check if the event was swallowed
    pub fn is_stopped(&self) -> bool {
        matches!(self, Propagation::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_and_position() {
        let down = Event::PointerDown {
            button: MouseButton::Left,
            position: Point::new(4.0, 2.0),
        };
        assert_eq!(down.kind(), EventKind::PointerDown);
        assert_eq!(down.position(), Some(Point::new(4.0, 2.0)));

        assert_eq!(Event::PointerLeave.kind(), EventKind::PointerLeave);
        assert_eq!(Event::TouchEnd.position(), None);
    }

    #[test]
    fn test_propagation_default() {
        assert!(!Propagation::default().is_stopped());
        assert!(Propagation::Stop.is_stopped());
    }
}
