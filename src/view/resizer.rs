//! Drag-to-resize state machine.
//!
//! `Idle -> Resizing -> Idle`. Entering `Resizing` takes ownership of the
//! window-level listeners that feed it; leaving it by any path (release,
//! pointer leaving the surface, unmount) drops them.

use imgnode_ui::{ListenerHandle, Rectangle};
use web_time::{Duration, Instant};

use crate::model::Size;

/// Limits a drag is clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthBounds {
    pub min: f64,
    pub max: Option<f64>,
}

impl WidthBounds {
    pub fn clamp(&self, width: f64) -> f64 {
        let width = width.max(self.min);
        match self.max {
            Some(max) => width.min(max.max(self.min)),
            None => width,
        }
    }
}

/// Size for a pointer at `pointer_x` while the frame's left edge sits at `frame_left`.
///
/// Width is rounded to whole pixels before clamping; height follows from the
/// ratio. Without a known ratio there is nothing to derive, so the move is
/// ignored.
pub fn resize_to_pointer(
    size: &Size,
    pointer_x: f32,
    frame_left: f32,
    bounds: WidthBounds,
) -> Option<Size> {
    let ratio = size.aspect_ratio?;
    let width = bounds.clamp((f64::from(pointer_x) - f64::from(frame_left)).round());
    Some(Size::pixels(width, ratio.height_for(width), Some(ratio)))
}

/// Spaces applied moves at least `interval` apart, remembering the latest
/// skipped position.
#[derive(Debug)]
pub struct FrameCoalescer {
    interval: Duration,
    last_applied: Option<Instant>,
    pending: Option<f32>,
}

impl FrameCoalescer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_applied: None,
            pending: None,
        }
    }

    /// Returns the position to apply now, or `None` if it was deferred.
    pub fn offer(&mut self, x: f32) -> Option<f32> {
        if self.interval.is_zero() {
            return Some(x);
        }
        let now = Instant::now();
        match self.last_applied {
            Some(last) if now.duration_since(last) < self.interval => {
                self.pending = Some(x);
                None
            }
            _ => {
                self.last_applied = Some(now);
                self.pending = None;
                Some(x)
            }
        }
    }

    /// Take the latest deferred position.
    pub fn flush(&mut self) -> Option<f32> {
        self.pending.take()
    }
}

/// An interaction in progress.
#[derive(Debug)]
pub struct ActiveResize {
    /// Node bounds captured at pointer-down, fixed for the whole drag
    frame: Rectangle,
    coalescer: FrameCoalescer,
    listeners: Vec<ListenerHandle>,
}

/// Result of leaving the `Resizing` state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishedResize {
    pub frame: Rectangle,
    /// Last deferred pointer position, still to be applied
    pub pending_x: Option<f32>,
}

#[derive(Debug, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Resizing(ActiveResize),
}

#[derive(Debug, Default)]
pub struct DragResizer {
    state: ResizeState,
}

impl DragResizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, ResizeState::Resizing(_))
    }

    /// Enter `Resizing`, owning `listeners` until the interaction ends.
    /// An interaction already in progress is abandoned first.
    pub fn begin(&mut self, frame: Rectangle, interval: Duration, listeners: Vec<ListenerHandle>) {
        self.cancel();
        log::debug!("Resize started at frame left {}", frame.left());
        self.state = ResizeState::Resizing(ActiveResize {
            frame,
            coalescer: FrameCoalescer::new(interval),
            listeners,
        });
    }

    /// Number of listeners currently owned
    pub fn listener_count(&self) -> usize {
        match &self.state {
            ResizeState::Resizing(active) => active.listeners.len(),
            ResizeState::Idle => 0,
        }
    }

    /// Feed a pointer position. Returns the frame and position to apply now.
    pub fn offer_move(&mut self, x: f32) -> Option<(Rectangle, f32)> {
        match &mut self.state {
            ResizeState::Resizing(active) => active.coalescer.offer(x).map(|x| (active.frame, x)),
            ResizeState::Idle => None,
        }
    }

    /// Leave `Resizing`, detaching its listeners. `None` when already idle.
    pub fn finish(&mut self) -> Option<FinishedResize> {
        match std::mem::take(&mut self.state) {
            ResizeState::Resizing(mut active) => {
                let finished = FinishedResize {
                    frame: active.frame,
                    pending_x: active.coalescer.flush(),
                };
                drop(active);
                log::debug!("Resize finished");
                Some(finished)
            }
            ResizeState::Idle => None,
        }
    }

    /// Abandon any running interaction without reporting it.
    pub fn cancel(&mut self) {
        if let ResizeState::Resizing(_) = std::mem::take(&mut self.state) {
            log::debug!("Resize abandoned");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AspectRatio;
    use imgnode_ui::{EventHub, EventKind};

    const BOUNDS: WidthBounds = WidthBounds {
        min: 100.0,
        max: None,
    };

    fn sized(ratio: f64) -> Size {
        Size::pixels(350.0, 350.0 / ratio, AspectRatio::new(ratio))
    }

    #[test]
    fn test_resize_to_pointer() {
        let next = resize_to_pointer(&sized(2.0), 250.0, 50.0, BOUNDS).unwrap();
        assert_eq!(next.width.to_css(), "200px");
        assert_eq!(next.height.to_css(), "100px");
        assert_eq!(next.aspect_ratio, AspectRatio::new(2.0));
    }

    #[test]
    fn test_fractional_pointer_gives_whole_pixels() {
        let next = resize_to_pointer(&sized(2.0), 250.3, 50.0, BOUNDS).unwrap();
        assert_eq!(next.width.to_css(), "200px");
        assert_eq!(next.height.to_css(), "100px");

        let next = resize_to_pointer(&sized(2.0), 251.6, 50.4, BOUNDS).unwrap();
        assert_eq!(next.width.to_css(), "201px");
        assert_eq!(next.height.to_css(), "100.5px");
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let next = resize_to_pointer(&sized(2.0), 80.0, 50.0, BOUNDS).unwrap();
        assert_eq!(next.width.to_css(), "100px");
        assert_eq!(next.height.to_css(), "50px");

        // Pointer left of the frame
        let next = resize_to_pointer(&sized(2.0), 10.0, 50.0, BOUNDS).unwrap();
        assert_eq!(next.width.to_css(), "100px");
    }

    #[test]
    fn test_resize_unbounded_and_bounded() {
        let next = resize_to_pointer(&sized(1.0), 5050.0, 50.0, BOUNDS).unwrap();
        assert_eq!(next.width.to_css(), "5000px");

        let capped = WidthBounds {
            min: 100.0,
            max: Some(800.0),
        };
        let next = resize_to_pointer(&sized(1.0), 5050.0, 50.0, capped).unwrap();
        assert_eq!(next.width.to_css(), "800px");
        assert_eq!(next.height.to_css(), "800px");
    }

    #[test]
    fn test_resize_without_ratio_is_ignored() {
        let size = Size::pixels(300.0, 200.0, None);
        assert!(resize_to_pointer(&size, 250.0, 50.0, BOUNDS).is_none());
    }

    #[test]
    fn test_coalescer_disabled_passes_everything() {
        let mut coalescer = FrameCoalescer::new(Duration::ZERO);
        assert_eq!(coalescer.offer(1.0), Some(1.0));
        assert_eq!(coalescer.offer(2.0), Some(2.0));
        assert_eq!(coalescer.flush(), None);
    }

    #[test]
    fn test_coalescer_defers_within_interval() {
        let mut coalescer = FrameCoalescer::new(Duration::from_secs(3600));
        assert_eq!(coalescer.offer(1.0), Some(1.0));
        assert_eq!(coalescer.offer(2.0), None);
        assert_eq!(coalescer.offer(3.0), None);
        assert_eq!(coalescer.flush(), Some(3.0));
        assert_eq!(coalescer.flush(), None);
    }

    #[test]
    fn test_state_machine_owns_listeners() {
        let hub = EventHub::new();
        let mut resizer = DragResizer::new();
        assert!(!resizer.is_resizing());
        assert_eq!(resizer.offer_move(10.0), None);

        let frame = Rectangle::new(50.0, 0.0, 350.0, 175.0);
        let listeners = vec![
            hub.listen(EventKind::PointerMove, |_| {}),
            hub.listen(EventKind::PointerUp, |_| {}),
        ];
        resizer.begin(frame, Duration::ZERO, listeners);
        assert!(resizer.is_resizing());
        assert_eq!(resizer.listener_count(), 2);
        assert_eq!(hub.listener_count(), 2);
        assert_eq!(resizer.offer_move(250.0), Some((frame, 250.0)));

        let finished = resizer.finish().unwrap();
        assert_eq!(finished.frame, frame);
        assert_eq!(finished.pending_x, None);
        assert_eq!(hub.listener_count(), 0);
        assert!(resizer.finish().is_none());
    }

    #[test]
    fn test_begin_replaces_running_interaction() {
        let hub = EventHub::new();
        let mut resizer = DragResizer::new();
        let frame = Rectangle::new(0.0, 0.0, 100.0, 100.0);

        resizer.begin(frame, Duration::ZERO, vec![hub.listen(EventKind::PointerMove, |_| {})]);
        resizer.begin(frame, Duration::ZERO, vec![hub.listen(EventKind::PointerMove, |_| {})]);
        assert_eq!(hub.listener_count(), 1);

        resizer.cancel();
        assert_eq!(hub.listener_count(), 0);
        assert!(!resizer.is_resizing());
    }
}
