use lina::{BiTransform, Point2};

/// Stage of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// Input from the host, in host terms: pointer positions are canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer { phase: PointerPhase, x: f64, y: f64 },
    Key { code: u32, pressed: bool },
    /// Game-defined command from the UI layer (reset, pause, ...).
    Command { kind: u32, value: f64 },
}

impl InputEvent {
    pub fn pointer(phase: PointerPhase, at: Point2) -> Self {
        InputEvent::Pointer {
            phase,
            x: at.x,
            y: at.y,
        }
    }
}

/// A pointer event mapped into world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub phase: PointerPhase,
    pub world: Point2,
}

/// Events gathered between fixed steps. The runner hands the queue to one
/// `Game::update` and then empties it.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    /// Queue an event. Pointer events with non-finite coordinates are
    /// dropped, since they cannot be mapped into the world.
    pub fn push(&mut self, event: InputEvent) {
        if let InputEvent::Pointer { x, y, .. } = event {
            if !(x.is_finite() && y.is_finite()) {
                log::warn!("dropping pointer event at ({}, {})", x, y);
                return;
            }
        }
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Pointer events in arrival order, mapped through the inverse of `viewport`.
    pub fn pointer_samples(&self, viewport: &BiTransform) -> Vec<PointerSample> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                InputEvent::Pointer { phase, x, y } => Some(PointerSample {
                    phase,
                    world: viewport.inverse_point(Point2::new(x, y)),
                }),
                _ => None,
            })
            .collect()
    }

    /// Value of the first queued command of `kind`.
    pub fn command(&self, kind: u32) -> Option<f64> {
        self.events.iter().find_map(|event| match *event {
            InputEvent::Command { kind: k, value } if k == kind => Some(value),
            _ => None,
        })
    }

    pub fn key_pressed(&self, code: u32) -> bool {
        self.events.iter().any(|event| {
            matches!(*event, InputEvent::Key { code: c, pressed: true } if c == code)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lina::Matrix3;

    #[test]
    fn pointer_samples_land_in_world_space() {
        // 2 canvas pixels per world unit, y flipped.
        let viewport = BiTransform::viewport(100.0, 50.0, 200.0, 100.0).unwrap();
        let mut q = InputQueue::new();
        q.push(InputEvent::pointer(PointerPhase::Down, Point2::new(20.0, 100.0)));
        q.push(InputEvent::Key { code: 32, pressed: true });
        q.push(InputEvent::pointer(PointerPhase::Up, Point2::new(200.0, 0.0)));

        let samples = q.pointer_samples(&viewport);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].phase, PointerPhase::Down);
        assert!(samples[0].world.distance_to(Point2::new(10.0, 0.0)) < 1e-12);
        assert_eq!(samples[1].phase, PointerPhase::Up);
        assert!(samples[1].world.distance_to(Point2::new(100.0, 50.0)) < 1e-12);
    }

    #[test]
    fn identity_viewport_keeps_coordinates() {
        let viewport = BiTransform::new(Matrix3::identity()).unwrap();
        let mut q = InputQueue::new();
        q.push(InputEvent::pointer(PointerPhase::Move, Point2::new(3.0, 4.0)));
        assert_eq!(q.pointer_samples(&viewport)[0].world, Point2::new(3.0, 4.0));
    }

    #[test]
    fn non_finite_pointer_is_dropped() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Pointer { phase: PointerPhase::Down, x: f64::NAN, y: 1.0 });
        q.push(InputEvent::Pointer { phase: PointerPhase::Move, x: 1.0, y: f64::INFINITY });
        assert!(q.is_empty());
    }

    #[test]
    fn commands_and_keys() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Command { kind: 7, value: 1.5 });
        q.push(InputEvent::Command { kind: 7, value: 2.5 });
        q.push(InputEvent::Key { code: 32, pressed: false });
        assert_eq!(q.len(), 3);
        assert_eq!(q.command(7), Some(1.5));
        assert_eq!(q.command(8), None);
        assert!(!q.key_pressed(32));

        q.push(InputEvent::Key { code: 32, pressed: true });
        assert!(q.key_pressed(32));
        assert_eq!(q.drain().len(), 4);
        assert!(q.is_empty());
    }
}
