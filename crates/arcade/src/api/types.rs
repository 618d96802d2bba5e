use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene. Never reused within a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A sound event emitted by the game logic.
/// The numeric value maps to a game-defined sound in the audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// A game event handed to the UI layer (score, state changes).
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// Flatten events into the float layout the UI reads.
pub fn events_as_floats(events: &[GameEvent]) -> &[f32] {
    bytemuck::cast_slice(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_flatten_in_field_order() {
        let events = [GameEvent::new(1.0, 2.0, 3.0, 4.0), GameEvent::new(5.0, 6.0, 0.0, 0.0)];
        let flat = events_as_floats(&events);
        assert_eq!(flat.len(), 2 * GameEvent::FLOATS);
        assert_eq!(&flat[..5], &[1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
