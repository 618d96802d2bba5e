pub mod api;
pub mod components;
pub mod core;
pub mod input;
pub mod runner;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::error::EngineError;
pub use api::game::{CollisionConfig, EngineContext, Game, GameConfig};
pub use api::types::{events_as_floats, EntityId, GameEvent, SoundEvent};
pub use components::entity::{BoundingShape, Entity, Kinetic, WorldShape};
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue, PointerPhase, PointerSample};
pub use runner::GameRunner;
pub use systems::collision::{resolve_collisions, CollisionEvent, ContactKind};
pub use systems::motion::integrate;
