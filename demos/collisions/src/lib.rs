mod arena;
mod game;

pub use arena::{arena_outline, obstacle_outline, Layout};
pub use game::{events, game_events, sounds, Sandbox, SandboxConfig};
