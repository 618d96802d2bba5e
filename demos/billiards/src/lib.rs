mod balls;
mod game;

pub use balls::{rack_positions, BallType, BALLS};
pub use game::{events, game_events, sounds, BilliardsGame, GameState};
