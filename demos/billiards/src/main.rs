//! Headless break shot: rack, shoot, run until the table is still.

use arcade::{GameRunner, InputEvent, PointerPhase};
use billiards::{BilliardsGame, GameState};
use lina::Point2;

const MAX_FRAMES: u32 = 3600;

fn main() {
    env_logger::init();

    let mut runner = match GameRunner::new(BilliardsGame::new()) {
        Ok(runner) => runner,
        Err(err) => {
            log::error!("cannot start billiards: {}", err);
            std::process::exit(1);
        }
    };
    runner.init();

    // Pull back from the cue ball along the table axis and release.
    let cue = runner
        .game()
        .cue_ball()
        .and_then(|id| runner.ctx().scene.get(id))
        .map(|e| e.pos())
        .unwrap_or(Point2::ORIGIN);
    let pull = runner.ctx().to_canvas(Point2::new(cue.x - 400.0, cue.y + 6.0));
    runner.push_input(InputEvent::pointer(PointerPhase::Down, pull));
    runner.push_input(InputEvent::pointer(PointerPhase::Up, pull));

    let mut frames = 0;
    let mut contacts = 0;
    while frames < MAX_FRAMES {
        runner.run_frames(1);
        frames += 1;
        contacts += runner.ctx().collisions().len();
        if frames > 1 && runner.game().state() == GameState::Aiming {
            break;
        }
    }

    let game = runner.game();
    log::info!(
        "table still after {} frames: {} contacts, {} pocketed, {} fouls, {} balls left",
        frames,
        contacts,
        game.score(),
        game.fouls(),
        game.balls_remaining()
    );
    println!(
        "frames={} pocketed={} fouls={} remaining={}",
        frames,
        game.score(),
        game.fouls(),
        game.balls_remaining()
    );
}
