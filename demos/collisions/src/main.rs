//! Headless sandbox run: report contact counts and energy drift.

use arcade::GameRunner;
use collisions::{Sandbox, SandboxConfig};

const FRAMES: u32 = 1800;

fn main() {
    env_logger::init();

    let mut runner = match GameRunner::new(Sandbox::new(SandboxConfig::default())) {
        Ok(runner) => runner,
        Err(err) => {
            log::error!("cannot start sandbox: {}", err);
            std::process::exit(1);
        }
    };
    runner.init();

    let start = runner.game().kinetic_energy(runner.ctx());
    for frame in 1..=FRAMES {
        runner.run_frames(1);
        if frame % 600 == 0 {
            log::info!(
                "frame {}: {} circle contacts, {} wall contacts",
                frame,
                runner.game().circle_contacts(),
                runner.game().wall_contacts()
            );
        }
    }

    let game = runner.game();
    let end = game.kinetic_energy(runner.ctx());
    let drift = if start > 0.0 { (end - start) / start } else { 0.0 };
    println!(
        "circles={} circle_contacts={} wall_contacts={} energy_drift={:.3e}",
        game.circles().len(),
        game.circle_contacts(),
        game.wall_contacts(),
        drift
    );
}
