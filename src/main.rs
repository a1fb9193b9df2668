//! Polyrun headless host
//!
//! Drives the simulation with a fixed-step accumulator and a scripted input
//! sequence, logging a trace of the player's motion.
//!
//! Usage: `polyrun [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Polyrun (native) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host embeds the library directly
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use polyrun::consts::{MAX_SUBSTEPS, SIM_DT};
    use polyrun::sim::{GameState, KeyState, tick};
    use polyrun::{Result, Tuning};

    /// Simulated wall-clock length
    const RUN_SECONDS: f64 = 12.0;
    /// Host frame time, deliberately not a multiple of the sim step
    const FRAME_DT: f64 = 1.0 / 50.0;

    /// Host loop state
    struct Host {
        state: GameState,
        accumulator: f64,
        elapsed: f64,
    }

    impl Host {
        fn new(state: GameState) -> Self {
            Self {
                state,
                accumulator: 0.0,
                elapsed: 0.0,
            }
        }

        /// Run as many fixed ticks as the frame time allows
        fn frame(&mut self, dt: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;
            self.elapsed += dt;

            let input = scripted_input(self.elapsed);
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }
    }

    /// Fall, run right, jump, run back left, then press both keys
    fn scripted_input(t: f64) -> KeyState {
        match t {
            t if t < 2.0 => KeyState::default(),
            t if t < 5.0 => KeyState {
                right: true,
                jump: (4.0..4.1).contains(&t),
                ..Default::default()
            },
            t if t < 9.0 => KeyState {
                left: true,
                ..Default::default()
            },
            _ => KeyState {
                left: true,
                right: true,
                jump: false,
            },
        }
    }

    pub fn run() -> Result<()> {
        let tuning = match std::env::args().nth(1) {
            Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
            None => Tuning::default(),
        };

        let state = GameState::with_demo_map(tuning)?;
        for (i, object) in state.map.objects.iter().enumerate() {
            log::debug!(
                "obstacle {}: {} vertices, {} pieces, colours {:06x?}",
                i,
                object.outline().len(),
                object.pieces().len(),
                object.colors()
            );
        }
        let mut host = Host::new(state);

        let frames = (RUN_SECONDS / FRAME_DT).round() as u32;
        for frame in 0..frames {
            host.frame(FRAME_DT);

            if frame % 25 == 0 {
                let player = &host.state.player;
                println!(
                    "t={:5.2}s tick={:4} pos=({:7.2}, {:7.2}) vel=({:5.2}, {:5.2}) {:?} {:?} contacts={}",
                    host.elapsed,
                    host.state.time_ticks,
                    player.position.x,
                    player.position.y,
                    player.velocity.x,
                    player.velocity.y,
                    player.movement_state,
                    player.direction,
                    host.state.collision_vectors().len()
                );
            }
        }

        log::info!(
            "Finished {} ticks, grounded={}",
            host.state.time_ticks,
            host.state.grounded
        );
        Ok(())
    }
}
