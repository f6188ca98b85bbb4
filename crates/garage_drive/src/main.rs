//! Headless scripted drive through the garage scene
//!
//! Usage: `garage_drive [--realtime] [config.toml | config.ron]`
//!
//! Runs a fixed script of key presses through the input layer and the fixed
//! timestep, logging a summary after each phase and printing the final
//! snapshot as RON. Without `--realtime` frames are synthesized at 60 Hz and
//! the run finishes as fast as the machine allows.

use std::time::Duration;

use garage_sim::foundation::logging;
use garage_sim::prelude::*;
use thiserror::Error;

/// Synthetic frame length when not running in real time
const FRAME_TIME: f32 = 1.0 / 60.0;

#[derive(Error, Debug)]
enum DriveError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Simulation(#[from] SimulationError),

    #[error("Failed to serialize snapshot: {0}")]
    Snapshot(#[from] ron::Error),
}

/// One step of the script: hold `keys` for `seconds`
struct Phase {
    name: &'static str,
    seconds: f32,
    keys: fn(&KeyBindings) -> Vec<KeyCode>,
}

fn script() -> Vec<Phase> {
    vec![
        Phase { name: "open garage door", seconds: 1.5, keys: |b| vec![b.toggle_gate] },
        Phase { name: "reverse into garage", seconds: 5.0, keys: |b| vec![b.brake] },
        Phase { name: "settle", seconds: 1.0, keys: |_| Vec::new() },
        Phase { name: "open both doors", seconds: 1.0, keys: |b| vec![b.toggle_left_door, b.toggle_right_door] },
        Phase { name: "interior camera", seconds: 0.5, keys: |b| vec![b.camera_interior] },
        Phase { name: "follow camera", seconds: 0.5, keys: |b| vec![b.camera_follow] },
        Phase { name: "close doors", seconds: 1.0, keys: |b| vec![b.toggle_left_door, b.toggle_right_door] },
        Phase { name: "drive out turning left", seconds: 4.0, keys: |b| vec![b.accelerate, b.steer_left] },
        Phase { name: "coast", seconds: 2.0, keys: |_| Vec::new() },
        Phase { name: "free-fly camera", seconds: 1.5, keys: |b| vec![b.camera_follow, b.camera_forward, b.camera_up] },
        Phase { name: "close garage door", seconds: 1.5, keys: |b| vec![b.toggle_gate] },
    ]
}

struct ScriptedDrive {
    sim: Simulation,
    input: InputState,
    clock: FixedTimestep,
    realtime: bool,
}

impl ScriptedDrive {
    fn new(config: SimulationConfig, realtime: bool) -> Result<Self, DriveError> {
        let sim = Simulation::new(config)?;
        let clock = FixedTimestep::new(sim.config().timestep);
        Ok(Self {
            sim,
            input: InputState::new(),
            clock,
            realtime,
        })
    }

    fn run(&mut self) {
        for line in self.sim.config().controls.help_lines() {
            log::info!("  {}", line);
        }

        for phase in script() {
            self.run_phase(&phase);
            if self.input.quit_requested() {
                log::info!("Quit requested, stopping early");
                break;
            }
        }
    }

    fn run_phase(&mut self, phase: &Phase) {
        let keys = (phase.keys)(&self.sim.config().controls);
        for &key in &keys {
            self.input.handle_key_input(key, true);
        }

        let mut timer = Timer::new();
        let mut elapsed = 0.0;
        let mut ticks = 0;
        while elapsed < phase.seconds {
            let frame_time = if self.realtime {
                std::thread::sleep(Duration::from_secs_f32(FRAME_TIME));
                timer.update();
                timer.delta_time()
            } else {
                FRAME_TIME
            };
            elapsed += frame_time;

            for _ in 0..self.clock.advance(frame_time) {
                let intents = self.input.take_intents(&self.sim.config().controls);
                self.sim.step(&intents);
                ticks += 1;
            }
        }

        for &key in &keys {
            self.input.handle_key_input(key, false);
        }

        let vehicle = self.sim.vehicle();
        log::info!(
            "{:<24} {:>4} ticks | pos ({:6.2}, {:6.2}) heading {:6.1} speed {:5.2} | doors L {:.2} R {:.2} gate {:.2} | camera {:?}",
            phase.name,
            ticks,
            vehicle.x,
            vehicle.z,
            vehicle.heading,
            vehicle.speed,
            vehicle.left_door_open(),
            vehicle.right_door_open(),
            self.sim.garage_door().open(),
            self.sim.camera().mode,
        );
    }
}

fn main() -> Result<(), DriveError> {
    logging::init_with_default("info");

    let mut realtime = false;
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--realtime" {
            realtime = true;
        } else {
            config_path = Some(arg);
        }
    }

    let config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            SimulationConfig::load_from_file(&path)?
        }
        None => SimulationConfig::default(),
    };

    let stopwatch = Stopwatch::start_new();
    let mut drive = ScriptedDrive::new(config, realtime)?;
    drive.run();

    log::info!(
        "Ran {} ticks ({:.1}s simulated) in {:.1}ms",
        drive.sim.ticks(),
        drive.clock.total_steps() as f32 * drive.clock.step(),
        stopwatch.elapsed_millis()
    );

    let snapshot = ron::ser::to_string_pretty(&drive.sim.snapshot(), ron::ser::PrettyConfig::default())?;
    println!("{snapshot}");
    Ok(())
}
