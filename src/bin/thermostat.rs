//! Runs the navigation core headless against a scripted sequence of touches.
//!
//! Pass a TOML file to override the default configuration. Set `RUST_LOG=debug` to follow along.

use crossbeam::channel::{self, Receiver, TryRecvError};
use log::{debug, info};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thermostat::events::{Pointer, PointerAction};
use thermostat::motion::MonotonicClock;
use thermostat::{Config, MainCanvas, NavigationState, ThermostatModel, Ui, ValueProvider};

/// Scripted touches as (delay before the touch in ms, x and y as fractions of the display).
const SCRIPT: &[(u64, f64, f64)] = &[
    (2000, 0.25, 0.95),
    (3000, 0.5, 0.95),
    (3000, 0.75, 0.95),
    (500, 0.75, 0.95),
    (3000, 0.9, 0.99),
];

/// Plays back the script on its own thread, like a touch controller would.
fn play_script(config: &Config) -> Receiver<Pointer> {
    let (send, recv) = channel::unbounded();
    let width = f64::from(config.width);
    let height = f64::from(config.height);

    thread::spawn(move || {
        for &(delay, x, y) in SCRIPT {
            thread::sleep(Duration::from_millis(delay));
            let pointer = Pointer::touch(PointerAction::Pressed, x * width, y * height);
            if send.send(pointer).is_err() {
                break;
            }
        }
    });
    recv
}

fn main() -> thermostat::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    info!("display {}x{}", config.width, config.height);

    let model = Arc::new(ThermostatModel::new());
    let _provider = ValueProvider::start(Arc::clone(&model), config.sensor_update_period());

    let canvas = MainCanvas::new(&config, Arc::clone(&model));
    let mut ui = Ui::new(&config, canvas, MonotonicClock::new());
    let touches = play_script(&config);

    let mut script_done = false;
    let mut state = ui.state();
    loop {
        loop {
            match touches.try_recv() {
                Ok(pointer) => {
                    let consumed = ui.handle_event(&pointer);
                    debug!("touch at ({}, {}): consumed {}", pointer.x(), pointer.y(), consumed);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    script_done = true;
                    break;
                }
            }
        }

        ui.tick();
        if ui.state() != state {
            state = ui.state();
            info!("{:?} (overlay at {})", state, ui.overlay_elapsed());
        }

        if script_done && state == NavigationState::Home {
            break;
        }
        thread::sleep(config.frame_period());
    }

    let readings = model.readings();
    info!("done: {:?}", readings);
    Ok(())
}
