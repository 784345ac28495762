//! Simulated sensor values.

use crate::convert;
use crate::model::ThermostatModel;
use crossbeam::channel::{self, RecvTimeoutError, Sender};
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Lowest simulated temperature, in hundredths of °C (60 °F).
const TEMPERATURE_LOWER_BOUND: i32 = 1555;
/// Highest simulated temperature, in hundredths of °C (90 °F).
const TEMPERATURE_UPPER_BOUND: i32 = 3222;
/// The threshold is re-drawn every this many runs.
const THRESHOLD_UPDATE_RATE: u32 = 2;
/// 10000 is 100 %.
const HUMIDITY_UPPER_BOUND: i32 = 10_000;
const PRESSURE_LOWER_BOUND: i32 = 900;
const PRESSURE_UPPER_BOUND: i32 = 1200;
/// How far the temperature moves toward the threshold per run, in hundredths of °C.
pub const TEMPERATURE_STEP: i32 = 100;

/// Generates plausible sensor values and pushes them into the model.
///
/// The temperature drifts toward a threshold that is re-drawn every other run.
#[derive(Debug)]
pub struct DemoTask<R = StdRng> {
    rng: R,
    model: Arc<ThermostatModel>,
    temperature: i32,
    threshold: i32,
    runs_since_threshold: u32,
}

impl DemoTask<StdRng> {
    pub fn new(model: Arc<ThermostatModel>) -> Self {
        DemoTask::with_rng(model, StdRng::from_os_rng())
    }
}

impl<R: Rng> DemoTask<R> {
    pub fn with_rng(model: Arc<ThermostatModel>, mut rng: R) -> Self {
        let temperature = random_temperature(&mut rng);
        let threshold = random_temperature(&mut rng);
        DemoTask {
            rng,
            model,
            temperature,
            threshold,
            // so that the first run draws a threshold
            runs_since_threshold: THRESHOLD_UPDATE_RATE,
        }
    }

    /// Simulated temperature in hundredths of °C.
    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    /// Simulated threshold in hundredths of °C.
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Produces one set of values.
    pub fn run(&mut self) {
        self.step_temperature();
        let temperature = convert::hundredths_celsius_to_fahrenheit(self.temperature);
        let humidity =
            convert::hundredths_percent_to_percent(self.rng.random_range(0..HUMIDITY_UPPER_BOUND));
        let pressure = self
            .rng
            .random_range(PRESSURE_LOWER_BOUND..PRESSURE_UPPER_BOUND);

        self.model.set_temperature(temperature);
        self.model.set_humidity(humidity);
        self.model.set_pressure(pressure);

        self.runs_since_threshold += 1;
        if self.runs_since_threshold >= THRESHOLD_UPDATE_RATE {
            self.threshold = random_temperature(&mut self.rng);
            let threshold = convert::hundredths_celsius_to_fahrenheit(self.threshold);
            self.model.set_temperature_threshold(threshold);
            self.runs_since_threshold = 0;
        }
        debug!(
            "demo task: {}°F {}% {}hPa, heading for {}",
            temperature, humidity, pressure, self.threshold
        );
    }

    fn step_temperature(&mut self) {
        if self.temperature > self.threshold {
            self.temperature = (self.temperature - TEMPERATURE_STEP).max(self.threshold);
        } else if self.temperature < self.threshold {
            self.temperature = (self.temperature + TEMPERATURE_STEP).min(self.threshold);
        }
    }
}

fn random_temperature<R: Rng>(rng: &mut R) -> i32 {
    rng.random_range(TEMPERATURE_LOWER_BOUND..TEMPERATURE_UPPER_BOUND)
}

/// Runs a [`DemoTask`] periodically on a background thread.
///
/// The first run happens right away. The thread is stopped and joined by [`stop`](Self::stop) or
/// when the provider is dropped.
#[derive(Debug)]
pub struct ValueProvider {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl ValueProvider {
    pub fn start(model: Arc<ThermostatModel>, period: Duration) -> ValueProvider {
        ValueProvider::start_task(DemoTask::new(model), period)
    }

    pub fn start_task<R: Rng + Send + 'static>(mut task: DemoTask<R>, period: Duration) -> Self {
        let (stop, stopped) = channel::bounded(1);
        let thread = thread::spawn(move || loop {
            task.run();
            match stopped.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        info!("value provider: started, period {:?}", period);

        ValueProvider {
            stop: Some(stop),
            thread: Some(thread),
        }
    }

    /// Stops the background thread and waits for it.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            // the thread may have exited already
            let _ = stop.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("value provider: thread panicked");
            }
            info!("value provider: stopped");
        }
    }
}

impl Drop for ValueProvider {
    fn drop(&mut self) {
        self.stop();
    }
}
