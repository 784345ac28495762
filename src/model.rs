//! Sensor data model.
//!
//! The model is written by the sensor provider thread and read by the UI thread. Observers do not
//! get called back directly; each one gets a [`Subscription`] channel that the UI thread drains
//! once per frame, so observer code always runs on the UI thread.

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use log::{debug, trace};
use parking_lot::Mutex;
use std::time::Duration;
use uuid::Uuid;

/// Kinds of values held by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Indoor temperature in °F.
    Temperature,
    /// Relative humidity in %.
    Humidity,
    /// Pressure in hPa.
    Pressure,
    /// Target temperature in °F.
    TemperatureThreshold,
}

impl ValueKind {
    pub const ALL: [ValueKind; 4] = [
        ValueKind::Temperature,
        ValueKind::Humidity,
        ValueKind::Pressure,
        ValueKind::TemperatureThreshold,
    ];
}

/// A snapshot of all model values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readings {
    pub temperature: i32,
    pub humidity: i32,
    pub pressure: i32,
    pub temperature_threshold: i32,
}

impl Default for Readings {
    fn default() -> Self {
        Readings {
            temperature: 70,
            humidity: 50,
            pressure: 1024,
            temperature_threshold: 69,
        }
    }
}

impl Readings {
    pub fn get(&self, kind: ValueKind) -> i32 {
        match kind {
            ValueKind::Temperature => self.temperature,
            ValueKind::Humidity => self.humidity,
            ValueKind::Pressure => self.pressure,
            ValueKind::TemperatureThreshold => self.temperature_threshold,
        }
    }

    fn set(&mut self, kind: ValueKind, value: i32) {
        match kind {
            ValueKind::Temperature => self.temperature = value,
            ValueKind::Humidity => self.humidity = value,
            ValueKind::Pressure => self.pressure = value,
            ValueKind::TemperatureThreshold => self.temperature_threshold = value,
        }
    }
}

/// A value change, as delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelUpdate {
    pub kind: ValueKind,
    pub value: i32,
}

/// Observer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u32, u16, u16, [u8; 8]);

impl ObserverId {
    fn new() -> ObserverId {
        let uuid = Uuid::new_v4();
        let (a, b, c, d) = uuid.as_fields();
        ObserverId(a, b, c, *d)
    }
}

/// The receiving end of an observer registration.
#[derive(Debug)]
pub struct Subscription {
    id: ObserverId,
    recv: Receiver<ModelUpdate>,
}

impl Subscription {
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Takes all queued updates, oldest first.
    pub fn drain(&self) -> Vec<ModelUpdate> {
        let mut updates = Vec::new();
        loop {
            match self.recv.try_recv() {
                Ok(update) => updates.push(update),
                // the model only drops senders on removal, which leaves nothing more to read
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        updates
    }

    /// Waits for the next update.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ModelUpdate> {
        self.recv.recv_timeout(timeout).ok()
    }
}

#[derive(Debug)]
struct Observer {
    id: ObserverId,
    kinds: Vec<ValueKind>,
    send: Sender<ModelUpdate>,
}

/// Holds the thermostat values. Share it with `Arc`.
#[derive(Debug, Default)]
pub struct ThermostatModel {
    readings: Mutex<Readings>,
    observers: Mutex<Vec<Observer>>,
}

impl ThermostatModel {
    /// Creates a model with the default values.
    pub fn new() -> ThermostatModel {
        ThermostatModel::default()
    }

    pub fn with_readings(readings: Readings) -> ThermostatModel {
        ThermostatModel {
            readings: Mutex::new(readings),
            observers: Mutex::new(Vec::new()),
        }
    }

    pub fn readings(&self) -> Readings {
        *self.readings.lock()
    }

    pub fn get(&self, kind: ValueKind) -> i32 {
        self.readings.lock().get(kind)
    }

    pub fn temperature(&self) -> i32 {
        self.get(ValueKind::Temperature)
    }

    pub fn humidity(&self) -> i32 {
        self.get(ValueKind::Humidity)
    }

    pub fn pressure(&self) -> i32 {
        self.get(ValueKind::Pressure)
    }

    pub fn temperature_threshold(&self) -> i32 {
        self.get(ValueKind::TemperatureThreshold)
    }

    /// Stores a value and notifies observers of its kind.
    pub fn set(&self, kind: ValueKind, value: i32) {
        self.readings.lock().set(kind, value);
        self.notify(ModelUpdate { kind, value });
    }

    pub fn set_temperature(&self, value: i32) {
        self.set(ValueKind::Temperature, value);
    }

    pub fn set_humidity(&self, value: i32) {
        self.set(ValueKind::Humidity, value);
    }

    pub fn set_pressure(&self, value: i32) {
        self.set(ValueKind::Pressure, value);
    }

    pub fn set_temperature_threshold(&self, value: i32) {
        self.set(ValueKind::TemperatureThreshold, value);
    }

    /// Stores a threshold chosen by the user. Observers are not notified.
    pub fn update_temperature_threshold(&self, value: i32) {
        self.readings
            .lock()
            .set(ValueKind::TemperatureThreshold, value);
        debug!("model: threshold set to {} by user", value);
    }

    /// Registers an observer for the given kinds.
    pub fn add_observer(&self, kinds: &[ValueKind]) -> Subscription {
        let (send, recv) = channel::unbounded();
        let id = ObserverId::new();
        let mut unique = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        self.observers.lock().push(Observer {
            id,
            kinds: unique,
            send,
        });
        Subscription { id, recv }
    }

    /// Unregisters an observer. Returns false if it was not registered.
    pub fn remove_observer(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.lock();
        let len = observers.len();
        observers.retain(|observer| observer.id != id);
        len != observers.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.lock().len()
    }

    fn notify(&self, update: ModelUpdate) {
        trace!("model: {:?} = {}", update.kind, update.value);
        // observers whose subscription was dropped are forgotten
        self.observers.lock().retain(|observer| {
            if !observer.kinds.contains(&update.kind) {
                return true;
            }
            observer.send.send(update).is_ok()
        });
    }
}

/// Weather conditions, by OpenWeather condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    FewClouds,
    Rain,
    RainSun,
    Thunderstorm,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 6] = [
        WeatherCondition::Clear,
        WeatherCondition::Cloudy,
        WeatherCondition::FewClouds,
        WeatherCondition::Rain,
        WeatherCondition::RainSun,
        WeatherCondition::Thunderstorm,
    ];

    pub fn code(self) -> u16 {
        match self {
            WeatherCondition::Clear => 800,
            WeatherCondition::Cloudy => 802,
            WeatherCondition::FewClouds => 801,
            WeatherCondition::Rain => 300,
            WeatherCondition::RainSun => 500,
            WeatherCondition::Thunderstorm => 200,
        }
    }

    /// Looks up a condition by code. Unknown codes are shown as cloudy.
    pub fn from_code(code: u16) -> WeatherCondition {
        WeatherCondition::ALL
            .iter()
            .copied()
            .find(|condition| condition.code() == code)
            .unwrap_or(WeatherCondition::Cloudy)
    }
}
