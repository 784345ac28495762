pub mod canvas;
pub mod config;
mod context;
pub mod convert;
mod desktop;
mod error;
pub mod events;
pub mod model;
pub mod motion;
pub mod navigation;
pub mod popup;
pub mod progress;
pub mod provider;
mod rect;
pub mod slider;
pub mod ui;

pub use canvas::{Canvas, MainCanvas, Page, Scene};
pub use config::Config;
pub use context::{NavigationContext, NavigationState};
pub use desktop::NavigationDesktop;
pub use error::{Error, ProgressError, Result};
pub use model::{ThermostatModel, ValueKind};
pub use navigation::{NavigationController, Trigger};
pub use progress::{Direction, ProgressRange};
pub use provider::ValueProvider;
pub use rect::Rect;
pub use ui::Ui;
