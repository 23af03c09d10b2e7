pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod hearts;
pub mod motion;
pub mod placement;
pub mod pointer;
pub mod selector;

pub use config::{CandidateSampling, ClickAction, ControllerConfig, Destination, StartLayout};
pub use controller::{ClickOutcome, EvasiveController, Layout, Mode, Tick};
pub use error::ConfigError;
pub use geometry::{Point, Rect, Size};
pub use hearts::{Heart, HeartFrame, HeartSpawner};
pub use placement::{PlacementValidator, StartPlacement};
pub use pointer::{PointerState, PointerTracker};
