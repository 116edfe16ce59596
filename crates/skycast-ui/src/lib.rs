//! Presentation layer for Skycast: projects lookup results onto a rendering
//! target and wires user actions to the weather and favorites clients.

pub mod error_mapping;
pub mod render;
pub mod terminal;
pub mod widget;

pub use error_mapping::IntoAppError;
pub use render::{ConditionsPanel, ForecastCard, WeatherView, MAX_FORECAST_CARDS};
pub use terminal::TerminalView;
pub use widget::{favorite_name_from_display, LookupOutcome, UserAction, WeatherWidget};
