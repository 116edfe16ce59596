//! Rendering target that prints each panel to a writer (stdout by default).

use std::io::Write;

use parking_lot::Mutex;
use skycast_services::FavoriteCity;

use crate::render::{ConditionsPanel, ForecastCard, WeatherView};

#[derive(Default)]
struct TerminalState {
    location: Option<String>,
    error: Option<String>,
}

pub struct TerminalView {
    out: Mutex<Box<dyn Write + Send>>,
    state: Mutex<TerminalState>,
}

impl TerminalView {
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            state: Mutex::new(TerminalState::default()),
        }
    }

    /// Message currently shown in the error banner.
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    fn print(&self, lines: &[String]) {
        let mut out = self.out.lock();
        for line in lines {
            if let Err(e) = writeln!(out, "{}", line) {
                tracing::warn!("Failed to write to terminal: {}", e);
                return;
            }
        }
        if let Err(e) = out.flush() {
            tracing::warn!("Failed to flush terminal: {}", e);
        }
    }
}

pub fn conditions_lines(panel: &ConditionsPanel) -> Vec<String> {
    vec![
        format!("  {}°C  {}", panel.temperature, panel.description),
        format!("  Feels like: {}°C", panel.feels_like),
        format!("  Humidity: {}%", panel.humidity),
        format!("  Wind: {} km/h", panel.wind_speed),
        format!("  Icon: {}", panel.icon_url),
    ]
}

pub fn forecast_lines(cards: &[ForecastCard]) -> Vec<String> {
    let mut lines = vec!["  Forecast:".to_string()];
    lines.extend(cards.iter().map(|card| {
        format!(
            "    {}  {:>3}°C / {:>3}°C  {}",
            card.weekday, card.max_temp, card.min_temp, card.description
        )
    }));
    lines
}

pub fn favorites_lines(favorites: &[FavoriteCity]) -> Vec<String> {
    if favorites.is_empty() {
        return vec!["Favorites: (none)".to_string()];
    }
    let mut lines = vec!["Favorites:".to_string()];
    lines.extend(
        favorites
            .iter()
            .map(|f| format!("  [{}] {}", f.id, f.name)),
    );
    lines
}

impl WeatherView for TerminalView {
    fn set_location(&self, display_name: &str) {
        self.state.lock().location = Some(display_name.to_string());
        self.print(&[String::new(), format!("== {} ==", display_name)]);
    }

    fn set_conditions(&self, panel: &ConditionsPanel) {
        self.print(&conditions_lines(panel));
    }

    fn set_forecast(&self, cards: &[ForecastCard]) {
        self.print(&forecast_lines(cards));
    }

    fn set_error(&self, message: &str) {
        self.state.lock().error = Some(message.to_string());
        self.print(&[format!("! {}", message)]);
    }

    fn clear_error(&self) {
        self.state.lock().error = None;
    }

    fn set_favorites(&self, favorites: &[FavoriteCity]) {
        self.print(&favorites_lines(favorites));
    }

    fn notify(&self, message: &str) {
        self.print(&[format!("* {}", message)]);
    }

    fn location_text(&self) -> Option<String> {
        self.state.lock().location.clone()
    }
}
