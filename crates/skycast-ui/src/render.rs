//! Rendering layer: turns lookup results into display values and pushes them
//! to a [`WeatherView`].

use skycast_services::FavoriteCity;
use skycast_weather::{CurrentConditions, DailyForecastEntry, Forecast, Location, WeatherCode};

/// The forecast strip never shows more cards than this.
pub const MAX_FORECAST_CARDS: usize = 5;

/// Rendering target for the widget.
///
/// Methods take `&self` so a view can be shared between overlapping
/// pipelines; implementations keep their own interior mutability.
pub trait WeatherView: Send + Sync {
    /// Show the "City, Country" heading.
    fn set_location(&self, display_name: &str);
    fn set_conditions(&self, panel: &ConditionsPanel);
    /// Replace the whole forecast strip.
    fn set_forecast(&self, cards: &[ForecastCard]);
    /// Show the error banner, replacing any previous message.
    fn set_error(&self, message: &str);
    fn clear_error(&self);
    /// Replace the favorites list.
    fn set_favorites(&self, favorites: &[FavoriteCity]);
    /// Blocking notice outside the error banner (duplicate favorite).
    fn notify(&self, message: &str);
    /// Text currently shown in the location heading, if any.
    fn location_text(&self) -> Option<String>;
}

/// Current-conditions panel values, already rounded for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionsPanel {
    pub temperature: i64,
    pub feels_like: i64,
    pub description: &'static str,
    pub humidity: u8,
    pub wind_speed: f64,
    pub icon_url: String,
    pub weather_code: WeatherCode,
}

impl From<&CurrentConditions> for ConditionsPanel {
    fn from(c: &CurrentConditions) -> Self {
        Self {
            temperature: round_temp(c.temperature),
            feels_like: round_temp(c.apparent_temperature),
            description: c.weather_code.description(),
            humidity: c.relative_humidity,
            wind_speed: c.wind_speed,
            icon_url: c.weather_code.icon_url(),
            weather_code: c.weather_code,
        }
    }
}

/// One card of the forecast strip.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    /// Abbreviated weekday, e.g. "Mon"
    pub weekday: String,
    pub icon_url: String,
    pub description: &'static str,
    pub max_temp: i64,
    pub min_temp: i64,
}

impl From<&DailyForecastEntry> for ForecastCard {
    fn from(entry: &DailyForecastEntry) -> Self {
        Self {
            weekday: entry.date.format("%a").to_string(),
            icon_url: entry.weather_code.icon_url(),
            description: entry.weather_code.description(),
            max_temp: round_temp(entry.max_temp),
            min_temp: round_temp(entry.min_temp),
        }
    }
}

fn round_temp(value: f64) -> i64 {
    value.round() as i64
}

/// First [`MAX_FORECAST_CARDS`] days, in provider order.
pub fn forecast_cards(daily: &[DailyForecastEntry]) -> Vec<ForecastCard> {
    daily
        .iter()
        .take(MAX_FORECAST_CARDS)
        .map(ForecastCard::from)
        .collect()
}

/// Render a successful lookup. Clears any visible error first.
pub fn render_weather(view: &dyn WeatherView, location: &Location, forecast: &Forecast) {
    view.clear_error();
    view.set_location(&location.display_name());
    view.set_conditions(&ConditionsPanel::from(&forecast.current));
    view.set_forecast(&forecast_cards(&forecast.daily));
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use chrono::NaiveDate;

    fn entry(day: u32, max_temp: f64, min_temp: f64, code: i32) -> DailyForecastEntry {
        DailyForecastEntry {
            date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            max_temp,
            min_temp,
            weather_code: WeatherCode::from_wmo_code(code),
        }
    }

    #[test]
    fn test_forecast_cards_capped_at_five() {
        let daily: Vec<_> = (19..26).map(|d| entry(d, 20.0, 10.0, 0)).collect();
        assert_eq!(daily.len(), 7);
        assert_eq!(forecast_cards(&daily).len(), 5);
    }

    #[test]
    fn test_forecast_cards_short_series() {
        let daily = vec![entry(19, 20.0, 10.0, 0), entry(20, 21.0, 11.0, 3)];
        assert_eq!(forecast_cards(&daily).len(), 2);
        assert!(forecast_cards(&[]).is_empty());
    }

    #[test]
    fn test_forecast_card_order_and_weekday() {
        // 2026-10-19 is a Monday
        let daily = vec![entry(19, 20.0, 10.0, 0), entry(20, 21.0, 11.0, 61)];
        let cards = forecast_cards(&daily);
        assert_eq!(cards[0].weekday, "Mon");
        assert_eq!(cards[1].weekday, "Tue");
        assert_eq!(cards[1].description, "Slight rain");
    }

    #[test]
    fn test_forecast_card_rounding() {
        let card = ForecastCard::from(&entry(19, 24.5, 12.4, 2));
        assert_eq!(card.max_temp, 25);
        assert_eq!(card.min_temp, 12);

        let cold = ForecastCard::from(&entry(19, -0.4, -7.6, 2));
        assert_eq!(cold.max_temp, 0);
        assert_eq!(cold.min_temp, -8);
    }

    #[test]
    fn test_conditions_panel() {
        let current = CurrentConditions {
            temperature: 23.6,
            apparent_temperature: 22.2,
            relative_humidity: 55,
            wind_speed: 11.2,
            weather_code: WeatherCode::from_wmo_code(100),
        };

        let panel = ConditionsPanel::from(&current);
        assert_eq!(panel.temperature, 24);
        assert_eq!(panel.feels_like, 22);
        assert_eq!(panel.description, "Unknown");
        assert_eq!(panel.icon_url, skycast_weather::codes::ICON_NOT_AVAILABLE);
    }
}
