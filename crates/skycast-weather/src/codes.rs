//! WMO weather code tables.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::{Deserialize, Serialize};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Icon shown for codes missing from the table.
pub const ICON_NOT_AVAILABLE: &str = "https://openweathermap.org/img/wn/na@2x.png";

/// Description shown for codes missing from the table.
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Weather condition kinds reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum WeatherCode {
    ClearSky,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    RimeFog,
    LightDrizzle,
    ModerateDrizzle,
    DenseDrizzle,
    SlightRain,
    ModerateRain,
    HeavyRain,
    SlightRainShowers,
    ModerateRainShowers,
    ViolentRainShowers,
    Thunderstorm,
    ThunderstormSlightHail,
    ThunderstormHeavyHail,
    /// Any code without a table entry; keeps the raw value.
    Unknown(i32),
}

impl WeatherCode {
    /// Every kind with a table entry.
    pub const KNOWN: [WeatherCode; 18] = [
        Self::ClearSky,
        Self::MainlyClear,
        Self::PartlyCloudy,
        Self::Overcast,
        Self::Fog,
        Self::RimeFog,
        Self::LightDrizzle,
        Self::ModerateDrizzle,
        Self::DenseDrizzle,
        Self::SlightRain,
        Self::ModerateRain,
        Self::HeavyRain,
        Self::SlightRainShowers,
        Self::ModerateRainShowers,
        Self::ViolentRainShowers,
        Self::Thunderstorm,
        Self::ThunderstormSlightHail,
        Self::ThunderstormHeavyHail,
    ];

    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::ClearSky,
            1 => Self::MainlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 => Self::Fog,
            48 => Self::RimeFog,
            51 => Self::LightDrizzle,
            53 => Self::ModerateDrizzle,
            55 => Self::DenseDrizzle,
            61 => Self::SlightRain,
            63 => Self::ModerateRain,
            65 => Self::HeavyRain,
            80 => Self::SlightRainShowers,
            81 => Self::ModerateRainShowers,
            82 => Self::ViolentRainShowers,
            95 => Self::Thunderstorm,
            96 => Self::ThunderstormSlightHail,
            99 => Self::ThunderstormHeavyHail,
            other => Self::Unknown(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::ClearSky => 0,
            Self::MainlyClear => 1,
            Self::PartlyCloudy => 2,
            Self::Overcast => 3,
            Self::Fog => 45,
            Self::RimeFog => 48,
            Self::LightDrizzle => 51,
            Self::ModerateDrizzle => 53,
            Self::DenseDrizzle => 55,
            Self::SlightRain => 61,
            Self::ModerateRain => 63,
            Self::HeavyRain => 65,
            Self::SlightRainShowers => 80,
            Self::ModerateRainShowers => 81,
            Self::ViolentRainShowers => 82,
            Self::Thunderstorm => 95,
            Self::ThunderstormSlightHail => 96,
            Self::ThunderstormHeavyHail => 99,
            Self::Unknown(code) => *code,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::ClearSky => "Clear sky",
            Self::MainlyClear => "Mainly clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::RimeFog => "Depositing rime fog",
            Self::LightDrizzle => "Light drizzle",
            Self::ModerateDrizzle => "Moderate drizzle",
            Self::DenseDrizzle => "Dense drizzle",
            Self::SlightRain => "Slight rain",
            Self::ModerateRain => "Moderate rain",
            Self::HeavyRain => "Heavy rain",
            Self::SlightRainShowers => "Slight rain showers",
            Self::ModerateRainShowers => "Moderate rain showers",
            Self::ViolentRainShowers => "Violent rain showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::ThunderstormSlightHail => "Thunderstorm with slight hail",
            Self::ThunderstormHeavyHail => "Thunderstorm with heavy hail",
            Self::Unknown(_) => UNKNOWN_DESCRIPTION,
        }
    }

    /// Icon identifier on the icon host, `None` for unknown codes.
    fn icon_id(&self) -> Option<&'static str> {
        let id = match self {
            Self::ClearSky => "01d",
            Self::MainlyClear => "02d",
            Self::PartlyCloudy => "03d",
            Self::Overcast => "04d",
            Self::Fog | Self::RimeFog => "50d",
            Self::LightDrizzle | Self::ModerateDrizzle | Self::DenseDrizzle => "09d",
            Self::SlightRain | Self::ModerateRain | Self::HeavyRain => "10d",
            Self::SlightRainShowers | Self::ModerateRainShowers | Self::ViolentRainShowers => {
                "09d"
            }
            Self::Thunderstorm | Self::ThunderstormSlightHail | Self::ThunderstormHeavyHail => {
                "11d"
            }
            Self::Unknown(_) => return None,
        };
        Some(id)
    }

    /// Icon URL, falling back to [`ICON_NOT_AVAILABLE`].
    pub fn icon_url(&self) -> String {
        match self.icon_id() {
            Some(id) => format!("{}/{}@2x.png", ICON_BASE_URL, id),
            None => ICON_NOT_AVAILABLE.to_string(),
        }
    }
}

impl From<i32> for WeatherCode {
    fn from(code: i32) -> Self {
        Self::from_wmo_code(code)
    }
}

impl From<WeatherCode> for i32 {
    fn from(code: WeatherCode) -> Self {
        code.code()
    }
}

impl std::fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
