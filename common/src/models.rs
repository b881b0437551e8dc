use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// The two kinds of weather data the service serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Current,
    Forecast,
}

impl DataKind {
    /// Cache file holding the last good document of this kind.
    pub fn file_name(self) -> &'static str {
        match self {
            DataKind::Current => "current.json",
            DataKind::Forecast => "forecast.json",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKind::Current => f.write_str("current"),
            DataKind::Forecast => f.write_str("forecast"),
        }
    }
}

/// Geographic coordinates
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

/// Condition summary, e.g. `{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}`
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct Condition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i64,
    pub humidity: i64,
    pub sea_level: i64,
    pub grnd_level: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct Wind {
    pub speed: f64,
    pub deg: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gust: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct Clouds {
    pub all: i64,
}

/// Precipitation volume in mm for the last hour / three hours.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct Precipitation {
    #[serde(rename = "1h", skip_serializing_if = "Option::is_none")]
    pub one_hour: Option<f64>,
    #[serde(rename = "3h", skip_serializing_if = "Option::is_none")]
    pub three_hours: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct SystemInfo {
    #[serde(rename = "type")]
    pub kind: i64,
    pub id: i64,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Current conditions as returned by the upstream `weather` endpoint.
///
/// Every field defaults, so `{}` decodes to the zero value served when the
/// service is unconfigured and has nothing cached.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct CurrentWeather {
    pub coord: Coord,
    pub weather: Vec<Condition>,
    pub base: String,
    pub main: MainReadings,
    pub visibility: i64,
    pub wind: Wind,
    pub clouds: Clouds,
    pub rain: Precipitation,
    pub snow: Precipitation,
    pub dt: i64,
    pub sys: SystemInfo,
    pub timezone: i64,
    pub id: i64,
    pub name: String,
    pub cod: i64,
}

/// One three-hour step of the five day forecast.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct ForecastItem {
    pub dt: i64,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    pub clouds: Clouds,
    pub wind: Wind,
    pub visibility: i64,
    /// Probability of precipitation, 0..1
    pub pop: f64,
    pub rain: Precipitation,
    pub snow: Precipitation,
    pub dt_txt: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct ForecastCity {
    pub id: i64,
    pub name: String,
    pub coord: Coord,
    pub country: String,
    pub population: i64,
    pub timezone: i64,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Five day / three hour forecast as returned by the upstream `forecast` endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct ForecastWeather {
    pub cnt: i64,
    pub list: Vec<ForecastItem>,
    pub city: ForecastCity,
}
