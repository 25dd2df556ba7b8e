use serde::{Deserialize, Deserializer, Serialize};

/// A stored weather record as returned by the record service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub date: String,
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weather_info: WeatherInfo,
}

/// Decode an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Upstream payload attached to a record.
///
/// The upstream source answers with a location block, a current-conditions
/// block or an error block, and may leave out any field in any of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<UpstreamError>,
}

impl WeatherInfo {
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.current.is_none() && self.error.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub localtime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Degrees Celsius.
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weather_descriptions: Vec<String>,
    /// km/h.
    pub wind_speed: Option<f64>,
    pub wind_dir: Option<String>,
    /// Millibars.
    pub pressure: Option<f64>,
    /// Percent.
    pub humidity: Option<f64>,
    /// Kilometers.
    pub visibility: Option<f64>,
    pub uv_index: Option<f64>,
    pub feelslike: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpstreamError {
    pub code: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub info: Option<String>,
}
