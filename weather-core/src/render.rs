//! Plain-text projection of the lookup form.
//!
//! Everything here is a pure function of state. Missing upstream values are
//! always shown as [`MISSING`], never left blank.

use std::fmt;

use crate::{
    WeatherInfo, WeatherRecord,
    lookup::{LookupForm, Outcome},
    model::{CurrentConditions, LocationInfo, UpstreamError},
};

/// Placeholder for a value the upstream source left out.
pub const MISSING: &str = "N/A";

pub const TITLE: &str = "Weather Data Lookup";
pub const INPUT_LABEL: &str = "Weather Request ID";
pub const INPUT_PLACEHOLDER: &str = "Enter weather request ID";
pub const FOUND_NOTICE: &str = "Weather data found!";

/// One labelled line of the weather information section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: value.into() }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Render the whole form: title, input, submit control and outcome panel.
pub fn render_form(form: &LookupForm) -> String {
    let input = if form.input().is_empty() {
        format!("<{INPUT_PLACEHOLDER}>")
    } else {
        form.input().to_string()
    };
    let disabled = if form.can_submit() { "" } else { " (disabled)" };

    let mut out = format!(
        "{TITLE}\n{INPUT_LABEL}: {input}\n[ {} ]{disabled}\n",
        form.submit_label()
    );

    let panel = render_outcome(form.outcome());
    if !panel.is_empty() {
        out.push('\n');
        out.push_str(&panel);
    }

    out
}

/// Render the outcome panel. Empty string when there is nothing to show.
pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Empty => String::new(),
        Outcome::Failed(message) => format!("✖ {message}\n"),
        Outcome::Found(record) => render_record(record),
    }
}

/// Success notice followed by the record's fields.
pub fn render_record(record: &WeatherRecord) -> String {
    let mut lines = vec![
        format!("✔ {FOUND_NOTICE}"),
        String::new(),
        format!("Date: {}", record.date),
        format!("Location: {}", record.location),
    ];
    if !record.notes.is_empty() {
        lines.push(format!("Notes: {}", record.notes));
    }

    lines.push("Weather Information:".to_string());
    lines.extend(format_weather_info(&record.weather_info).iter().map(|field| format!("  {field}")));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Lay out the nested weather payload as labelled fields.
pub fn format_weather_info(info: &WeatherInfo) -> Vec<Field> {
    if info.is_empty() {
        return vec![Field::new("Status", "No weather information")];
    }

    let mut fields = Vec::new();
    if let Some(location) = &info.location {
        fields.extend(location_fields(location));
    }
    if let Some(current) = &info.current {
        fields.extend(current_fields(current));
    }
    if let Some(error) = &info.error {
        fields.push(upstream_error_field(error));
    }
    fields
}

fn location_fields(location: &LocationInfo) -> Vec<Field> {
    let place: Vec<&str> = [&location.name, &location.region, &location.country]
        .into_iter()
        .filter_map(|part| present(part.as_deref()))
        .collect();

    let place = if place.is_empty() { MISSING.to_string() } else { place.join(", ") };

    vec![
        Field::new("Place", place),
        Field::new("Local time", text(location.localtime.as_deref())),
    ]
}

fn current_fields(current: &CurrentConditions) -> Vec<Field> {
    let descriptions: Vec<&str> = current
        .weather_descriptions
        .iter()
        .filter_map(|d| present(Some(d.as_str())))
        .collect();
    let conditions =
        if descriptions.is_empty() { MISSING.to_string() } else { descriptions.join(", ") };

    let wind = match (current.wind_speed, present(current.wind_dir.as_deref())) {
        (None, None) => MISSING.to_string(),
        (speed, dir) => format!("{} {}", with_unit(speed, " km/h"), text(dir)),
    };

    vec![
        Field::new("Temperature", with_unit(current.temperature, "°C")),
        Field::new("Feels like", with_unit(current.feelslike, "°C")),
        Field::new("Conditions", conditions),
        Field::new("Humidity", with_unit(current.humidity, "%")),
        Field::new("Wind", wind),
        Field::new("Pressure", with_unit(current.pressure, " mb")),
        Field::new("Visibility", with_unit(current.visibility, " km")),
        Field::new("UV index", with_unit(current.uv_index, "")),
    ]
}

fn upstream_error_field(error: &UpstreamError) -> Field {
    let code = error.code.map_or_else(|| MISSING.to_string(), |c| c.to_string());
    Field::new(
        "Upstream error",
        format!("{} {}: {}", code, text(error.kind.as_deref()), text(error.info.as_deref())),
    )
}

/// Drop values that are absent or blank.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn text(value: Option<&str>) -> String {
    present(value).unwrap_or(MISSING).to_string()
}

/// `18.0` prints as `18`, `17.5` as `17.5`.
fn number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn with_unit(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{}{unit}", number(v)),
        None => MISSING.to_string(),
    }
}
