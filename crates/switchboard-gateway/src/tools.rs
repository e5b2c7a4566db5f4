// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in function tool dispatch.
//!
//! The relay forwards client-declared tools to the provider verbatim; the
//! one function it executes itself is `get_weather`, which serves
//! simulated data. Dispatch never fails a request: bad arguments and
//! unknown function names produce structured error outputs the model can
//! read.

use rand::Rng;
use serde::{Deserialize, Serialize};
use switchboard_openai::types::{FunctionCall, FunctionOutput, FunctionSpec, ToolSpec};
use tracing::warn;

/// Declaration of the built-in weather tool, offered to clients that do
/// not declare their own tools.
pub fn weather_tool() -> ToolSpec {
    ToolSpec::Function(FunctionSpec {
        name: "get_weather".to_string(),
        description: "Get the current weather in a given location".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "The city and state, e.g. San Francisco, CA"
                },
                "unit": {
                    "type": "string",
                    "enum": ["celsius", "fahrenheit"],
                    "description": "The unit of temperature to use. Infer this from the user's location."
                }
            },
            "required": ["location", "unit"]
        }),
    })
}

/// Temperature unit accepted by the weather tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherUnit {
    Celsius,
    Fahrenheit,
}

/// Simulated weather data for one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub temperature: i32,
    pub unit: String,
    pub conditions: String,
    pub timestamp: String,
}

const CONDITIONS: &[&str] = &["Cloudy", "Sunny", "Rainy", "Snowy", "Windy"];

/// Produce a simulated weather report: a random temperature in a
/// unit-dependent range and a random condition.
pub fn get_weather(location: &str, unit: WeatherUnit) -> WeatherReport {
    let (min_temp, max_temp) = match unit {
        WeatherUnit::Celsius => (10, 30),
        WeatherUnit::Fahrenheit => (50, 86),
    };

    let mut rng = rand::thread_rng();
    let temperature = rng.gen_range(min_temp..=max_temp);
    let conditions = CONDITIONS[rng.gen_range(0..CONDITIONS.len())];

    WeatherReport {
        location: location.to_string(),
        temperature,
        unit: match unit {
            WeatherUnit::Celsius => "C".to_string(),
            WeatherUnit::Fahrenheit => "F".to_string(),
        },
        conditions: conditions.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    location: Option<String>,
    unit: Option<String>,
}

/// Execute the weather tool against a JSON-encoded arguments string.
///
/// Returns a JSON string either way: report on success, `{"error": ...}`
/// on bad arguments.
fn run_weather(arguments: &str) -> String {
    let args: WeatherArgs = match serde_json::from_str(arguments) {
        Ok(args) => args,
        Err(e) => {
            warn!(error = %e, "unparseable weather tool arguments");
            return error_output(&format!("invalid arguments for get_weather: {e}"));
        }
    };

    let Some(location) = args.location.filter(|l| !l.is_empty()) else {
        return error_output("location is required for get_weather");
    };

    // Invalid or missing unit defaults to fahrenheit.
    let unit = match args.unit.as_deref() {
        Some("celsius") => WeatherUnit::Celsius,
        _ => WeatherUnit::Fahrenheit,
    };

    let report = get_weather(&location, unit);
    serde_json::to_string(&report)
        .unwrap_or_else(|e| error_output(&format!("failed to encode weather report: {e}")))
}

fn error_output(message: &str) -> String {
    serde_json::json!({
        "error": message,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })
    .to_string()
}

/// Execute a batch of requested function calls.
///
/// Every call produces an output item, correlated by call id; unknown
/// names and disabled tools yield structured errors rather than failures,
/// and one bad call never blocks the rest.
pub fn dispatch_function_calls(
    calls: &[FunctionCall],
    weather_enabled: bool,
) -> Vec<FunctionOutput> {
    calls
        .iter()
        .map(|call| {
            let output = match call.name.as_str() {
                "get_weather" if weather_enabled => run_weather(&call.arguments),
                "get_weather" => error_output("get_weather is disabled on this relay"),
                other => {
                    warn!(function = other, "unknown function call requested");
                    error_output(&format!("Unknown function: {other}"))
                }
            };
            FunctionOutput::FunctionCallOutput {
                call_id: call.call_id.clone(),
                output,
            }
        })
        .collect()
}
