//! OpenAI Chat Completions request payloads.

use super::Scenario;
use super::image::Assets;
use crate::error::Result;
use serde_json::{Value, json};

const WEATHER_SYSTEM: &str = "You are a helpful assistant with access to weather information.";
const WEATHER_QUESTION: &str = "What's the weather like in San Francisco?";
const CHART_SYSTEM: &str = "You are a helpful assistant that can generate and analyze charts.";
const CHART_REQUEST: &str =
    "Create a bar chart showing sales data and describe it to me. Don't send the image back to me.";

pub(super) fn payload(scenario: Scenario, assets: &Assets, model: &str) -> Result<Value> {
    let payload = match scenario {
        Scenario::SimpleChat => json!({
            "model": model,
            "messages": [
                {
                    "role": "developer",
                    "content": "You are a helpful assistant that provides concise answers."
                },
                {"role": "user", "content": "Tell me a haiku."}
            ],
            "stream": true
        }),
        Scenario::ImageInput => {
            let tires = assets.tires()?;
            json!({
                "model": model,
                "messages": [
                    {
                        "role": "user",
                        "content": [
                            {"type": "text", "text": "What do you see in this image?"},
                            {"type": "image_url", "image_url": {"url": tires.data_url()}}
                        ]
                    }
                ],
                "max_tokens": 300,
                "stream": true
            })
        }
        Scenario::ToolCall => json!({
            "model": model,
            "messages": [
                {"role": "system", "content": WEATHER_SYSTEM},
                {"role": "user", "content": WEATHER_QUESTION}
            ],
            "tools": [weather_tool(true)],
            "tool_choice": "auto",
            "stream": true
        }),
        Scenario::ToolResponse => json!({
            "model": model,
            "messages": [
                {"role": "system", "content": WEATHER_SYSTEM},
                {"role": "user", "content": WEATHER_QUESTION},
                {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [
                        {
                            "id": "call_abc123",
                            "type": "function",
                            "function": {
                                "name": "get_weather",
                                "arguments": r#"{"location": "San Francisco, CA", "unit": "fahrenheit"}"#
                            }
                        }
                    ]
                },
                {
                    "role": "tool",
                    "tool_call_id": "call_abc123",
                    "content": r#"{"temperature": 72, "condition": "sunny", "humidity": 65}"#
                }
            ],
            "tools": [weather_tool(false)],
            "stream": true
        }),
        Scenario::ImageInTool => {
            let plot = assets.plot()?;
            // Tool results are strings in this API, so the image travels as JSON
            // text, spaced like the other literal tool payloads
            let tool_content = format!(
                r#"{{"image_base64": {}, "mime_type": {}}}"#,
                serde_json::to_string(&plot.data)?,
                serde_json::to_string(plot.media_type)?
            );
            json!({
                "model": model,
                "messages": [
                    {"role": "system", "content": CHART_SYSTEM},
                    {"role": "user", "content": CHART_REQUEST},
                    {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [
                            {
                                "id": "call_chart123",
                                "type": "function",
                                "function": {
                                    "name": "generate_chart",
                                    "arguments": r#"{"chart_type": "bar", "data": [10, 20, 30, 40]}"#
                                }
                            }
                        ]
                    },
                    {
                        "role": "tool",
                        "tool_call_id": "call_chart123",
                        "content": tool_content
                    }
                ],
                "tools": [
                    {
                        "type": "function",
                        "function": {
                            "name": "generate_chart",
                            "description": "Generate a chart and return the image as base64",
                            "parameters": {
                                "type": "object",
                                "properties": {
                                    "chart_type": {"type": "string"},
                                    "data": {"type": "array", "items": {"type": "number"}}
                                },
                                "required": ["chart_type", "data"]
                            }
                        }
                    }
                ],
                "stream": true
            })
        }
    };
    Ok(payload)
}

fn weather_tool(describe_params: bool) -> Value {
    let (location, unit) = if describe_params {
        (
            json!({"type": "string", "description": "The city and state, e.g. San Francisco, CA"}),
            json!({
                "type": "string",
                "enum": ["celsius", "fahrenheit"],
                "description": "The temperature unit"
            }),
        )
    } else {
        (
            json!({"type": "string"}),
            json!({"type": "string", "enum": ["celsius", "fahrenheit"]}),
        )
    };

    json!({
        "type": "function",
        "function": {
            "name": "get_weather",
            "description": "Get the current weather in a given location",
            "parameters": {
                "type": "object",
                "properties": {"location": location, "unit": unit},
                "required": ["location"]
            }
        }
    })
}
