//! Anthropic Messages request payloads.

use super::Scenario;
use super::image::Assets;
use crate::error::Result;
use serde_json::{Value, json};

const MAX_TOKENS: u32 = 1024;
/// Model the image scenario was written against; used unless overridden.
pub const IMAGE_INPUT_MODEL: &str = "claude-3-5-sonnet-20241022";

const WEATHER_SYSTEM: &str = "You are a helpful assistant with access to weather information.";
const WEATHER_QUESTION: &str = "What's the weather like in San Francisco?";

pub(super) fn payload(scenario: Scenario, assets: &Assets, model: &str) -> Result<Value> {
    let payload = match scenario {
        Scenario::SimpleChat => json!({
            "model": model,
            "max_tokens": MAX_TOKENS,
            "system": "You are a helpful assistant that provides answers.",
            "messages": [{"role": "user", "content": "Tell me a haiku."}],
            "stream": true
        }),
        Scenario::ImageInput => {
            let tires = assets.tires()?;
            json!({
                "model": model,
                "max_tokens": MAX_TOKENS,
                "messages": [
                    {
                        "role": "user",
                        "content": [
                            {"type": "text", "text": "What do you see in this image?"},
                            {
                                "type": "image",
                                "source": {
                                    "type": "base64",
                                    "media_type": tires.media_type,
                                    "data": tires.data
                                }
                            }
                        ]
                    }
                ],
                "stream": true
            })
        }
        Scenario::ToolCall => json!({
            "model": model,
            "max_tokens": MAX_TOKENS,
            "system": WEATHER_SYSTEM,
            "messages": [{"role": "user", "content": WEATHER_QUESTION}],
            "tools": [weather_tool(true)],
            "stream": true
        }),
        Scenario::ToolResponse => json!({
            "model": model,
            "max_tokens": MAX_TOKENS,
            "system": WEATHER_SYSTEM,
            "messages": [
                {"role": "user", "content": WEATHER_QUESTION},
                {
                    "role": "assistant",
                    "content": [
                        {
                            "type": "tool_use",
                            "id": "toolu_01A09q90qw90lq917835lq9",
                            "name": "get_weather",
                            "input": {"location": "San Francisco, CA", "unit": "fahrenheit"}
                        }
                    ]
                },
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "tool_result",
                            "tool_use_id": "toolu_01A09q90qw90lq917835lq9",
                            "content": r#"{"temperature": 72, "condition": "sunny", "humidity": 65}"#
                        }
                    ]
                }
            ],
            "tools": [weather_tool(false)],
            "stream": true
        }),
        Scenario::ImageInTool => {
            let plot = assets.plot()?;
            json!({
                "model": model,
                "max_tokens": MAX_TOKENS,
                "system": "You are a helpful assistant that can generate and analyze charts.",
                "messages": [
                    {
                        "role": "user",
                        "content": "Create a bar chart showing sales data and describe it to me. Don't send the image back to me."
                    },
                    {
                        "role": "assistant",
                        "content": [
                            {
                                "type": "tool_use",
                                "id": "toolu_01chart123",
                                "name": "generate_chart",
                                "input": {"chart_type": "bar", "data": [10, 20, 30, 40]}
                            }
                        ]
                    },
                    {
                        "role": "user",
                        "content": [
                            {
                                "type": "tool_result",
                                "tool_use_id": "toolu_01chart123",
                                "content": [
                                    {"type": "text", "text": "Chart generated successfully:"},
                                    {
                                        "type": "image",
                                        "source": {
                                            "type": "base64",
                                            "media_type": plot.media_type,
                                            "data": plot.data
                                        }
                                    }
                                ]
                            }
                        ]
                    }
                ],
                "tools": [
                    {
                        "name": "generate_chart",
                        "description": "Generate a chart and return the image",
                        "input_schema": {
                            "type": "object",
                            "properties": {
                                "chart_type": {"type": "string"},
                                "data": {"type": "array", "items": {"type": "number"}}
                            },
                            "required": ["chart_type", "data"]
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
        "name": "get_weather",
        "description": "Get the current weather in a given location",
        "input_schema": {
            "type": "object",
            "properties": {"location": location, "unit": unit},
            "required": ["location"]
        }
    })
}
