use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "oracle": {
                "type": "object",
                "properties": {
                    "endpoint": { "type": "string", "format": "uri" },
                    "timeout_ms": { "type": "integer", "minimum": 1 },
                    "enabled": { "type": "boolean" }
                }
            },
            "interceptor": {
                "type": "object",
                "properties": {
                    "decision_timeout_secs": { "type": "integer", "minimum": 1 },
                    "decision_surface_url": { "type": "string" },
                    "payload_param": { "type": "string", "minLength": 1 }
                }
            },
            "scoring": {
                "type": "object",
                "properties": {
                    "thresholds": {
                        "type": "object",
                        "properties": {
                            "medium": { "$ref": "#/$defs/score" },
                            "high": { "$ref": "#/$defs/score" },
                            "critical": { "$ref": "#/$defs/score" }
                        }
                    },
                    "heuristic": {
                        "type": "object",
                        "additionalProperties": { "type": "integer", "minimum": 0 }
                    }
                }
            },
            "bridge": {
                "type": "object",
                "properties": {
                    "host": { "type": "string" },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 }
                }
            }
        },
        "$defs": {
            "score": { "type": "integer", "minimum": 0, "maximum": 100 }
        }
    })
});
