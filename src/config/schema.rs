use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "vendor": {
                "type": "object",
                "properties": {
                    "api_key": { "type": "string" },
                    "base_url": { "type": "string", "format": "uri" }
                }
            },
            "store": {
                "type": "object",
                "properties": {
                    "path": { "type": "string" }
                }
            },
            "output": {
                "type": "object",
                "properties": {
                    "data_dir": { "type": "string" },
                    "graph_dir": { "type": "string" },
                    "remediation_dir": { "type": "string" }
                }
            },
            "analysis": {
                "type": "object",
                "properties": {
                    "rank_mode": { "type": "string", "enum": ["stable", "legacy-zip"] },
                    "top_k_file": { "type": "integer", "minimum": 1 },
                    "top_k_chart": { "type": "integer", "minimum": 1 },
                    "histogram_bins": { "type": "integer", "minimum": 1 },
                    "label_width": { "type": "integer", "minimum": 1 }
                }
            },
            "risks": {
                "type": "object",
                "properties": {
                    "exclude_years": { "type": "array", "items": { "type": "integer" } }
                }
            },
            "failure_policy": { "type": "string", "enum": ["abort", "skip"] },
            "entities": { "type": "array", "items": { "$ref": "#/$defs/entity" } }
        },
        "$defs": {
            "entity": {
                "type": "object",
                "required": ["name", "domain"],
                "properties": {
                    "name": { "type": "string" },
                    "domain": { "type": "string" }
                }
            }
        }
    })
});
