use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use crate::models::RiskEvent;
use crate::vendor::{severity_label, RawRisk};
use tracing::debug;

/// Dated risk observations for one entity. Records missing a subtype,
/// severity, category, description or risk name are dropped, as are records
/// first detected in one of `exclude_years`.
pub fn risk_events(entity_name: &str, risks: &[RawRisk], exclude_years: &[i32]) -> Vec<RiskEvent> {
    risks
        .iter()
        .filter_map(|raw| to_event(entity_name, raw, exclude_years))
        .collect()
}

fn to_event(entity_name: &str, raw: &RawRisk, exclude_years: &[i32]) -> Option<RiskEvent> {
    let present = |field: &Option<String>| field.as_deref().map_or(false, |s| !s.is_empty());
    if !present(&raw.risk_subtype) || !present(&raw.category) || !present(&raw.description) {
        return None;
    }
    if matches!(raw.severity, Value::Null) {
        return None;
    }
    let risk = raw.risk.as_deref().filter(|s| !s.is_empty())?;

    let first_detected = raw.first_detected.as_deref()?;
    let date = match parse_first_detected(first_detected) {
        Some(date) => date,
        None => {
            debug!(entity = %entity_name, first_detected, "Unparseable firstDetected, skipping risk");
            return None;
        }
    };
    if exclude_years.contains(&date.year()) {
        return None;
    }

    Some(RiskEvent {
        risk: risk.to_string(),
        date: date.format("%m-%d-%Y").to_string(),
        severity: severity_label(&raw.severity),
        category: raw.category.clone().unwrap_or_default(),
        name: entity_name.to_string(),
    })
}

/// `firstDetected` is an RFC 3339 timestamp; only the date part matters.
fn parse_first_detected(value: &str) -> Option<NaiveDate> {
    let day = value.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
