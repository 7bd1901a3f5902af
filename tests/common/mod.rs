#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;
use serde_json::{json, Value};
use muniscore::config::{AppConfig, OutputConfig};
use muniscore::errors::MuniError;
use muniscore::models::{Entity, Finding};
use muniscore::pipeline::PipelineConfig;
use muniscore::vendor::{RawRisk, VendorApi};

/// In-memory vendor keyed by domain.
#[derive(Default)]
pub struct FakeVendor {
    pub scores: HashMap<String, Value>,
    pub findings: HashMap<String, Vec<Finding>>,
    pub risks: HashMap<String, Vec<RawRisk>>,
    pub failing: HashSet<String>,
    pub calls: AtomicUsize,
}

impl FakeVendor {
    pub fn with_score(mut self, domain: &str, score: f64, email: f64, web: f64, network: f64) -> Self {
        self.scores.insert(
            domain.to_string(),
            json!({
                "score": score,
                "categoryScores": {
                    "emailSecurity": email,
                    "websiteSecurity": web,
                    "networkSecurity": network,
                }
            }),
        );
        self
    }

    pub fn with_raw_score(mut self, domain: &str, raw: Value) -> Self {
        self.scores.insert(domain.to_string(), raw);
        self
    }

    pub fn with_findings(mut self, domain: &str, descriptions: &[&str]) -> Self {
        self.findings.insert(
            domain.to_string(),
            descriptions.iter().map(|d| Finding::new(d, "medium")).collect(),
        );
        self
    }

    pub fn with_risks(mut self, domain: &str, risks: Vec<RawRisk>) -> Self {
        self.risks.insert(domain.to_string(), risks);
        self
    }

    pub fn failing(mut self, domain: &str) -> Self {
        self.failing.insert(domain.to_string());
        self
    }

    fn check(&self, entity: &Entity) -> Result<(), MuniError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&entity.domain) {
            return Err(MuniError::Network(format!("HTTP 503 from /vendor for {}", entity)));
        }
        Ok(())
    }
}

#[async_trait]
impl VendorApi for FakeVendor {
    async fn vendor_score(&self, entity: &Entity) -> Result<Value, MuniError> {
        self.check(entity)?;
        self.scores
            .get(&entity.domain)
            .cloned()
            .ok_or_else(|| MuniError::Network(format!("HTTP 404 from /vendor for {}", entity)))
    }

    async fn vulnerabilities(&self, entity: &Entity) -> Result<Vec<Finding>, MuniError> {
        self.check(entity)?;
        Ok(self.findings.get(&entity.domain).cloned().unwrap_or_default())
    }

    async fn risks(&self, entity: &Entity) -> Result<Vec<RawRisk>, MuniError> {
        self.check(entity)?;
        Ok(self.risks.get(&entity.domain).cloned().unwrap_or_default())
    }

    async fn vendor_risks(&self, entity: &Entity) -> Result<Vec<RawRisk>, MuniError> {
        self.risks(entity).await
    }
}

pub fn entities() -> Vec<Entity> {
    vec![
        Entity::new("Maynard", "townofmaynard-ma.gov"),
        Entity::new("Acton", "actonma.gov"),
        Entity::new("Bolton", "townofbolton.com"),
    ]
}

/// The standard three-town vendor used by most tests.
pub fn vendor() -> FakeVendor {
    FakeVendor::default()
        .with_score("townofmaynard-ma.gov", 720.0, 500.0, 610.0, 950.0)
        .with_score("actonma.gov", 650.0, 700.0, 400.0, 950.0)
        .with_score("townofbolton.com", 801.0, 300.0, 800.0, 600.0)
        .with_findings("townofmaynard-ma.gov", &["CSP is not implemented", "CAA not enabled"])
        .with_findings("actonma.gov", &["CSP is not implemented"])
        .with_findings("townofbolton.com", &["CSP is not implemented", "HSTS not enforced"])
}

pub fn pipeline_config(root: &Path, entities: Vec<Entity>) -> PipelineConfig {
    let app = AppConfig {
        output: Some(OutputConfig {
            data_dir: Some(root.join("data").to_string_lossy().into_owned()),
            graph_dir: Some(root.join("graphs").to_string_lossy().into_owned()),
            remediation_dir: Some(root.join("remediation").to_string_lossy().into_owned()),
        }),
        entities: Some(entities),
        ..Default::default()
    };
    let mut config = PipelineConfig::from_app_config(&app).unwrap();
    config.show_progress = false;
    config
}
