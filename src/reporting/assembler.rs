use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use crate::errors::MuniError;

pub const STACK_COLUMNS: [&str; 4] = ["Overall", "Email Security", "Web Security", "Network Security"];

/// Columnar data for a stacked bar chart: one row per entity, in the order
/// of the overall ranking, and one column per ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedChart {
    pub labels: Vec<String>,
    pub columns: Vec<StackedColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedColumn {
    pub name: String,
    pub values: Vec<f64>,
}

impl StackedChart {
    pub fn row_count(&self) -> usize {
        self.labels.len()
    }

    pub fn column(&self, name: &str) -> Option<&StackedColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Values of one row across all columns.
    pub fn row(&self, label: &str) -> Option<Vec<f64>> {
        let i = self.labels.iter().position(|l| l == label)?;
        Some(self.columns.iter().map(|c| c.values[i]).collect())
    }
}

/// Combine the overall ranking with the email, web and network rankings.
///
/// All four must name exactly the same entities; anything else is
/// `InconsistentKeySet`. Category values are looked up by name, so each row
/// carries the values the rankings paired with that name.
pub fn assemble_stacked(
    overall: &[(String, f64)],
    email: &[(String, f64)],
    web: &[(String, f64)],
    network: &[(String, f64)],
) -> Result<StackedChart, MuniError> {
    let reference = key_set("Overall", overall)?;
    let rankings = [email, web, network];
    for (name, ranking) in STACK_COLUMNS[1..].iter().zip(rankings) {
        let keys = key_set(name, ranking)?;
        if keys != reference {
            let mut missing: Vec<&str> = reference.difference(&keys).copied().collect();
            let mut extra: Vec<&str> = keys.difference(&reference).copied().collect();
            missing.sort_unstable();
            extra.sort_unstable();
            return Err(MuniError::InconsistentKeySet(format!(
                "{} ranking differs from Overall (missing: [{}], extra: [{}])",
                name,
                missing.join(", "),
                extra.join(", ")
            )));
        }
    }

    let labels: Vec<String> = overall.iter().map(|(name, _)| name.clone()).collect();
    let mut columns = vec![StackedColumn {
        name: STACK_COLUMNS[0].to_string(),
        values: overall.iter().map(|(_, v)| *v).collect(),
    }];
    for (name, ranking) in STACK_COLUMNS[1..].iter().zip(rankings) {
        let values = labels
            .iter()
            .map(|label| lookup(ranking, label))
            .collect::<Result<Vec<f64>, MuniError>>()?;
        columns.push(StackedColumn { name: name.to_string(), values });
    }

    Ok(StackedChart { labels, columns })
}

fn key_set<'a>(name: &str, ranking: &'a [(String, f64)]) -> Result<HashSet<&'a str>, MuniError> {
    let keys: HashSet<&str> = ranking.iter().map(|(k, _)| k.as_str()).collect();
    if keys.len() != ranking.len() {
        return Err(MuniError::InconsistentKeySet(format!("{} ranking repeats a name", name)));
    }
    Ok(keys)
}

fn lookup(ranking: &[(String, f64)], label: &str) -> Result<f64, MuniError> {
    ranking
        .iter()
        .find(|(k, _)| k == label)
        .map(|(_, v)| *v)
        .ok_or_else(|| MuniError::InconsistentKeySet(format!("{} missing from ranking", label)))
}
