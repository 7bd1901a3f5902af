use std::collections::HashMap;
use crate::config::RankMode;
use crate::models::{Entity, Finding};
use super::ranker;

/// Finding description to number of occurrences across the population.
/// Descriptions keep the order they were first seen in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, description: &str) {
        match self.index.get(description) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(description.to_string(), self.entries.len());
                self.entries.push((description.to_string(), 1));
            }
        }
    }

    pub fn count(&self, description: &str) -> usize {
        self.index
            .get(description)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// (description, count) in first-seen order.
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }
}

/// Count every (entity, finding) occurrence by description. Repeats inside
/// one entity's list are counted each time.
pub fn aggregate(population: &[(Entity, Vec<Finding>)]) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for (_, findings) in population {
        for finding in findings {
            table.add(&finding.description);
        }
    }
    table
}

/// The `k` most frequent findings, highest first.
pub fn top_k(table: &FrequencyTable, k: usize, mode: RankMode) -> Vec<(String, usize)> {
    ranker::top_k(table.entries(), k, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(data: &[(&str, Vec<&str>)]) -> Vec<(Entity, Vec<Finding>)> {
        data.iter()
            .map(|(name, descriptions)| {
                let entity = Entity::new(name, &format!("{}.gov", name.to_lowercase()));
                let findings = descriptions.iter().map(|d| Finding::new(d, "medium")).collect();
                (entity, findings)
            })
            .collect()
    }

    #[test]
    fn test_counts_across_entities() {
        let table = aggregate(&population(&[("A", vec!["x", "y"]), ("B", vec!["x"])]));
        assert_eq!(table.count("x"), 2);
        assert_eq!(table.count("y"), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(top_k(&table, 1, RankMode::Stable), vec![("x".to_string(), 2)]);
    }

    #[test]
    fn test_repeats_within_entity_count_each_time() {
        let table = aggregate(&population(&[("A", vec!["x", "x", "x"]), ("B", vec!["y"])]));
        assert_eq!(table.count("x"), 3);
        assert_eq!(table.total(), 4);
    }

    #[test]
    fn test_first_seen_order_kept() {
        let table = aggregate(&population(&[("A", vec!["z", "a"]), ("B", vec!["m", "a"])]));
        let names: Vec<&str> = table.entries().iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_empty_population() {
        let table = aggregate(&[]);
        assert!(table.is_empty());
        assert_eq!(table.count("x"), 0);
        assert!(top_k(&table, 5, RankMode::Stable).is_empty());
    }

    #[test]
    fn test_top_k_legacy_zip_pairs_sorted_counts_with_first_seen_names() {
        let table = aggregate(&population(&[("A", vec!["x", "y"]), ("B", vec!["x", "z", "z", "z"])]));
        // x:2, y:1, z:3 in first-seen order
        assert_eq!(
            top_k(&table, 2, RankMode::LegacyZip),
            vec![("z".to_string(), 3), ("y".to_string(), 2)]
        );
        assert_eq!(
            top_k(&table, 2, RankMode::Stable),
            vec![("z".to_string(), 3), ("x".to_string(), 2)]
        );
    }

    #[test]
    fn test_rebuilt_table_is_identical() {
        let pop = population(&[("A", vec!["x", "y"]), ("B", vec!["x", "q"])]);
        assert_eq!(aggregate(&pop), aggregate(&pop));
    }
}
