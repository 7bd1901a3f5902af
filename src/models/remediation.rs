use serde::{Deserialize, Serialize};
use super::finding::Finding;
use super::score::ScoreRecord;

/// Everything a remediation report for one host is rendered from. Stored in
/// the `remediation` collection keyed by hostname.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationDocument {
    pub hostname: String,
    pub title: String,
    pub scores: ScoreRecord,
    pub issues: Vec<Finding>,
}

/// Report title for a host: `danversma.gov` becomes `Danvers`,
/// `topsfield-ma.gov` becomes `Topsfield`.
pub fn report_title(hostname: &str) -> String {
    let stripped = hostname.replace("ma.gov", "").replace('-', "");
    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_title_strips_state_suffix() {
        assert_eq!(report_title("danversma.gov"), "Danvers");
        assert_eq!(report_title("topsfield-ma.gov"), "Topsfield");
        assert_eq!(report_title("wenhamma.gov"), "Wenham");
    }

    #[test]
    fn test_report_title_other_domains_kept() {
        assert_eq!(report_title("Nahant.org"), "Nahant.org");
        assert_eq!(report_title(""), "");
    }
}
