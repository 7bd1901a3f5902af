use serde::{Deserialize, Serialize};

/// Sub-scores that compose the vendor's overall rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    EmailSecurity,
    WebsiteSecurity,
    NetworkSecurity,
    Phishing,
    BrandProtection,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::EmailSecurity,
        Category::WebsiteSecurity,
        Category::NetworkSecurity,
        Category::Phishing,
        Category::BrandProtection,
    ];

    /// Key used by the vendor in `categoryScores`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::EmailSecurity => "emailSecurity",
            Self::WebsiteSecurity => "websiteSecurity",
            Self::NetworkSecurity => "networkSecurity",
            Self::Phishing => "phishing",
            Self::BrandProtection => "brandProtection",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::EmailSecurity => "Email Security",
            Self::WebsiteSecurity => "Website Security",
            Self::NetworkSecurity => "Network Security",
            Self::Phishing => "Phishing",
            Self::BrandProtection => "Brand Protection",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Category scores. A category the vendor did not report is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryScores {
    pub email_security: f64,
    pub website_security: f64,
    pub network_security: f64,
    pub phishing: f64,
    pub brand_protection: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::EmailSecurity => self.email_security,
            Category::WebsiteSecurity => self.website_security,
            Category::NetworkSecurity => self.network_security,
            Category::Phishing => self.phishing,
            Category::BrandProtection => self.brand_protection,
        }
    }

    pub fn set(&mut self, category: Category, value: f64) {
        let slot = match category {
            Category::EmailSecurity => &mut self.email_security,
            Category::WebsiteSecurity => &mut self.website_security,
            Category::NetworkSecurity => &mut self.network_security,
            Category::Phishing => &mut self.phishing,
            Category::BrandProtection => &mut self.brand_protection,
        };
        *slot = value;
    }
}

/// One entity's scores for a run. Written as one NDJSON line and persisted
/// in the `scores` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub name: String,
    pub overall_score: f64,
    pub category_scores: CategoryScores,
}

impl ScoreRecord {
    pub fn category(&self, category: Category) -> f64 {
        self.category_scores.get(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_scores_default_to_zero_when_deserialized() {
        let scores: CategoryScores = serde_json::from_str(r#"{"emailSecurity": 90}"#).unwrap();
        assert_eq!(scores.email_security, 90.0);
        assert_eq!(scores.website_security, 0.0);
        assert_eq!(scores.brand_protection, 0.0);
    }

    #[test]
    fn test_category_get_set() {
        let mut scores = CategoryScores::default();
        for (i, category) in Category::ALL.iter().enumerate() {
            scores.set(*category, i as f64 * 100.0);
        }
        assert_eq!(scores.get(Category::EmailSecurity), 0.0);
        assert_eq!(scores.get(Category::BrandProtection), 400.0);
    }

    #[test]
    fn test_score_record_json_shape() {
        let record = ScoreRecord {
            name: "Salem".to_string(),
            overall_score: 712.0,
            category_scores: CategoryScores::default(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "Salem");
        assert_eq!(json["overallScore"], 712.0);
        assert_eq!(json["categoryScores"]["networkSecurity"], 0.0);
    }
}
