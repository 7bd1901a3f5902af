use serde_json::Value;
use crate::errors::MuniError;
use crate::models::{Category, CategoryScores, ScoreRecord};

/// Flatten one raw `/vendor` record into a [`ScoreRecord`].
///
/// A missing (or null) category is zero. A missing or non-numeric `score` is
/// a `MalformedRecord`, as is a category that is present but not a number.
pub fn extract_scores(name: &str, raw: &Value) -> Result<ScoreRecord, MuniError> {
    let overall_score = match raw.get("score") {
        Some(v) => v
            .as_f64()
            .ok_or_else(|| MuniError::malformed(name, format!("score is not numeric: {}", v)))?,
        None => return Err(MuniError::malformed(name, "score is missing")),
    };

    let mut category_scores = CategoryScores::default();
    match raw.get("categoryScores") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for category in Category::ALL {
                match map.get(category.key()) {
                    None | Some(Value::Null) => {}
                    Some(v) => {
                        let value = v.as_f64().ok_or_else(|| {
                            MuniError::malformed(name, format!("{} is not numeric: {}", category, v))
                        })?;
                        category_scores.set(category, value);
                    }
                }
            }
        }
        Some(other) => {
            return Err(MuniError::malformed(name, format!("categoryScores is not an object: {}", other)));
        }
    }

    Ok(ScoreRecord {
        name: name.to_string(),
        overall_score,
        category_scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_categories_default_to_zero() {
        let record = extract_scores("Salem", &json!({"score": 700, "categoryScores": {"emailSecurity": 90}})).unwrap();
        assert_eq!(record.overall_score, 700.0);
        assert_eq!(record.category(Category::EmailSecurity), 90.0);
        assert_eq!(record.category(Category::WebsiteSecurity), 0.0);
        assert_eq!(record.category(Category::NetworkSecurity), 0.0);
        assert_eq!(record.category(Category::Phishing), 0.0);
        assert_eq!(record.category(Category::BrandProtection), 0.0);
    }

    #[test]
    fn test_all_categories_extracted() {
        let raw = json!({
            "name": "Lynn",
            "score": 612,
            "categoryScores": {
                "emailSecurity": 500,
                "websiteSecurity": 610,
                "networkSecurity": 720,
                "phishing": 950,
                "brandProtection": 800
            }
        });
        let record = extract_scores("Lynn", &raw).unwrap();
        assert_eq!(record.name, "Lynn");
        assert_eq!(record.category(Category::NetworkSecurity), 720.0);
        assert_eq!(record.category(Category::BrandProtection), 800.0);
    }

    #[test]
    fn test_missing_category_object_is_all_zero() {
        let record = extract_scores("Ayer", &json!({"score": 400})).unwrap();
        assert_eq!(record.category_scores, CategoryScores::default());
    }

    #[test]
    fn test_missing_score_is_malformed() {
        let result = extract_scores("Ayer", &json!({"categoryScores": {}}));
        assert!(matches!(result, Err(MuniError::MalformedRecord { .. })));
    }

    #[test]
    fn test_non_numeric_score_is_malformed() {
        let result = extract_scores("Ayer", &json!({"score": "high"}));
        assert!(matches!(result, Err(MuniError::MalformedRecord { .. })));
    }

    #[test]
    fn test_non_numeric_category_is_malformed() {
        let result = extract_scores("Ayer", &json!({"score": 500, "categoryScores": {"phishing": "n/a"}}));
        assert!(matches!(result, Err(MuniError::MalformedRecord { .. })));
    }

    #[test]
    fn test_null_category_is_zero() {
        let record = extract_scores("Ayer", &json!({"score": 500, "categoryScores": {"phishing": null}})).unwrap();
        assert_eq!(record.category(Category::Phishing), 0.0);
    }
}
