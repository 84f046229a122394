use crate::models::{IssueType, PlateRules, PlateValidationResult, ValidationIssue};

/// Uppercase the input and strip every character outside A-Z and 0-9.
pub fn normalize_plate(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

pub struct PlateValidator;

impl PlateValidator {
    pub fn validate(raw: &str) -> PlateValidationResult {
        let normalized = normalize_plate(raw);
        let mut issues = Vec::new();

        if normalized.is_empty() {
            issues.push(ValidationIssue {
                issue_type: IssueType::Plate,
                message: "Plate is required".to_string(),
            });
            return PlateValidationResult {
                is_valid: false,
                normalized,
                issues,
            };
        }

        let rules = PlateRules::new();
        if !rules.matches(&normalized) {
            issues.push(ValidationIssue {
                issue_type: IssueType::Plate,
                message: format!("\"{}\" does not match any accepted plate format", normalized),
            });
        }

        let is_valid = issues.is_empty();
        PlateValidationResult {
            is_valid,
            normalized,
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_all_three_formats() {
        assert!(PlateValidator::validate("AB1234").is_valid);
        assert!(PlateValidator::validate("BCDF23").is_valid);
        assert!(PlateValidator::validate("AB12CD").is_valid);
    }

    #[test]
    fn normalizes_before_matching() {
        let result = PlateValidator::validate("ab-1234");
        assert!(result.is_valid);
        assert_eq!(result.normalized, "AB1234");
    }

    #[test]
    fn rejects_unknown_shapes() {
        assert!(!PlateValidator::validate("1234AB").is_valid);
        assert!(!PlateValidator::validate("ABC123").is_valid);
        assert!(!PlateValidator::validate("AB123").is_valid);
    }

    #[test]
    fn empty_plate_is_an_issue() {
        let result = PlateValidator::validate("  --  ");
        assert!(!result.is_valid);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].issue_type, IssueType::Plate);
    }
}
