use crate::models::{IssueType, ValidationIssue, VinValidationResult};

pub const VIN_LENGTH: usize = 17;

/// Position of the embedded check character (0-indexed). It carries weight
/// zero and is compared against the computed check value instead.
const CHECK_POSITION: usize = 8;

const WEIGHTS: [u32; VIN_LENGTH] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

pub struct VinValidator;

impl VinValidator {
    /// Uppercase the input and strip every character outside A-Z and 0-9.
    pub fn normalize(raw: &str) -> String {
        raw.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect()
    }

    /// Format check over a normalized VIN: exactly 17 characters from
    /// [A-HJ-NPR-Z0-9]. I, O and Q never appear in a VIN.
    pub fn is_well_formed(vin: &str) -> bool {
        vin.len() == VIN_LENGTH
            && vin
                .chars()
                .all(|c| matches!(c, 'A'..='H' | 'J'..='N' | 'P' | 'R'..='Z' | '0'..='9'))
    }

    // ISO 3779 transliteration for the weighted sum.
    fn char_value(c: char) -> Option<u32> {
        if let Some(digit) = c.to_digit(10) {
            return Some(digit);
        }
        match c {
            'A' | 'J' => Some(1),
            'B' | 'K' | 'S' => Some(2),
            'C' | 'L' | 'T' => Some(3),
            'D' | 'M' | 'U' => Some(4),
            'E' | 'N' | 'V' => Some(5),
            'F' | 'W' => Some(6),
            'G' | 'P' | 'X' => Some(7),
            'H' | 'Y' => Some(8),
            'R' | 'Z' => Some(9),
            _ => None,
        }
    }

    /// Check-digit verification over a normalized VIN. The weighted sum runs
    /// over all 17 positions; the check position itself contributes nothing
    /// since its weight is zero.
    pub fn has_valid_checksum(vin: &str) -> bool {
        if !Self::is_well_formed(vin) {
            return false;
        }

        let chars: Vec<char> = vin.chars().collect();
        let mut sum = 0u32;
        for (i, &c) in chars.iter().enumerate() {
            match Self::char_value(c) {
                Some(value) => sum += value * WEIGHTS[i],
                None => return false,
            }
        }

        let remainder = sum % 11;
        match chars[CHECK_POSITION].to_digit(10) {
            Some(declared) => declared == remainder,
            None => chars[CHECK_POSITION] == 'X' && remainder == 10,
        }
    }

    /// Whether a raw VIN string is acceptable. Blank input (after
    /// normalization) is valid: a VIN is optional, and absence is not an
    /// error. Never panics.
    pub fn is_valid(raw: &str) -> bool {
        let vin = Self::normalize(raw);
        if vin.is_empty() {
            return true;
        }
        Self::is_well_formed(&vin) && Self::has_valid_checksum(&vin)
    }

    /// Full validation with per-aspect outcomes and issue messages.
    pub fn validate(raw: &str) -> VinValidationResult {
        let normalized = Self::normalize(raw);

        if normalized.is_empty() {
            return VinValidationResult {
                is_valid: true,
                format_valid: true,
                checksum_valid: true,
                normalized,
                issues: Vec::new(),
            };
        }

        let mut issues = Vec::new();

        let format_valid = Self::is_well_formed(&normalized);
        if !format_valid {
            issues.push(ValidationIssue {
                issue_type: IssueType::Vin,
                message: format!(
                    "VIN must be 17 characters from A-HJ-NPR-Z0-9, got \"{}\"",
                    normalized
                ),
            });
        }

        let checksum_valid = format_valid && Self::has_valid_checksum(&normalized);
        if format_valid && !checksum_valid {
            issues.push(ValidationIssue {
                issue_type: IssueType::Vin,
                message: "VIN check digit does not match".to_string(),
            });
        }

        VinValidationResult {
            is_valid: format_valid && checksum_valid,
            format_valid,
            checksum_valid,
            normalized,
            issues,
        }
    }
}
