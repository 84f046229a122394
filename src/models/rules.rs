use regex::Regex;

/// The plate shapes accepted by the garage.
pub struct PlateRules {
    pub formats: Vec<PlateFormat>,
}

pub struct PlateFormat {
    pub name: String,
    pub pattern: String,
}

impl PlateRules {
    pub fn new() -> Self {
        let mut formats = Vec::new();

        formats.push(PlateFormat {
            name: "two letters, four digits".to_string(),
            pattern: r"^[A-Z]{2}[0-9]{4}$".to_string(),
        });

        formats.push(PlateFormat {
            name: "four letters, two digits".to_string(),
            pattern: r"^[A-Z]{4}[0-9]{2}$".to_string(),
        });

        formats.push(PlateFormat {
            name: "two letters, two digits, two letters".to_string(),
            pattern: r"^[A-Z]{2}[0-9]{2}[A-Z]{2}$".to_string(),
        });

        PlateRules { formats }
    }

    /// A normalized plate is acceptable if it matches at least one format.
    pub fn matches(&self, plate: &str) -> bool {
        self.formats.iter().any(|format| format.is_match(plate))
    }
}

impl PlateFormat {
    pub fn is_match(&self, plate: &str) -> bool {
        Regex::new(&self.pattern)
            .map(|re| re.is_match(plate))
            .unwrap_or(false)
    }
}
