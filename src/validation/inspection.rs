use chrono::{Datelike, NaiveDate};

use crate::models::InspectionStatus;

/// Vehicles under this age, in years, are exempt from periodic inspection.
const EXEMPTION_YEARS: i32 = 3;

pub struct InspectionEvaluator;

impl InspectionEvaluator {
    /// Assigned inspection month for a plate's final digit, 0-indexed
    /// (January = 0). The rotation places digit 9 in January; the table is
    /// carried over verbatim from the regulatory calendar in use.
    pub fn due_month(digit: u32) -> Option<u32> {
        match digit {
            9 => Some(0),
            0 => Some(1),
            1 => Some(3),
            2 => Some(4),
            3 => Some(5),
            4 => Some(6),
            5 => Some(7),
            6 => Some(8),
            7 => Some(9),
            8 => Some(10),
            _ => None,
        }
    }

    /// Evaluate a vehicle's inspection status for a given date. Pure and
    /// total: any plate and any optional year map to a status.
    pub fn evaluate(
        plate: &str,
        registration_year: Option<i32>,
        today: NaiveDate,
    ) -> InspectionStatus {
        let year = match registration_year {
            Some(year) => year,
            None => return InspectionStatus::Unknown,
        };

        // The age exemption also covers registration years in the future.
        if today.year() - year < EXEMPTION_YEARS {
            return InspectionStatus::Ok;
        }

        let digit = match plate.chars().last().and_then(|c| c.to_digit(10)) {
            Some(digit) => digit,
            None => return InspectionStatus::Unknown,
        };

        let due = match Self::due_month(digit) {
            Some(month) => month,
            None => return InspectionStatus::Ok,
        };

        let current = today.month0();
        if current > due {
            InspectionStatus::Overdue
        } else if current == due {
            InspectionStatus::DueThisMonth
        } else {
            InspectionStatus::Ok
        }
    }
}
