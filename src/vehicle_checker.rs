use chrono::NaiveDate;

use crate::models::{CheckResult, InspectionStatus, IssueType, ValidationIssue, Vehicle};
use crate::validation::{InspectionEvaluator, PlateValidator, VinValidator};

pub struct VehicleChecker;

impl VehicleChecker {
    pub fn new() -> Self {
        VehicleChecker
    }

    // Main check that runs every validation over one vehicle record
    pub fn check(&self, vehicle: &Vehicle, today: NaiveDate) -> CheckResult {
        // Step 1: plate format
        let plate_validation = PlateValidator::validate(&vehicle.plate);

        // Step 2: VIN (an absent VIN is acceptable)
        let vin_validation = VinValidator::validate(vehicle.vin.as_deref().unwrap_or(""));

        // Step 3: inspection due date
        let inspection_status =
            InspectionEvaluator::evaluate(&vehicle.plate, vehicle.year, today);

        // Combine all issues
        let mut issues = Vec::new();
        issues.extend(plate_validation.issues.clone());
        issues.extend(vin_validation.issues.clone());
        match inspection_status {
            InspectionStatus::Overdue => issues.push(ValidationIssue {
                issue_type: IssueType::Inspection,
                message: "Inspection window has closed".to_string(),
            }),
            InspectionStatus::Unknown => issues.push(ValidationIssue {
                issue_type: IssueType::Inspection,
                message: "Inspection month cannot be determined".to_string(),
            }),
            _ => {}
        }

        // The inspection status is advisory; only plate and VIN problems
        // invalidate the record itself.
        let is_valid = plate_validation.is_valid && vin_validation.is_valid;

        CheckResult {
            is_valid,
            plate_validation,
            vin_validation,
            inspection_status,
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(plate: &str, year: Option<i32>, vin: Option<&str>) -> Vehicle {
        Vehicle {
            id: "test".to_string(),
            plate: plate.to_string(),
            make: "Toyota".to_string(),
            model: "Yaris".to_string(),
            year,
            mileage: Some(45_000),
            vin: vin.map(String::from),
            created_at: 0,
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn valid_vehicle_passes_every_check() {
        let checker = VehicleChecker::new();
        let v = vehicle("AB1234", Some(2025), Some("1HGCM82633A004352"));
        let result = checker.check(&v, date(2026, 6, 1));

        assert!(result.is_valid);
        assert!(result.plate_validation.is_valid);
        assert!(result.vin_validation.is_valid);
        assert_eq!(result.inspection_status, InspectionStatus::Ok);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn missing_vin_is_not_an_issue() {
        let checker = VehicleChecker::new();
        let result = checker.check(&vehicle("AB1234", Some(2025), None), date(2026, 6, 1));
        assert!(result.is_valid);
        assert!(result.vin_validation.is_valid);
    }

    #[test]
    fn overdue_inspection_is_reported_but_not_invalidating() {
        let checker = VehicleChecker::new();
        // Digit 9 is due in January; by June the window has closed.
        let result = checker.check(&vehicle("AB1239", Some(2015), None), date(2026, 6, 1));

        assert!(result.is_valid);
        assert_eq!(result.inspection_status, InspectionStatus::Overdue);
        assert!(result
            .issues
            .iter()
            .any(|issue| issue.issue_type == IssueType::Inspection));
    }

    #[test]
    fn bad_plate_and_vin_accumulate_issues() {
        let checker = VehicleChecker::new();
        let result = checker.check(
            &vehicle("??", Some(2015), Some("1HGCM82633A004353")),
            date(2026, 6, 1),
        );

        assert!(!result.is_valid);
        assert!(result
            .issues
            .iter()
            .any(|issue| issue.issue_type == IssueType::Plate));
        assert!(result
            .issues
            .iter()
            .any(|issue| issue.issue_type == IssueType::Vin));
    }
}
