use chrono::NaiveDate;
use log::debug;

use crate::models::{Alert, AlertSeverity, InspectionStatus, Vehicle};
use crate::validation::InspectionEvaluator;

pub struct AlertEngine;

impl AlertEngine {
    pub fn new() -> Self {
        AlertEngine
    }

    /// Scan the garage and collect an alert for every vehicle whose
    /// inspection is due this month or already overdue.
    pub fn scan(&self, vehicles: &[Vehicle], today: NaiveDate) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for vehicle in vehicles {
            match InspectionEvaluator::evaluate(&vehicle.plate, vehicle.year, today) {
                InspectionStatus::Overdue => alerts.push(Alert {
                    vehicle_id: vehicle.id.clone(),
                    severity: AlertSeverity::Critical,
                    title: "Inspection overdue".to_string(),
                    message: format!(
                        "The inspection window for your {} {} has closed.",
                        vehicle.make, vehicle.model
                    ),
                    plate: vehicle.plate.clone(),
                }),
                InspectionStatus::DueThisMonth => {
                    let digit = vehicle
                        .plate
                        .chars()
                        .last()
                        .map(|c| c.to_string())
                        .unwrap_or_default();
                    alerts.push(Alert {
                        vehicle_id: vehicle.id.clone(),
                        severity: AlertSeverity::Warning,
                        title: "Inspection due this month".to_string(),
                        message: format!(
                            "Plates ending in {} are scheduled for {}.",
                            digit,
                            today.format("%B")
                        ),
                        plate: vehicle.plate.clone(),
                    });
                }
                _ => {}
            }
        }

        debug!(
            "alert scan: {} alerts over {} vehicles",
            alerts.len(),
            vehicles.len()
        );
        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: &str, plate: &str, year: Option<i32>) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            plate: plate.to_string(),
            make: "Suzuki".to_string(),
            model: "Swift".to_string(),
            year,
            mileage: None,
            vin: None,
            created_at: 0,
        }
    }

    #[test]
    fn scan_flags_overdue_and_due_vehicles() {
        let garage = vec![
            // Digit 9: January, long gone by April.
            vehicle("a", "AB1239", Some(2015)),
            // Digit 1: April, due right now.
            vehicle("b", "XY9871", Some(2015)),
            // Digit 8: November, nothing yet.
            vehicle("c", "CD5678", Some(2015)),
            // Exempt regardless of digit.
            vehicle("d", "EF1239", Some(2025)),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 4, 10).unwrap();

        let alerts = AlertEngine::new().scan(&garage, today);
        assert_eq!(alerts.len(), 2);

        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
        assert_eq!(alerts[0].plate, "AB1239");

        assert_eq!(alerts[1].severity, AlertSeverity::Warning);
        assert_eq!(alerts[1].plate, "XY9871");
        assert!(alerts[1].message.contains("April"));
    }

    #[test]
    fn quiet_garage_produces_no_alerts() {
        let garage = vec![
            vehicle("a", "CD5678", Some(2015)),
            vehicle("b", "AB1234", None),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 4, 10).unwrap();
        assert!(AlertEngine::new().scan(&garage, today).is_empty());
    }
}
