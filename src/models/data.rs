use serde::{Deserialize, Serialize};

/// One vehicle in the garage. The plate is stored normalized (uppercase,
/// alphanumeric only) and is unique within a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub plate: String,
    pub make: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

/// Input for creating or updating a vehicle, before validation.
#[derive(Debug, Clone, Default)]
pub struct NewVehicle {
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub mileage: Option<u32>,
    pub vin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: String,
    pub vehicle_id: String,
    pub title: String,
    /// ISO date, YYYY-MM-DD.
    pub date: String,
    pub mileage: u32,
    pub cost: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct NewMaintenance {
    pub title: String,
    pub date: String,
    pub mileage: u32,
    pub cost: u64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryEventKind {
    VehicleViewed,
    MaintenanceCreated,
    MaintenanceDeleted,
}

/// Audit trail entry for one vehicle. Each vehicle keeps only its most
/// recent events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub id: String,
    pub vehicle_id: String,
    pub kind: HistoryEventKind,
    pub message: String,
    pub at: i64,
}

/// Outcome of the inspection due-date evaluation for one vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    /// Registration year or plate digit is missing.
    Unknown,
    Ok,
    DueThisMonth,
    Overdue,
}

impl InspectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InspectionStatus::Unknown => "unknown",
            InspectionStatus::Ok => "ok",
            InspectionStatus::DueThisMonth => "due this month",
            InspectionStatus::Overdue => "overdue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub vehicle_id: String,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub plate: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub issue_type: IssueType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    Plate,
    Vin,
    Inspection,
    Field,
}

#[derive(Debug)]
pub struct PlateValidationResult {
    pub is_valid: bool,
    pub normalized: String,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug)]
pub struct VinValidationResult {
    pub is_valid: bool,
    pub format_valid: bool,
    pub checksum_valid: bool,
    pub normalized: String,
    pub issues: Vec<ValidationIssue>,
}

/// Combined result of checking one vehicle record. The inspection status is
/// advisory; only plate and VIN problems make the record invalid.
#[derive(Debug)]
pub struct CheckResult {
    pub is_valid: bool,
    pub plate_validation: PlateValidationResult,
    pub vin_validation: VinValidationResult,
    pub inspection_status: InspectionStatus,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GarageStats {
    pub total_vehicles: usize,
    pub total_invested: u64,
    pub active_alerts: usize,
}
