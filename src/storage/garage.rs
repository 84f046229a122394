use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, Utc};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::alerts::AlertEngine;
use crate::models::{
    GarageStats, HistoryEvent, HistoryEventKind, MaintenanceRecord, NewMaintenance, NewVehicle,
    Vehicle,
};
use crate::utils::GarageError;
use crate::validation::{normalize_plate, PlateValidator, VinValidator};

const VEHICLES_FILE: &str = "vehicles.json";
const MAINTENANCE_FILE: &str = "maintenance.json";
const HISTORY_FILE: &str = "history.json";

/// Most recent history events kept per vehicle.
const HISTORY_CAP: usize = 80;

pub const MIN_REGISTRATION_YEAR: i32 = 1950;
pub const MAX_MILEAGE_KM: u32 = 2_000_000;
pub const MAX_COST: u64 = 100_000_000;

/// File-backed garage: vehicles, their maintenance records and a per-vehicle
/// history trail, each persisted as a JSON list under one data directory.
/// Every mutation is written through immediately.
pub struct GarageStore {
    dir: PathBuf,
    vehicles: Vec<Vehicle>,
    maintenance: Vec<MaintenanceRecord>,
    history: Vec<HistoryEvent>,
}

impl GarageStore {
    /// Open (or initialize) the garage under `dir`. Unreadable or malformed
    /// files load as empty lists rather than failing the whole store.
    pub fn open(dir: &Path) -> Result<Self, GarageError> {
        fs::create_dir_all(dir)?;

        let vehicles: Vec<Vehicle> = load_list(&dir.join(VEHICLES_FILE));
        // A record without a plate is unusable; drop it on load.
        let vehicles: Vec<Vehicle> = vehicles
            .into_iter()
            .filter(|v| !v.plate.is_empty())
            .collect();
        let maintenance = load_list(&dir.join(MAINTENANCE_FILE));
        let history = load_list(&dir.join(HISTORY_FILE));

        Ok(GarageStore {
            dir: dir.to_path_buf(),
            vehicles,
            maintenance,
            history,
        })
    }

    /// Per-user default data directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("motoralert")
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Look a vehicle up by id or by plate (in any spelling).
    pub fn find_vehicle(&self, key: &str) -> Option<&Vehicle> {
        let plate = normalize_plate(key);
        self.vehicles
            .iter()
            .find(|v| v.id == key || v.plate == plate)
    }

    pub fn add_vehicle(&mut self, new: NewVehicle) -> Result<Vehicle, GarageError> {
        let (plate, vin) = self.validate_vehicle(&new, None)?;

        let vehicle = Vehicle {
            id: Uuid::new_v4().to_string(),
            plate,
            make: new.make.trim().to_string(),
            model: new.model.trim().to_string(),
            year: new.year,
            mileage: new.mileage,
            vin,
            created_at: Utc::now().timestamp_millis(),
        };

        self.vehicles.insert(0, vehicle.clone());
        self.save_vehicles()?;
        info!("added vehicle {} ({})", vehicle.plate, vehicle.id);
        Ok(vehicle)
    }

    pub fn update_vehicle(&mut self, id: &str, new: NewVehicle) -> Result<Vehicle, GarageError> {
        let (plate, vin) = self.validate_vehicle(&new, Some(id))?;

        let vehicle = self
            .vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| GarageError::VehicleNotFound(id.to_string()))?;

        vehicle.plate = plate;
        vehicle.make = new.make.trim().to_string();
        vehicle.model = new.model.trim().to_string();
        vehicle.year = new.year;
        vehicle.mileage = new.mileage;
        vehicle.vin = vin;
        let updated = vehicle.clone();

        self.save_vehicles()?;
        Ok(updated)
    }

    /// Remove a vehicle together with its maintenance records and history.
    pub fn remove_vehicle(&mut self, key: &str) -> Result<Vehicle, GarageError> {
        let id = match self.find_vehicle(key) {
            Some(v) => v.id.clone(),
            None => return Err(GarageError::VehicleNotFound(key.to_string())),
        };

        let pos = self
            .vehicles
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| GarageError::VehicleNotFound(key.to_string()))?;
        let removed = self.vehicles.remove(pos);

        self.maintenance.retain(|m| m.vehicle_id != id);
        self.history.retain(|h| h.vehicle_id != id);

        self.save_vehicles()?;
        self.save_maintenance()?;
        self.save_history()?;
        info!("removed vehicle {} and its records", removed.plate);
        Ok(removed)
    }

    pub fn add_maintenance(
        &mut self,
        vehicle_key: &str,
        new: NewMaintenance,
    ) -> Result<MaintenanceRecord, GarageError> {
        let vehicle_id = match self.find_vehicle(vehicle_key) {
            Some(v) => v.id.clone(),
            None => return Err(GarageError::VehicleNotFound(vehicle_key.to_string())),
        };

        if new.title.trim().len() < 3 {
            return Err(GarageError::InvalidField(
                "title must be at least 3 characters".to_string(),
            ));
        }
        if new.mileage > MAX_MILEAGE_KM {
            return Err(GarageError::InvalidField(format!(
                "mileage must be at most {} km",
                MAX_MILEAGE_KM
            )));
        }
        if new.cost > MAX_COST {
            return Err(GarageError::InvalidField(format!(
                "cost must be at most {}",
                MAX_COST
            )));
        }
        if NaiveDate::parse_from_str(&new.date, "%Y-%m-%d").is_err() {
            return Err(GarageError::InvalidField(format!(
                "date must be YYYY-MM-DD, got \"{}\"",
                new.date
            )));
        }

        let record = MaintenanceRecord {
            id: Uuid::new_v4().to_string(),
            vehicle_id: vehicle_id.clone(),
            title: new.title.trim().to_string(),
            date: new.date,
            mileage: new.mileage,
            cost: new.cost,
            notes: new
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|notes| !notes.is_empty())
                .map(String::from),
            created_at: Utc::now().timestamp_millis(),
        };

        self.maintenance.insert(0, record.clone());
        self.save_maintenance()?;
        self.push_history(
            &vehicle_id,
            HistoryEventKind::MaintenanceCreated,
            format!("Recorded \"{}\" at {} km", record.title, record.mileage),
        )?;
        Ok(record)
    }

    pub fn remove_maintenance(&mut self, id: &str) -> Result<MaintenanceRecord, GarageError> {
        let pos = self
            .maintenance
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| GarageError::RecordNotFound(id.to_string()))?;
        let removed = self.maintenance.remove(pos);

        self.save_maintenance()?;
        self.push_history(
            &removed.vehicle_id,
            HistoryEventKind::MaintenanceDeleted,
            format!("Deleted \"{}\"", removed.title),
        )?;
        Ok(removed)
    }

    /// Maintenance records for one vehicle, newest first.
    pub fn maintenance_for(&self, vehicle_id: &str) -> Vec<&MaintenanceRecord> {
        let mut records: Vec<&MaintenanceRecord> = self
            .maintenance
            .iter()
            .filter(|m| m.vehicle_id == vehicle_id)
            .collect();
        records.sort_by_key(|m| std::cmp::Reverse(m.created_at));
        records
    }

    /// Record that the vehicle's detail view was opened.
    pub fn record_view(&mut self, key: &str) -> Result<(), GarageError> {
        let (id, plate) = match self.find_vehicle(key) {
            Some(v) => (v.id.clone(), v.plate.clone()),
            None => return Err(GarageError::VehicleNotFound(key.to_string())),
        };
        self.push_history(
            &id,
            HistoryEventKind::VehicleViewed,
            format!("Opened the detail view for {}", plate),
        )
    }

    /// History for one vehicle, newest first, capped.
    pub fn history_for(&self, vehicle_id: &str) -> Vec<&HistoryEvent> {
        let mut events: Vec<&HistoryEvent> = self
            .history
            .iter()
            .filter(|h| h.vehicle_id == vehicle_id)
            .collect();
        events.sort_by_key(|h| std::cmp::Reverse(h.at));
        events.truncate(HISTORY_CAP);
        events
    }

    pub fn stats(&self, today: NaiveDate) -> GarageStats {
        let total_invested = self.maintenance.iter().map(|m| m.cost).sum();
        let active_alerts = AlertEngine::new().scan(&self.vehicles, today).len();
        GarageStats {
            total_vehicles: self.vehicles.len(),
            total_invested,
            active_alerts,
        }
    }

    pub fn clear_history(&mut self) -> Result<(), GarageError> {
        self.history.clear();
        self.save_history()
    }

    pub fn clear_maintenance(&mut self) -> Result<(), GarageError> {
        self.maintenance.clear();
        self.save_maintenance()
    }

    pub fn clear_all(&mut self) -> Result<(), GarageError> {
        self.vehicles.clear();
        self.maintenance.clear();
        self.history.clear();
        self.save_vehicles()?;
        self.save_maintenance()?;
        self.save_history()
    }

    fn validate_vehicle(
        &self,
        new: &NewVehicle,
        ignore_id: Option<&str>,
    ) -> Result<(String, Option<String>), GarageError> {
        let plate_validation = PlateValidator::validate(&new.plate);
        if !plate_validation.is_valid {
            return Err(GarageError::InvalidPlate(new.plate.clone()));
        }
        let plate = plate_validation.normalized;

        let duplicate = self
            .vehicles
            .iter()
            .any(|v| v.plate == plate && Some(v.id.as_str()) != ignore_id);
        if duplicate {
            return Err(GarageError::DuplicatePlate(plate));
        }

        if new.make.trim().len() < 2 {
            return Err(GarageError::InvalidField(
                "make must be at least 2 characters".to_string(),
            ));
        }
        if new.model.trim().len() < 2 {
            return Err(GarageError::InvalidField(
                "model must be at least 2 characters".to_string(),
            ));
        }

        if let Some(year) = new.year {
            let max_year = Utc::now().year() + 1;
            if year < MIN_REGISTRATION_YEAR || year > max_year {
                return Err(GarageError::InvalidField(format!(
                    "year must be between {} and {}",
                    MIN_REGISTRATION_YEAR, max_year
                )));
            }
        }
        if let Some(mileage) = new.mileage {
            if mileage > MAX_MILEAGE_KM {
                return Err(GarageError::InvalidField(format!(
                    "mileage must be at most {} km",
                    MAX_MILEAGE_KM
                )));
            }
        }

        let vin = match &new.vin {
            Some(raw) => {
                let normalized = VinValidator::normalize(raw);
                if normalized.is_empty() {
                    None
                } else if !VinValidator::is_valid(raw) {
                    return Err(GarageError::InvalidVin(normalized));
                } else {
                    Some(normalized)
                }
            }
            None => None,
        };

        Ok((plate, vin))
    }

    fn push_history(
        &mut self,
        vehicle_id: &str,
        kind: HistoryEventKind,
        message: String,
    ) -> Result<(), GarageError> {
        let event = HistoryEvent {
            id: Uuid::new_v4().to_string(),
            vehicle_id: vehicle_id.to_string(),
            kind,
            message,
            at: Utc::now().timestamp_millis(),
        };
        self.history.insert(0, event);

        // Keep only the newest events for this vehicle. New events are
        // always inserted at the front, so a front-to-back pass sees them
        // newest first.
        let mut kept = 0usize;
        self.history.retain(|h| {
            if h.vehicle_id != vehicle_id {
                return true;
            }
            kept += 1;
            kept <= HISTORY_CAP
        });

        self.save_history()
    }

    fn save_vehicles(&self) -> Result<(), GarageError> {
        save_list(&self.dir.join(VEHICLES_FILE), &self.vehicles)
    }

    fn save_maintenance(&self) -> Result<(), GarageError> {
        save_list(&self.dir.join(MAINTENANCE_FILE), &self.maintenance)
    }

    fn save_history(&self) -> Result<(), GarageError> {
        save_list(&self.dir.join(HISTORY_FILE), &self.history)
    }
}

fn load_list<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&raw) {
        Ok(list) => list,
        Err(err) => {
            warn!("ignoring malformed store file {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

fn save_list<T: Serialize>(path: &Path, list: &[T]) -> Result<(), GarageError> {
    let json = serde_json::to_string_pretty(list)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn draft(plate: &str) -> NewVehicle {
        NewVehicle {
            plate: plate.to_string(),
            make: "Toyota".to_string(),
            model: "Yaris".to_string(),
            year: Some(2018),
            mileage: Some(45_000),
            vin: None,
        }
    }

    fn service(title: &str, cost: u64) -> NewMaintenance {
        NewMaintenance {
            title: title.to_string(),
            date: "2026-01-15".to_string(),
            mileage: 50_000,
            cost,
            notes: None,
        }
    }

    #[test]
    fn vehicles_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut store = GarageStore::open(dir.path()).unwrap();
            store.add_vehicle(draft("AB1234")).unwrap();
        }
        let store = GarageStore::open(dir.path()).unwrap();
        assert_eq!(store.vehicles().len(), 1);
        assert_eq!(store.vehicles()[0].plate, "AB1234");
    }

    #[test]
    fn duplicate_plates_are_rejected() {
        let dir = tempdir().unwrap();
        let mut store = GarageStore::open(dir.path()).unwrap();
        store.add_vehicle(draft("AB1234")).unwrap();

        let err = store.add_vehicle(draft("ab-1234")).unwrap_err();
        assert!(matches!(err, GarageError::DuplicatePlate(_)));
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let dir = tempdir().unwrap();
        let mut store = GarageStore::open(dir.path()).unwrap();

        let bad_plate = draft("123");
        assert!(matches!(
            store.add_vehicle(bad_plate).unwrap_err(),
            GarageError::InvalidPlate(_)
        ));

        let mut old = draft("AB1234");
        old.year = Some(1900);
        assert!(matches!(
            store.add_vehicle(old).unwrap_err(),
            GarageError::InvalidField(_)
        ));

        let mut far = draft("AB1234");
        far.mileage = Some(3_000_000);
        assert!(matches!(
            store.add_vehicle(far).unwrap_err(),
            GarageError::InvalidField(_)
        ));

        let mut bad_vin = draft("AB1234");
        bad_vin.vin = Some("NOTAVIN".to_string());
        assert!(matches!(
            store.add_vehicle(bad_vin).unwrap_err(),
            GarageError::InvalidVin(_)
        ));
    }

    #[test]
    fn vin_is_stored_normalized() {
        let dir = tempdir().unwrap();
        let mut store = GarageStore::open(dir.path()).unwrap();

        let mut new = draft("AB1234");
        new.vin = Some("1hg-cm82633a004352".to_string());
        let vehicle = store.add_vehicle(new).unwrap();
        assert_eq!(vehicle.vin.as_deref(), Some("1HGCM82633A004352"));
    }

    #[test]
    fn removing_a_vehicle_cascades() {
        let dir = tempdir().unwrap();
        let mut store = GarageStore::open(dir.path()).unwrap();

        let vehicle = store.add_vehicle(draft("AB1234")).unwrap();
        store
            .add_maintenance(&vehicle.id, service("Oil change", 30_000))
            .unwrap();
        store.record_view(&vehicle.id).unwrap();

        store.remove_vehicle(&vehicle.id).unwrap();
        assert!(store.vehicles().is_empty());
        assert!(store.maintenance_for(&vehicle.id).is_empty());
        assert!(store.history_for(&vehicle.id).is_empty());
    }

    #[test]
    fn maintenance_creates_history_and_lists_newest_first() {
        let dir = tempdir().unwrap();
        let mut store = GarageStore::open(dir.path()).unwrap();
        let vehicle = store.add_vehicle(draft("AB1234")).unwrap();

        store
            .add_maintenance(&vehicle.id, service("Oil change", 30_000))
            .unwrap();
        store
            .add_maintenance(&vehicle.id, service("Brake pads", 80_000))
            .unwrap();

        let records = store.maintenance_for(&vehicle.id);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Brake pads");

        let history = store.history_for(&vehicle.id);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].kind, HistoryEventKind::MaintenanceCreated);
    }

    #[test]
    fn maintenance_validation_rejects_bad_input() {
        let dir = tempdir().unwrap();
        let mut store = GarageStore::open(dir.path()).unwrap();
        let vehicle = store.add_vehicle(draft("AB1234")).unwrap();

        let short = service("ab", 1_000);
        assert!(store.add_maintenance(&vehicle.id, short).is_err());

        let mut bad_date = service("Oil change", 1_000);
        bad_date.date = "15-01-2026".to_string();
        assert!(store.add_maintenance(&vehicle.id, bad_date).is_err());

        let pricey = service("Engine swap", 200_000_000);
        assert!(store.add_maintenance(&vehicle.id, pricey).is_err());
    }

    #[test]
    fn history_is_capped_per_vehicle() {
        let dir = tempdir().unwrap();
        let mut store = GarageStore::open(dir.path()).unwrap();
        let vehicle = store.add_vehicle(draft("AB1234")).unwrap();

        for _ in 0..100 {
            store.record_view(&vehicle.id).unwrap();
        }
        assert_eq!(store.history_for(&vehicle.id).len(), 80);
    }

    #[test]
    fn malformed_files_load_as_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(VEHICLES_FILE), "not json at all").unwrap();

        let store = GarageStore::open(dir.path()).unwrap();
        assert!(store.vehicles().is_empty());
    }

    #[test]
    fn stats_cover_the_whole_garage() {
        let dir = tempdir().unwrap();
        let mut store = GarageStore::open(dir.path()).unwrap();

        // Digit 9: overdue by March. Digit 8: due in November.
        let mut first = draft("AB1239");
        first.year = Some(2015);
        let first = store.add_vehicle(first).unwrap();
        let mut second = draft("XY9878");
        second.year = Some(2015);
        store.add_vehicle(second).unwrap();

        store
            .add_maintenance(&first.id, service("Oil change", 10_000))
            .unwrap();
        store
            .add_maintenance(&first.id, service("Tires", 5_000))
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let stats = store.stats(today);
        assert_eq!(stats.total_vehicles, 2);
        assert_eq!(stats.total_invested, 15_000);
        assert_eq!(stats.active_alerts, 1);
    }

    #[test]
    fn find_vehicle_accepts_any_plate_spelling() {
        let dir = tempdir().unwrap();
        let mut store = GarageStore::open(dir.path()).unwrap();
        let vehicle = store.add_vehicle(draft("AB1234")).unwrap();

        assert!(store.find_vehicle("ab-1234").is_some());
        assert!(store.find_vehicle(&vehicle.id).is_some());
        assert!(store.find_vehicle("ZZ9999").is_none());
    }
}
