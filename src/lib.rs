pub mod alerts;
pub mod models;
pub mod storage;
pub mod utils;
pub mod validation;
pub mod vehicle_checker;

pub use vehicle_checker::VehicleChecker;
