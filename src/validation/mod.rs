pub mod inspection;
pub mod plate;
pub mod vin;

pub use inspection::InspectionEvaluator;
pub use plate::{normalize_plate, PlateValidator};
pub use vin::VinValidator;
