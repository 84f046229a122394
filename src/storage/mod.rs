pub mod garage;

pub use garage::GarageStore;
