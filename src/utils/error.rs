use thiserror::Error;

#[derive(Debug, Error)]
pub enum GarageError {
    #[error("Invalid plate: {0}")]
    InvalidPlate(String),
    #[error("A vehicle with plate {0} is already registered")]
    DuplicatePlate(String),
    #[error("Invalid VIN: {0}")]
    InvalidVin(String),
    #[error("Invalid field: {0}")]
    InvalidField(String),
    #[error("No vehicle matches \"{0}\"")]
    VehicleNotFound(String),
    #[error("No maintenance record with id {0}")]
    RecordNotFound(String),
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
