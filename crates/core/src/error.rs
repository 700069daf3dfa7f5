#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Duplicate key: drone with serial number '{0}' is already registered")]
    DuplicateKey(String),

    #[error("Entity not found: {entity} with key '{key}'")]
    NotFound { entity: &'static str, key: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Capacity exceeded: medication weight {weight}g over drone limit {limit}g")]
    CapacityExceeded { weight: f64, limit: f64 },

    #[error("Store error: {0}")]
    Store(String),
}

impl CoreError {
    /// Shorthand for a drone lookup miss.
    pub fn drone_not_found(serial: &str) -> Self {
        CoreError::NotFound {
            entity: "Drone",
            key: serial.to_string(),
        }
    }
}
