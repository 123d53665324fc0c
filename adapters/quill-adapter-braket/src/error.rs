//! Error types for the Braket adapter.

use quill_ir::IrError;
use thiserror::Error;

/// Result type for Braket operations.
pub type BraketResult<T> = Result<T, BraketError>;

/// Errors that can occur when translating circuits or reading device data.
#[derive(Debug, Error)]
pub enum BraketError {
    /// Canonical gate with no Braket equivalent.
    #[error("Cannot convert {0} to braket")]
    UnsupportedGate(String),

    /// Braket instruction with no canonical equivalent.
    #[error("Cannot convert {0} to a canonical circuit")]
    UnsupportedInstruction(String),

    /// Qubit label cannot be used as a device qubit number.
    #[error("Qubit {0} has no numeric label to map onto a device qubit")]
    UnmappableQubit(String),

    /// Circuit construction failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),

    /// Invalid device ARN.
    #[error("Invalid device ARN: {0}")]
    InvalidDeviceArn(String),

    /// Device properties document with an unknown provider schema.
    #[error("Unsupported device schema {0}")]
    UnsupportedSchema(String),

    /// Malformed field in a device properties document.
    #[error("Invalid device properties: {0}")]
    InvalidProperties(String),

    /// Device offers no gate-model action.
    #[error("Unsupported device: {0}")]
    UnsupportedDevice(String),

    /// Device is missing gates every rebase relies on.
    #[error("Device must support cnot, rx, rz and x gates (missing: {})", .0.join(", "))]
    MissingRequiredGates(Vec<String>),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A mapped qubit is absent from the measured qubits of a result.
    #[error("Qubit {0} was not measured")]
    UnmeasuredQubit(u32),

    /// Requested shots fall outside the device's sampling limits.
    #[error("Cannot sample {shots} shots (device allows {} to {})", bound(.min), bound(.max))]
    ShotsOutOfRange {
        shots: u64,
        min: Option<u64>,
        max: Option<u64>,
    },

    /// Shot row shorter than the measured qubit list.
    #[error("Shot {shot} has {got} readouts, expected {expected}")]
    ShortShotRow {
        /// Index of the offending shot.
        shot: usize,
        /// Expected number of readouts.
        expected: usize,
        /// Readouts present.
        got: usize,
    },
}

fn bound(limit: &Option<u64>) -> String {
    limit.map_or_else(|| "unbounded".into(), |n| n.to_string())
}
