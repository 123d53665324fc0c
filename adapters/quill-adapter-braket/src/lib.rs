//! Quill Adapter for AWS Braket
//!
//! This crate translates between quill circuits and the native instruction
//! dialect of AWS Braket, in both directions. It also covers the offline
//! halves of talking to a Braket device: reading its properties document,
//! deriving the canonical gate set it accepts, reading its calibration
//! error rates, planning qubit numbering and reassembling measurement results. No AWS calls are made.
//!
//! # Gate Mapping
//!
//! | Canonical | Braket | Angles |
//! |-----------|--------|--------|
//! | `Noop`, `H`, `X`, `Y`, `Z`, `S`, `Sdg`, `T`, `Tdg` | `I`, `H`, `X`, `Y`, `Z`, `S`, `Si`, `T`, `Ti` | - |
//! | `V`, `Vdg` | `V`, `Vi` | global phase ±0.25 on the way back |
//! | `CX`, `CCX`, `CY`, `CZ`, `Swap`, `CSwap`, `ISwapMax` | `CNot`, `CCNot`, `CY`, `CZ`, `Swap`, `CSwap`, `ISwap` | - |
//! | `U1`, `CU1`, `Ry`, `XXPhase`, `YYPhase`, `ISwap` | `PhaseShift`, `CPhaseShift`, `Ry`, `XX`, `YY`, `XY` | as given |
//! | `Rx`, `Rz`, `ZZPhase`, `GPI`, `GPI2`, `PhasedX`, `AAMS` | `Rx`, `Rz`, `ZZ`, `GPi`, `GPi2`, `PRx`, `MS` | normalized |
//!
//! Canonical angles are in half-turns; Braket angles are in radians.
//! `U3` and unitary boxes have no Braket form.
//!
//! # Example
//!
//! ```rust
//! use quill_adapter_braket::{braket_to_circuit, circuit_to_braket, TranslationOptions};
//! use quill_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! let translation = circuit_to_braket(&circuit, &TranslationOptions::new()).unwrap();
//! assert_eq!(translation.circuit.len(), 2);
//! assert_eq!(translation.measures.len(), 2);
//!
//! let back = braket_to_circuit(&translation.circuit).unwrap();
//! assert_eq!(back.num_ops(), 2);
//! ```
//!
//! # Configuration
//!
//! [`BraketConfig`] reads `<config dir>/quill/braket.yaml`, overridden by:
//! - `QUILL_BRAKET_S3_BUCKET`, `QUILL_BRAKET_S3_FOLDER`: result location
//! - `QUILL_BRAKET_DEVICE_TYPE`, `QUILL_BRAKET_PROVIDER`, `QUILL_BRAKET_DEVICE`: target device
//! - `AWS_REGION`: device region

pub mod angle;
pub mod characterisation;
pub mod config;
pub mod convert;
pub mod device;
pub mod dialect;
mod error;
pub mod gate_set;
pub mod properties;
pub mod results;

pub use angle::normalize_angle;
pub use characterisation::{AvgCharacterisation, Characterisation};
pub use config::{BraketConfig, ConfigError};
pub use convert::{BraketTranslation, TranslationOptions, braket_to_circuit, circuit_to_braket};
pub use device::{DeviceArn, DeviceKind};
pub use dialect::{BraketCircuit, BraketInstruction, BraketOp};
pub use error::{BraketError, BraketResult};
pub use gate_set::GateSet;
pub use properties::{DeviceProfile, DeviceProperties, ProviderSchema, ShotRange};
pub use results::{counts_from_shots, reassemble_shots};
