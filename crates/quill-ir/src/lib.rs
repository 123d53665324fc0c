//! Quill Circuit Intermediate Representation
//!
//! This crate provides the canonical circuit representation that the quill
//! dialect adapters translate to and from.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] plus their
//!   register labels [`Qubit`] and [`Clbit`]
//! - **Gates**: the closed [`StandardGate`] set, its fieldless [`GateType`]
//!   tags, and opaque [`UnitaryBox`] operations
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`], a validated builder that also tracks global
//!   phase and an implicit end-of-circuit qubit permutation
//!
//! Rotation parameters are expressed in half-turns throughout: `1.0` means
//! π radians.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use quill_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_ops(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Parameters |
//! |------|--------|------------|
//! | `Noop`, `H`, `X`, `Y`, `Z`, `S`, `Sdg`, `T`, `Tdg`, `V`, `Vdg` | 1 | - |
//! | `Rx`, `Ry`, `Rz`, `U1`, `GPI`, `GPI2` | 1 | 1 |
//! | `PhasedX` | 1 | 2 |
//! | `U3` | 1 | 3 |
//! | `CX`, `CY`, `CZ`, `Swap`, `ISwapMax` | 2 | - |
//! | `CU1`, `ISwap`, `XXPhase`, `YYPhase`, `ZZPhase` | 2 | 1 |
//! | `AAMS` | 2 | 3 |
//! | `CCX`, `CSwap` | 3 | - |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateType, StandardGate, UnitaryBox};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
