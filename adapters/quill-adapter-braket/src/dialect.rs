//! The Braket native instruction set.
//!
//! Operators carry their angles in radians, as Braket expects them. Every
//! instruction addresses plain integer qubit indices.

use std::collections::BTreeSet;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// A Braket gate-model operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BraketOp {
    CCNot,
    CNot,
    CPhaseShift {
        angle: f64,
    },
    CPhaseShift00 {
        angle: f64,
    },
    CPhaseShift01 {
        angle: f64,
    },
    CPhaseShift10 {
        angle: f64,
    },
    CSwap,
    CY,
    CZ,
    H,
    I,
    ISwap,
    PhaseShift {
        angle: f64,
    },
    PRx {
        angle_1: f64,
        angle_2: f64,
    },
    Rx {
        angle: f64,
    },
    Ry {
        angle: f64,
    },
    Rz {
        angle: f64,
    },
    S,
    Si,
    Swap,
    T,
    Ti,
    V,
    Vi,
    X,
    XX {
        angle: f64,
    },
    XY {
        angle: f64,
    },
    Y,
    YY {
        angle: f64,
    },
    Z,
    ZZ {
        angle: f64,
    },
    GPi {
        angle: f64,
    },
    GPi2 {
        angle: f64,
    },
    MS {
        angle_1: f64,
        angle_2: f64,
        angle_3: f64,
    },
    PSwap {
        angle: f64,
    },
    /// Classically controlled PRx, conditioned on a feedforward key.
    #[serde(rename = "cc_prx")]
    CCPRx {
        angle_1: f64,
        angle_2: f64,
        feedback_key: u32,
    },
    /// Measurement whose outcome is stored under a feedforward key.
    #[serde(rename = "measure_ff")]
    MeasureFF {
        feedback_key: u32,
    },
    /// Arbitrary unitary given as a row-major matrix.
    Unitary {
        matrix: Vec<Complex64>,
    },
}

impl BraketOp {
    /// Braket's operator name, e.g. `CNot`.
    pub fn name(&self) -> &'static str {
        match self {
            BraketOp::CCNot => "CCNot",
            BraketOp::CNot => "CNot",
            BraketOp::CPhaseShift { .. } => "CPhaseShift",
            BraketOp::CPhaseShift00 { .. } => "CPhaseShift00",
            BraketOp::CPhaseShift01 { .. } => "CPhaseShift01",
            BraketOp::CPhaseShift10 { .. } => "CPhaseShift10",
            BraketOp::CSwap => "CSwap",
            BraketOp::CY => "CY",
            BraketOp::CZ => "CZ",
            BraketOp::H => "H",
            BraketOp::I => "I",
            BraketOp::ISwap => "ISwap",
            BraketOp::PhaseShift { .. } => "PhaseShift",
            BraketOp::PRx { .. } => "PRx",
            BraketOp::Rx { .. } => "Rx",
            BraketOp::Ry { .. } => "Ry",
            BraketOp::Rz { .. } => "Rz",
            BraketOp::S => "S",
            BraketOp::Si => "Si",
            BraketOp::Swap => "Swap",
            BraketOp::T => "T",
            BraketOp::Ti => "Ti",
            BraketOp::V => "V",
            BraketOp::Vi => "Vi",
            BraketOp::X => "X",
            BraketOp::XX { .. } => "XX",
            BraketOp::XY { .. } => "XY",
            BraketOp::Y => "Y",
            BraketOp::YY { .. } => "YY",
            BraketOp::Z => "Z",
            BraketOp::ZZ { .. } => "ZZ",
            BraketOp::GPi { .. } => "GPi",
            BraketOp::GPi2 { .. } => "GPi2",
            BraketOp::MS { .. } => "MS",
            BraketOp::PSwap { .. } => "PSwap",
            BraketOp::CCPRx { .. } => "CCPRx",
            BraketOp::MeasureFF { .. } => "MeasureFF",
            BraketOp::Unitary { .. } => "Unitary",
        }
    }

    /// The name used in a device's `supportedOperations`, e.g. `cnot`.
    pub fn ir_name(&self) -> &'static str {
        match self {
            BraketOp::CCPRx { .. } => "cc_prx",
            BraketOp::MeasureFF { .. } => "measure_ff",
            BraketOp::CCNot => "ccnot",
            BraketOp::CNot => "cnot",
            BraketOp::CPhaseShift { .. } => "cphaseshift",
            BraketOp::CPhaseShift00 { .. } => "cphaseshift00",
            BraketOp::CPhaseShift01 { .. } => "cphaseshift01",
            BraketOp::CPhaseShift10 { .. } => "cphaseshift10",
            BraketOp::CSwap => "cswap",
            BraketOp::CY => "cy",
            BraketOp::CZ => "cz",
            BraketOp::H => "h",
            BraketOp::I => "i",
            BraketOp::ISwap => "iswap",
            BraketOp::PhaseShift { .. } => "phaseshift",
            BraketOp::PRx { .. } => "prx",
            BraketOp::Rx { .. } => "rx",
            BraketOp::Ry { .. } => "ry",
            BraketOp::Rz { .. } => "rz",
            BraketOp::S => "s",
            BraketOp::Si => "si",
            BraketOp::Swap => "swap",
            BraketOp::T => "t",
            BraketOp::Ti => "ti",
            BraketOp::V => "v",
            BraketOp::Vi => "vi",
            BraketOp::X => "x",
            BraketOp::XX { .. } => "xx",
            BraketOp::XY { .. } => "xy",
            BraketOp::Y => "y",
            BraketOp::YY { .. } => "yy",
            BraketOp::Z => "z",
            BraketOp::ZZ { .. } => "zz",
            BraketOp::GPi { .. } => "gpi",
            BraketOp::GPi2 { .. } => "gpi2",
            BraketOp::MS { .. } => "ms",
            BraketOp::PSwap { .. } => "pswap",
            BraketOp::Unitary { .. } => "unitary",
        }
    }

    /// Number of target qubits the operator acts on.
    pub fn num_targets(&self) -> usize {
        match self {
            BraketOp::CCNot | BraketOp::CSwap => 3,

            BraketOp::CNot
            | BraketOp::CPhaseShift { .. }
            | BraketOp::CPhaseShift00 { .. }
            | BraketOp::CPhaseShift01 { .. }
            | BraketOp::CPhaseShift10 { .. }
            | BraketOp::CY
            | BraketOp::CZ
            | BraketOp::ISwap
            | BraketOp::Swap
            | BraketOp::XX { .. }
            | BraketOp::XY { .. }
            | BraketOp::YY { .. }
            | BraketOp::ZZ { .. }
            | BraketOp::MS { .. }
            | BraketOp::PSwap { .. } => 2,

            // A 2^k by 2^k matrix has 4^k entries; anything else has no width.
            BraketOp::Unitary { matrix } => {
                let len = matrix.len();
                if len.is_power_of_two() && len.trailing_zeros() % 2 == 0 {
                    (len.trailing_zeros() / 2) as usize
                } else {
                    0
                }
            }

            _ => 1,
        }
    }
}

/// One operator applied to target qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BraketInstruction {
    /// The operator.
    pub operator: BraketOp,
    /// Target qubit indices, in operator order (controls first).
    pub target: Vec<u32>,
}

impl BraketInstruction {
    /// Create an instruction.
    pub fn new(operator: BraketOp, target: impl IntoIterator<Item = u32>) -> Self {
        Self {
            operator,
            target: target.into_iter().collect(),
        }
    }
}

/// An ordered Braket instruction list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BraketCircuit {
    /// Instructions in program order.
    pub instructions: Vec<BraketInstruction>,
}

impl BraketCircuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction.
    pub fn add(&mut self, operator: BraketOp, target: impl IntoIterator<Item = u32>) -> &mut Self {
        self.instructions
            .push(BraketInstruction::new(operator, target));
        self
    }

    /// Append one single-qubit operator per listed qubit.
    pub fn add_each(&mut self, operator: &BraketOp, targets: &[u32]) -> &mut Self {
        for &q in targets {
            self.add(operator.clone(), [q]);
        }
        self
    }

    /// Distinct qubit indices referenced by any instruction, ascending.
    pub fn qubits(&self) -> Vec<u32> {
        self.instructions
            .iter()
            .flat_map(|inst| inst.target.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Serialize the instruction list to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse an instruction list from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
