//! Quantum gate types.
//!
//! All rotation parameters are stored in half-turns: a value of `1.0` is a
//! rotation by π radians.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// Fieldless tag for every gate kind in the canonical gate set.
///
/// Used as the key of gate-set tables where the parameter values do not
/// matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GateType {
    Noop,
    X,
    Y,
    Z,
    H,
    S,
    Sdg,
    T,
    Tdg,
    V,
    Vdg,
    Rx,
    Ry,
    Rz,
    U1,
    U3,
    PhasedX,
    GPI,
    GPI2,
    CX,
    CY,
    CZ,
    CU1,
    Swap,
    ISwapMax,
    ISwap,
    XXPhase,
    YYPhase,
    ZZPhase,
    AAMS,
    CCX,
    CSwap,
}

impl GateType {
    /// Every gate type, in declaration order.
    pub const ALL: [GateType; 32] = [
        GateType::Noop,
        GateType::X,
        GateType::Y,
        GateType::Z,
        GateType::H,
        GateType::S,
        GateType::Sdg,
        GateType::T,
        GateType::Tdg,
        GateType::V,
        GateType::Vdg,
        GateType::Rx,
        GateType::Ry,
        GateType::Rz,
        GateType::U1,
        GateType::U3,
        GateType::PhasedX,
        GateType::GPI,
        GateType::GPI2,
        GateType::CX,
        GateType::CY,
        GateType::CZ,
        GateType::CU1,
        GateType::Swap,
        GateType::ISwapMax,
        GateType::ISwap,
        GateType::XXPhase,
        GateType::YYPhase,
        GateType::ZZPhase,
        GateType::AAMS,
        GateType::CCX,
        GateType::CSwap,
    ];

    /// Get the name of this gate type.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateType::Noop => "noop",
            GateType::X => "x",
            GateType::Y => "y",
            GateType::Z => "z",
            GateType::H => "h",
            GateType::S => "s",
            GateType::Sdg => "sdg",
            GateType::T => "t",
            GateType::Tdg => "tdg",
            GateType::V => "v",
            GateType::Vdg => "vdg",
            GateType::Rx => "rx",
            GateType::Ry => "ry",
            GateType::Rz => "rz",
            GateType::U1 => "u1",
            GateType::U3 => "u3",
            GateType::PhasedX => "phasedx",
            GateType::GPI => "gpi",
            GateType::GPI2 => "gpi2",
            GateType::CX => "cx",
            GateType::CY => "cy",
            GateType::CZ => "cz",
            GateType::CU1 => "cu1",
            GateType::Swap => "swap",
            GateType::ISwapMax => "iswapmax",
            GateType::ISwap => "iswap",
            GateType::XXPhase => "xxphase",
            GateType::YYPhase => "yyphase",
            GateType::ZZPhase => "zzphase",
            GateType::AAMS => "aams",
            GateType::CCX => "ccx",
            GateType::CSwap => "cswap",
        }
    }

    /// Get the number of qubits a gate of this type acts on.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        match self {
            GateType::Noop
            | GateType::X
            | GateType::Y
            | GateType::Z
            | GateType::H
            | GateType::S
            | GateType::Sdg
            | GateType::T
            | GateType::Tdg
            | GateType::V
            | GateType::Vdg
            | GateType::Rx
            | GateType::Ry
            | GateType::Rz
            | GateType::U1
            | GateType::U3
            | GateType::PhasedX
            | GateType::GPI
            | GateType::GPI2 => 1,

            GateType::CX
            | GateType::CY
            | GateType::CZ
            | GateType::CU1
            | GateType::Swap
            | GateType::ISwapMax
            | GateType::ISwap
            | GateType::XXPhase
            | GateType::YYPhase
            | GateType::ZZPhase
            | GateType::AAMS => 2,

            GateType::CCX | GateType::CSwap => 3,
        }
    }

    /// Get the number of half-turn parameters a gate of this type carries.
    #[inline]
    pub fn num_params(self) -> usize {
        match self {
            GateType::Rx
            | GateType::Ry
            | GateType::Rz
            | GateType::U1
            | GateType::GPI
            | GateType::GPI2
            | GateType::CU1
            | GateType::ISwap
            | GateType::XXPhase
            | GateType::YYPhase
            | GateType::ZZPhase => 1,
            GateType::PhasedX => 2,
            GateType::U3 | GateType::AAMS => 3,
            _ => 0,
        }
    }
}

/// Standard gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity (no-op) gate.
    Noop,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// V gate (sqrt(X)).
    V,
    /// V-dagger gate.
    Vdg,

    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase shift `diag(1, e^{iπλ})`.
    U1(f64),
    /// Generic single-qubit unitary U3(θ, φ, λ).
    U3(f64, f64, f64),
    /// Phased X rotation PhasedX(θ, φ) = Rz(φ) · Rx(θ) · Rz(-φ).
    PhasedX(f64, f64),
    /// Trapped-ion GPI phase gate.
    GPI(f64),
    /// Trapped-ion GPI2 phase gate.
    GPI2(f64),

    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled phase shift.
    CU1(f64),
    /// SWAP gate.
    Swap,
    /// Maximal iSWAP gate.
    ISwapMax,
    /// Tunable iSWAP gate.
    ISwap(f64),
    /// XX interaction `e^{-iπθ/2 XX}`.
    XXPhase(f64),
    /// YY interaction `e^{-iπθ/2 YY}`.
    YYPhase(f64),
    /// ZZ interaction `e^{-iπθ/2 ZZ}`.
    ZZPhase(f64),
    /// Arbitrary-angle Mølmer-Sørensen gate AAMS(θ, φ0, φ1).
    AAMS(f64, f64, f64),

    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
}

impl StandardGate {
    /// Get the type tag of this gate.
    #[inline]
    pub fn gate_type(&self) -> GateType {
        match self {
            StandardGate::Noop => GateType::Noop,
            StandardGate::X => GateType::X,
            StandardGate::Y => GateType::Y,
            StandardGate::Z => GateType::Z,
            StandardGate::H => GateType::H,
            StandardGate::S => GateType::S,
            StandardGate::Sdg => GateType::Sdg,
            StandardGate::T => GateType::T,
            StandardGate::Tdg => GateType::Tdg,
            StandardGate::V => GateType::V,
            StandardGate::Vdg => GateType::Vdg,
            StandardGate::Rx(_) => GateType::Rx,
            StandardGate::Ry(_) => GateType::Ry,
            StandardGate::Rz(_) => GateType::Rz,
            StandardGate::U1(_) => GateType::U1,
            StandardGate::U3(..) => GateType::U3,
            StandardGate::PhasedX(..) => GateType::PhasedX,
            StandardGate::GPI(_) => GateType::GPI,
            StandardGate::GPI2(_) => GateType::GPI2,
            StandardGate::CX => GateType::CX,
            StandardGate::CY => GateType::CY,
            StandardGate::CZ => GateType::CZ,
            StandardGate::CU1(_) => GateType::CU1,
            StandardGate::Swap => GateType::Swap,
            StandardGate::ISwapMax => GateType::ISwapMax,
            StandardGate::ISwap(_) => GateType::ISwap,
            StandardGate::XXPhase(_) => GateType::XXPhase,
            StandardGate::YYPhase(_) => GateType::YYPhase,
            StandardGate::ZZPhase(_) => GateType::ZZPhase,
            StandardGate::AAMS(..) => GateType::AAMS,
            StandardGate::CCX => GateType::CCX,
            StandardGate::CSwap => GateType::CSwap,
        }
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.gate_type().name()
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.gate_type().num_qubits()
    }

    /// Get the parameters of this gate, in declaration order.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::U1(p)
            | StandardGate::GPI(p)
            | StandardGate::GPI2(p)
            | StandardGate::CU1(p)
            | StandardGate::ISwap(p)
            | StandardGate::XXPhase(p)
            | StandardGate::YYPhase(p)
            | StandardGate::ZZPhase(p) => vec![p],

            StandardGate::PhasedX(a, b) => vec![a, b],

            StandardGate::U3(a, b, c) | StandardGate::AAMS(a, b, c) => vec![a, b, c],

            _ => vec![],
        }
    }

    /// Compare two gates, allowing parameters to differ by at most `tol`.
    pub fn approx_eq(&self, other: &StandardGate, tol: f64) -> bool {
        self.gate_type() == other.gate_type()
            && self
                .params()
                .iter()
                .zip(other.params())
                .all(|(a, b)| (a - b).abs() <= tol)
    }
}

/// An opaque 1-, 2- or 3-qubit operation defined by its unitary matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitaryBox {
    num_qubits: u32,
    /// Row-major `2^n × 2^n` matrix.
    matrix: Vec<Complex64>,
}

impl UnitaryBox {
    /// Largest box width supported by the IR.
    pub const MAX_QUBITS: u32 = 3;

    /// Create a unitary box, checking the width and matrix dimension.
    ///
    /// Unitarity itself is not checked.
    pub fn new(num_qubits: u32, matrix: Vec<Complex64>) -> IrResult<Self> {
        if num_qubits == 0 || num_qubits > Self::MAX_QUBITS {
            return Err(IrError::InvalidUnitary(format!(
                "{num_qubits}-qubit boxes are not supported"
            )));
        }
        let dim = 1usize << num_qubits;
        if matrix.len() != dim * dim {
            return Err(IrError::InvalidUnitary(format!(
                "matrix length {} does not match expected {} for {num_qubits}-qubit box",
                matrix.len(),
                dim * dim,
            )));
        }
        Ok(Self { num_qubits, matrix })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the row-major matrix.
    pub fn matrix(&self) -> &[Complex64] {
        &self.matrix
    }

    /// Get the box name.
    pub fn name(&self) -> &'static str {
        match self.num_qubits {
            1 => "unitary1qbox",
            2 => "unitary2qbox",
            _ => "unitary3qbox",
        }
    }
}

/// A quantum gate: either a standard gate or an opaque unitary box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// An opaque unitary.
    Unitary(UnitaryBox),
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Standard(g) => g.name(),
            Gate::Unitary(b) => b.name(),
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::Standard(g) => g.num_qubits(),
            Gate::Unitary(b) => b.num_qubits(),
        }
    }

    /// Get the standard gate, if this is one.
    pub fn as_standard(&self) -> Option<&StandardGate> {
        match self {
            Gate::Standard(g) => Some(g),
            Gate::Unitary(_) => None,
        }
    }

    /// Compare two gates, allowing standard-gate parameters to differ by `tol`.
    pub fn approx_eq(&self, other: &Gate, tol: f64) -> bool {
        match (self, other) {
            (Gate::Standard(a), Gate::Standard(b)) => a.approx_eq(b, tol),
            (Gate::Unitary(a), Gate::Unitary(b)) => a == b,
            _ => false,
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::Standard(gate)
    }
}

impl From<UnitaryBox> for Gate {
    fn from(gate: UnitaryBox) -> Self {
        Gate::Unitary(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::AAMS(0.1, 0.2, 0.3).num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);

        assert!(StandardGate::H.params().is_empty());
        assert_eq!(StandardGate::PhasedX(0.1, 0.2).params(), vec![0.1, 0.2]);
    }

    #[test]
    fn test_gate_type_table_consistent() {
        for ty in GateType::ALL {
            assert!(!ty.name().is_empty());
            assert!((1..=3).contains(&ty.num_qubits()));
        }
        assert_eq!(StandardGate::U3(0.1, 0.2, 0.3).params().len(), GateType::U3.num_params());
        assert_eq!(StandardGate::ZZPhase(0.5).gate_type(), GateType::ZZPhase);
    }

    #[test]
    fn test_approx_eq() {
        let a = StandardGate::Rx(0.3);
        let b = StandardGate::Rx(0.3 + 1e-14);
        assert!(a.approx_eq(&b, 1e-12));
        assert!(!a.approx_eq(&StandardGate::Rz(0.3), 1e-12));
        assert!(!a.approx_eq(&StandardGate::Rx(0.31), 1e-12));
    }

    #[test]
    fn test_unitary_box_validation() {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let identity = vec![one, zero, zero, one];
        let b = UnitaryBox::new(1, identity.clone()).unwrap();
        assert_eq!(b.name(), "unitary1qbox");
        assert_eq!(Gate::from(b).num_qubits(), 1);

        assert!(matches!(
            UnitaryBox::new(2, identity.clone()),
            Err(IrError::InvalidUnitary(_))
        ));
        assert!(matches!(
            UnitaryBox::new(4, identity),
            Err(IrError::InvalidUnitary(_))
        ));
    }
}
