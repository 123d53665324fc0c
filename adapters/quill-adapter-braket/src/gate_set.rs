//! Canonical gate sets derived from Braket operation names.

use std::collections::BTreeSet;

use quill_ir::GateType;
use tracing::{debug, trace};

use crate::device::DeviceKind;
use crate::error::{BraketError, BraketResult};

/// Operations every non-verbatim device must support.
pub const REQUIRED_OPERATIONS: [&str; 4] = ["cnot", "rx", "rz", "x"];

/// Braket operation names that have no canonical gate.
pub const OPERATIONS_WITHOUT_EQUIVALENT: &[&str] = &[
    "amplitude_damping",
    "bit_flip",
    "cc_prx",
    "cphaseshift00",
    "cphaseshift01",
    "cphaseshift10",
    "cv",
    "depolarizing",
    "ecr",
    "end_verbatim_box",
    "generalized_amplitude_damping",
    "kraus",
    "measure_ff",
    "pauli_channel",
    "phase_damping",
    "phase_flip",
    "pswap",
    "start_verbatim_box",
    "two_qubit_dephasing",
    "two_qubit_depolarizing",
    "two_qubit_pauli_channel",
    "unitary",
];

/// Canonical gate type for a lower-case Braket operation name.
pub fn gate_type_for_operation(name: &str) -> Option<GateType> {
    let ty = match name {
        "ccnot" => GateType::CCX,
        "cnot" => GateType::CX,
        "cphaseshift" => GateType::CU1,
        "cswap" => GateType::CSwap,
        "cy" => GateType::CY,
        "cz" => GateType::CZ,
        "h" => GateType::H,
        "i" => GateType::Noop,
        "iswap" => GateType::ISwapMax,
        "phaseshift" => GateType::U1,
        "prx" => GateType::PhasedX,
        "rx" => GateType::Rx,
        "ry" => GateType::Ry,
        "rz" => GateType::Rz,
        "s" => GateType::S,
        "si" => GateType::Sdg,
        "swap" => GateType::Swap,
        "t" => GateType::T,
        "ti" => GateType::Tdg,
        "v" => GateType::V,
        "vi" => GateType::Vdg,
        "x" => GateType::X,
        "xx" => GateType::XXPhase,
        "xy" => GateType::ISwap,
        "y" => GateType::Y,
        "yy" => GateType::YYPhase,
        "z" => GateType::Z,
        "zz" => GateType::ZZPhase,
        "gpi" => GateType::GPI,
        "gpi2" => GateType::GPI2,
        "ms" => GateType::AAMS,
        _ => return None,
    };
    Some(ty)
}

/// The canonical gates a device accepts, split by width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateSet {
    /// Single-qubit gate types.
    pub single_qubit: BTreeSet<GateType>,
    /// Gate types acting on two or more qubits.
    pub multi_qubit: BTreeSet<GateType>,
}

impl GateSet {
    /// Build the gate set from a device's operation names.
    ///
    /// With `verbatim`, `operations` is the device's native gate set and
    /// every name with a canonical equivalent is kept. Otherwise the device
    /// must offer `cnot`, `rx`, `rz` and `x`, and QPUs drop `ccnot` and
    /// `cswap`. Names are case-insensitive; unknown names are ignored.
    pub fn from_supported_operations<I, S>(
        operations: I,
        kind: DeviceKind,
        verbatim: bool,
    ) -> BraketResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: BTreeSet<String> = operations
            .into_iter()
            .map(|op| op.as_ref().to_lowercase())
            .collect();

        if !verbatim {
            let missing: Vec<String> = REQUIRED_OPERATIONS
                .iter()
                .filter(|req| !names.contains(**req))
                .map(|req| (*req).to_string())
                .collect();
            if !missing.is_empty() {
                return Err(BraketError::MissingRequiredGates(missing));
            }
        }

        let mut set = GateSet::default();
        for name in &names {
            let Some(ty) = gate_type_for_operation(name) else {
                if OPERATIONS_WITHOUT_EQUIVALENT.contains(&name.as_str()) {
                    trace!(operation = %name, "no canonical equivalent");
                } else {
                    debug!(operation = %name, "ignoring unknown braket operation");
                }
                continue;
            };
            if ty.num_qubits() > 1 {
                if !verbatim
                    && kind == DeviceKind::Qpu
                    && matches!(ty, GateType::CCX | GateType::CSwap)
                {
                    continue;
                }
                set.multi_qubit.insert(ty);
            } else {
                set.single_qubit.insert(ty);
            }
        }
        Ok(set)
    }

    /// Whether the set contains a gate type.
    pub fn contains(&self, ty: GateType) -> bool {
        self.single_qubit.contains(&ty) || self.multi_qubit.contains(&ty)
    }

    /// Every gate type in the set.
    pub fn all(&self) -> BTreeSet<GateType> {
        self.single_qubit.union(&self.multi_qubit).copied().collect()
    }

    /// Number of gate types.
    pub fn len(&self) -> usize {
        self.single_qubit.len() + self.multi_qubit.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.single_qubit.is_empty() && self.multi_qubit.is_empty()
    }
}
