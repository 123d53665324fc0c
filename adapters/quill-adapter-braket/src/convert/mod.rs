//! Translation between canonical circuits and Braket instruction lists.
//!
//! [`circuit_to_braket`] lowers a [`quill_ir::Circuit`] onto Braket's native
//! operators and reports the qubit numbering and measurement layout it used.
//! [`braket_to_circuit`] lifts an instruction list back into a canonical
//! circuit.

mod forward;
mod reverse;

use std::collections::BTreeMap;

pub use forward::circuit_to_braket;
pub use reverse::braket_to_circuit;

use crate::device::DeviceKind;
use crate::dialect::BraketCircuit;
use crate::properties::DeviceProfile;

/// Knobs controlling qubit numbering and no-op padding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationOptions {
    /// Use each qubit's first label index as its Braket index instead of its
    /// declaration position.
    pub mapped_qubits: bool,
    /// Extra Braket qubits that must appear in the program, each receiving
    /// an `I`.
    pub forced_qubits: Option<Vec<u32>>,
    /// Emit an `I` on every target qubit before the first gate.
    pub force_ops_on_target_qubits: bool,
}

impl TranslationOptions {
    /// Identity numbering, no padding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether qubits are numbered by their labels.
    pub fn with_mapped_qubits(mut self, mapped: bool) -> Self {
        self.mapped_qubits = mapped;
        self
    }

    /// Force the given Braket qubits into the program.
    pub fn with_forced_qubits(mut self, qubits: impl Into<Vec<u32>>) -> Self {
        self.forced_qubits = Some(qubits.into());
        self
    }

    /// Set whether every target qubit receives a leading `I`.
    pub fn with_force_ops_on_target_qubits(mut self, force: bool) -> Self {
        self.force_ops_on_target_qubits = force;
        self
    }

    /// Options a device needs to accept a submitted program.
    ///
    /// QPUs number qubits physically. Devices that support `I` get it on
    /// every target qubit, and on every device qubit when the device also
    /// insists that all qubits are measured.
    pub fn for_device(profile: &DeviceProfile) -> Self {
        let supports_noop = profile.supports_noop();
        Self {
            mapped_qubits: profile.kind == DeviceKind::Qpu,
            forced_qubits: (profile.requires_all_qubits_measured && supports_noop)
                .then(|| profile.all_qubits.clone()),
            force_ops_on_target_qubits: supports_noop,
        }
    }
}

/// The result of a forward translation.
#[derive(Debug, Clone, PartialEq)]
pub struct BraketTranslation {
    /// Native instruction list.
    pub circuit: BraketCircuit,
    /// Braket index of each canonical qubit, in declaration order.
    pub target_qubits: Vec<u32>,
    /// Measured Braket qubit to canonical bit position.
    pub measures: BTreeMap<u32, usize>,
}
