//! High-level circuit builder API.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateType, StandardGate, UnitaryBox};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

/// A quantum circuit.
///
/// Holds ordered qubit and bit declarations, an ordered instruction list,
/// and an implicit end-of-circuit qubit permutation. Every appended
/// instruction is validated against the declarations, so a `Circuit` never
/// references an undeclared qubit or bit.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in declaration order.
    qubits: Vec<Qubit>,
    /// Classical bits in declaration order.
    clbits: Vec<Clbit>,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
    /// Declaration position of each qubit.
    qubit_positions: FxHashMap<QubitId, usize>,
    /// Declaration position of each classical bit.
    clbit_positions: FxHashMap<ClbitId, usize>,
    /// Counter for generating qubit IDs.
    next_qubit_id: u32,
    /// Counter for generating classical bit IDs.
    next_clbit_id: u32,
    /// Qubit to the wire it ends on. Identity entries are not stored.
    implicit_permutation: BTreeMap<QubitId, QubitId>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            instructions: vec![],
            qubit_positions: FxHashMap::default(),
            clbit_positions: FxHashMap::default(),
            next_qubit_id: 0,
            next_clbit_id: 0,
            implicit_permutation: BTreeMap::new(),
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Add a single qubit labelled `q[id]` to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.next_qubit_id);
        self.push_qubit(Qubit::new(id));
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = QubitId(self.next_qubit_id);
            self.push_qubit(Qubit::with_register(id, name.as_str(), vec![i]));
            ids.push(id);
        }
        ids
    }

    /// Declare a qubit with a caller-chosen id and label.
    ///
    /// Later calls to [`Circuit::add_qubit`] allocate ids above the largest
    /// id declared so far.
    pub fn add_qubit_labeled(&mut self, qubit: Qubit) -> IrResult<QubitId> {
        if self.qubit_positions.contains_key(&qubit.id) {
            return Err(IrError::QubitAlreadyDeclared(qubit.id));
        }
        let id = qubit.id;
        self.push_qubit(qubit);
        Ok(id)
    }

    fn push_qubit(&mut self, qubit: Qubit) {
        self.next_qubit_id = self.next_qubit_id.max(qubit.id.0 + 1);
        self.qubit_positions.insert(qubit.id, self.qubits.len());
        self.qubits.push(qubit);
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.next_clbit_id);
        self.push_clbit(Clbit::new(id));
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = ClbitId(self.next_clbit_id);
            self.push_clbit(Clbit::with_register(id, name.as_str(), vec![i]));
            ids.push(id);
        }
        ids
    }

    fn push_clbit(&mut self, clbit: Clbit) {
        self.next_clbit_id = self.next_clbit_id.max(clbit.id.0 + 1);
        self.clbit_positions.insert(clbit.id, self.clbits.len());
        self.clbits.push(clbit);
    }

    /// Append an instruction after validating its operands.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let name = instruction.name();
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let got = instruction.qubits.len() as u32;
                if got != gate.num_qubits() {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: name.to_string(),
                        expected: gate.num_qubits(),
                        got,
                    });
                }
            }
            InstructionKind::Measure => {
                if instruction.qubits.len() != instruction.clbits.len() {
                    return Err(IrError::MeasureArityMismatch {
                        qubits: instruction.qubits.len(),
                        clbits: instruction.clbits.len(),
                    });
                }
            }
            InstructionKind::Barrier | InstructionKind::GlobalPhase(_) => {}
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !self.qubit_positions.contains_key(&qubit) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: Some(name.to_string()),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(name.to_string()),
                });
            }
        }
        for &clbit in &instruction.clbits {
            if !self.clbit_positions.contains_key(&clbit) {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: Some(name.to_string()),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply the identity (no-op) gate.
    pub fn noop(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Noop, qubit))
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Tdg, qubit))
    }

    /// Apply V (sqrt(X)) gate.
    pub fn v(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::V, qubit))
    }

    /// Apply V-dagger gate.
    pub fn vdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Vdg, qubit))
    }

    /// Apply Rx rotation gate. `theta` is in half-turns.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// Apply Ry rotation gate. `theta` is in half-turns.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit))
    }

    /// Apply Rz rotation gate. `theta` is in half-turns.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rz(theta), qubit))
    }

    /// Apply U1 phase gate.
    pub fn u1(&mut self, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::U1(lambda), qubit))
    }

    /// Apply U3(θ, φ, λ) gate.
    pub fn u3(
        &mut self,
        theta: f64,
        phi: f64,
        lambda: f64,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::U3(theta, phi, lambda),
            qubit,
        ))
    }

    /// Apply PhasedX(θ, φ) gate.
    pub fn phased_x(&mut self, theta: f64, phi: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::PhasedX(theta, phi),
            qubit,
        ))
    }

    /// Apply GPI gate.
    pub fn gpi(&mut self, phi: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::GPI(phi), qubit))
    }

    /// Apply GPI2 gate.
    pub fn gpi2(&mut self, phi: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::GPI2(phi), qubit))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CY, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply controlled U1 phase gate.
    pub fn cu1(&mut self, lambda: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CU1(lambda),
            control,
            target,
        ))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    /// Apply maximal iSWAP gate.
    pub fn iswap_max(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::ISwapMax, q1, q2))
    }

    /// Apply tunable iSWAP gate.
    pub fn iswap(&mut self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::ISwap(theta), q1, q2))
    }

    /// Apply XX interaction gate.
    pub fn xx_phase(&mut self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::XXPhase(theta), q1, q2))
    }

    /// Apply YY interaction gate.
    pub fn yy_phase(&mut self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::YYPhase(theta), q1, q2))
    }

    /// Apply ZZ interaction gate.
    pub fn zz_phase(&mut self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::ZZPhase(theta), q1, q2))
    }

    /// Apply arbitrary-angle Mølmer-Sørensen gate.
    pub fn aams(
        &mut self,
        theta: f64,
        phi0: f64,
        phi1: f64,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::AAMS(theta, phi0, phi1),
            q1,
            q2,
        ))
    }

    // =========================================================================
    // Three-qubit gates
    // =========================================================================

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CSwap, [control, t1, t2]))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply any gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Apply an opaque unitary box.
    pub fn unitary(
        &mut self,
        unitary: UnitaryBox,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(unitary, qubits))
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Measure all qubits to corresponding classical bits.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.clbits.len() < self.qubits.len() {
            self.add_clbit();
        }

        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        let clbits: Vec<_> = self
            .clbits
            .iter()
            .map(|c| c.id)
            .take(qubits.len())
            .collect();

        self.apply(Instruction::measure_many(qubits, clbits)?)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.apply(Instruction::barrier(qubits))
    }

    /// Append a global phase contribution, in half-turns.
    pub fn add_phase(&mut self, phase: f64) -> IrResult<&mut Self> {
        self.apply(Instruction::global_phase(phase))
    }

    // =========================================================================
    // Implicit permutation
    // =========================================================================

    /// Record a logical swap of two wires without emitting a gate.
    ///
    /// Whatever was due to end on wire `a` now ends on wire `b`, and vice
    /// versa.
    pub fn add_implicit_swap(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        for qubit in [a, b] {
            if !self.qubit_positions.contains_key(&qubit) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: Some("implicit_swap".into()),
                });
            }
        }
        if a == b {
            return Ok(self);
        }

        let mut updated = BTreeMap::new();
        for qubit in self.qubits.iter().map(|q| q.id) {
            let wire = self.final_wire(qubit);
            let wire = if wire == a {
                b
            } else if wire == b {
                a
            } else {
                wire
            };
            if wire != qubit {
                updated.insert(qubit, wire);
            }
        }
        self.implicit_permutation = updated;
        Ok(self)
    }

    fn final_wire(&self, qubit: QubitId) -> QubitId {
        self.implicit_permutation
            .get(&qubit)
            .copied()
            .unwrap_or(qubit)
    }

    /// The full implicit permutation, one entry per declared qubit.
    pub fn implicit_permutation(&self) -> BTreeMap<QubitId, QubitId> {
        self.qubits
            .iter()
            .map(|q| (q.id, self.final_wire(q.id)))
            .collect()
    }

    /// Whether the implicit permutation differs from the identity.
    pub fn has_implicit_permutation(&self) -> bool {
        !self.implicit_permutation.is_empty()
    }

    /// Drop the implicit permutation without emitting any gate.
    pub fn discard_implicit_permutation(&mut self) {
        self.implicit_permutation.clear();
    }

    /// Materialize the implicit permutation as explicit `Swap` gates.
    ///
    /// Afterwards the permutation is the identity and the circuit's output
    /// state is unchanged.
    pub fn replace_implicit_wire_swaps(&mut self) -> IrResult<&mut Self> {
        if !self.has_implicit_permutation() {
            return Ok(self);
        }

        let wires: Vec<QubitId> = self.qubits.iter().map(|q| q.id).collect();
        let mut source_for_wire: FxHashMap<QubitId, QubitId> = FxHashMap::default();
        for (&qubit, &wire) in &self.implicit_permutation {
            source_for_wire.insert(wire, qubit);
        }

        // content[w]: whose state currently sits on wire w; position is the inverse.
        let mut content: FxHashMap<QubitId, QubitId> = wires.iter().map(|&w| (w, w)).collect();
        let mut position: FxHashMap<QubitId, QubitId> = content.clone();

        let mut swaps = vec![];
        for &wire in &wires {
            let wanted = source_for_wire.get(&wire).copied().unwrap_or(wire);
            let current = content.get(&wire).copied().unwrap_or(wire);
            if current == wanted {
                continue;
            }
            let other = position.get(&wanted).copied().unwrap_or(wanted);
            swaps.push((wire, other));
            content.insert(wire, wanted);
            content.insert(other, current);
            position.insert(wanted, wire);
            position.insert(current, other);
        }

        self.implicit_permutation.clear();
        for (a, b) in swaps {
            self.swap(a, b)?;
        }
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Get the qubits in declaration order.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in declaration order.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Get the instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Position of a qubit in the declaration order.
    pub fn qubit_position(&self, qubit: QubitId) -> Option<usize> {
        self.qubit_positions.get(&qubit).copied()
    }

    /// Position of a classical bit in the declaration order.
    pub fn clbit_position(&self, clbit: ClbitId) -> Option<usize> {
        self.clbit_positions.get(&clbit).copied()
    }

    /// Look up a declared qubit.
    pub fn qubit(&self, qubit: QubitId) -> Option<&Qubit> {
        self.qubit_position(qubit).map(|pos| &self.qubits[pos])
    }

    /// Total global phase, in half-turns.
    pub fn global_phase(&self) -> f64 {
        self.instructions
            .iter()
            .filter_map(|inst| match inst.kind {
                InstructionKind::GlobalPhase(p) => Some(p),
                _ => None,
            })
            .sum()
    }

    /// Count the gate instructions of the given type.
    pub fn count_gates(&self, gate_type: GateType) -> usize {
        self.instructions
            .iter()
            .filter_map(Instruction::as_gate)
            .filter_map(Gate::as_standard)
            .filter(|g| g.gate_type() == gate_type)
            .count()
    }

    /// Whether any instruction is a measurement.
    pub fn has_measurements(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        let q0 = QubitId(0);
        let q1 = QubitId(1);

        circuit
            .h(q0)?
            .cx(q0, q1)?
            .measure(q0, ClbitId(0))?
            .measure(q1, ClbitId(1))?;

        Ok(circuit)
    }

    /// Create a GHZ state circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        if n == 0 {
            return Ok(Self::new("ghz_0"));
        }

        let mut circuit = Self::with_size("ghz", n, n);
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        for i in 0..n {
            circuit.measure(QubitId(i), ClbitId(i))?;
        }

        Ok(circuit)
    }
}
