//! End-to-end translation tests between canonical circuits and Braket.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use num_complex::Complex64;
use quill_adapter_braket::{
    BraketCircuit, BraketError, BraketOp, TranslationOptions, braket_to_circuit, circuit_to_braket,
};
use quill_ir::{
    Circuit, ClbitId, Instruction, InstructionKind, IrError, Qubit, QubitId, UnitaryBox,
};

const TOL: f64 = 1e-12;

fn q(i: u32) -> QubitId {
    QubitId(i)
}

/// Gate instructions of a circuit, without global-phase markers.
fn gates(circuit: &Circuit) -> Vec<&Instruction> {
    circuit
        .instructions()
        .iter()
        .filter(|inst| !inst.is_global_phase())
        .collect()
}

fn assert_round_trip(circuit: &Circuit) {
    let translation = circuit_to_braket(circuit, &TranslationOptions::new()).unwrap();
    let back = braket_to_circuit(&translation.circuit).unwrap();

    let original = gates(circuit);
    let lifted = gates(&back);
    assert_eq!(original.len(), lifted.len());
    for (a, b) in original.iter().zip(&lifted) {
        assert!(a.approx_eq(b, TOL), "{a:?} != {b:?}");
    }
}

#[test]
fn test_barrier_erasure() {
    let mut circuit = Circuit::with_size("barrier", 1, 0);
    circuit.h(q(0)).unwrap().barrier([q(0)]).unwrap();

    let translation = circuit_to_braket(&circuit, &TranslationOptions::new()).unwrap();
    assert_eq!(translation.circuit.len(), 1);
    assert_eq!(translation.circuit.instructions[0].operator, BraketOp::H);
}

#[test]
fn test_basic_round_trip() {
    let mut circuit = Circuit::with_size("basic", 2, 0);
    circuit
        .cx(q(0), q(1))
        .unwrap()
        .h(q(0))
        .unwrap()
        .s(q(1))
        .unwrap()
        .t(q(0))
        .unwrap()
        .swap(q(0), q(1))
        .unwrap()
        .rz(0.5, q(1))
        .unwrap()
        .rx(0.3, q(0))
        .unwrap();

    assert_round_trip(&circuit);
}

#[test]
fn test_full_gate_set_round_trip() {
    let mut circuit = Circuit::with_size("full", 3, 0);
    circuit
        .h(q(0))
        .unwrap()
        .x(q(1))
        .unwrap()
        .y(q(2))
        .unwrap()
        .z(q(0))
        .unwrap()
        .s(q(1))
        .unwrap()
        .sdg(q(2))
        .unwrap()
        .t(q(0))
        .unwrap()
        .tdg(q(1))
        .unwrap()
        .v(q(2))
        .unwrap()
        .vdg(q(0))
        .unwrap()
        .rx(0.1, q(0))
        .unwrap()
        .ry(1.7, q(1))
        .unwrap()
        .rz(-0.9, q(2))
        .unwrap()
        .u1(0.25, q(0))
        .unwrap()
        .phased_x(0.3, -0.6, q(1))
        .unwrap()
        .gpi(0.4, q(2))
        .unwrap()
        .gpi2(-1.2, q(0))
        .unwrap()
        .cx(q(0), q(1))
        .unwrap()
        .cy(q(1), q(2))
        .unwrap()
        .cz(q(2), q(0))
        .unwrap()
        .cu1(0.75, q(0), q(2))
        .unwrap()
        .swap(q(1), q(2))
        .unwrap()
        .iswap_max(q(0), q(1))
        .unwrap()
        .iswap(0.5, q(1), q(2))
        .unwrap()
        .xx_phase(0.2, q(0), q(1))
        .unwrap()
        .yy_phase(0.35, q(1), q(2))
        .unwrap()
        .zz_phase(-0.45, q(0), q(2))
        .unwrap()
        .aams(0.5, 0.1, 0.2, q(0), q(1))
        .unwrap()
        .ccx(q(0), q(1), q(2))
        .unwrap()
        .cswap(q(2), q(0), q(1))
        .unwrap();

    assert_round_trip(&circuit);
}

#[test]
fn test_v_gates_carry_global_phase() {
    let mut bk = BraketCircuit::new();
    bk.add(BraketOp::V, [0]);
    let circuit = braket_to_circuit(&bk).unwrap();
    assert!((circuit.global_phase() - 0.25).abs() < TOL);

    let mut bk = BraketCircuit::new();
    bk.add(BraketOp::Vi, [0]);
    let circuit = braket_to_circuit(&bk).unwrap();
    assert!((circuit.global_phase() + 0.25).abs() < TOL);
}

#[test]
fn test_v_vdg_round_trip_phases_cancel() {
    let mut circuit = Circuit::with_size("v_vdg", 1, 0);
    circuit.v(q(0)).unwrap().vdg(q(0)).unwrap();

    let translation = circuit_to_braket(&circuit, &TranslationOptions::new()).unwrap();
    let back = braket_to_circuit(&translation.circuit).unwrap();

    let kinds: Vec<String> = back
        .instructions()
        .iter()
        .map(|inst| match inst.kind {
            InstructionKind::GlobalPhase(p) => format!("phase({p})"),
            _ => inst.name().to_string(),
        })
        .collect();
    assert_eq!(kinds, ["v", "phase(0.25)", "vdg", "phase(-0.25)"]);
    assert!(back.global_phase().abs() < TOL);
}

#[test]
fn test_qubit_order_follows_declaration() {
    // First use touches qubit 2, but numbering follows declaration.
    let mut circuit = Circuit::with_size("order", 3, 0);
    circuit.h(q(2)).unwrap().cx(q(2), q(1)).unwrap();

    let translation = circuit_to_braket(&circuit, &TranslationOptions::new()).unwrap();
    assert_eq!(translation.target_qubits, vec![0, 1, 2]);
    let targets: Vec<&[u32]> = translation
        .circuit
        .instructions
        .iter()
        .map(|inst| inst.target.as_slice())
        .collect();
    assert_eq!(targets, [&[2][..], &[2, 1][..]]);

    // The lifted circuit declares q[1] and q[2] only; its labels carry the
    // Braket indices back out.
    let back = braket_to_circuit(&translation.circuit).unwrap();
    let options = TranslationOptions::new().with_mapped_qubits(true);
    let again = circuit_to_braket(&back, &options).unwrap();
    assert_eq!(again.circuit, translation.circuit);
    assert_eq!(again.target_qubits, vec![1, 2]);
}

#[test]
fn test_mapped_order_follows_declaration() {
    let mut circuit = Circuit::new("order");
    circuit
        .add_qubit_labeled(Qubit::with_register(q(0), "q", vec![5]))
        .unwrap();
    circuit
        .add_qubit_labeled(Qubit::with_register(q(1), "q", vec![2]))
        .unwrap();
    circuit.cx(q(1), q(0)).unwrap();

    let plain = circuit_to_braket(&circuit, &TranslationOptions::new()).unwrap();
    assert_eq!(plain.target_qubits, vec![0, 1]);
    assert_eq!(plain.circuit.instructions[0].target, vec![1, 0]);

    let options = TranslationOptions::new().with_mapped_qubits(true);
    let mapped = circuit_to_braket(&circuit, &options).unwrap();
    assert_eq!(mapped.target_qubits, vec![5, 2]);
    assert_eq!(mapped.circuit.instructions[0].target, vec![2, 5]);
}

#[test]
fn test_unsupported_gate_produces_no_output() {
    let mut circuit = Circuit::with_size("u3", 1, 0);
    circuit.h(q(0)).unwrap().u3(0.1, 0.2, 0.3, q(0)).unwrap();

    let err = circuit_to_braket(&circuit, &TranslationOptions::new()).unwrap_err();
    assert!(matches!(err, BraketError::UnsupportedGate(name) if name == "u3"));
}

#[test]
fn test_unitary_box_unsupported() {
    let one = Complex64::new(1.0, 0.0);
    let zero = Complex64::new(0.0, 0.0);
    let identity = UnitaryBox::new(1, vec![one, zero, zero, one]).unwrap();

    let mut circuit = Circuit::with_size("box", 1, 0);
    circuit.unitary(identity, [q(0)]).unwrap();

    let err = circuit_to_braket(&circuit, &TranslationOptions::new()).unwrap_err();
    assert!(matches!(err, BraketError::UnsupportedGate(name) if name == "unitary1qbox"));
}

#[test]
fn test_implicit_permutation_elided_without_measurement() {
    let mut permuted = Circuit::with_size("perm", 3, 0);
    permuted.x(q(0)).unwrap().x(q(2)).unwrap();
    permuted.add_implicit_swap(q(0), q(1)).unwrap();

    let mut plain = permuted.clone();
    plain.discard_implicit_permutation();

    let options = TranslationOptions::new();
    assert_eq!(
        circuit_to_braket(&permuted, &options).unwrap(),
        circuit_to_braket(&plain, &options).unwrap()
    );
}

#[test]
fn test_device_numbering_with_padding() {
    let mut circuit = Circuit::new("device");
    circuit
        .add_qubit_labeled(Qubit::with_register(q(0), "q", vec![3]))
        .unwrap();
    circuit
        .add_qubit_labeled(Qubit::with_register(q(1), "q", vec![7]))
        .unwrap();
    let c = circuit.add_creg("c", 2);
    circuit
        .h(q(0))
        .unwrap()
        .cx(q(0), q(1))
        .unwrap()
        .measure(q(1), c[0])
        .unwrap()
        .measure(q(0), c[1])
        .unwrap();

    let options = TranslationOptions::new()
        .with_mapped_qubits(true)
        .with_force_ops_on_target_qubits(true)
        .with_forced_qubits(vec![0]);
    let translation = circuit_to_braket(&circuit, &options).unwrap();

    let ops: Vec<(&BraketOp, &[u32])> = translation
        .circuit
        .instructions
        .iter()
        .map(|inst| (&inst.operator, inst.target.as_slice()))
        .collect();
    assert_eq!(
        ops,
        vec![
            (&BraketOp::I, &[3][..]),
            (&BraketOp::I, &[7][..]),
            (&BraketOp::I, &[0][..]),
            (&BraketOp::H, &[3][..]),
            (&BraketOp::CNot, &[3, 7][..]),
        ]
    );
    assert_eq!(translation.measures, BTreeMap::from([(7, 0), (3, 1)]));
}

#[test]
fn test_unlabeled_qubit_cannot_be_mapped() {
    let mut circuit = Circuit::new("anc");
    circuit
        .add_qubit_labeled(Qubit::with_register(q(0), "anc", Vec::new()))
        .unwrap();
    circuit.x(q(0)).unwrap();

    let options = TranslationOptions::new().with_mapped_qubits(true);
    assert!(matches!(
        circuit_to_braket(&circuit, &options),
        Err(BraketError::UnmappableQubit(_))
    ));
}

#[test]
fn test_reverse_declares_referenced_qubits() {
    let mut bk = BraketCircuit::new();
    bk.add(BraketOp::CNot, [4, 1])
        .add(BraketOp::Rz { angle: PI / 2.0 }, [4])
        .add(BraketOp::I, [9]);

    let circuit = braket_to_circuit(&bk).unwrap();
    let labels: Vec<String> = circuit.qubits().iter().map(ToString::to_string).collect();
    assert_eq!(labels, vec!["q[1]", "q[4]", "q[9]"]);
    assert_eq!(circuit.num_ops(), 2);
    assert_eq!(circuit.num_clbits(), 0);
}

#[test]
fn test_reverse_unsupported_instructions() {
    for op in [
        BraketOp::CPhaseShift00 { angle: 0.1 },
        BraketOp::CPhaseShift01 { angle: 0.1 },
        BraketOp::CPhaseShift10 { angle: 0.1 },
        BraketOp::PSwap { angle: 0.1 },
    ] {
        let mut bk = BraketCircuit::new();
        bk.add(BraketOp::H, [0]).add(op, [0, 1]);
        assert!(matches!(
            braket_to_circuit(&bk),
            Err(BraketError::UnsupportedInstruction(_))
        ));
    }
}

#[test]
fn test_reverse_rejects_wrong_arity() {
    let mut bk = BraketCircuit::new();
    bk.add(BraketOp::CNot, [0]);
    assert!(matches!(
        braket_to_circuit(&bk),
        Err(BraketError::Ir(IrError::QubitCountMismatch { .. }))
    ));
}

#[test]
fn test_measurement_map_uses_bit_positions() {
    let mut circuit = Circuit::with_size("measure", 3, 3);
    circuit
        .x(q(2))
        .unwrap()
        .measure(q(2), ClbitId(0))
        .unwrap()
        .measure(q(0), ClbitId(2))
        .unwrap();

    let translation = circuit_to_braket(&circuit, &TranslationOptions::new()).unwrap();
    assert_eq!(translation.circuit.len(), 1);
    assert_eq!(translation.measures, BTreeMap::from([(0, 2), (2, 0)]));
}

#[test]
fn test_json_program_round_trip() {
    let translation =
        circuit_to_braket(&Circuit::bell().unwrap(), &TranslationOptions::new()).unwrap();
    let json = translation.circuit.to_json().unwrap();
    assert!(json.contains(r#""type":"cnot""#));
    assert_eq!(BraketCircuit::from_json(&json).unwrap(), translation.circuit);
}
