//! Braket to canonical circuit.

use std::f64::consts::PI;

use quill_ir::qubit::DEFAULT_QUBIT_REGISTER;
use quill_ir::{Circuit, Qubit, QubitId, StandardGate};
use tracing::{debug, instrument};

use crate::dialect::{BraketCircuit, BraketOp};
use crate::error::{BraketError, BraketResult};

/// Translate a Braket instruction list into a canonical circuit.
///
/// One qubit `q[i]` is declared for every Braket index `i` the list
/// references, in ascending order. The result has no classical bits.
/// `V` and `Vi` are followed by a ±0.25 global phase so the circuit keeps
/// the same unitary. `I` is dropped.
///
/// Fails with [`BraketError::UnsupportedInstruction`] on operators with no
/// canonical counterpart: `CPhaseShift00`, `CPhaseShift01`, `CPhaseShift10`,
/// `PSwap`, `CCPRx`, `MeasureFF` and `Unitary`.
#[instrument(skip_all, fields(instructions = bk.len()))]
pub fn braket_to_circuit(bk: &BraketCircuit) -> BraketResult<Circuit> {
    let mut circuit = Circuit::new("braket");
    for index in bk.qubits() {
        circuit.add_qubit_labeled(Qubit::with_register(
            QubitId(index),
            DEFAULT_QUBIT_REGISTER,
            vec![index],
        ))?;
    }

    for inst in &bk.instructions {
        let Some(gate) = lift_op(&inst.operator)? else {
            continue;
        };
        circuit.gate(gate, inst.target.iter().map(|&q| QubitId(q)))?;
        if let Some(phase) = phase_correction(&inst.operator) {
            circuit.add_phase(phase)?;
        }
    }

    debug!(
        qubits = circuit.num_qubits(),
        ops = circuit.num_ops(),
        "translated braket to circuit"
    );
    Ok(circuit)
}

/// Radians to half-turns.
#[inline]
fn half_turns(radians: f64) -> f64 {
    radians / PI
}

/// Canonical gate for a Braket operator; `None` for operators that are
/// dropped.
fn lift_op(op: &BraketOp) -> BraketResult<Option<StandardGate>> {
    let gate = match *op {
        BraketOp::I => return Ok(None),

        BraketOp::H => StandardGate::H,
        BraketOp::X => StandardGate::X,
        BraketOp::Y => StandardGate::Y,
        BraketOp::Z => StandardGate::Z,
        BraketOp::S => StandardGate::S,
        BraketOp::Si => StandardGate::Sdg,
        BraketOp::T => StandardGate::T,
        BraketOp::Ti => StandardGate::Tdg,
        BraketOp::V => StandardGate::V,
        BraketOp::Vi => StandardGate::Vdg,

        BraketOp::CNot => StandardGate::CX,
        BraketOp::CCNot => StandardGate::CCX,
        BraketOp::CY => StandardGate::CY,
        BraketOp::CZ => StandardGate::CZ,
        BraketOp::Swap => StandardGate::Swap,
        BraketOp::CSwap => StandardGate::CSwap,
        BraketOp::ISwap => StandardGate::ISwapMax,

        BraketOp::PhaseShift { angle } => StandardGate::U1(half_turns(angle)),
        BraketOp::CPhaseShift { angle } => StandardGate::CU1(half_turns(angle)),
        BraketOp::Rx { angle } => StandardGate::Rx(half_turns(angle)),
        BraketOp::Ry { angle } => StandardGate::Ry(half_turns(angle)),
        BraketOp::Rz { angle } => StandardGate::Rz(half_turns(angle)),
        BraketOp::XX { angle } => StandardGate::XXPhase(half_turns(angle)),
        BraketOp::YY { angle } => StandardGate::YYPhase(half_turns(angle)),
        BraketOp::ZZ { angle } => StandardGate::ZZPhase(half_turns(angle)),
        BraketOp::XY { angle } => StandardGate::ISwap(half_turns(angle)),
        BraketOp::GPi { angle } => StandardGate::GPI(half_turns(angle)),
        BraketOp::GPi2 { angle } => StandardGate::GPI2(half_turns(angle)),
        BraketOp::PRx { angle_1, angle_2 } => {
            StandardGate::PhasedX(half_turns(angle_1), half_turns(angle_2))
        }
        BraketOp::MS {
            angle_1,
            angle_2,
            angle_3,
        } => StandardGate::AAMS(
            half_turns(angle_3),
            half_turns(angle_1),
            half_turns(angle_2),
        ),

        BraketOp::CPhaseShift00 { .. }
        | BraketOp::CPhaseShift01 { .. }
        | BraketOp::CPhaseShift10 { .. }
        | BraketOp::PSwap { .. }
        | BraketOp::CCPRx { .. }
        | BraketOp::MeasureFF { .. }
        | BraketOp::Unitary { .. } => {
            return Err(BraketError::UnsupportedInstruction(op.name().into()));
        }
    };
    Ok(Some(gate))
}

/// Global phase, in half-turns, separating a Braket operator from its
/// canonical counterpart.
fn phase_correction(op: &BraketOp) -> Option<f64> {
    match op {
        BraketOp::V => Some(0.25),
        BraketOp::Vi => Some(-0.25),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_ir::{GateType, IrError};

    #[test]
    fn test_ms_argument_order_inverted() {
        let gate = lift_op(&BraketOp::MS {
            angle_1: 0.25 * PI,
            angle_2: 0.5 * PI,
            angle_3: PI,
        })
        .unwrap();
        assert_eq!(gate, Some(StandardGate::AAMS(1.0, 0.25, 0.5)));
    }

    #[test]
    fn test_identity_dropped() {
        let mut bk = BraketCircuit::new();
        bk.add(BraketOp::I, [2]).add(BraketOp::H, [0]);
        let circuit = braket_to_circuit(&bk).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_ops(), 1);
        assert_eq!(circuit.count_gates(GateType::H), 1);
    }

    #[test]
    fn test_qubits_follow_braket_indices() {
        let mut bk = BraketCircuit::new();
        bk.add(BraketOp::CNot, [7, 3]);
        let circuit = braket_to_circuit(&bk).unwrap();
        let labels: Vec<String> = circuit.qubits().iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["q[3]", "q[7]"]);
        assert_eq!(circuit.instructions()[0].qubits, vec![QubitId(7), QubitId(3)]);
        assert_eq!(circuit.num_clbits(), 0);
    }

    #[test]
    fn test_unsupported_instructions() {
        let unsupported = [
            BraketOp::CPhaseShift00 { angle: 0.1 },
            BraketOp::CPhaseShift01 { angle: 0.1 },
            BraketOp::CPhaseShift10 { angle: 0.1 },
            BraketOp::PSwap { angle: 0.1 },
            BraketOp::CCPRx {
                angle_1: 0.1,
                angle_2: 0.2,
                feedback_key: 0,
            },
            BraketOp::MeasureFF { feedback_key: 0 },
            BraketOp::Unitary { matrix: vec![] },
        ];
        for op in unsupported {
            let name = op.name();
            assert!(matches!(
                lift_op(&op),
                Err(BraketError::UnsupportedInstruction(n)) if n == name
            ));
        }
    }

    #[test]
    fn test_arity_error_propagates() {
        let mut bk = BraketCircuit::new();
        bk.add(BraketOp::CNot, [0]);
        let err = braket_to_circuit(&bk).unwrap_err();
        assert!(matches!(
            err,
            BraketError::Ir(IrError::QubitCountMismatch { .. })
        ));
    }
}
