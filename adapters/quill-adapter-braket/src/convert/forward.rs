//! Canonical circuit to Braket.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use quill_ir::{Circuit, Gate, InstructionKind, IrError, Qubit, QubitId, StandardGate};
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

use super::{BraketTranslation, TranslationOptions};
use crate::angle::normalize_angle;
use crate::dialect::{BraketCircuit, BraketOp};
use crate::error::{BraketError, BraketResult};

/// Translate a canonical circuit into a Braket instruction list.
///
/// Barriers and global phase are dropped. Measurements are not emitted;
/// they populate [`BraketTranslation::measures`] instead. The implicit
/// permutation is never materialized: without measurements nothing can
/// observe it, and with measurements the measurement map already refers to
/// physical wires.
///
/// Fails with [`BraketError::UnsupportedGate`] on `U3` and unitary boxes.
/// Translation is all-or-nothing.
#[instrument(skip_all, fields(circuit = circuit.name(), ops = circuit.num_ops()))]
pub fn circuit_to_braket(
    circuit: &Circuit,
    options: &TranslationOptions,
) -> BraketResult<BraketTranslation> {
    if !circuit.has_measurements() && circuit.has_implicit_permutation() {
        debug!("dropping implicit permutation of unmeasured circuit");
    }

    let target_qubits = circuit
        .qubits()
        .iter()
        .enumerate()
        .map(|(pos, qubit)| target_index(qubit, pos, options.mapped_qubits))
        .collect::<BraketResult<Vec<u32>>>()?;
    let index: FxHashMap<QubitId, u32> = circuit
        .qubits()
        .iter()
        .map(|q| q.id)
        .zip(target_qubits.iter().copied())
        .collect();
    let lookup = |qubit: &QubitId| {
        index
            .get(qubit)
            .copied()
            .ok_or_else(|| BraketError::UnmappableQubit(qubit.to_string()))
    };

    let mut bk = BraketCircuit::new();
    if options.force_ops_on_target_qubits {
        bk.add_each(&BraketOp::I, &target_qubits);
    }
    if let Some(forced) = &options.forced_qubits {
        bk.add_each(&BraketOp::I, forced);
    }

    let mut measures = BTreeMap::new();
    for inst in circuit.instructions() {
        match &inst.kind {
            InstructionKind::Barrier | InstructionKind::GlobalPhase(_) => {}
            InstructionKind::Measure => {
                for (qubit, &clbit) in inst.qubits.iter().zip(&inst.clbits) {
                    let bit = circuit
                        .clbit_position(clbit)
                        .ok_or(IrError::ClbitNotFound {
                            clbit,
                            gate_name: Some("measure".into()),
                        })?;
                    measures.insert(lookup(qubit)?, bit);
                }
            }
            InstructionKind::Gate(Gate::Unitary(unitary)) => {
                return Err(BraketError::UnsupportedGate(unitary.name().into()));
            }
            InstructionKind::Gate(Gate::Standard(gate)) => {
                let op = lower_gate(gate)?;
                let targets = inst.qubits.iter().map(lookup).collect::<BraketResult<Vec<_>>>()?;
                bk.add(op, targets);
            }
        }
    }

    debug!(
        instructions = bk.len(),
        measured = measures.len(),
        "translated circuit to braket"
    );
    Ok(BraketTranslation {
        circuit: bk,
        target_qubits,
        measures,
    })
}

fn target_index(qubit: &Qubit, position: usize, mapped: bool) -> BraketResult<u32> {
    if mapped {
        qubit
            .label_index()
            .ok_or_else(|| BraketError::UnmappableQubit(qubit.to_string()))
    } else {
        Ok(position as u32)
    }
}

/// Half-turns to radians, unchanged.
#[inline]
fn direct(half_turns: f64) -> f64 {
    half_turns * PI
}

/// Half-turns to radians, folded into `(-2π, 2π]`.
#[inline]
fn normalized(half_turns: f64) -> f64 {
    normalize_angle(half_turns) * PI
}

fn lower_gate(gate: &StandardGate) -> BraketResult<BraketOp> {
    let op = match *gate {
        StandardGate::Noop => BraketOp::I,
        StandardGate::H => BraketOp::H,
        StandardGate::X => BraketOp::X,
        StandardGate::Y => BraketOp::Y,
        StandardGate::Z => BraketOp::Z,
        StandardGate::S => BraketOp::S,
        StandardGate::Sdg => BraketOp::Si,
        StandardGate::T => BraketOp::T,
        StandardGate::Tdg => BraketOp::Ti,
        // Braket's V and Vi differ from the canonical gates by a global phase.
        StandardGate::V => BraketOp::V,
        StandardGate::Vdg => BraketOp::Vi,

        StandardGate::CX => BraketOp::CNot,
        StandardGate::CCX => BraketOp::CCNot,
        StandardGate::CY => BraketOp::CY,
        StandardGate::CZ => BraketOp::CZ,
        StandardGate::Swap => BraketOp::Swap,
        StandardGate::CSwap => BraketOp::CSwap,
        StandardGate::ISwapMax => BraketOp::ISwap,

        StandardGate::U1(p) => BraketOp::PhaseShift { angle: direct(p) },
        StandardGate::CU1(p) => BraketOp::CPhaseShift { angle: direct(p) },
        StandardGate::Rx(p) => BraketOp::Rx {
            angle: normalized(p),
        },
        StandardGate::Ry(p) => BraketOp::Ry { angle: direct(p) },
        StandardGate::Rz(p) => BraketOp::Rz {
            angle: normalized(p),
        },
        StandardGate::XXPhase(p) => BraketOp::XX { angle: direct(p) },
        StandardGate::YYPhase(p) => BraketOp::YY { angle: direct(p) },
        StandardGate::ISwap(p) => BraketOp::XY { angle: direct(p) },
        StandardGate::ZZPhase(p) => BraketOp::ZZ {
            angle: normalized(p),
        },
        StandardGate::GPI(p) => BraketOp::GPi {
            angle: normalized(p),
        },
        StandardGate::GPI2(p) => BraketOp::GPi2 {
            angle: normalized(p),
        },
        StandardGate::AAMS(p0, p1, p2) => BraketOp::MS {
            angle_1: normalized(p1),
            angle_2: normalized(p2),
            angle_3: normalized(p0),
        },
        StandardGate::PhasedX(p0, p1) => BraketOp::PRx {
            angle_1: normalized(p0),
            angle_2: normalized(p1),
        },

        StandardGate::U3(..) => return Err(BraketError::UnsupportedGate(gate.name().into())),
    };
    Ok(op)
}
