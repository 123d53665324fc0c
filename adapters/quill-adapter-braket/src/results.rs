//! Reassembly of Braket measurement results into canonical bit order.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::error::{BraketError, BraketResult};

/// Reorder per-shot readouts into canonical bit order.
///
/// `measured_qubits` names the Braket qubit behind each readout column and
/// `measurements` holds one row per shot. `measures` is the measurement map
/// from the forward translation. Each output row has one entry per bit up
/// to the largest mapped bit; bits no qubit was measured into read as 0.
pub fn reassemble_shots(
    measured_qubits: &[u32],
    measurements: &[Vec<u8>],
    measures: &BTreeMap<u32, usize>,
) -> BraketResult<Vec<Vec<u8>>> {
    let width = measures.values().max().map_or(0, |&b| b + 1);

    let columns: Vec<(usize, usize)> = measures
        .iter()
        .map(|(&qubit, &bit)| {
            measured_qubits
                .iter()
                .position(|&q| q == qubit)
                .map(|col| (bit, col))
                .ok_or(BraketError::UnmeasuredQubit(qubit))
        })
        .collect::<BraketResult<_>>()?;

    measurements
        .iter()
        .enumerate()
        .map(|(shot, row)| {
            if row.len() < measured_qubits.len() {
                return Err(BraketError::ShortShotRow {
                    shot,
                    expected: measured_qubits.len(),
                    got: row.len(),
                });
            }
            let mut bits = vec![0u8; width];
            for &(bit, col) in &columns {
                bits[bit] = row[col];
            }
            Ok(bits)
        })
        .collect()
}

/// Count identical shots. Keys list bits in canonical order, bit 0 first.
pub fn counts_from_shots(shots: &[Vec<u8>]) -> FxHashMap<String, u64> {
    let mut counts = FxHashMap::default();
    for shot in shots {
        let key: String = shot
            .iter()
            .map(|&b| if b == 0 { '0' } else { '1' })
            .collect();
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}
