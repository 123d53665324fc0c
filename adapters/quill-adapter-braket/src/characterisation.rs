//! Device error rates read from provider calibration data.
//!
//! IonQ, Rigetti and IQM each publish calibration numbers in their own
//! layout inside the provider properties. They are normalised here into
//! error rates keyed by physical qubit and coupling edge, for every gate
//! type the device accepts. All rates are probabilities in `[0, 1]`.

use std::collections::BTreeMap;

use quill_ir::GateType;
use tracing::debug;

use crate::error::{BraketError, BraketResult};
use crate::gate_set::GateSet;
use crate::properties::{
    IonQFidelity, IqmProperties, IqmQubitFidelity, ProviderProperties, ProviderSchema,
    RigettiCharacteristic, RigettiSite, RigettiSpec, RigettiSpecs,
};

/// Error rates per physical qubit and coupling edge, per gate type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Characterisation {
    /// Error of each single-qubit gate type on each qubit.
    pub node_errors: BTreeMap<u32, BTreeMap<GateType, f64>>,
    /// Error of each multi-qubit gate type on each directed edge.
    pub edge_errors: BTreeMap<(u32, u32), BTreeMap<GateType, f64>>,
    /// Readout confusion matrix per qubit, indexed `[prepared][read]`.
    pub readout_errors: BTreeMap<u32, [[f64; 2]; 2]>,
}

/// One error rate per qubit, per edge and per readout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvgCharacterisation {
    pub node_errors: BTreeMap<u32, f64>,
    pub link_errors: BTreeMap<(u32, u32), f64>,
    pub readout_errors: BTreeMap<u32, f64>,
}

/// Where a provider keeps its error rates.
trait ErrorSource {
    fn node_error(&self, qubit: u32) -> BraketResult<f64>;
    fn readout_error(&self, qubit: u32) -> BraketResult<f64>;
    fn link_error(&self, a: u32, b: u32) -> BraketResult<f64>;
}

impl Characterisation {
    /// Read the calibration payload matching `schema`.
    ///
    /// Returns `None` for schemas without a known payload and for documents
    /// that omit it. A payload that lacks a qubit or edge of the device is
    /// an error.
    pub fn from_provider(
        provider: &ProviderProperties,
        schema: &ProviderSchema,
        gate_set: &GateSet,
        qubits: &[u32],
        coupling: &[(u32, u32)],
    ) -> BraketResult<Option<Self>> {
        let characterisation = match (schema, provider) {
            (
                ProviderSchema::IonQ,
                ProviderProperties {
                    fidelity: Some(fidelity),
                    ..
                },
            ) => Self::build(fidelity, gate_set, qubits, coupling)?,
            (
                ProviderSchema::Rigetti,
                ProviderProperties {
                    specs: Some(specs),
                    ..
                },
            ) => Self::build(&RigettiTables::new(specs)?, gate_set, qubits, coupling)?,
            (
                ProviderSchema::Iqm,
                ProviderProperties {
                    properties: Some(properties),
                    ..
                },
            ) => Self::build(&IqmTables::new(properties)?, gate_set, qubits, coupling)?,
            _ => {
                debug!(%schema, "no calibration data");
                return Ok(None);
            }
        };
        Ok(Some(characterisation))
    }

    /// An empty coupling list means every ordered pair of qubits is an edge.
    fn build<S: ErrorSource>(
        source: &S,
        gate_set: &GateSet,
        qubits: &[u32],
        coupling: &[(u32, u32)],
    ) -> BraketResult<Self> {
        let mut characterisation = Self::default();

        for &qubit in qubits {
            let error = source.node_error(qubit)?;
            characterisation.node_errors.insert(
                qubit,
                gate_set.single_qubit.iter().map(|&ty| (ty, error)).collect(),
            );
            let p = source.readout_error(qubit)?;
            characterisation
                .readout_errors
                .insert(qubit, [[1.0 - p, p], [p, 1.0 - p]]);
        }

        let edges: Vec<(u32, u32)> = if coupling.is_empty() {
            qubits
                .iter()
                .flat_map(|&a| qubits.iter().filter(move |&&b| b != a).map(move |&b| (a, b)))
                .collect()
        } else {
            coupling.to_vec()
        };
        for (a, b) in edges {
            let error = source.link_error(a, b)?;
            characterisation.edge_errors.insert(
                (a, b),
                gate_set.multi_qubit.iter().map(|&ty| (ty, error)).collect(),
            );
        }

        Ok(characterisation)
    }

    /// Collapse to one number per qubit, edge and readout.
    ///
    /// Gate errors are averaged over gate types; a qubit or edge with no
    /// gate types is left out. Readout error is the mean of the two
    /// misclassification probabilities.
    pub fn average(&self) -> AvgCharacterisation {
        AvgCharacterisation {
            node_errors: self
                .node_errors
                .iter()
                .filter_map(|(&q, errors)| mean(errors).map(|e| (q, e)))
                .collect(),
            link_errors: self
                .edge_errors
                .iter()
                .filter_map(|(&edge, errors)| mean(errors).map(|e| (edge, e)))
                .collect(),
            readout_errors: self
                .readout_errors
                .iter()
                .map(|(&q, m)| (q, (m[0][1] + m[1][0]) / 2.0))
                .collect(),
        }
    }
}

fn mean(errors: &BTreeMap<GateType, f64>) -> Option<f64> {
    if errors.is_empty() {
        None
    } else {
        Some(errors.values().sum::<f64>() / errors.len() as f64)
    }
}

fn missing(what: &str) -> BraketError {
    BraketError::InvalidProperties(format!("no {what} in calibration data"))
}

/// IonQ reports trap-wide means and no readout error.
impl ErrorSource for IonQFidelity {
    fn node_error(&self, _qubit: u32) -> BraketResult<f64> {
        Ok(1.0 - self.one_qubit.mean)
    }

    fn readout_error(&self, _qubit: u32) -> BraketResult<f64> {
        Ok(0.0)
    }

    fn link_error(&self, _a: u32, _b: u32) -> BraketResult<f64> {
        Ok(1.0 - self.two_qubit.mean)
    }
}

struct RigettiTables {
    rb_error: BTreeMap<u32, f64>,
    readout_fidelity: BTreeMap<u32, f64>,
    two_qubit_error: BTreeMap<(u32, u32), f64>,
}

impl RigettiTables {
    fn new(specs: &RigettiSpecs) -> BraketResult<Self> {
        let benchmark = specs
            .benchmarks
            .first()
            .ok_or_else(|| missing("rigetti benchmark"))?;
        let instruction = |index: usize| {
            specs
                .instructions
                .get(index)
                .ok_or_else(|| missing(&format!("rigetti instruction {index}")))
        };

        Ok(Self {
            rb_error: single_sites(benchmark, |c| c.error)?,
            readout_fidelity: single_sites(instruction(RigettiSpecs::READOUT_INSTRUCTION)?, |c| {
                c.value
            })?,
            two_qubit_error: pair_sites(instruction(RigettiSpecs::TWO_QUBIT_INSTRUCTION)?)?,
        })
    }
}

/// First characteristic of a site, through `field`.
fn site_value(
    spec: &RigettiSpec,
    site: &RigettiSite,
    field: impl Fn(&RigettiCharacteristic) -> Option<f64>,
) -> BraketResult<f64> {
    site.characteristics
        .first()
        .and_then(field)
        .ok_or_else(|| missing(&format!("{} value for {:?}", spec.name, site.node_ids)))
}

fn single_sites(
    spec: &RigettiSpec,
    field: impl Fn(&RigettiCharacteristic) -> Option<f64> + Copy,
) -> BraketResult<BTreeMap<u32, f64>> {
    let mut values = BTreeMap::new();
    for site in &spec.sites {
        if let [qubit] = site.node_ids[..] {
            values.insert(qubit, site_value(spec, site, field)?);
        }
    }
    Ok(values)
}

fn pair_sites(spec: &RigettiSpec) -> BraketResult<BTreeMap<(u32, u32), f64>> {
    let mut values = BTreeMap::new();
    for site in &spec.sites {
        if let [a, b] = site.node_ids[..] {
            values.insert((a.min(b), a.max(b)), site_value(spec, site, |c| c.error)?);
        }
    }
    Ok(values)
}

impl ErrorSource for RigettiTables {
    fn node_error(&self, qubit: u32) -> BraketResult<f64> {
        self.rb_error
            .get(&qubit)
            .copied()
            .ok_or_else(|| missing(&format!("benchmark for qubit {qubit}")))
    }

    fn readout_error(&self, qubit: u32) -> BraketResult<f64> {
        self.readout_fidelity
            .get(&qubit)
            .map(|f| 1.0 - f)
            .ok_or_else(|| missing(&format!("readout for qubit {qubit}")))
    }

    fn link_error(&self, a: u32, b: u32) -> BraketResult<f64> {
        self.two_qubit_error
            .get(&(a.min(b), a.max(b)))
            .copied()
            .ok_or_else(|| missing(&format!("two-qubit gate on {a}-{b}")))
    }
}

struct IqmTables<'a> {
    one_qubit: BTreeMap<u32, &'a IqmQubitFidelity>,
    two_qubit: BTreeMap<(u32, u32), f64>,
}

impl<'a> IqmTables<'a> {
    fn new(properties: &'a IqmProperties) -> BraketResult<Self> {
        let parse = |label: &str| {
            label
                .trim()
                .parse::<u32>()
                .map_err(|_| BraketError::InvalidProperties(format!("qubit key {label:?}")))
        };

        let mut one_qubit = BTreeMap::new();
        for (key, fidelity) in &properties.one_qubit {
            one_qubit.insert(parse(key)?, fidelity);
        }

        let mut two_qubit = BTreeMap::new();
        for (key, fidelity) in &properties.two_qubit {
            let (a, b) = key
                .split_once('-')
                .ok_or_else(|| BraketError::InvalidProperties(format!("pair key {key:?}")))?;
            let (a, b) = (parse(a)?, parse(b)?);
            two_qubit.insert((a.min(b), a.max(b)), fidelity.cz);
        }

        Ok(Self {
            one_qubit,
            two_qubit,
        })
    }

    fn qubit(&self, qubit: u32) -> BraketResult<&IqmQubitFidelity> {
        self.one_qubit
            .get(&qubit)
            .copied()
            .ok_or_else(|| missing(&format!("fidelities for qubit {qubit}")))
    }
}

impl ErrorSource for IqmTables<'_> {
    fn node_error(&self, qubit: u32) -> BraketResult<f64> {
        Ok(1.0 - self.qubit(qubit)?.rb)
    }

    fn readout_error(&self, qubit: u32) -> BraketResult<f64> {
        Ok(1.0 - self.qubit(qubit)?.readout)
    }

    fn link_error(&self, a: u32, b: u32) -> BraketResult<f64> {
        self.two_qubit
            .get(&(a.min(b), a.max(b)))
            .map(|f| 1.0 - f)
            .ok_or_else(|| missing(&format!("CZ fidelity on {a}-{b}")))
    }
}
