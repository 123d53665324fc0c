//! Braket device-properties documents and the device profile derived from
//! them.
//!
//! The properties document is the JSON returned by Braket's `GetDevice`
//! call. Only the fields needed to plan a translation are modelled; the
//! rest are ignored on parsing.

use std::collections::{BTreeMap, BTreeSet};

use quill_ir::GateType;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::characterisation::{AvgCharacterisation, Characterisation};
use crate::device::DeviceKind;
use crate::error::{BraketError, BraketResult};
use crate::gate_set::GateSet;

/// Action key for JAQCD programs.
pub const JAQCD_ACTION: &str = "braket.ir.jaqcd.program";

/// Action key for OpenQASM programs.
pub const OPENQASM_ACTION: &str = "braket.ir.openqasm.program";

/// Result type for per-shot samples.
pub const SAMPLE_RESULT: &str = "Sample";

/// A device-properties document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProperties {
    /// Supported program actions, keyed by action type.
    #[serde(default)]
    pub action: FxHashMap<String, DeviceAction>,
    /// Gate-model paradigm properties.
    pub paradigm: Paradigm,
    /// Provider-specific properties; absent for simulators.
    #[serde(default)]
    pub provider: Option<ProviderProperties>,
}

/// One supported program action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAction {
    #[serde(default)]
    pub supported_operations: Vec<String>,
    #[serde(default)]
    pub supported_result_types: Vec<ResultTypeSpec>,
    #[serde(default)]
    pub requires_all_qubits_measurement: bool,
}

/// A result type with its shot limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultTypeSpec {
    pub name: String,
    #[serde(default)]
    pub min_shots: Option<u64>,
    #[serde(default)]
    pub max_shots: Option<u64>,
}

impl ResultTypeSpec {
    pub fn shot_range(&self) -> ShotRange {
        ShotRange {
            min: self.min_shots,
            max: self.max_shots,
        }
    }
}

/// Inclusive shot limits of a result type. A missing bound is unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShotRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl ShotRange {
    /// Whether `shots` lies within the range.
    pub fn contains(&self, shots: u64) -> bool {
        self.min.is_none_or(|min| shots >= min) && self.max.is_none_or(|max| shots <= max)
    }
}

/// Gate-model paradigm properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paradigm {
    pub qubit_count: u32,
    /// Gates accepted under verbatim compilation.
    #[serde(default)]
    pub native_gate_set: Vec<String>,
    #[serde(default)]
    pub connectivity: Option<Connectivity>,
}

/// Qubit connectivity. Graph nodes are stringified qubit numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connectivity {
    pub fully_connected: bool,
    #[serde(default)]
    pub connectivity_graph: BTreeMap<String, Vec<String>>,
}

/// Provider properties: the schema header plus whichever calibration
/// payload that provider publishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProperties {
    pub braket_schema_header: SchemaHeader,
    /// IonQ device-wide fidelities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fidelity: Option<IonQFidelity>,
    /// Rigetti benchmark and instruction specs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<RigettiSpecs>,
    /// IQM per-qubit and per-pair fidelities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IqmProperties>,
}

/// IonQ fidelities, averaged over the whole trap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IonQFidelity {
    #[serde(rename = "1Q")]
    pub one_qubit: FidelityStat,
    #[serde(rename = "2Q")]
    pub two_qubit: FidelityStat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FidelityStat {
    pub mean: f64,
}

/// Rigetti calibration specs.
///
/// The first benchmark holds single-qubit randomized benchmarking errors.
/// Instruction entry 3 holds readout fidelities and entry 4 two-qubit gate
/// errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RigettiSpecs {
    #[serde(default)]
    pub benchmarks: Vec<RigettiSpec>,
    #[serde(default)]
    pub instructions: Vec<RigettiSpec>,
}

impl RigettiSpecs {
    pub const READOUT_INSTRUCTION: usize = 3;
    pub const TWO_QUBIT_INSTRUCTION: usize = 4;
}

/// One benchmark or instruction, measured per site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RigettiSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sites: Vec<RigettiSite>,
}

/// Measurements on one set of qubits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigettiSite {
    pub node_ids: Vec<u32>,
    #[serde(default)]
    pub characteristics: Vec<RigettiCharacteristic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigettiCharacteristic {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub error: Option<f64>,
}

/// IQM fidelities. Qubit keys are decimal numbers, possibly zero-padded;
/// pair keys are `"<a>-<b>"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IqmProperties {
    #[serde(default)]
    pub one_qubit: BTreeMap<String, IqmQubitFidelity>,
    #[serde(default)]
    pub two_qubit: BTreeMap<String, IqmPairFidelity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IqmQubitFidelity {
    /// Simultaneous randomized-benchmarking fidelity.
    #[serde(rename = "f1Q_simultaneous_RB")]
    pub rb: f64,
    /// Readout fidelity.
    #[serde(rename = "fRO")]
    pub readout: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IqmPairFidelity {
    /// CZ gate fidelity.
    #[serde(rename = "fCZ")]
    pub cz: f64,
}

/// Name and version of a Braket schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaHeader {
    pub name: String,
    pub version: String,
}

/// Provider schemas with known layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSchema {
    IonQ,
    Rigetti,
    Iqm,
    Other(SchemaHeader),
}

impl ProviderSchema {
    pub const IONQ_NAME: &'static str = "braket.device_schema.ionq.ionq_provider_properties";
    pub const RIGETTI_NAME: &'static str =
        "braket.device_schema.rigetti.rigetti_provider_properties";
    pub const IQM_NAME: &'static str = "braket.device_schema.iqm.iqm_provider_properties";

    /// Identify a schema by exact name and version.
    pub fn from_header(header: &SchemaHeader) -> Self {
        match (header.name.as_str(), header.version.as_str()) {
            (Self::IONQ_NAME, "1") => ProviderSchema::IonQ,
            (Self::RIGETTI_NAME, "2") => ProviderSchema::Rigetti,
            (Self::IQM_NAME, "1") => ProviderSchema::Iqm,
            _ => ProviderSchema::Other(header.clone()),
        }
    }

    /// Whether connectivity graphs in this schema can be read.
    pub fn has_numeric_connectivity(&self) -> bool {
        matches!(self, ProviderSchema::Rigetti | ProviderSchema::Iqm)
    }
}

impl std::fmt::Display for ProviderSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderSchema::IonQ => write!(f, "{} v1", Self::IONQ_NAME),
            ProviderSchema::Rigetti => write!(f, "{} v2", Self::RIGETTI_NAME),
            ProviderSchema::Iqm => write!(f, "{} v1", Self::IQM_NAME),
            ProviderSchema::Other(h) => write!(f, "{} v{}", h.name, h.version),
        }
    }
}

impl DeviceProperties {
    /// Parse a properties document.
    pub fn from_json(json: &str) -> BraketResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The gate-model action: JAQCD if offered, else OpenQASM.
    ///
    /// Devices with neither, such as annealers, are rejected.
    pub fn gate_action(&self) -> BraketResult<&DeviceAction> {
        self.action
            .get(JAQCD_ACTION)
            .or_else(|| self.action.get(OPENQASM_ACTION))
            .ok_or_else(|| {
                BraketError::UnsupportedDevice("no gate-model program action".into())
            })
    }

    /// The provider schema, if the document has one.
    pub fn schema(&self) -> Option<ProviderSchema> {
        self.provider
            .as_ref()
            .map(|p| ProviderSchema::from_header(&p.braket_schema_header))
    }
}

/// Everything translation and result handling need to know about a device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProfile {
    pub kind: DeviceKind,
    pub gate_set: GateSet,
    /// Every physical qubit number, ascending.
    pub all_qubits: Vec<u32>,
    /// Directed coupling edges; empty when fully connected.
    pub coupling: Vec<(u32, u32)>,
    pub fully_connected: bool,
    /// QPU rejects programs that leave any qubit unmeasured.
    pub requires_all_qubits_measured: bool,
    /// Supported result types with their shot limits.
    pub result_types: BTreeMap<String, ShotRange>,
    /// Provider schema; only recorded for QPUs.
    pub schema: Option<ProviderSchema>,
    /// Per-qubit and per-edge error rates, when the provider publishes them.
    pub characterisation: Option<Characterisation>,
}

impl DeviceProfile {
    /// Derive a profile from a properties document.
    ///
    /// With `verbatim` the gate set comes from the device's native gates.
    /// Verbatim compilation is only available on QPUs, and not on IonQ.
    pub fn from_properties(
        props: &DeviceProperties,
        kind: DeviceKind,
        verbatim: bool,
    ) -> BraketResult<Self> {
        let action = props.gate_action()?;
        let schema = match kind {
            DeviceKind::Qpu => props.schema(),
            DeviceKind::Simulator => None,
        };

        if verbatim && kind != DeviceKind::Qpu {
            return Err(BraketError::UnsupportedDevice(
                "verbatim compilation requires a QPU".into(),
            ));
        }
        if verbatim && schema == Some(ProviderSchema::IonQ) {
            return Err(BraketError::UnsupportedDevice(
                "verbatim compilation is not supported on IonQ devices".into(),
            ));
        }

        let operations = if verbatim {
            &props.paradigm.native_gate_set
        } else {
            &action.supported_operations
        };
        let gate_set = GateSet::from_supported_operations(operations, kind, verbatim)?;

        let (all_qubits, coupling) = qubit_layout(props, kind, schema.as_ref())?;
        let fully_connected = coupling.is_empty();

        let requires_all_qubits_measured = kind == DeviceKind::Qpu
            && props
                .action
                .get(OPENQASM_ACTION)
                .is_some_and(|a| a.requires_all_qubits_measurement);

        let result_types = action
            .supported_result_types
            .iter()
            .map(|rt| (rt.name.clone(), rt.shot_range()))
            .collect();

        let characterisation = match (&schema, &props.provider) {
            (Some(schema), Some(provider)) => Characterisation::from_provider(
                provider,
                schema,
                &gate_set,
                &all_qubits,
                &coupling,
            )?,
            _ => None,
        };

        debug!(
            ?kind,
            qubits = all_qubits.len(),
            gates = gate_set.len(),
            requires_all_qubits_measured,
            characterised = characterisation.is_some(),
            "built device profile"
        );

        Ok(Self {
            kind,
            gate_set,
            all_qubits,
            coupling,
            fully_connected,
            requires_all_qubits_measured,
            result_types,
            schema,
            characterisation,
        })
    }

    /// Averaged error rates, when the device is characterised.
    pub fn avg_characterisation(&self) -> Option<AvgCharacterisation> {
        self.characterisation.as_ref().map(Characterisation::average)
    }

    /// Whether the device accepts the `I` no-op.
    pub fn supports_noop(&self) -> bool {
        self.gate_set.contains(GateType::Noop)
    }

    /// Number of physical qubits.
    pub fn num_qubits(&self) -> usize {
        self.all_qubits.len()
    }

    /// Whether the device can return per-shot samples.
    pub fn supports_shots(&self) -> bool {
        self.result_types.contains_key(SAMPLE_RESULT)
    }

    /// Shot limits for sampling, if the device samples at all.
    pub fn sample_shot_range(&self) -> Option<ShotRange> {
        self.result_types.get(SAMPLE_RESULT).copied()
    }

    /// Check a requested shot count against the sampling limits.
    ///
    /// Zero shots asks for an exact result rather than samples and is
    /// always accepted here.
    pub fn check_shots(&self, shots: u64) -> BraketResult<()> {
        if shots == 0 {
            return Ok(());
        }
        let Some(range) = self.sample_shot_range() else {
            return Err(BraketError::UnsupportedDevice(
                "device does not return shots".into(),
            ));
        };
        if range.contains(shots) {
            Ok(())
        } else {
            Err(BraketError::ShotsOutOfRange {
                shots,
                min: range.min,
                max: range.max,
            })
        }
    }
}

type QubitLayout = (Vec<u32>, Vec<(u32, u32)>);

fn qubit_layout(
    props: &DeviceProperties,
    kind: DeviceKind,
    schema: Option<&ProviderSchema>,
) -> BraketResult<QubitLayout> {
    let n = props.paradigm.qubit_count;
    let dense = || -> QubitLayout { ((0..n).collect(), Vec::new()) };

    if kind == DeviceKind::Simulator {
        return Ok(dense());
    }
    let Some(connectivity) = &props.paradigm.connectivity else {
        return Ok(dense());
    };
    if connectivity.fully_connected {
        return Ok(dense());
    }

    match schema {
        Some(s) if s.has_numeric_connectivity() => {}
        Some(s) => return Err(BraketError::UnsupportedSchema(s.to_string())),
        None => return Err(BraketError::UnsupportedSchema("missing".into())),
    }

    let parse = |label: &str| {
        label
            .trim()
            .parse::<u32>()
            .map_err(|_| BraketError::InvalidProperties(format!("qubit label {label:?}")))
    };

    let mut qubits = BTreeSet::new();
    let mut coupling = Vec::new();
    for (from, neighbours) in &connectivity.connectivity_graph {
        let from = parse(from)?;
        qubits.insert(from);
        for to in neighbours {
            let to = parse(to)?;
            qubits.insert(to);
            coupling.push((from, to));
        }
    }
    coupling.sort_unstable();
    Ok((qubits.into_iter().collect(), coupling))
}
