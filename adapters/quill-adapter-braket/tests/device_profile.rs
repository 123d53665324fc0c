//! Device properties through to translated programs and decoded results.

use std::collections::BTreeMap;

use quill_adapter_braket::gate_set::gate_type_for_operation;
use quill_adapter_braket::{
    BraketError, BraketOp, DeviceKind, DeviceProfile, DeviceProperties, ProviderSchema, ShotRange,
    TranslationOptions, circuit_to_braket, counts_from_shots, reassemble_shots,
};
use quill_ir::{Circuit, GateType, Qubit, QubitId};

const IQM_PROPERTIES: &str = r#"{
    "action": {
        "braket.ir.openqasm.program": {
            "supportedOperations": ["cnot", "rx", "rz", "x", "h", "cz", "prx", "i", "ccnot", "start_verbatim_box"],
            "supportedResultTypes": [{"name": "Sample", "minShots": 1, "maxShots": 20000}],
            "requiresAllQubitsMeasurement": true
        }
    },
    "paradigm": {
        "qubitCount": 4,
        "nativeGateSet": ["prx", "cz"],
        "connectivity": {
            "fullyConnected": false,
            "connectivityGraph": {"1": ["2"], "2": ["3", "4"]}
        }
    },
    "provider": {
        "braketSchemaHeader": {
            "name": "braket.device_schema.iqm.iqm_provider_properties",
            "version": "1"
        },
        "properties": {
            "one_qubit": {
                "1": {"T1": 3.1e-5, "f1Q_simultaneous_RB": 0.999, "fRO": 0.95},
                "2": {"T1": 2.9e-5, "f1Q_simultaneous_RB": 0.998, "fRO": 0.97},
                "03": {"T1": 3.4e-5, "f1Q_simultaneous_RB": 0.997, "fRO": 0.93},
                "4": {"T1": 2.2e-5, "f1Q_simultaneous_RB": 0.996, "fRO": 0.91}
            },
            "two_qubit": {
                "1-2": {"fCZ": 0.98},
                "2-3": {"fCZ": 0.97},
                "4-2": {"fCZ": 0.96}
            }
        }
    }
}"#;

const IONQ_PROPERTIES: &str = r#"{
    "action": {
        "braket.ir.openqasm.program": {
            "supportedOperations": ["cnot", "rx", "ry", "rz", "x", "xx", "swap"],
            "supportedResultTypes": [{"name": "Probability"}]
        }
    },
    "paradigm": {
        "qubitCount": 3,
        "nativeGateSet": ["gpi", "gpi2", "ms"],
        "connectivity": {"fullyConnected": true, "connectivityGraph": {}}
    },
    "provider": {
        "braketSchemaHeader": {
            "name": "braket.device_schema.ionq.ionq_provider_properties",
            "version": "1"
        },
        "fidelity": {"1Q": {"mean": 0.9985}, "2Q": {"mean": 0.97}, "spam": {"mean": 0.99}}
    }
}"#;

const SV1_PROPERTIES: &str = r#"{
    "action": {
        "braket.ir.jaqcd.program": {
            "supportedOperations": ["ccnot", "cnot", "cswap", "h", "i", "rx", "rz", "x", "unitary", "kraus"],
            "supportedResultTypes": [{"name": "Sample"}, {"name": "Expectation"}]
        }
    },
    "paradigm": {"qubitCount": 3}
}"#;

fn rigetti_properties(version: &str, graph: &str) -> String {
    format!(
        r#"{{
            "action": {{
                "braket.ir.openqasm.program": {{
                    "supportedOperations": ["cnot", "rx", "rz", "x", "cz"]
                }}
            }},
            "paradigm": {{
                "qubitCount": 3,
                "connectivity": {{"fullyConnected": false, "connectivityGraph": {graph}}}
            }},
            "provider": {{
                "braketSchemaHeader": {{
                    "name": "braket.device_schema.rigetti.rigetti_provider_properties",
                    "version": "{version}"
                }}
            }}
        }}"#
    )
}

const RIGETTI_SPECS: &str = r#"{
    "benchmarks": [{
        "name": "randomized_benchmark_1q",
        "sites": [
            {"node_ids": [0], "characteristics": [{"name": "fRB", "value": 0.998, "error": 0.002}]},
            {"node_ids": [1], "characteristics": [{"name": "fRB", "value": 0.996, "error": 0.004}]},
            {"node_ids": [2], "characteristics": [{"name": "fRB", "value": 0.994, "error": 0.006}]}
        ]
    }],
    "instructions": [
        {"name": "RESET", "sites": []},
        {"name": "I", "sites": []},
        {"name": "RX", "sites": []},
        {"name": "MEASURE", "sites": [
            {"node_ids": [0], "characteristics": [{"name": "fRO", "value": 0.95}]},
            {"node_ids": [1], "characteristics": [{"name": "fRO", "value": 0.9}]},
            {"node_ids": [2], "characteristics": [{"name": "fRO", "value": 0.85}]}
        ]},
        {"name": "CZ", "sites": [
            {"node_ids": [1, 0], "characteristics": [{"name": "fCZ", "value": 0.97, "error": 0.03}]},
            {"node_ids": [1, 2], "characteristics": [{"name": "fCZ", "value": 0.95, "error": 0.05}]}
        ]}
    ]
}"#;

/// Rigetti document with calibration specs spliced into the provider block.
fn rigetti_calibrated(specs: &str) -> String {
    let mut doc: serde_json::Value =
        serde_json::from_str(&rigetti_properties("2", r#"{"0": ["1"], "1": ["2"]}"#)).unwrap();
    doc["provider"]["specs"] = serde_json::from_str(specs).unwrap();
    doc.to_string()
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

fn iqm_profile(verbatim: bool) -> DeviceProfile {
    let props = DeviceProperties::from_json(IQM_PROPERTIES).unwrap();
    DeviceProfile::from_properties(&props, DeviceKind::Qpu, verbatim).unwrap()
}

#[test]
fn test_iqm_profile() {
    let profile = iqm_profile(false);

    assert_eq!(profile.schema, Some(ProviderSchema::Iqm));
    assert_eq!(profile.all_qubits, vec![1, 2, 3, 4]);
    assert_eq!(profile.coupling, vec![(1, 2), (2, 3), (2, 4)]);
    assert!(!profile.fully_connected);
    assert!(profile.requires_all_qubits_measured);
    assert!(profile.supports_noop());
    assert!(profile.supports_shots());
    assert!(profile.gate_set.contains(GateType::PhasedX));
    assert!(!profile.gate_set.contains(GateType::CCX));
}

#[test]
fn test_iqm_verbatim_uses_native_gates() {
    let profile = iqm_profile(true);
    assert_eq!(
        profile.gate_set.all().into_iter().collect::<Vec<_>>(),
        vec![GateType::PhasedX, GateType::CZ]
    );
}

#[test]
fn test_iqm_end_to_end() {
    let profile = iqm_profile(false);
    let options = TranslationOptions::for_device(&profile);
    assert!(options.mapped_qubits);
    assert!(options.force_ops_on_target_qubits);
    assert_eq!(options.forced_qubits.as_deref(), Some(&[1, 2, 3, 4][..]));

    let mut circuit = Circuit::new("bell_on_device");
    circuit
        .add_qubit_labeled(Qubit::with_register(QubitId(0), "q", vec![2]))
        .unwrap();
    circuit
        .add_qubit_labeled(Qubit::with_register(QubitId(1), "q", vec![3]))
        .unwrap();
    let c = circuit.add_creg("c", 2);
    circuit
        .h(QubitId(0))
        .unwrap()
        .cx(QubitId(0), QubitId(1))
        .unwrap()
        .measure(QubitId(0), c[0])
        .unwrap()
        .measure(QubitId(1), c[1])
        .unwrap();

    let translation = circuit_to_braket(&circuit, &options).unwrap();
    assert_eq!(translation.target_qubits, vec![2, 3]);
    assert_eq!(translation.circuit.len(), 8);
    assert_eq!(translation.circuit.qubits(), vec![1, 2, 3, 4]);
    assert_eq!(translation.circuit.instructions[7].operator, BraketOp::CNot);
    assert_eq!(translation.measures, BTreeMap::from([(2, 0), (3, 1)]));

    for inst in &translation.circuit.instructions {
        let ty = gate_type_for_operation(inst.operator.ir_name()).unwrap();
        assert!(profile.gate_set.contains(ty), "{ty:?} not accepted");
    }

    // Device reports every qubit, in its own order.
    let measured: [u32; 4] = [4, 3, 2, 1];
    let rows: Vec<Vec<u8>> = vec![vec![0, 1, 1, 0], vec![0, 0, 0, 0], vec![1, 1, 1, 0]];
    let shots = reassemble_shots(&measured, &rows, &translation.measures).unwrap();
    assert_eq!(shots, vec![vec![1, 1], vec![0, 0], vec![1, 1]]);

    let counts = counts_from_shots(&shots);
    assert_eq!(counts["11"], 2);
    assert_eq!(counts["00"], 1);
}

#[test]
fn test_ionq_profile() {
    let props = DeviceProperties::from_json(IONQ_PROPERTIES).unwrap();
    let profile = DeviceProfile::from_properties(&props, DeviceKind::Qpu, false).unwrap();

    assert_eq!(profile.schema, Some(ProviderSchema::IonQ));
    assert!(profile.fully_connected);
    assert_eq!(profile.all_qubits, vec![0, 1, 2]);
    assert!(!profile.supports_noop());
    assert!(!profile.supports_shots());

    let options = TranslationOptions::for_device(&profile);
    assert!(options.mapped_qubits);
    assert!(!options.force_ops_on_target_qubits);
    assert_eq!(options.forced_qubits, None);
}

#[test]
fn test_ionq_rejects_verbatim() {
    let props = DeviceProperties::from_json(IONQ_PROPERTIES).unwrap();
    assert!(matches!(
        DeviceProfile::from_properties(&props, DeviceKind::Qpu, true),
        Err(BraketError::UnsupportedDevice(_))
    ));
}

#[test]
fn test_simulator_plan() {
    let props = DeviceProperties::from_json(SV1_PROPERTIES).unwrap();
    let profile = DeviceProfile::from_properties(&props, DeviceKind::Simulator, false).unwrap();
    assert_eq!(profile.num_qubits(), 3);
    assert!(profile.gate_set.contains(GateType::CSwap));

    let options = TranslationOptions::for_device(&profile);
    assert!(!options.mapped_qubits);
    assert_eq!(options.forced_qubits, None);

    let translation = circuit_to_braket(&Circuit::ghz(3).unwrap(), &options).unwrap();
    // One I per qubit, then H and two CNots.
    assert_eq!(translation.circuit.len(), 6);
    assert_eq!(translation.target_qubits, vec![0, 1, 2]);
}

#[test]
fn test_rigetti_graph() {
    let json = rigetti_properties("2", r#"{"0": ["1"], "1": ["2"]}"#);
    let props = DeviceProperties::from_json(&json).unwrap();
    let profile = DeviceProfile::from_properties(&props, DeviceKind::Qpu, false).unwrap();
    assert_eq!(profile.schema, Some(ProviderSchema::Rigetti));
    assert_eq!(profile.coupling, vec![(0, 1), (1, 2)]);
    assert!(!profile.requires_all_qubits_measured);
}

#[test]
fn test_rigetti_bad_label() {
    let json = rigetti_properties("2", r#"{"0": ["q1"]}"#);
    let props = DeviceProperties::from_json(&json).unwrap();
    assert!(matches!(
        DeviceProfile::from_properties(&props, DeviceKind::Qpu, false),
        Err(BraketError::InvalidProperties(_))
    ));
}

#[test]
fn test_unknown_schema_version() {
    let json = rigetti_properties("1", r#"{"0": ["1"]}"#);
    let props = DeviceProperties::from_json(&json).unwrap();
    assert!(matches!(
        DeviceProfile::from_properties(&props, DeviceKind::Qpu, false),
        Err(BraketError::UnsupportedSchema(_))
    ));
}

#[test]
fn test_iqm_characterisation() {
    let profile = iqm_profile(false);
    let characterisation = profile.characterisation.as_ref().unwrap();

    // One entry per accepted single-qubit gate type.
    assert_eq!(
        characterisation.node_errors[&1].len(),
        profile.gate_set.single_qubit.len()
    );
    assert_close(characterisation.node_errors[&1][&GateType::Rx], 0.001);
    // Zero-padded key "03" is qubit 3.
    assert_close(characterisation.node_errors[&3][&GateType::PhasedX], 0.003);
    assert_close(characterisation.readout_errors[&2][0][1], 0.03);

    let avg = profile.avg_characterisation().unwrap();
    assert_eq!(avg.node_errors.len(), 4);
    assert_close(avg.node_errors[&4], 0.004);
    assert_close(avg.readout_errors[&1], 0.05);
    assert_eq!(
        avg.link_errors.keys().copied().collect::<Vec<_>>(),
        vec![(1, 2), (2, 3), (2, 4)]
    );
    // Stored as "4-2", looked up by the unordered pair.
    assert_close(avg.link_errors[&(2, 4)], 0.04);
}

#[test]
fn test_ionq_characterisation() {
    let props = DeviceProperties::from_json(IONQ_PROPERTIES).unwrap();
    let profile = DeviceProfile::from_properties(&props, DeviceKind::Qpu, false).unwrap();
    let avg = profile.avg_characterisation().unwrap();

    for q in 0..3 {
        assert_close(avg.node_errors[&q], 0.0015);
        assert_close(avg.readout_errors[&q], 0.0);
    }
    // Fully connected: every ordered pair.
    assert_eq!(avg.link_errors.len(), 6);
    assert_close(avg.link_errors[&(2, 0)], 0.03);
}

#[test]
fn test_rigetti_characterisation() {
    let props = DeviceProperties::from_json(&rigetti_calibrated(RIGETTI_SPECS)).unwrap();
    let profile = DeviceProfile::from_properties(&props, DeviceKind::Qpu, false).unwrap();
    let avg = profile.avg_characterisation().unwrap();

    assert_close(avg.node_errors[&0], 0.002);
    assert_close(avg.node_errors[&2], 0.006);
    assert_close(avg.readout_errors[&1], 0.1);
    assert_close(avg.readout_errors[&2], 0.15);
    // Site [1, 0] serves edge (0, 1).
    assert_close(avg.link_errors[&(0, 1)], 0.03);
    assert_close(avg.link_errors[&(1, 2)], 0.05);
}

#[test]
fn test_rigetti_characterisation_missing_qubit() {
    let specs = RIGETTI_SPECS.replace(
        r#"{"node_ids": [2], "characteristics": [{"name": "fRB", "value": 0.994, "error": 0.006}]}"#,
        r#"{"node_ids": [7], "characteristics": [{"name": "fRB", "value": 0.994, "error": 0.006}]}"#,
    );
    let props = DeviceProperties::from_json(&rigetti_calibrated(&specs)).unwrap();
    assert!(matches!(
        DeviceProfile::from_properties(&props, DeviceKind::Qpu, false),
        Err(BraketError::InvalidProperties(_))
    ));
}

#[test]
fn test_uncalibrated_devices() {
    let json = rigetti_properties("2", r#"{"0": ["1"]}"#);
    let props = DeviceProperties::from_json(&json).unwrap();
    let profile = DeviceProfile::from_properties(&props, DeviceKind::Qpu, false).unwrap();
    assert_eq!(profile.characterisation, None);
    assert_eq!(profile.avg_characterisation(), None);

    let props = DeviceProperties::from_json(SV1_PROPERTIES).unwrap();
    let profile = DeviceProfile::from_properties(&props, DeviceKind::Simulator, false).unwrap();
    assert_eq!(profile.characterisation, None);
}

#[test]
fn test_sample_shot_limits() {
    let profile = iqm_profile(false);
    assert_eq!(
        profile.sample_shot_range(),
        Some(ShotRange {
            min: Some(1),
            max: Some(20000),
        })
    );
    assert!(profile.check_shots(0).is_ok());
    assert!(profile.check_shots(1).is_ok());
    assert!(profile.check_shots(20000).is_ok());
    assert!(matches!(
        profile.check_shots(20001),
        Err(BraketError::ShotsOutOfRange {
            shots: 20001,
            min: Some(1),
            max: Some(20000),
        })
    ));

    // No Sample result type at all.
    let props = DeviceProperties::from_json(IONQ_PROPERTIES).unwrap();
    let profile = DeviceProfile::from_properties(&props, DeviceKind::Qpu, false).unwrap();
    assert_eq!(profile.sample_shot_range(), None);
    assert!(profile.check_shots(0).is_ok());
    assert!(matches!(
        profile.check_shots(100),
        Err(BraketError::UnsupportedDevice(_))
    ));

    // Sample without limits accepts any count.
    let props = DeviceProperties::from_json(SV1_PROPERTIES).unwrap();
    let profile = DeviceProfile::from_properties(&props, DeviceKind::Simulator, false).unwrap();
    assert!(profile.check_shots(1_000_000).is_ok());
}
