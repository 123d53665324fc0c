//! Device ARNs and device kinds.

use std::fmt;

use crate::error::{BraketError, BraketResult};

// ──────────────────────────────────────────────────────────────────────
// Known device ARNs
// ──────────────────────────────────────────────────────────────────────

/// Rigetti Ankaa-3 (84 qubits, superconducting).
pub const RIGETTI_ANKAA_3: &str = "arn:aws:braket:us-west-1::device/qpu/rigetti/Ankaa-3";

/// IonQ Aria (25 qubits, trapped-ion).
pub const IONQ_ARIA: &str = "arn:aws:braket:us-east-1::device/qpu/ionq/Aria-1";

/// IonQ Aria 2 (25 qubits, trapped-ion).
pub const IONQ_ARIA_2: &str = "arn:aws:braket:us-east-1::device/qpu/ionq/Aria-2";

/// IonQ Forte (36 qubits, trapped-ion).
pub const IONQ_FORTE: &str = "arn:aws:braket:us-east-1::device/qpu/ionq/Forte-1";

/// IQM Garnet (20 qubits, superconducting).
pub const IQM_GARNET: &str = "arn:aws:braket:eu-north-1::device/qpu/iqm/Garnet";

/// SV1 state vector simulator.
pub const SV1: &str = "arn:aws:braket:::device/quantum-simulator/amazon/sv1";

/// TN1 tensor network simulator.
pub const TN1: &str = "arn:aws:braket:::device/quantum-simulator/amazon/tn1";

/// DM1 density matrix simulator.
pub const DM1: &str = "arn:aws:braket:::device/quantum-simulator/amazon/dm1";

/// ARN device-type segment for hardware.
pub const QPU_DEVICE_TYPE: &str = "qpu";

/// ARN device-type segment for managed simulators.
pub const SIMULATOR_DEVICE_TYPE: &str = "quantum-simulator";

/// Whether a device is real hardware or a simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Managed or local simulator.
    Simulator,
    /// Quantum processing unit.
    Qpu,
}

impl DeviceKind {
    /// Parse an ARN device-type segment.
    pub fn from_device_type(device_type: &str) -> Option<Self> {
        match device_type {
            QPU_DEVICE_TYPE => Some(DeviceKind::Qpu),
            SIMULATOR_DEVICE_TYPE => Some(DeviceKind::Simulator),
            _ => None,
        }
    }

    /// The ARN device-type segment.
    pub fn device_type(self) -> &'static str {
        match self {
            DeviceKind::Qpu => QPU_DEVICE_TYPE,
            DeviceKind::Simulator => SIMULATOR_DEVICE_TYPE,
        }
    }
}

/// The parts of a Braket device ARN.
///
/// Format: `arn:aws:braket:<region>::device/<type>/<provider>/<device>`.
/// The region is empty for simulators available in every region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceArn {
    pub region: String,
    pub device_type: String,
    pub provider: String,
    pub device: String,
}

impl DeviceArn {
    /// Assemble an ARN from its parts.
    pub fn new(
        region: impl Into<String>,
        device_type: impl Into<String>,
        provider: impl Into<String>,
        device: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            device_type: device_type.into(),
            provider: provider.into(),
            device: device.into(),
        }
    }

    /// Split an ARN string into its parts.
    pub fn parse(arn: &str) -> BraketResult<Self> {
        let invalid = || BraketError::InvalidDeviceArn(arn.to_string());

        let rest = arn.strip_prefix("arn:aws:braket:").ok_or_else(invalid)?;
        let (region, path) = rest.split_once("::").ok_or_else(invalid)?;
        let mut parts = path.split('/');
        if parts.next() != Some("device") {
            return Err(invalid());
        }
        let (Some(device_type), Some(provider), Some(device), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if device_type.is_empty() || provider.is_empty() || device.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(region, device_type, provider, device))
    }

    /// Device kind encoded in the ARN, if recognized.
    pub fn kind(&self) -> Option<DeviceKind> {
        DeviceKind::from_device_type(&self.device_type)
    }
}

impl fmt::Display for DeviceArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:aws:braket:{}::device/{}/{}/{}",
            self.region, self.device_type, self.provider, self.device
        )
    }
}

/// Map a friendly device name to its ARN.
pub fn arn_for_name(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "rigetti" | "ankaa" | "ankaa-3" | "ankaa3" => Some(RIGETTI_ANKAA_3),
        "ionq" | "aria" | "aria-1" => Some(IONQ_ARIA),
        "aria-2" => Some(IONQ_ARIA_2),
        "forte" | "forte-1" => Some(IONQ_FORTE),
        "iqm-garnet" | "garnet" => Some(IQM_GARNET),
        "sv1" | "braket-sv1" => Some(SV1),
        "tn1" | "braket-tn1" => Some(TN1),
        "dm1" | "braket-dm1" => Some(DM1),
        _ => None,
    }
}

/// Extract provider name from a device ARN.
pub fn provider_from_arn(device_arn: &str) -> &str {
    device_arn.split('/').nth(2).unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arn_for_name() {
        assert_eq!(arn_for_name("rigetti"), Some(RIGETTI_ANKAA_3));
        assert_eq!(arn_for_name("SV1"), Some(SV1));
        assert_eq!(arn_for_name("ionq"), Some(IONQ_ARIA));
        assert!(arn_for_name("nonexistent").is_none());
    }

    #[test]
    fn test_provider_from_arn() {
        assert_eq!(provider_from_arn(RIGETTI_ANKAA_3), "rigetti");
        assert_eq!(provider_from_arn(IONQ_ARIA), "ionq");
        assert_eq!(provider_from_arn(SV1), "amazon");
    }

    #[test]
    fn test_parse_known_arns() {
        let arn = DeviceArn::parse(IQM_GARNET).unwrap();
        assert_eq!(arn.region, "eu-north-1");
        assert_eq!(arn.provider, "iqm");
        assert_eq!(arn.device, "Garnet");
        assert_eq!(arn.kind(), Some(DeviceKind::Qpu));

        let sim = DeviceArn::parse(SV1).unwrap();
        assert_eq!(sim.region, "");
        assert_eq!(sim.kind(), Some(DeviceKind::Simulator));
        assert_eq!(sim.to_string(), SV1);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "arn:aws:s3:::bucket",
            "arn:aws:braket:us-east-1::device/qpu/ionq",
            "arn:aws:braket:us-east-1::task/qpu/ionq/Aria-1",
            "arn:aws:braket:us-east-1::device/qpu/ionq/Aria-1/extra",
        ] {
            assert!(matches!(
                DeviceArn::parse(bad),
                Err(BraketError::InvalidDeviceArn(_))
            ));
        }
    }

    #[test]
    fn test_display_roundtrip() {
        let arn = DeviceArn::new("us-west-1", "qpu", "rigetti", "Ankaa-3");
        assert_eq!(arn.to_string(), RIGETTI_ANKAA_3);
    }
}
