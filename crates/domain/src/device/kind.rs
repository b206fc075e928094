//! Device kind: what a device physically controls.

use serde::{Deserialize, Serialize};

/// The five kinds of device the dashboard knows about.
///
/// Thermal kinds are driven by temperature thresholds in auto mode;
/// the others are driven by a daily schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Heating,
    Cooling,
    Blinds,
    Irrigation,
    Lighting,
}

impl DeviceKind {
    /// Heating and cooling.
    #[must_use]
    pub fn is_thermal(self) -> bool {
        matches!(self, Self::Heating | Self::Cooling)
    }

    /// Blinds, irrigation, and lighting.
    #[must_use]
    pub fn is_schedulable(self) -> bool {
        !self.is_thermal()
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heating => f.write_str("heating"),
            Self::Cooling => f.write_str("cooling"),
            Self::Blinds => f.write_str("blinds"),
            Self::Irrigation => f.write_str("irrigation"),
            Self::Lighting => f.write_str("lighting"),
        }
    }
}
