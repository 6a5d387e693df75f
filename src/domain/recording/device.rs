//! Input device value object

use serde::{Deserialize, Serialize};

/// An audio input device reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputDevice {
    id: String,
    label: String,
}

impl InputDevice {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Host-specific device identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable name
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let device = InputDevice::new("d1", "Mic A");
        assert_eq!(device.id(), "d1");
        assert_eq!(device.label(), "Mic A");
    }

    #[test]
    fn encodes_id_and_label() {
        let json = serde_json::to_value(InputDevice::new("d1", "Mic A")).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "d1", "label": "Mic A" }));
    }
}
