use serde::{Deserialize, Serialize};

/// Number of heartbeat categories the classifier distinguishes
pub const NUM_CLASSES: usize = 5;

/// Heartbeat category (AAMI beat classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeartbeatClass {
    Normal,
    Supraventricular,
    Ventricular,
    Fusion,
    Unknown,
}

impl HeartbeatClass {
    /// Every class, ordered by model output index
    pub const ALL: [HeartbeatClass; NUM_CLASSES] = [
        HeartbeatClass::Normal,
        HeartbeatClass::Supraventricular,
        HeartbeatClass::Ventricular,
        HeartbeatClass::Fusion,
        HeartbeatClass::Unknown,
    ];

    /// Map a model output index to its class
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            HeartbeatClass::Normal => 0,
            HeartbeatClass::Supraventricular => 1,
            HeartbeatClass::Ventricular => 2,
            HeartbeatClass::Fusion => 3,
            HeartbeatClass::Unknown => 4,
        }
    }

    /// Display label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            HeartbeatClass::Normal => "Normal (N)",
            HeartbeatClass::Supraventricular => "Supraventricular (S)",
            HeartbeatClass::Ventricular => "Ventricular (V)",
            HeartbeatClass::Fusion => "Fusion (F)",
            HeartbeatClass::Unknown => "Unknown (Q)",
        }
    }

    /// Single-letter beat code
    pub fn code(&self) -> &'static str {
        match self {
            HeartbeatClass::Normal => "N",
            HeartbeatClass::Supraventricular => "S",
            HeartbeatClass::Ventricular => "V",
            HeartbeatClass::Fusion => "F",
            HeartbeatClass::Unknown => "Q",
        }
    }
}

impl std::fmt::Display for HeartbeatClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trips_for_every_class() {
        for (i, class) in HeartbeatClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
            assert_eq!(HeartbeatClass::from_index(i), Some(*class));
        }
        assert_eq!(HeartbeatClass::from_index(NUM_CLASSES), None);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<&str> = HeartbeatClass::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Normal (N)",
                "Supraventricular (S)",
                "Ventricular (V)",
                "Fusion (F)",
                "Unknown (Q)"
            ]
        );
        assert_eq!(HeartbeatClass::Fusion.code(), "F");
    }
}
