use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// Single-dog walk
    Regular,
    /// Two dogs walked together
    Double,
    /// Short potty break visit
    Potty,
    /// Pet sitting stay
    Petsit,
}

impl ServiceKind {
    /// Every service kind, in display order.
    pub const ALL: [ServiceKind; 4] = [
        ServiceKind::Regular,
        ServiceKind::Double,
        ServiceKind::Potty,
        ServiceKind::Petsit,
    ];

    /// Key used in the persisted rate record and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Regular => "regular",
            ServiceKind::Double => "double",
            ServiceKind::Potty => "potty",
            ServiceKind::Petsit => "petsit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "regular" => Some(ServiceKind::Regular),
            "double" => Some(ServiceKind::Double),
            "potty" => Some(ServiceKind::Potty),
            "petsit" => Some(ServiceKind::Petsit),
            _ => None,
        }
    }

    /// Singular name, used on buttons.
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceKind::Regular => "Regular Walk",
            ServiceKind::Double => "Double Walk",
            ServiceKind::Potty => "Potty Break",
            ServiceKind::Petsit => "Pet Sit",
        }
    }

    /// Plural name, used in summary lines.
    pub fn plural_name(&self) -> &'static str {
        match self {
            ServiceKind::Regular => "Regular Walks",
            ServiceKind::Double => "Double Walks",
            ServiceKind::Potty => "Potty Breaks",
            ServiceKind::Petsit => "Pet Sits",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            ServiceKind::Regular => 0,
            ServiceKind::Double => 1,
            ServiceKind::Potty => 2,
            ServiceKind::Petsit => 3,
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
