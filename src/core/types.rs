use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown species '{0}' (expected one of: dog, cat, rabbit, hamster, other)")]
pub struct ParseSpeciesError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Unknown emergency flag '{0}' (expected one of: breathing-distress, uncontrolled-bleeding, seizure-or-unconscious)"
)]
pub struct ParseFlagError(pub String);

/// Species a user may select
///
/// Only some species carry a reference table; see
/// [`ReferenceStore::supports`](crate::catalog::store::ReferenceStore::supports).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    #[serde(alias = "狗")]
    Dog,
    #[serde(alias = "猫")]
    Cat,
    #[serde(alias = "兔子")]
    Rabbit,
    #[serde(alias = "仓鼠")]
    Hamster,
    #[serde(alias = "其他")]
    Other,
}

impl Species {
    pub const ALL: [Species; 5] = [
        Self::Dog,
        Self::Cat,
        Self::Rabbit,
        Self::Hamster,
        Self::Other,
    ];

    /// Machine-readable name, matching the serialized form
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
            Self::Rabbit => "rabbit",
            Self::Hamster => "hamster",
            Self::Other => "other",
        }
    }

    /// Label shown to pet owners
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dog => "狗",
            Self::Cat => "猫",
            Self::Rabbit => "兔子",
            Self::Hamster => "仓鼠",
            Self::Other => "其他",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Species {
    type Err = ParseSpeciesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sp| s.eq_ignore_ascii_case(sp.as_str()) || s == sp.label())
            .ok_or_else(|| ParseSpeciesError(s.to_string()))
    }
}

/// Ordered severity classification of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    Low,
    Medium,
    High,
}

impl UrgencyTier {
    /// The directive presented for a result of this tier
    #[must_use]
    pub fn directive(self) -> CareDirective {
        match self {
            Self::High => CareDirective::SeekCareImmediately,
            Self::Medium => CareDirective::ScheduleVetCheck,
            Self::Low => CareDirective::MonitorAtHome,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "🟢 低",
            Self::Medium => "🟡 中",
            Self::High => "🔴 高",
        }
    }
}

impl std::fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Strength of the advice attached to a ranked result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CareDirective {
    SeekCareImmediately,
    ScheduleVetCheck,
    MonitorAtHome,
}

impl CareDirective {
    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Self::SeekCareImmediately => "seek care immediately",
            Self::ScheduleVetCheck => "schedule a veterinary check",
            Self::MonitorAtHome => "monitor at home, escalate if worsening",
        }
    }

    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            Self::SeekCareImmediately => "立即就医！",
            Self::ScheduleVetCheck => "建议就医检查",
            Self::MonitorAtHome => "可先家庭护理",
        }
    }

    #[must_use]
    pub fn advice(self) -> &'static str {
        match self {
            Self::SeekCareImmediately => "请尽快联系宠物医院",
            Self::ScheduleVetCheck => "建议预约兽医进行检查",
            Self::MonitorAtHome => "密切观察，如有加重请就医",
        }
    }
}

impl std::fmt::Display for CareDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Red-flag observations that bypass symptom matching entirely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyFlag {
    #[serde(alias = "呼吸困难/窒息")]
    BreathingDistress,
    #[serde(alias = "严重出血不止")]
    UncontrolledBleeding,
    #[serde(alias = "昏迷/抽搐")]
    SeizureOrUnconscious,
}

impl EmergencyFlag {
    pub const ALL: [EmergencyFlag; 3] = [
        Self::BreathingDistress,
        Self::UncontrolledBleeding,
        Self::SeizureOrUnconscious,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BreathingDistress => "breathing-distress",
            Self::UncontrolledBleeding => "uncontrolled-bleeding",
            Self::SeizureOrUnconscious => "seizure-or-unconscious",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::BreathingDistress => "呼吸困难/窒息",
            Self::UncontrolledBleeding => "严重出血不止",
            Self::SeizureOrUnconscious => "昏迷/抽搐",
        }
    }
}

impl std::fmt::Display for EmergencyFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmergencyFlag {
    type Err = ParseFlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|flag| normalized.eq_ignore_ascii_case(flag.as_str()) || s == flag.label())
            .ok_or_else(|| ParseFlagError(s.to_string()))
    }
}
