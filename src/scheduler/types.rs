/*!
 * Scheduler Types
 * Policy selection and wait-time accounting modes
 */

use crate::core::errors::SimError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Allocation policy, a closed set of four strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AllocationPolicy {
    /// Priority, then wait time, then smallest need
    #[default]
    Adaptive,
    /// First fitting process in registry order, one grant per tick
    RoundRobin,
    /// Priority only, stable on ties
    Priority,
    /// Arrival order
    Fcfs,
}

impl AllocationPolicy {
    pub const ALL: [AllocationPolicy; 4] = [
        AllocationPolicy::Adaptive,
        AllocationPolicy::RoundRobin,
        AllocationPolicy::Priority,
        AllocationPolicy::Fcfs,
    ];

    /// Convert to string representation
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Adaptive => "adaptive",
            Self::RoundRobin => "roundrobin",
            Self::Priority => "priority",
            Self::Fcfs => "fcfs",
        }
    }
}

impl FromStr for AllocationPolicy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adaptive" => Ok(Self::Adaptive),
            "roundrobin" | "round_robin" | "rr" => Ok(Self::RoundRobin),
            "priority" | "prio" => Ok(Self::Priority),
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            _ => Err(SimError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AllocationPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AllocationPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How waiting processes accrue wait time
///
/// `Single` charges one tick per tick spent waiting. `Double` reproduces the
/// classic behavior where the allocation pass and the execution phase each
/// charge a tick, so a starved process ages twice as fast and reaches the
/// deadlock threshold sooner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitAccounting {
    #[default]
    Single,
    Double,
}
