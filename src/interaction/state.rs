use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

/// Active legend entries, persisted either as per-series flags or as keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActiveState {
    Flags(Vec<bool>),
    Keys(Vec<String>),
}

impl Default for ActiveState {
    fn default() -> Self {
        Self::Flags(Vec::new())
    }
}

impl ActiveState {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flags(flags) => flags.is_empty(),
            Self::Keys(keys) => keys.is_empty(),
        }
    }

    /// Whether the series at `index` with `key` is active.
    #[must_use]
    pub fn contains(&self, index: usize, key: &str) -> bool {
        match self {
            Self::Flags(flags) => flags.get(index).copied().unwrap_or(false),
            Self::Keys(keys) => keys.iter().any(|candidate| candidate == key),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolate {
    #[default]
    Linear,
    /// Steps at the midpoint between samples.
    Step,
    StepBefore,
    StepAfter,
}

/// Interactive state a host can persist and feed back through
/// `ChartEvent::ChangeState`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartState {
    pub disabled: Vec<bool>,
    pub active: ActiveState,
    pub stacked: bool,
    pub interpolate: Interpolate,
}

impl ChartState {
    pub fn from_json(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{ActiveState, ChartState, Interpolate};

    #[test]
    fn active_accepts_flags_or_keys() {
        let flags = ChartState::from_json(r#"{"active":[true,false]}"#).expect("flags");
        assert_eq!(flags.active, ActiveState::Flags(vec![true, false]));
        assert!(flags.active.contains(0, "ignored"));

        let keys = ChartState::from_json(r#"{"active":["Revenue"],"interpolate":"step-after"}"#)
            .expect("keys");
        assert!(keys.active.contains(5, "Revenue"));
        assert_eq!(keys.interpolate, Interpolate::StepAfter);
        assert!(keys.disabled.is_empty());
    }
}
