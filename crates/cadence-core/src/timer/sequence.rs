//! Step and sequence value types.
//!
//! A [`Step`] is one named, timed phase; a [`Sequence`] is the ordered list
//! the timer walks through. Step durations arriving from preset files are
//! coerced rather than rejected: invalid or missing values become 0,
//! fractional values are floored, negative values are clamped to 0.

use serde::{Deserialize, Deserializer, Serialize};

/// One named, timed phase of a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    /// Duration in whole seconds. 0 is legal; such a step completes on the
    /// first tick after it becomes current.
    #[serde(default, deserialize_with = "coerce_seconds")]
    pub seconds: u64,
}

impl Step {
    pub fn new(name: impl Into<String>, seconds: u64) -> Self {
        Self {
            name: name.into(),
            seconds,
        }
    }
}

/// Lenient duration parsing for preset data authored by hand: numbers are
/// floored and clamped to zero, numeric strings are accepted, anything else
/// collapses to zero.
fn coerce_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let coerced = match Raw::deserialize(deserializer)? {
        Raw::Num(n) => clamp_floor(n),
        Raw::Text(s) => s.trim().parse::<f64>().map(clamp_floor).unwrap_or(0),
        Raw::Other(_) => 0,
    };
    Ok(coerced)
}

fn clamp_floor(n: f64) -> u64 {
    if n.is_finite() && n > 0.0 {
        n.floor() as u64
    } else {
        0
    }
}

/// An ordered list of steps, executed in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence {
    steps: Vec<Step>,
}

impl Sequence {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> Option<&Step> {
        self.steps.first()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Total duration of one full pass, saturating on overflow.
    pub fn total_seconds(&self) -> u64 {
        self.steps
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.seconds))
    }

    pub(crate) fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl From<Vec<Step>> for Sequence {
    fn from(steps: Vec<Step>) -> Self {
        Self::new(steps)
    }
}

impl FromIterator<Step> for Sequence {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
