use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of emotion labels the classification head produces
pub const NUM_LABELS: usize = 6;

/// Raw scores from the classification head, in `EmotionLabel::ALL` order
pub type LogitVector = [f32; NUM_LABELS];

/// Emotion vocabulary. Declaration order is the model's output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmotionLabel {
    Fun,
    Sadness,
    Angry,
    Love,
    General,
    Motivation,
}

impl EmotionLabel {
    pub const ALL: [EmotionLabel; NUM_LABELS] = [
        Self::Fun,
        Self::Sadness,
        Self::Angry,
        Self::Love,
        Self::General,
        Self::Motivation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fun => "Fun",
            Self::Sadness => "Sadness",
            Self::Angry => "Angry",
            Self::Love => "Love",
            Self::General => "General",
            Self::Motivation => "Motivation",
        }
    }

    /// Position of this label in the logit vector
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for EmotionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|label| label.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown emotion label: {}", s))
    }
}

/// Decided labels for one input.
///
/// Never empty, and always in vocabulary order. The only constructors are
/// `LabelSet::single` and `LabelSet::from_active`, which uphold both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<EmotionLabel>);

impl LabelSet {
    pub fn single(label: EmotionLabel) -> Self {
        Self(vec![label])
    }

    /// Build from a per-label activity mask. Returns `None` when nothing is active.
    pub fn from_active(active: &[bool; NUM_LABELS]) -> Option<Self> {
        let labels: Vec<EmotionLabel> = EmotionLabel::ALL
            .iter()
            .zip(active.iter())
            .filter(|&(_, &on)| on)
            .map(|(label, _)| *label)
            .collect();

        if labels.is_empty() {
            None
        } else {
            Some(Self(labels))
        }
    }

    #[cfg(test)]
    pub fn labels(&self) -> &[EmotionLabel] {
        &self.0
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|label| label.name()).collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn contains(&self, label: EmotionLabel) -> bool {
        self.0.contains(&label)
    }
}
