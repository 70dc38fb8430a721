//! Multi-label decision policy.
//!
//! Each logit is squashed independently with a sigmoid; every label at or
//! above the threshold is kept. If none clears it, the single most probable
//! label is returned so the result is never empty. Sigmoid is monotonic, so
//! that label is picked on the logits, where far-negative scores that all
//! round to a probability of 0.0 are still ordered.

use super::labels::{EmotionLabel, LabelSet, LogitVector, NUM_LABELS};

/// Default activation threshold on sigmoid probabilities
pub const DEFAULT_THRESHOLD: f32 = 0.5;

pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Turns logits into a label set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionPolicy {
    pub threshold: f32,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl DecisionPolicy {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Element-wise sigmoid of the logit vector
    pub fn probabilities(&self, logits: &LogitVector) -> [f32; NUM_LABELS] {
        let mut probs = [0.0; NUM_LABELS];
        for (p, &logit) in probs.iter_mut().zip(logits.iter()) {
            *p = sigmoid(logit);
        }
        probs
    }

    pub fn decide(&self, logits: &LogitVector) -> LabelSet {
        let probs = self.probabilities(logits);
        let mut active = [false; NUM_LABELS];
        for (on, &p) in active.iter_mut().zip(probs.iter()) {
            *on = p >= self.threshold;
        }

        LabelSet::from_active(&active).unwrap_or_else(|| LabelSet::single(argmax(logits)))
    }
}

/// First-occurring maximum. NaN never wins a comparison, so an all-NaN
/// vector yields the first label.
fn argmax(logits: &LogitVector) -> EmotionLabel {
    let mut best = EmotionLabel::ALL[0];
    for label in EmotionLabel::ALL.iter().skip(1) {
        if logits[label.index()] > logits[best.index()] {
            best = *label;
        }
    }
    best
}
