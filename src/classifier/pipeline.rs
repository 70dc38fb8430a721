use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::decision::DecisionPolicy;
use super::encoder::{Encoder, EncoderError};
use super::labels::{LabelSet, NUM_LABELS};
use crate::text::{SlangExpander, TextNormalizer};

/// Outcome of classifying one text
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub emotions: LabelSet,
    pub probabilities: [f32; NUM_LABELS],
}

/// Loaded classification pipeline.
///
/// Built once at startup and shared read-only by every request:
/// normalize -> expand slang -> encode -> decide.
pub struct EmotionClassifier {
    normalizer: TextNormalizer,
    slang: SlangExpander,
    encoder: Arc<dyn Encoder>,
    policy: DecisionPolicy,
}

impl EmotionClassifier {
    pub fn new(encoder: Arc<dyn Encoder>, policy: DecisionPolicy) -> Result<Self, regex::Error> {
        Ok(Self {
            normalizer: TextNormalizer::new()?,
            slang: SlangExpander::new()?,
            encoder,
            policy,
        })
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    /// The text actually fed to the encoder
    pub fn preprocess(&self, text: &str) -> String {
        let normalized = self.normalizer.normalize(text);
        self.slang.expand(&normalized)
    }

    /// Run the full pipeline. Encoder failures abort the whole call.
    pub fn classify(&self, text: &str) -> Result<Prediction, EncoderError> {
        let prepared = self.preprocess(text);
        let logits = self.encoder.encode(&prepared)?;
        let probabilities = self.policy.probabilities(&logits);
        let emotions = self.policy.decide(&logits);

        debug!(
            "Classified {:?} -> {:?} (probs: {:?})",
            prepared,
            emotions.names(),
            probabilities
        );

        Ok(Prediction {
            emotions,
            probabilities,
        })
    }
}
