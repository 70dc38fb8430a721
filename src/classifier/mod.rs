//! Emotion classification: encoder adapter, decision policy and the
//! end-to-end pipeline.
//!
//! Labels are multi-label: any subset of the six emotions can apply, but the
//! result always names at least one.

mod decision;
mod encoder;
mod labels;
mod pipeline;

pub use decision::{DecisionPolicy, DEFAULT_THRESHOLD};
pub use encoder::{Encoder, EncoderConfig, EncoderError, OnnxEncoder};
pub use labels::{EmotionLabel, LabelSet};
pub use pipeline::{EmotionClassifier, Prediction};

#[cfg(test)]
pub(crate) use pipeline::tests::{FailingEncoder, FixedEncoder};
