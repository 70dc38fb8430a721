//! Encoder adapter: text in, six logits out.
//!
//! The production encoder is an ONNX export of the fine-tuned transformer
//! with its linear classification head, fed by the matching HuggingFace
//! `tokenizer.json`.

use std::path::PathBuf;
use thiserror::Error;

use super::labels::{LogitVector, NUM_LABELS};

#[cfg(feature = "onnx")]
use ort::{
    session::{builder::GraphOptimizationLevel, Session},
    value::Value,
};
#[cfg(feature = "onnx")]
use std::sync::Mutex;
#[cfg(feature = "onnx")]
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

/// Default maximum sequence length, special tokens included
pub const DEFAULT_MAX_TOKENS: usize = 128;

/// Errors that can occur while encoding text
#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("Model not found at {0:?}")]
    ModelNotFound(PathBuf),

    #[error("Failed to load model: {0}")]
    ModelLoadError(String),

    #[error("Tokenizer error: {0}")]
    TokenizerError(String),

    #[error("Inference error: {0}")]
    InferenceError(String),

    #[error("Unexpected model output: expected {expected} values, got {actual}")]
    UnexpectedOutput { expected: usize, actual: usize },

    #[error("Feature not enabled")]
    FeatureNotEnabled,
}

/// Maps text to one logit per emotion label.
///
/// Implementations must be deterministic and safe to share across requests.
pub trait Encoder: Send + Sync {
    fn encode(&self, text: &str) -> Result<LogitVector, EncoderError>;
}

/// Configuration for the ONNX encoder
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Path to the exported ONNX model (encoder + classification head)
    pub model_path: PathBuf,
    /// Path to the HuggingFace tokenizer.json
    pub tokenizer_path: PathBuf,
    /// Truncate token sequences to this length
    pub max_tokens: usize,
    /// Number of threads for ONNX inference
    pub n_threads: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::new(),
            tokenizer_path: PathBuf::new(),
            max_tokens: DEFAULT_MAX_TOKENS,
            n_threads: 1,
        }
    }
}

/// Copy a flat model output into a logit vector, checking its length
pub fn logits_from_slice(values: &[f32]) -> Result<LogitVector, EncoderError> {
    if values.len() != NUM_LABELS {
        return Err(EncoderError::UnexpectedOutput {
            expected: NUM_LABELS,
            actual: values.len(),
        });
    }
    let mut logits = [0.0; NUM_LABELS];
    logits.copy_from_slice(values);
    Ok(logits)
}

/// Tokenizer + ONNX Runtime session
#[cfg(feature = "onnx")]
pub struct OnnxEncoder {
    tokenizer: Tokenizer,
    // ort needs exclusive access to run a session
    session: Mutex<Session>,
}

#[cfg(feature = "onnx")]
impl OnnxEncoder {
    pub fn new(config: &EncoderConfig) -> Result<Self, EncoderError> {
        if !config.model_path.exists() {
            return Err(EncoderError::ModelNotFound(config.model_path.clone()));
        }
        if !config.tokenizer_path.exists() {
            return Err(EncoderError::ModelNotFound(config.tokenizer_path.clone()));
        }

        let mut tokenizer = Tokenizer::from_file(&config.tokenizer_path)
            .map_err(|e| EncoderError::TokenizerError(e.to_string()))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_tokens,
                ..Default::default()
            }))
            .map_err(|e| EncoderError::TokenizerError(e.to_string()))?;
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..Default::default()
        }));

        let session = Session::builder()
            .map_err(|e: ort::Error| EncoderError::ModelLoadError(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e: ort::Error| EncoderError::ModelLoadError(e.to_string()))?
            .with_intra_threads(config.n_threads)
            .map_err(|e: ort::Error| EncoderError::ModelLoadError(e.to_string()))?
            .commit_from_file(&config.model_path)
            .map_err(|e: ort::Error| EncoderError::ModelLoadError(e.to_string()))?;

        tracing::info!(
            "Emotion encoder initialized with model: {:?}, tokenizer: {:?}",
            config.model_path,
            config.tokenizer_path
        );

        Ok(Self {
            tokenizer,
            session: Mutex::new(session),
        })
    }
}

#[cfg(feature = "onnx")]
impl Encoder for OnnxEncoder {
    fn encode(&self, text: &str) -> Result<LogitVector, EncoderError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| EncoderError::TokenizerError(e.to_string()))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let seq_len = input_ids.len();

        // Model expects [batch, seq_len]
        let input_shape = [1_usize, seq_len];

        let ids_tensor = Value::from_array((input_shape, input_ids))
            .map_err(|e: ort::Error| EncoderError::InferenceError(e.to_string()))?;
        let mask_tensor = Value::from_array((input_shape, attention_mask))
            .map_err(|e: ort::Error| EncoderError::InferenceError(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| EncoderError::InferenceError(format!("Session lock poisoned: {}", e)))?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor
            ])
            .map_err(|e: ort::Error| EncoderError::InferenceError(e.to_string()))?;

        // Single output: logits of shape [1, 6]
        let output = outputs
            .iter()
            .next()
            .ok_or_else(|| EncoderError::InferenceError("No output from model".to_string()))?;

        let output_tensor = output
            .1
            .try_extract_tensor::<f32>()
            .map_err(|e: ort::Error| EncoderError::InferenceError(e.to_string()))?;

        let values: Vec<f32> = output_tensor.1.iter().copied().collect();

        tracing::trace!("Encoded {} tokens into {} logits", seq_len, values.len());

        logits_from_slice(&values)
    }
}

// Stub implementation when feature is not enabled
#[cfg(not(feature = "onnx"))]
pub struct OnnxEncoder;

#[cfg(not(feature = "onnx"))]
impl OnnxEncoder {
    pub fn new(_config: &EncoderConfig) -> Result<Self, EncoderError> {
        Err(EncoderError::FeatureNotEnabled)
    }
}

#[cfg(not(feature = "onnx"))]
impl Encoder for OnnxEncoder {
    fn encode(&self, _text: &str) -> Result<LogitVector, EncoderError> {
        Err(EncoderError::FeatureNotEnabled)
    }
}
