//! Text producers for the scanned-prescription pipeline.

use thiserror::Error;
use tracing::warn;

/// Producer errors.
#[derive(Error, Debug)]
pub enum ProducerError {
    #[error("unreadable source: {0}")]
    Unreadable(String),

    #[error("empty text from source: {0}")]
    Empty(String),
}

pub type ProducerResult<T> = Result<T, ProducerError>;

/// Canned prescription text used when no real scanner backend is wired in.
pub const SAMPLE_TEXT: &str = "Tab. Paracetamol 500mg\n\
Tab. Amoxiclav 625\n\
Tab. Azithromycin 500\n\
Tab. Ibuprofen 400";

/// A source of raw prescription text, one line per printed line.
///
/// The OCR backend itself lives outside this crate; anything that can
/// yield text for a source identifier can feed the pipeline.
pub trait TextProducer {
    fn produce(&self, source: &str) -> ProducerResult<String>;
}

/// Producer that always returns the canned sample text.
pub struct SampleProducer;

impl TextProducer for SampleProducer {
    fn produce(&self, _source: &str) -> ProducerResult<String> {
        Ok(SAMPLE_TEXT.to_string())
    }
}

/// Run a producer, falling back to the sample text on failure so the
/// rest of the pipeline stays exercisable without a scanner backend.
pub fn text_or_sample<P: TextProducer>(producer: &P, source: &str) -> String {
    match producer.produce(source) {
        Ok(text) => text,
        Err(err) => {
            warn!(source, error = %err, "text producer failed, using sample text");
            SAMPLE_TEXT.to_string()
        }
    }
}
