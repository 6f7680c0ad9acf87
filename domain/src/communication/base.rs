//! Fields common to every communication log

use super::error::CodecError;
use super::fields::{FieldReader, FieldWriter};
use chrono::{DateTime, Utc};

/// Default upper bound, in bytes, for the `observations` text.
pub const MAX_OBSERVATIONS_LENGTH: usize = 65_535;

/// Marker appended to observations that were cut to fit the limit.
pub const TRUNCATION_SUFFIX: &str = "====TRUNCATED====";

/// Base contract shared by all log detail shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunicationLogBase {
    pub id: i64,
    pub start_processing_date_time: DateTime<Utc>,
    pub end_processing_date_time: Option<DateTime<Utc>>,
    pub exception_stacktrace: Option<String>,
    pub observations: Option<String>,
    pub parent_communication_id: Option<i64>,
}

impl CommunicationLogBase {
    pub fn new(id: i64, start_processing_date_time: DateTime<Utc>) -> Self {
        Self {
            id,
            start_processing_date_time,
            end_processing_date_time: None,
            exception_stacktrace: None,
            observations: None,
            parent_communication_id: None,
        }
    }

    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end_processing_date_time = Some(end);
        self
    }

    pub fn with_exception(mut self, stacktrace: impl Into<String>) -> Self {
        self.exception_stacktrace = Some(stacktrace.into());
        self
    }

    /// Set observations, truncated to [`MAX_OBSERVATIONS_LENGTH`].
    pub fn with_observations(self, observations: impl Into<String>) -> Self {
        self.with_observations_limited(observations, MAX_OBSERVATIONS_LENGTH)
    }

    /// Set observations, truncated to `max_len` bytes including the suffix.
    pub fn with_observations_limited(
        mut self,
        observations: impl Into<String>,
        max_len: usize,
    ) -> Self {
        self.observations = Some(truncate_with_suffix(
            observations.into(),
            max_len,
            TRUNCATION_SUFFIX,
        ));
        self
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_communication_id = Some(parent_id);
        self
    }

    pub fn has_exception(&self) -> bool {
        self.exception_stacktrace.is_some()
    }

    /// Processing time in milliseconds, once the communication has ended.
    pub fn duration_ms(&self) -> Option<i64> {
        self.end_processing_date_time
            .map(|end| (end - self.start_processing_date_time).num_milliseconds())
    }

    pub(crate) fn read(reader: &mut FieldReader) -> Result<Self, CodecError> {
        Ok(Self {
            id: reader.required("id")?,
            start_processing_date_time: reader.required("startProcessingDateTime")?,
            end_processing_date_time: reader.optional("endProcessingDateTime")?,
            exception_stacktrace: reader.optional("exceptionStacktrace")?,
            observations: reader.optional("observations")?,
            parent_communication_id: reader.optional("parentCommunicationId")?,
        })
    }

    pub(crate) fn write(&self, writer: &mut FieldWriter) -> Result<(), CodecError> {
        writer.put("id", &self.id)?;
        writer.put("startProcessingDateTime", &self.start_processing_date_time)?;
        writer.put_opt("endProcessingDateTime", &self.end_processing_date_time)?;
        writer.put_opt("exceptionStacktrace", &self.exception_stacktrace)?;
        writer.put_opt("observations", &self.observations)?;
        writer.put_opt("parentCommunicationId", &self.parent_communication_id)?;
        Ok(())
    }
}

/// Cut `text` so that it fits in `max_len` bytes once `suffix` is appended.
///
/// Text that already fits is returned unchanged. If the suffix alone does not
/// fit, the text is simply truncated. Cuts never split a UTF-8 character.
pub fn truncate_with_suffix(mut text: String, max_len: usize, suffix: &str) -> String {
    if text.len() <= max_len {
        return text;
    }
    if suffix.len() >= max_len {
        text.truncate(char_floor(&text, max_len));
        return text;
    }
    text.truncate(char_floor(&text, max_len - suffix.len()));
    text.push_str(suffix);
    text
}

fn char_floor(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
