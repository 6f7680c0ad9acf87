//! Batch decode use case
//!
//! Reads raw records from a [`LogRecordSource`], decodes each of them into a
//! typed [`CommunicationLogDetail`], and reports what was accepted and what
//! was rejected (and why).
//!
//! # Concurrency
//!
//! Records are decoded on a [`JoinSet`] with at most
//! [`DecodeParams::concurrency`] tasks in flight. Decoding is a pure function
//! of the record and the shared, immutable variant registry, so the outcome of
//! a batch does not depend on the concurrency level: outcomes are stored by
//! input position and reported in input order.
//!
//! A rejected record never aborts the batch. Only a source that cannot be
//! read at all, a decode task that dies, or a sink that cannot store the
//! accepted records fails the whole run.

use crate::config::DecodeParams;
use crate::ports::log_sink::{DecodedLogSink, NoDecodedLogSink, SinkError};
use crate::ports::progress::{DecodeProgressNotifier, NoDecodeProgress};
use crate::ports::record_source::{LogRecordSource, RawRecord, RecordSourceError};
use commlog_domain::{CodecError, CommunicationKind, CommunicationLogCodec, CommunicationLogDetail};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that abort a whole batch.
#[derive(Error, Debug)]
pub enum DecodeBatchError {
    #[error("Source error: {0}")]
    Source(#[from] RecordSourceError),

    #[error("Decode task failed: {0}")]
    TaskFailed(String),

    #[error("Output error: {0}")]
    Sink(#[from] SinkError),
}

/// Outcome of decoding one record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    /// 1-based position of the record in its source
    pub line: usize,
    pub result: Result<CommunicationLogDetail, CodecError>,
}

impl RecordOutcome {
    pub fn is_accepted(&self) -> bool {
        self.result.is_ok()
    }
}

/// Result of a batch decode, one outcome per input record in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeReport {
    pub outcomes: Vec<RecordOutcome>,
}

impl DecodeReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn accepted(&self) -> impl Iterator<Item = &CommunicationLogDetail> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Rejected records as `(line, error)` pairs.
    pub fn rejections(&self) -> impl Iterator<Item = (usize, &CodecError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.line, e)))
    }

    pub fn accepted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_accepted()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.total() - self.accepted_count()
    }

    /// Rejections grouped by [`CodecError::category`].
    pub fn rejections_by_category(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for (_, error) in self.rejections() {
            *counts.entry(error.category()).or_insert(0) += 1;
        }
        counts
    }

    pub fn accepted_by_kind(&self) -> BTreeMap<CommunicationKind, usize> {
        let mut counts = BTreeMap::new();
        for detail in self.accepted() {
            *counts.entry(detail.kind()).or_insert(0) += 1;
        }
        counts
    }

    pub fn into_accepted(self) -> Vec<CommunicationLogDetail> {
        self.outcomes
            .into_iter()
            .filter_map(|o| o.result.ok())
            .collect()
    }
}

/// Use case for decoding a batch of raw communication log records.
pub struct DecodeBatchUseCase {
    source: Arc<dyn LogRecordSource>,
    sink: Arc<dyn DecodedLogSink>,
    params: DecodeParams,
}

impl DecodeBatchUseCase {
    pub fn new(source: Arc<dyn LogRecordSource>) -> Self {
        Self {
            source,
            sink: Arc::new(NoDecodedLogSink),
            params: DecodeParams::default(),
        }
    }

    /// Send every accepted detail to `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn DecodedLogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_params(mut self, params: DecodeParams) -> Self {
        self.params = params;
        self
    }

    pub async fn execute(&self) -> Result<DecodeReport, DecodeBatchError> {
        self.execute_with_progress(&NoDecodeProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        progress: &dyn DecodeProgressNotifier,
    ) -> Result<DecodeReport, DecodeBatchError> {
        let records = self.source.read_all().await?;
        info!(
            source = %self.source.describe(),
            records = records.len(),
            concurrency = self.params.effective_concurrency(),
            "Decoding communication logs"
        );
        progress.on_batch_start(records.len());

        let report = decode_records(records, &self.params, progress).await?;

        for detail in report.accepted() {
            self.sink.write(detail)?;
        }
        self.sink.flush()?;

        info!(
            accepted = report.accepted_count(),
            rejected = report.rejected_count(),
            "Batch decode complete"
        );
        progress.on_batch_complete(report.accepted_count(), report.rejected_count());
        Ok(report)
    }
}

/// Decode `records` with bounded concurrency, keeping input order.
pub async fn decode_records(
    records: Vec<RawRecord>,
    params: &DecodeParams,
    progress: &dyn DecodeProgressNotifier,
) -> Result<DecodeReport, DecodeBatchError> {
    let codec = CommunicationLogCodec::new(params.decode_options());
    let limit = params.effective_concurrency();
    let mut slots: Vec<Option<RecordOutcome>> = vec![None; records.len()];
    let mut pending = records.into_iter().enumerate();
    let mut join_set = JoinSet::new();

    loop {
        while join_set.len() < limit {
            let Some((index, record)) = pending.next() else {
                break;
            };
            join_set.spawn(async move { (index, decode_record(&codec, record)) });
        }

        let Some(joined) = join_set.join_next().await else {
            break;
        };
        let (index, outcome) = joined.map_err(|e| {
            warn!("Decode task join error: {}", e);
            DecodeBatchError::TaskFailed(e.to_string())
        })?;

        match &outcome.result {
            Ok(detail) => {
                debug!(line = outcome.line, id = detail.id(), kind = %detail.kind(), "Record accepted");
                progress.on_record_accepted(outcome.line);
            }
            Err(error) => {
                warn!(
                    line = outcome.line,
                    category = error.category(),
                    "Record rejected: {}",
                    error
                );
                progress.on_record_rejected(outcome.line, error);
            }
        }
        slots[index] = Some(outcome);
    }

    Ok(DecodeReport {
        outcomes: slots.into_iter().flatten().collect(),
    })
}

fn decode_record(codec: &CommunicationLogCodec, record: RawRecord) -> RecordOutcome {
    let line = record.line();
    let result = match record {
        RawRecord::Json { value, .. } => codec.decode_owned(value),
        RawRecord::Unparsable { error, .. } => Err(CodecError::MalformedEnvelope(format!(
            "invalid JSON: {}",
            error
        ))),
    };
    RecordOutcome { line, result }
}
