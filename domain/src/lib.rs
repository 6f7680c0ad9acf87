//! Domain layer for ewp-commlog
//!
//! This crate contains the communication log model: the discriminator tags,
//! the variant registry, the typed log details and the codec that maps raw
//! tagged records to and from them. It has no dependencies on infrastructure
//! or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Communication kinds
//!
//! - **HOST_PLUGIN_FUNCTION_CALL**: the host calls into a loaded plugin
//! - **EWP_IN / EWP_OUT**: HTTP exchanged with an EWP node, seen from the host
//! - **HOST_IN / HOST_OUT**: HTTP on the host's own surface (one shared shape)
//!
//! ## Decoding discipline
//!
//! Decoding is all-or-nothing and fail-fast: unknown tags, malformed
//! envelopes and shape mismatches are rejected with a [`CodecError`],
//! never defaulted to a generic record.

pub mod communication;
pub mod config;

// Re-export commonly used types
pub use communication::{
    CodecError, CommunicationKind, CommunicationLogBase, CommunicationLogCodec,
    CommunicationLogDetail, CommunicationLogDetailWrapper, CommunicationLogFilter,
    CommunicationLogSummary, DecodeOptions, EwpAuthenticationMethod,
    EwpHttpCommunicationLogDetail, FilterError, HostHttpCommunicationLogDetail,
    HostPluginFunctionCallLogDetail, HttpCommunicationFromEwpNodeLogDetail, HttpDirection,
    HttpHeaderLog, HttpRequestLog, HttpResponseLog, MAX_OBSERVATIONS_LENGTH, TRUNCATION_SUFFIX,
    UnknownFieldPolicy, VariantRegistry, VariantShape, truncate_with_suffix,
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
