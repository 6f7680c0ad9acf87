//! Communication log domain module
//!
//! Models the records the host keeps about every communication it takes part
//! in: HTTP exchanges with EWP nodes, HTTP on its own surface, and calls into
//! its plugins. All of them travel as flat JSON objects tagged by `type`.
//!
//! # Overview
//!
//! ```text
//! ┌──────────────┐  type  ┌─────────────────┐  shape  ┌────────────────────────┐
//! │ raw record   │───────▶│ VariantRegistry │────────▶│ CommunicationLogDetail │
//! │ {"type":..}  │        │ (static table)  │         │ (closed enum)          │
//! └──────────────┘        └─────────────────┘         └───────────┬────────────┘
//!        ▲                                                        │
//!        └──────────────────── encode (type from variant) ────────┘
//! ```
//!
//! # Key Types
//!
//! - [`CommunicationKind`]: the five discriminator tags
//! - [`VariantRegistry`]: tag → [`VariantShape`] table (`HOST_IN`/`HOST_OUT` share a shape)
//! - [`CommunicationLogDetail`]: the typed record, one variant per shape
//! - [`CommunicationLogCodec`]: decode/encode with [`CodecError`] on rejection
//! - [`CommunicationLogDetailWrapper`]: `{"data": ...}` envelope
//! - [`CommunicationLogFilter`] / [`CommunicationLogSummary`]: inspection helpers

pub mod base;
pub mod codec;
pub mod detail;
pub mod error;
mod fields;
pub mod filter;
pub mod http;
pub mod kind;
pub mod registry;
pub mod summary;
pub mod wrapper;

#[cfg(test)]
pub(crate) mod fixtures;

pub use base::{
    CommunicationLogBase, MAX_OBSERVATIONS_LENGTH, TRUNCATION_SUFFIX, truncate_with_suffix,
};
pub use codec::{CommunicationLogCodec, DecodeOptions, decode, encode};
pub use detail::{
    CommunicationLogDetail, EwpHttpCommunicationLogDetail, HostHttpCommunicationLogDetail,
    HostPluginFunctionCallLogDetail, HttpCommunicationFromEwpNodeLogDetail, HttpDirection,
};
pub use error::CodecError;
pub use fields::UnknownFieldPolicy;
pub use filter::{CommunicationLogFilter, FilterError};
pub use http::{EwpAuthenticationMethod, HttpHeaderLog, HttpRequestLog, HttpResponseLog};
pub use kind::CommunicationKind;
pub use registry::{RegistryEntry, VariantRegistry, VariantShape};
pub use summary::CommunicationLogSummary;
pub use wrapper::CommunicationLogDetailWrapper;
