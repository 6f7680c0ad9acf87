//! Variant registry: discriminator tag to concrete shape
//!
//! The registry is an ordered, immutable table. It is deliberately not
//! injective: `HOST_IN` and `HOST_OUT` both resolve to
//! [`VariantShape::HostHttp`], whose direction is carried as data.
//!
//! ```text
//! "HOST_PLUGIN_FUNCTION_CALL" ──▶ HostPluginFunctionCall
//! "EWP_IN"                    ──▶ HttpFromEwpNode
//! "EWP_OUT"                   ──▶ HttpToEwpNode
//! "HOST_IN"   ─┐
//! "HOST_OUT"  ─┴──────────────▶ HostHttp
//! ```

use super::error::CodecError;
use super::kind::CommunicationKind;
use std::sync::LazyLock;

/// Concrete structural shape of a log detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantShape {
    HostPluginFunctionCall,
    HttpFromEwpNode,
    HttpToEwpNode,
    HostHttp,
}

impl VariantShape {
    /// Name of the Rust record implementing this shape.
    pub fn type_name(&self) -> &'static str {
        match self {
            VariantShape::HostPluginFunctionCall => "HostPluginFunctionCallLogDetail",
            VariantShape::HttpFromEwpNode => "HttpCommunicationFromEwpNodeLogDetail",
            VariantShape::HttpToEwpNode => "EwpHttpCommunicationLogDetail",
            VariantShape::HostHttp => "HostHttpCommunicationLogDetail",
        }
    }
}

impl std::fmt::Display for VariantShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A single tag → shape mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    pub kind: CommunicationKind,
    pub shape: VariantShape,
}

/// Ordered table mapping discriminator tags to shapes.
#[derive(Debug, Clone, Default)]
pub struct VariantRegistry {
    entries: Vec<RegistryEntry>,
}

static STANDARD: LazyLock<VariantRegistry> = LazyLock::new(|| {
    VariantRegistry::new()
        .register(
            CommunicationKind::HostPluginFunctionCall,
            VariantShape::HostPluginFunctionCall,
        )
        .register(CommunicationKind::EwpIn, VariantShape::HttpFromEwpNode)
        .register(CommunicationKind::EwpOut, VariantShape::HttpToEwpNode)
        .register(CommunicationKind::HostIn, VariantShape::HostHttp)
        .register(CommunicationKind::HostOut, VariantShape::HostHttp)
});

impl VariantRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The process-wide registry covering every supported tag.
    pub fn standard() -> &'static VariantRegistry {
        &STANDARD
    }

    /// Register a mapping (builder pattern). A kind registered twice keeps
    /// its first position and takes the latest shape.
    pub fn register(mut self, kind: CommunicationKind, shape: VariantShape) -> Self {
        match self.entries.iter_mut().find(|e| e.kind == kind) {
            Some(entry) => entry.shape = shape,
            None => self.entries.push(RegistryEntry { kind, shape }),
        }
        self
    }

    /// Resolve a raw tag.
    pub fn lookup(&self, tag: &str) -> Result<RegistryEntry, CodecError> {
        self.entries
            .iter()
            .find(|e| e.kind.as_str() == tag)
            .copied()
            .ok_or_else(|| CodecError::UnknownVariant(tag.to_string()))
    }

    pub fn shape_of(&self, kind: CommunicationKind) -> Option<VariantShape> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.shape)
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.kind.as_str())
    }

    /// All tags mapping to `shape`, in declaration order.
    pub fn tags_for(&self, shape: VariantShape) -> Vec<CommunicationKind> {
        self.entries
            .iter()
            .filter(|e| e.shape == shape)
            .map(|e| e.kind)
            .collect()
    }

    /// Distinct shapes, in first-declaration order.
    pub fn shapes(&self) -> Vec<VariantShape> {
        let mut shapes = Vec::new();
        for entry in &self.entries {
            if !shapes.contains(&entry.shape) {
                shapes.push(entry.shape);
            }
        }
        shapes
    }

    /// Whether every known [`CommunicationKind`] has a mapping.
    pub fn is_total(&self) -> bool {
        CommunicationKind::ALL
            .iter()
            .all(|kind| self.shape_of(*kind).is_some())
    }
}
