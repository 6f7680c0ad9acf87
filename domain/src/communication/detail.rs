//! Communication log detail variants
//!
//! [`CommunicationLogDetail`] is a closed sum over four structural shapes.
//! The `type` discriminator is never stored separately: it is derived from
//! the variant (and, for host HTTP logs, from the direction), so a value
//! cannot carry a tag that disagrees with its shape.
//!
//! | Variant | Shape | Tag(s) |
//! |---------|-------|--------|
//! | `HostPluginFunctionCall` | [`HostPluginFunctionCallLogDetail`] | `HOST_PLUGIN_FUNCTION_CALL` |
//! | `EwpIn` | [`HttpCommunicationFromEwpNodeLogDetail`] | `EWP_IN` |
//! | `EwpOut` | [`EwpHttpCommunicationLogDetail`] | `EWP_OUT` |
//! | `HostHttp` | [`HostHttpCommunicationLogDetail`] | `HOST_IN` / `HOST_OUT` |

use super::base::CommunicationLogBase;
use super::error::CodecError;
use super::fields::{FieldReader, FieldWriter};
use super::http::{EwpAuthenticationMethod, HttpRequestLog, HttpResponseLog};
use super::kind::CommunicationKind;
use super::registry::VariantShape;
use serde_json::Value;

/// Direction of a host HTTP communication, seen from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpDirection {
    In,
    Out,
}

impl HttpDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpDirection::In => "in",
            HttpDirection::Out => "out",
        }
    }
}

/// A call from the host into one of its plugins.
#[derive(Debug, Clone, PartialEq)]
pub struct HostPluginFunctionCallLogDetail {
    pub base: CommunicationLogBase,
    /// Code of the host that owns the plugin
    pub host_code: String,
    pub plugin_id: String,
    /// Fully qualified name of the class exposing the function
    pub class_name: String,
    pub method: String,
    /// `None` when the record carries no `arguments` field
    pub arguments: Option<Vec<Value>>,
    pub result: Option<Value>,
}

impl HostPluginFunctionCallLogDetail {
    pub fn new(
        base: CommunicationLogBase,
        host_code: impl Into<String>,
        plugin_id: impl Into<String>,
        class_name: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            base,
            host_code: host_code.into(),
            plugin_id: plugin_id.into(),
            class_name: class_name.into(),
            method: method.into(),
            arguments: None,
            result: None,
        }
    }

    pub fn with_argument(mut self, argument: impl Into<Value>) -> Self {
        self.arguments
            .get_or_insert_with(Vec::new)
            .push(argument.into());
        self
    }

    pub fn with_result(mut self, result: impl Into<Value>) -> Self {
        self.result = Some(result.into());
        self
    }

    pub fn arguments(&self) -> &[Value] {
        self.arguments.as_deref().unwrap_or_default()
    }

    /// `ClassName#method`, the way the call is displayed in listings.
    pub fn target(&self) -> String {
        format!("{}#{}", self.class_name, self.method)
    }

    fn read(base: CommunicationLogBase, reader: &mut FieldReader) -> Result<Self, CodecError> {
        Ok(Self {
            base,
            host_code: reader.required("hostCode")?,
            plugin_id: reader.required("pluginId")?,
            class_name: reader.required("className")?,
            method: reader.required("method")?,
            arguments: reader.optional("arguments")?,
            result: reader.optional_raw("result"),
        })
    }

    fn write(&self, writer: &mut FieldWriter) -> Result<(), CodecError> {
        writer.put("hostCode", &self.host_code)?;
        writer.put("pluginId", &self.plugin_id)?;
        writer.put("className", &self.class_name)?;
        writer.put("method", &self.method)?;
        writer.put_opt("arguments", &self.arguments)?;
        writer.put_opt("result", &self.result)
    }
}

/// HTTP communication received by the host from an EWP node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCommunicationFromEwpNodeLogDetail {
    pub base: CommunicationLogBase,
    pub authentication_method: EwpAuthenticationMethod,
    pub request: HttpRequestLog,
    pub response: Option<HttpResponseLog>,
    /// HEI IDs the requesting client is known to cover
    pub hei_ids_covered_by_client: Option<Vec<String>>,
}

impl HttpCommunicationFromEwpNodeLogDetail {
    pub fn new(
        base: CommunicationLogBase,
        authentication_method: EwpAuthenticationMethod,
        request: HttpRequestLog,
    ) -> Self {
        Self {
            base,
            authentication_method,
            request,
            response: None,
            hei_ids_covered_by_client: None,
        }
    }

    pub fn with_response(mut self, response: HttpResponseLog) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_covered_hei_id(mut self, hei_id: impl Into<String>) -> Self {
        self.hei_ids_covered_by_client
            .get_or_insert_with(Vec::new)
            .push(hei_id.into());
        self
    }

    pub fn hei_ids_covered_by_client(&self) -> &[String] {
        self.hei_ids_covered_by_client.as_deref().unwrap_or_default()
    }

    fn read(base: CommunicationLogBase, reader: &mut FieldReader) -> Result<Self, CodecError> {
        Ok(Self {
            base,
            authentication_method: reader.required("authenticationMethod")?,
            request: reader.required("request")?,
            response: read_response(reader)?,
            hei_ids_covered_by_client: reader.optional("heiIdsCoveredByClient")?,
        })
    }

    fn write(&self, writer: &mut FieldWriter) -> Result<(), CodecError> {
        writer.put("authenticationMethod", &self.authentication_method)?;
        writer.put("request", &self.request)?;
        writer.put_opt("response", &self.response)?;
        writer.put_opt("heiIdsCoveredByClient", &self.hei_ids_covered_by_client)
    }
}

/// HTTP communication sent by the host to an EWP node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EwpHttpCommunicationLogDetail {
    pub base: CommunicationLogBase,
    pub authentication_method: EwpAuthenticationMethod,
    pub request: HttpRequestLog,
    pub response: Option<HttpResponseLog>,
    pub target_hei_id: Option<String>,
}

impl EwpHttpCommunicationLogDetail {
    pub fn new(
        base: CommunicationLogBase,
        authentication_method: EwpAuthenticationMethod,
        request: HttpRequestLog,
    ) -> Self {
        Self {
            base,
            authentication_method,
            request,
            response: None,
            target_hei_id: None,
        }
    }

    pub fn with_response(mut self, response: HttpResponseLog) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_target_hei_id(mut self, hei_id: impl Into<String>) -> Self {
        self.target_hei_id = Some(hei_id.into());
        self
    }

    fn read(base: CommunicationLogBase, reader: &mut FieldReader) -> Result<Self, CodecError> {
        Ok(Self {
            base,
            authentication_method: reader.required("authenticationMethod")?,
            request: reader.required("request")?,
            response: read_response(reader)?,
            target_hei_id: reader.optional("targetHeiId")?,
        })
    }

    fn write(&self, writer: &mut FieldWriter) -> Result<(), CodecError> {
        writer.put("authenticationMethod", &self.authentication_method)?;
        writer.put("request", &self.request)?;
        writer.put_opt("response", &self.response)?;
        writer.put_opt("targetHeiId", &self.target_hei_id)
    }
}

/// HTTP communication on the host's own surface, in either direction.
///
/// `HOST_IN` and `HOST_OUT` share this shape; the direction is fixed at
/// construction and determines the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostHttpCommunicationLogDetail {
    pub base: CommunicationLogBase,
    pub host_code: String,
    direction: HttpDirection,
    pub request: HttpRequestLog,
    pub response: Option<HttpResponseLog>,
}

impl HostHttpCommunicationLogDetail {
    pub fn new(
        base: CommunicationLogBase,
        direction: HttpDirection,
        host_code: impl Into<String>,
        request: HttpRequestLog,
    ) -> Self {
        Self {
            base,
            host_code: host_code.into(),
            direction,
            request,
            response: None,
        }
    }

    pub fn with_response(mut self, response: HttpResponseLog) -> Self {
        self.response = Some(response);
        self
    }

    pub fn direction(&self) -> HttpDirection {
        self.direction
    }

    pub fn kind(&self) -> CommunicationKind {
        match self.direction {
            HttpDirection::In => CommunicationKind::HostIn,
            HttpDirection::Out => CommunicationKind::HostOut,
        }
    }

    fn read(
        base: CommunicationLogBase,
        direction: HttpDirection,
        reader: &mut FieldReader,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            base,
            host_code: reader.required("hostCode")?,
            direction,
            request: reader.required("request")?,
            response: read_response(reader)?,
        })
    }

    fn write(&self, writer: &mut FieldWriter) -> Result<(), CodecError> {
        writer.put("hostCode", &self.host_code)?;
        writer.put("request", &self.request)?;
        writer.put_opt("response", &self.response)
    }
}

fn read_response(reader: &mut FieldReader) -> Result<Option<HttpResponseLog>, CodecError> {
    let response: Option<HttpResponseLog> = reader.optional("response")?;
    if let Some(response) = &response {
        response
            .validate()
            .map_err(|reason| CodecError::schema_mismatch("response", reason))?;
    }
    Ok(response)
}

/// A communication log record of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CommunicationLogDetail {
    HostPluginFunctionCall(HostPluginFunctionCallLogDetail),
    EwpIn(HttpCommunicationFromEwpNodeLogDetail),
    EwpOut(EwpHttpCommunicationLogDetail),
    HostHttp(HostHttpCommunicationLogDetail),
}

impl CommunicationLogDetail {
    /// The `type` discriminator of this record.
    pub fn kind(&self) -> CommunicationKind {
        match self {
            CommunicationLogDetail::HostPluginFunctionCall(_) => {
                CommunicationKind::HostPluginFunctionCall
            }
            CommunicationLogDetail::EwpIn(_) => CommunicationKind::EwpIn,
            CommunicationLogDetail::EwpOut(_) => CommunicationKind::EwpOut,
            CommunicationLogDetail::HostHttp(detail) => detail.kind(),
        }
    }

    pub fn shape(&self) -> VariantShape {
        match self {
            CommunicationLogDetail::HostPluginFunctionCall(_) => {
                VariantShape::HostPluginFunctionCall
            }
            CommunicationLogDetail::EwpIn(_) => VariantShape::HttpFromEwpNode,
            CommunicationLogDetail::EwpOut(_) => VariantShape::HttpToEwpNode,
            CommunicationLogDetail::HostHttp(_) => VariantShape::HostHttp,
        }
    }

    pub fn base(&self) -> &CommunicationLogBase {
        match self {
            CommunicationLogDetail::HostPluginFunctionCall(d) => &d.base,
            CommunicationLogDetail::EwpIn(d) => &d.base,
            CommunicationLogDetail::EwpOut(d) => &d.base,
            CommunicationLogDetail::HostHttp(d) => &d.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut CommunicationLogBase {
        match self {
            CommunicationLogDetail::HostPluginFunctionCall(d) => &mut d.base,
            CommunicationLogDetail::EwpIn(d) => &mut d.base,
            CommunicationLogDetail::EwpOut(d) => &mut d.base,
            CommunicationLogDetail::HostHttp(d) => &mut d.base,
        }
    }

    pub fn id(&self) -> i64 {
        self.base().id
    }

    pub fn request(&self) -> Option<&HttpRequestLog> {
        match self {
            CommunicationLogDetail::HostPluginFunctionCall(_) => None,
            CommunicationLogDetail::EwpIn(d) => Some(&d.request),
            CommunicationLogDetail::EwpOut(d) => Some(&d.request),
            CommunicationLogDetail::HostHttp(d) => Some(&d.request),
        }
    }

    pub fn response(&self) -> Option<&HttpResponseLog> {
        match self {
            CommunicationLogDetail::HostPluginFunctionCall(_) => None,
            CommunicationLogDetail::EwpIn(d) => d.response.as_ref(),
            CommunicationLogDetail::EwpOut(d) => d.response.as_ref(),
            CommunicationLogDetail::HostHttp(d) => d.response.as_ref(),
        }
    }

    /// Host code, for the kinds that are bound to a specific host.
    pub fn host_code(&self) -> Option<&str> {
        match self {
            CommunicationLogDetail::HostPluginFunctionCall(d) => Some(&d.host_code),
            CommunicationLogDetail::HostHttp(d) => Some(&d.host_code),
            CommunicationLogDetail::EwpIn(_) | CommunicationLogDetail::EwpOut(_) => None,
        }
    }

    pub(crate) fn read(
        kind: CommunicationKind,
        shape: VariantShape,
        reader: &mut FieldReader,
    ) -> Result<Self, CodecError> {
        let base = CommunicationLogBase::read(reader)?;
        let detail = match shape {
            VariantShape::HostPluginFunctionCall => CommunicationLogDetail::HostPluginFunctionCall(
                HostPluginFunctionCallLogDetail::read(base, reader)?,
            ),
            VariantShape::HttpFromEwpNode => CommunicationLogDetail::EwpIn(
                HttpCommunicationFromEwpNodeLogDetail::read(base, reader)?,
            ),
            VariantShape::HttpToEwpNode => {
                CommunicationLogDetail::EwpOut(EwpHttpCommunicationLogDetail::read(base, reader)?)
            }
            VariantShape::HostHttp => {
                let direction = match kind {
                    CommunicationKind::HostOut => HttpDirection::Out,
                    _ => HttpDirection::In,
                };
                CommunicationLogDetail::HostHttp(HostHttpCommunicationLogDetail::read(
                    base, direction, reader,
                )?)
            }
        };
        Ok(detail)
    }

    pub(crate) fn write(&self, writer: &mut FieldWriter) -> Result<(), CodecError> {
        writer.put("type", self.kind().as_str())?;
        self.base().write(writer)?;
        match self {
            CommunicationLogDetail::HostPluginFunctionCall(d) => d.write(writer),
            CommunicationLogDetail::EwpIn(d) => d.write(writer),
            CommunicationLogDetail::EwpOut(d) => d.write(writer),
            CommunicationLogDetail::HostHttp(d) => d.write(writer),
        }
    }
}

impl From<HostPluginFunctionCallLogDetail> for CommunicationLogDetail {
    fn from(detail: HostPluginFunctionCallLogDetail) -> Self {
        CommunicationLogDetail::HostPluginFunctionCall(detail)
    }
}

impl From<HttpCommunicationFromEwpNodeLogDetail> for CommunicationLogDetail {
    fn from(detail: HttpCommunicationFromEwpNodeLogDetail) -> Self {
        CommunicationLogDetail::EwpIn(detail)
    }
}

impl From<EwpHttpCommunicationLogDetail> for CommunicationLogDetail {
    fn from(detail: EwpHttpCommunicationLogDetail) -> Self {
        CommunicationLogDetail::EwpOut(detail)
    }
}

impl From<HostHttpCommunicationLogDetail> for CommunicationLogDetail {
    fn from(detail: HostHttpCommunicationLogDetail) -> Self {
        CommunicationLogDetail::HostHttp(detail)
    }
}
