// HTTP Step - one outbound request template applied to an identifier

use crate::types::{CertificationRequest, CertifyShopperRequest, MetroUpdateRequest, StepBody};
use migrator_core::domain::Identifier;
use migrator_core::port::HandlerError;
use reqwest::{Method, Url};

/// Path segments a URL cannot carry literally; parsers resolve them
const DOT_SEGMENTS: [&str; 2] = [".", ".."];

/// Certification granted by the certify follow-up
const CERTIFY_CERTIFICATION: &str = "driver";

/// Fixed headers sent with the certify follow-up
const CERTIFY_HEADERS: [(&str, &str); 3] = [
    ("X-User-Type", "System"),
    ("X-User-Id", "0"),
    ("x-shipt-identifier", "kedar-local"),
];

/// One segment of a step's request path
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathPart {
    Literal(String),
    Identifier,
}

fn literals<'a>(segments: &'a [&'a str]) -> impl Iterator<Item = PathPart> + 'a {
    segments.iter().map(|s| PathPart::Literal(s.to_string()))
}

/// A single request issued for each identifier
#[derive(Debug, Clone)]
pub struct HttpStep {
    label: &'static str,
    method: Method,
    path: Vec<PathPart>,
    body: Option<StepBody>,
    headers: Vec<(&'static str, &'static str)>,
}

impl HttpStep {
    /// `PATCH /v2/shoppers/{identifier}` with `{"metro_id": <metro_id>}`
    pub fn metro_update(metro_id: impl Into<String>) -> Self {
        Self {
            label: "metro_update",
            method: Method::PATCH,
            path: literals(&["v2", "shoppers"])
                .chain([PathPart::Identifier])
                .collect(),
            body: Some(StepBody::MetroUpdate(MetroUpdateRequest {
                metro_id: metro_id.into(),
            })),
            headers: Vec::new(),
        }
    }

    /// `PUT /v2/shoppers/{identifier}/certify` granting the driver certification
    pub fn certify() -> Self {
        Self {
            label: "certify",
            method: Method::PUT,
            path: literals(&["v2", "shoppers"])
                .chain([PathPart::Identifier])
                .chain(literals(&["certify"]))
                .collect(),
            body: Some(StepBody::Certify(CertifyShopperRequest {
                certifications: vec![CertificationRequest {
                    name: CERTIFY_CERTIFICATION.to_string(),
                }],
            })),
            headers: CERTIFY_HEADERS.to_vec(),
        }
    }

    /// `POST /v2/vehicles/<vehicle_id>/assign/{identifier}`, no body
    pub fn vehicle_assign(vehicle_id: impl AsRef<str>) -> Self {
        Self {
            label: "vehicle_assign",
            method: Method::POST,
            path: literals(&["v2", "vehicles", vehicle_id.as_ref(), "assign"])
                .chain([PathPart::Identifier])
                .collect(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn body(&self) -> Option<&StepBody> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &[(&'static str, &'static str)] {
        &self.headers
    }

    /// Resolve the request URL under `base`.
    ///
    /// The identifier always fills exactly one path segment: `/`, `?`, `#`
    /// and `%` inside it are percent-encoded. An identifier that is `.` or
    /// `..` would be resolved away and address another resource, so it is
    /// rejected instead.
    pub fn url_for(&self, base: &Url, identifier: &Identifier) -> Result<Url, HandlerError> {
        let mut url = base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                HandlerError::InvalidRequest(format!("base URL {} cannot take a path", base))
            })?;
            segments.pop_if_empty();
            for part in &self.path {
                let segment = match part {
                    PathPart::Literal(literal) => literal.as_str(),
                    PathPart::Identifier => identifier.as_str(),
                };
                if DOT_SEGMENTS.contains(&segment) {
                    return Err(HandlerError::InvalidRequest(format!(
                        "path segment '{}' cannot be sent in a URL",
                        segment
                    )));
                }
                segments.push(segment);
            }
        }
        Ok(url)
    }
}
