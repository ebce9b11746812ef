//! Request bodies sent to the remote services

use serde::Serialize;

/// Body of the shopper metro update
#[derive(Debug, Clone, Serialize)]
pub struct MetroUpdateRequest {
    pub metro_id: String,
}

/// Body of the shopper certify follow-up
#[derive(Debug, Clone, Serialize)]
pub struct CertifyShopperRequest {
    pub certifications: Vec<CertificationRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CertificationRequest {
    pub name: String,
}

/// JSON body attached to a step, serialized per request
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StepBody {
    MetroUpdate(MetroUpdateRequest),
    Certify(CertifyShopperRequest),
}
