use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct RunResponse {
    pub success: bool,
}

/// Deployment trigger accepted by the deployment service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Deployment {
    pub project: String,
    pub version: String,
}
