use serde::Serialize;

/// Liveness probe payload, the equivalent of the service's root endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceStatus {
    pub name: String,
    pub version: String,
    pub message: String,
}

pub fn service_status() -> ServiceStatus {
    ServiceStatus {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "tender clash service is running".to_string(),
    }
}
