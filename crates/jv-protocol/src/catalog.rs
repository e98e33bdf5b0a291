//! Cloud provider and service catalog.
//!
//! The provider → services table is a strict partition: every service is
//! listed under exactly one provider, and that provider is the one
//! `Service::provider` reports. `verify_partition` checks both.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported cloud providers, in dashboard rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "Azure")]
    Azure,
    #[serde(rename = "GCP")]
    Gcp,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Aws, Provider::Azure, Provider::Gcp];

    /// Display name, matching the cost API's `cloud_provider` field.
    pub fn name(self) -> &'static str {
        match self {
            Provider::Aws => "AWS",
            Provider::Azure => "Azure",
            Provider::Gcp => "GCP",
        }
    }

    /// Exact-name lookup (as found in cost records).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Services listed under this provider in the catalog table.
    pub fn services(self) -> &'static [Service] {
        CATALOG
            .iter()
            .find(|(provider, _)| *provider == self)
            .map(|(_, services)| *services)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The nine catalog services, ordered by table position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Service {
    #[serde(rename = "EC2")]
    Ec2,
    #[serde(rename = "S3")]
    S3,
    #[serde(rename = "Lambda")]
    Lambda,
    #[serde(rename = "Virtual Machines")]
    VirtualMachines,
    #[serde(rename = "Blob Storage")]
    BlobStorage,
    #[serde(rename = "Azure Functions")]
    AzureFunctions,
    #[serde(rename = "Compute Engine")]
    ComputeEngine,
    #[serde(rename = "Cloud Storage")]
    CloudStorage,
    #[serde(rename = "Cloud Functions")]
    CloudFunctions,
}

impl Service {
    pub const ALL: [Service; 9] = [
        Service::Ec2,
        Service::S3,
        Service::Lambda,
        Service::VirtualMachines,
        Service::BlobStorage,
        Service::AzureFunctions,
        Service::ComputeEngine,
        Service::CloudStorage,
        Service::CloudFunctions,
    ];

    /// Display name, matching the cost API's `service_name` field.
    pub fn name(self) -> &'static str {
        match self {
            Service::Ec2 => "EC2",
            Service::S3 => "S3",
            Service::Lambda => "Lambda",
            Service::VirtualMachines => "Virtual Machines",
            Service::BlobStorage => "Blob Storage",
            Service::AzureFunctions => "Azure Functions",
            Service::ComputeEngine => "Compute Engine",
            Service::CloudStorage => "Cloud Storage",
            Service::CloudFunctions => "Cloud Functions",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// The provider that owns this service.
    pub fn provider(self) -> Provider {
        match self {
            Service::Ec2 | Service::S3 | Service::Lambda => Provider::Aws,
            Service::VirtualMachines | Service::BlobStorage | Service::AzureFunctions => {
                Provider::Azure
            }
            Service::ComputeEngine | Service::CloudStorage | Service::CloudFunctions => {
                Provider::Gcp
            }
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Provider → services table, in rendering order.
pub const CATALOG: [(Provider, &[Service]); 3] = [
    (Provider::Aws, &[Service::Ec2, Service::S3, Service::Lambda]),
    (
        Provider::Azure,
        &[
            Service::VirtualMachines,
            Service::BlobStorage,
            Service::AzureFunctions,
        ],
    ),
    (
        Provider::Gcp,
        &[
            Service::ComputeEngine,
            Service::CloudStorage,
            Service::CloudFunctions,
        ],
    ),
];

/// First provider whose catalog row lists `service`.
pub fn owner_of(service: Service) -> Option<Provider> {
    CATALOG
        .iter()
        .find(|(_, services)| services.contains(&service))
        .map(|(provider, _)| *provider)
}

/// Catalog table violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("service {service} is listed under {listed} but owned by {owner}")]
    WrongOwner {
        service: Service,
        listed: Provider,
        owner: Provider,
    },

    #[error("service {service} is listed {count} times")]
    Duplicate { service: Service, count: usize },

    #[error("service {0} is not listed under any provider")]
    Missing(Service),
}

/// Check that the shipped catalog is a strict partition of all services.
pub fn verify_partition() -> Result<(), CatalogError> {
    verify_table(&CATALOG)
}

fn verify_table(table: &[(Provider, &[Service])]) -> Result<(), CatalogError> {
    for (listed, services) in table {
        for service in services.iter() {
            let owner = service.provider();
            if owner != *listed {
                return Err(CatalogError::WrongOwner {
                    service: *service,
                    listed: *listed,
                    owner,
                });
            }
        }
    }

    for service in Service::ALL {
        let count = table
            .iter()
            .flat_map(|(_, services)| services.iter())
            .filter(|s| **s == service)
            .count();
        match count {
            0 => return Err(CatalogError::Missing(service)),
            1 => {}
            count => return Err(CatalogError::Duplicate { service, count }),
        }
    }

    Ok(())
}
