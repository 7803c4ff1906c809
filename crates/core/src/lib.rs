//! DWS core types: served representations, resource kinds, and the hub error model.

#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod resource_error;

pub use resource_error::{
    set_resource_error, set_resource_error_and_log, severity_from_str, ResourceErrorInfo, ResourceErrorSeverity,
    ResourceErrorType,
};

/// API group shared by every DWS resource kind.
pub const GROUP: &str = "dataworkflowservices.github.io";

/// Errors raised while parsing identifiers that arrive as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown representation {0:?}")]
    UnknownVersion(String),
    #[error("unknown resource kind {0:?}")]
    UnknownKind(String),
    #[error("unknown error severity {0:?}")]
    UnknownSeverity(String),
}

/// A served schema variant. Ordered by recency; exactly one is the hub.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    V1alpha1,
    V1alpha2,
    V1alpha3,
}

impl Version {
    pub const ALL: [Version; 3] = [Version::V1alpha1, Version::V1alpha2, Version::V1alpha3];

    /// The canonical representation every other one converts through.
    pub const HUB: Version = Version::V1alpha3;

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V1alpha1 => "v1alpha1",
            Version::V1alpha2 => "v1alpha2",
            Version::V1alpha3 => "v1alpha3",
        }
    }

    pub fn is_hub(&self) -> bool { *self == Self::HUB }

    pub fn api_version(&self) -> String { api_version(*self) }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Accepts a bare version (`v1alpha2`) or a full apiVersion (`<group>/v1alpha2`).
impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = match s.split_once('/') {
            Some((group, version)) if group == GROUP => version,
            Some(_) => return Err(ParseError::UnknownVersion(s.to_string())),
            None => s,
        };
        Version::ALL
            .into_iter()
            .find(|v| v.as_str() == bare)
            .ok_or_else(|| ParseError::UnknownVersion(s.to_string()))
    }
}

/// Build the `apiVersion` string for a representation.
pub fn api_version(version: Version) -> String {
    format!("{}/{}", GROUP, version.as_str())
}

/// Every resource kind the conversion engine knows about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ClientMount,
    Computes,
    DirectiveBreakdown,
    PersistentStorageInstance,
    Servers,
    Storage,
    SystemConfiguration,
    Workflow,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::ClientMount,
        ResourceKind::Computes,
        ResourceKind::DirectiveBreakdown,
        ResourceKind::PersistentStorageInstance,
        ResourceKind::Servers,
        ResourceKind::Storage,
        ResourceKind::SystemConfiguration,
        ResourceKind::Workflow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::ClientMount => "ClientMount",
            ResourceKind::Computes => "Computes",
            ResourceKind::DirectiveBreakdown => "DirectiveBreakdown",
            ResourceKind::PersistentStorageInstance => "PersistentStorageInstance",
            ResourceKind::Servers => "Servers",
            ResourceKind::Storage => "Storage",
            ResourceKind::SystemConfiguration => "SystemConfiguration",
            ResourceKind::Workflow => "Workflow",
        }
    }

    /// Kind name of the collection type, e.g. `WorkflowList`.
    pub fn list_kind(&self) -> String { format!("{}List", self.as_str()) }

    /// Recognize a collection kind name (`<Kind>List`).
    pub fn parse_collection(kind: &str) -> Option<ResourceKind> {
        kind.strip_suffix("List").and_then(|k| k.parse().ok())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ResourceKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseError::UnknownKind(s.to_string()))
    }
}

pub mod prelude {
    pub use super::{
        api_version, ParseError, ResourceErrorInfo, ResourceErrorSeverity, ResourceErrorType,
        ResourceKind, Version, GROUP,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_are_ordered_by_recency() {
        assert!(Version::V1alpha1 < Version::V1alpha2);
        assert!(Version::V1alpha2 < Version::V1alpha3);
        assert_eq!(Version::ALL.iter().filter(|v| v.is_hub()).count(), 1);
        assert_eq!(Version::ALL.iter().max(), Some(&Version::HUB));
    }

    #[test]
    fn version_parses_bare_and_qualified() {
        assert_eq!("v1alpha2".parse::<Version>(), Ok(Version::V1alpha2));
        assert_eq!(
            "dataworkflowservices.github.io/v1alpha1".parse::<Version>(),
            Ok(Version::V1alpha1)
        );
        assert!("apps/v1alpha1".parse::<Version>().is_err());
        assert!("v2".parse::<Version>().is_err());
        assert_eq!(Version::V1alpha3.api_version(), "dataworkflowservices.github.io/v1alpha3");
    }

    #[test]
    fn kinds_and_collections() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<ResourceKind>(), Ok(kind));
            assert_eq!(ResourceKind::parse_collection(&kind.list_kind()), Some(kind));
        }
        assert_eq!(ResourceKind::parse_collection("Workflow"), None);
        assert_eq!(ResourceKind::parse_collection("PodList"), None);
        assert!("Pod".parse::<ResourceKind>().is_err());
    }
}
