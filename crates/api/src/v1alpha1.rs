//! `v1alpha1` spoke, the oldest representation.
//!
//! Errors carry a `recoverable` flag instead of severity/type, Workflow job IDs
//! are plain integers, SystemConfiguration lists every compute in one combined
//! list, and several hub fields do not exist yet.

use k8s_openapi::api::core::v1::ObjectReference;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::CustomResource;
use rustc_hash::FxHashSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use crate::v1alpha3::{
    ClientMountDevice, ClientMountDeviceLustre, ClientMountDeviceReference, ClientMountDeviceType,
    ClientMountInfoStatus, ClientMountState, ComputesData, Node, PersistentStorageInstanceState,
    ResourceState, ResourceStatus, ServersSpecAllocationSet, ServersSpecStorage,
    ServersStatusAllocationSet, ServersStatusStorage, StorageAccess, StorageStatus,
    SystemConfigurationComputeNodeReference, SystemConfigurationStatus,
    SystemConfigurationStorageNode, WorkflowDriverStatus, WorkflowState, WorkflowStatus,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceErrorInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_message: String,
    #[serde(default)]
    pub debug_message: String,
    /// False when the error will never clear on its own
    pub recoverable: bool,
}

// ---- ClientMount ----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountInfo {
    pub mount_path: String,
    #[serde(default)]
    pub options: String,
    pub device: ClientMountDevice,
    #[serde(rename = "type")]
    pub mount_type: String,
    #[serde(default)]
    pub target_type: String,
}

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha1",
    kind = "ClientMount",
    namespaced,
    status = "ClientMountStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountSpec {
    pub node: String,
    pub desired_state: ClientMountState,
    #[serde(default)]
    pub mounts: Vec<ClientMountInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountStatus {
    #[serde(default)]
    pub mounts: Vec<ClientMountInfoStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResourceErrorInfo>,
}

// ---- Computes ----

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha1",
    kind = "Computes",
    plural = "computes",
    namespaced,
    derive = "PartialEq"
)]
pub struct ComputesSpec {
    #[serde(default)]
    pub data: Vec<ComputesData>,
}

// ---- DirectiveBreakdown ----

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha1",
    kind = "DirectiveBreakdown",
    namespaced,
    status = "DirectiveBreakdownStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveBreakdownSpec {
    pub directive: String,
    #[serde(rename = "userID", default)]
    pub user_id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveBreakdownStatus {
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<ObjectReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResourceErrorInfo>,
}

// ---- PersistentStorageInstance ----

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha1",
    kind = "PersistentStorageInstance",
    namespaced,
    status = "PersistentStorageInstanceStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct PersistentStorageInstanceSpec {
    pub name: String,
    pub fs_type: String,
    pub dw_directive: String,
    #[serde(rename = "userID", default)]
    pub user_id: u32,
    #[serde(default)]
    pub state: PersistentStorageInstanceState,
    #[serde(default)]
    pub consumer_references: Vec<ObjectReference>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersistentStorageInstanceStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<ObjectReference>,
    #[serde(default)]
    pub state: PersistentStorageInstanceState,
    #[serde(default)]
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResourceErrorInfo>,
}

// ---- Servers ----

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha1",
    kind = "Servers",
    plural = "servers",
    namespaced,
    status = "ServersStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct ServersSpec {
    #[serde(default)]
    pub allocation_sets: Vec<ServersSpecAllocationSet>,
}

/// No error reporting in this representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServersStatus {
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub allocation_sets: Vec<ServersStatusAllocationSet>,
}

// ---- Storage ----

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha1",
    kind = "Storage",
    namespaced,
    status = "StorageStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct StorageSpec {
    #[serde(default)]
    pub state: ResourceState,
}

// ---- SystemConfiguration ----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub struct SystemConfigurationComputeNode {
    pub name: String,
}

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha1",
    kind = "SystemConfiguration",
    namespaced,
    status = "SystemConfigurationStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfigurationSpec {
    /// Every compute in the system, attached to a storage node or not
    #[serde(default)]
    pub compute_nodes: Vec<SystemConfigurationComputeNode>,
    #[serde(default)]
    pub storage_nodes: Vec<SystemConfigurationStorageNode>,
    #[serde(default)]
    pub ports: Vec<IntOrString>,
}

impl SystemConfigurationSpec {
    /// Entries of `compute_nodes` that no storage node lists in its access
    /// list, in `compute_nodes` order.
    pub fn find_external_computes(&self) -> Vec<&str> {
        let attached: FxHashSet<&str> = self
            .storage_nodes
            .iter()
            .flat_map(|node| node.computes_access.iter().map(|c| c.name.as_str()))
            .collect();
        self.compute_nodes
            .iter()
            .map(|c| c.name.as_str())
            .filter(|name| !attached.contains(name))
            .collect()
    }
}

// ---- Workflow ----

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha1",
    kind = "Workflow",
    namespaced,
    status = "WorkflowStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSpec {
    pub desired_state: WorkflowState,
    #[serde(rename = "wlmID")]
    pub wlm_id: String,
    #[serde(rename = "jobID")]
    pub job_id: i32,
    #[serde(rename = "userID")]
    pub user_id: u32,
    #[serde(rename = "groupID")]
    pub group_id: u32,
    #[serde(default)]
    pub dw_directives: Vec<String>,
}
