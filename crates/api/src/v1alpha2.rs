//! `v1alpha2` spoke. Same error model as the hub; ClientMount has no `allReady`
//! rollup and SystemConfiguration has no port cooldown.

use dws_core::ResourceErrorInfo;
use k8s_openapi::api::core::v1::ObjectReference;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use crate::v1alpha3::{
    ClientMountDevice, ClientMountDeviceLustre, ClientMountDeviceReference, ClientMountDeviceType,
    ClientMountInfo, ClientMountInfoStatus, ClientMountState, ComputesData, DirectiveBreakdownStatus,
    Node, PersistentStorageInstanceState, PersistentStorageInstanceStatus, ResourceState,
    ResourceStatus, ServersSpecAllocationSet, ServersSpecStorage, ServersStatus,
    ServersStatusAllocationSet, ServersStatusStorage, StorageAccess, StorageMode, StorageStatus,
    SystemConfigurationComputeNodeReference, SystemConfigurationExternalComputeNode,
    SystemConfigurationStatus, SystemConfigurationStorageNode, WorkflowDriverStatus, WorkflowState,
    WorkflowStatus,
};

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha2",
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

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha2",
    kind = "Computes",
    plural = "computes",
    namespaced,
    derive = "PartialEq"
)]
pub struct ComputesSpec {
    #[serde(default)]
    pub data: Vec<ComputesData>,
}

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha2",
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

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha2",
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

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha2",
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

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha2",
    kind = "Storage",
    namespaced,
    status = "StorageStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct StorageSpec {
    #[serde(default)]
    pub state: ResourceState,
    #[serde(default)]
    pub mode: StorageMode,
}

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha2",
    kind = "SystemConfiguration",
    namespaced,
    status = "SystemConfigurationStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfigurationSpec {
    #[serde(default)]
    pub storage_nodes: Vec<SystemConfigurationStorageNode>,
    #[serde(default)]
    pub external_compute_nodes: Vec<SystemConfigurationExternalComputeNode>,
    #[serde(default)]
    pub ports: Vec<IntOrString>,
}

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha2",
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
    pub job_id: IntOrString,
    #[serde(rename = "userID")]
    pub user_id: u32,
    #[serde(rename = "groupID")]
    pub group_id: u32,
    #[serde(default)]
    pub hurry: bool,
    #[serde(default)]
    pub dw_directives: Vec<String>,
}
