//! `v1alpha3`: the hub. All semantic truth lives in these shapes; nested types
//! that did not change between representations are defined here and re-used by
//! the spokes.

use std::collections::BTreeMap;

use dws_core::ResourceErrorInfo;
use k8s_openapi::api::core::v1::ObjectReference;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::CustomResource;
use rustc_hash::FxHashSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_PORTS_COOLDOWN_SECS;

// ---- ClientMount ----

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClientMountState {
    Mounted,
    #[default]
    Unmounted,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClientMountDeviceType {
    #[default]
    Lustre,
    Lvm,
    Reference,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountDeviceLustre {
    pub file_system_name: String,
    /// List of mgsAddresses of the form [address]@[lnet]
    pub mgs_addresses: String,
}

/// Device information held in a different object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountDeviceReference {
    pub object_reference: ObjectReference,
    /// Optional private data for the driver
    #[serde(default)]
    pub data: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountDevice {
    #[serde(rename = "type")]
    pub device_type: ClientMountDeviceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lustre: Option<ClientMountDeviceLustre>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_reference: Option<ClientMountDeviceReference>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountInfo {
    pub mount_path: String,
    #[serde(rename = "userID", default)]
    pub user_id: u32,
    #[serde(rename = "groupID", default)]
    pub group_id: u32,
    /// Apply userID/groupID to the mount when set
    #[serde(default)]
    pub set_permissions: bool,
    #[serde(default)]
    pub options: String,
    pub device: ClientMountDevice,
    #[serde(rename = "type")]
    pub mount_type: String,
    /// `file` or `directory`
    #[serde(default)]
    pub target_type: String,
}

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha3",
    kind = "ClientMount",
    namespaced,
    status = "ClientMountStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountSpec {
    /// Name of the client node targeted by this mount
    pub node: String,
    pub desired_state: ClientMountState,
    #[serde(default)]
    pub mounts: Vec<ClientMountInfo>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountInfoStatus {
    pub state: ClientMountState,
    /// Whether `state` has been achieved
    pub ready: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountStatus {
    #[serde(default)]
    pub mounts: Vec<ClientMountInfoStatus>,
    /// Rollup of each mount's ready flag
    #[serde(default)]
    pub all_ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResourceErrorInfo>,
}

// ---- Computes ----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub struct ComputesData {
    pub name: String,
}

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha3",
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
    version = "v1alpha3",
    kind = "DirectiveBreakdown",
    namespaced,
    status = "DirectiveBreakdownStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveBreakdownSpec {
    /// Copy of the #DW directive this breakdown describes
    pub directive: String,
    #[serde(rename = "userID", default)]
    pub user_id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveBreakdownStatus {
    #[serde(default)]
    pub ready: bool,
    /// Daemons the WLM must run for this directive
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<ObjectReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResourceErrorInfo>,
}

// ---- PersistentStorageInstance ----

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub enum PersistentStorageInstanceState {
    #[default]
    Active,
    Destroying,
}

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha3",
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
    /// Resources currently using this storage
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

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServersSpecStorage {
    /// Name of the storage node
    pub name: String,
    pub allocation_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServersSpecAllocationSet {
    pub label: String,
    pub allocation_size: i64,
    #[serde(default)]
    pub storage: Vec<ServersSpecStorage>,
}

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha3",
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

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServersStatusStorage {
    pub allocation_size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServersStatusAllocationSet {
    pub label: String,
    /// Allocations keyed by storage node name
    #[serde(default)]
    pub storage: BTreeMap<String, ServersStatusStorage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServersStatus {
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub allocation_sets: Vec<ServersStatusAllocationSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResourceErrorInfo>,
}

// ---- Storage ----

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub enum ResourceState {
    #[default]
    Enabled,
    Disabled,
}

/// `Testing` storage is excluded from allocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub enum StorageMode {
    #[default]
    Live,
    Testing,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub enum ResourceStatus {
    Starting,
    Ready,
    Disabled,
    NotPresent,
    Offline,
    Failed,
    Degraded,
    Drained,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub status: ResourceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageAccess {
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub servers: Vec<Node>,
    #[serde(default)]
    pub computes: Vec<Node>,
}

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha3",
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

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageStatus {
    #[serde(rename = "type", default)]
    pub storage_type: String,
    #[serde(default)]
    pub capacity: i64,
    #[serde(default)]
    pub access: StorageAccess,
    #[serde(default)]
    pub status: ResourceStatus,
    #[serde(default)]
    pub reboot_required: bool,
    #[serde(default)]
    pub message: String,
}

// ---- SystemConfiguration ----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfigurationComputeNodeReference {
    pub name: String,
    /// Physical link index of the compute on the storage node
    pub index: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfigurationStorageNode {
    #[serde(rename = "type")]
    pub node_type: String,
    pub name: String,
    #[serde(default)]
    pub computes_access: Vec<SystemConfigurationComputeNodeReference>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub struct SystemConfigurationExternalComputeNode {
    pub name: String,
}

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha3",
    kind = "SystemConfiguration",
    namespaced,
    status = "SystemConfigurationStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfigurationSpec {
    #[serde(default)]
    pub storage_nodes: Vec<SystemConfigurationStorageNode>,
    /// Compute nodes with no storage node attached
    #[serde(default)]
    pub external_compute_nodes: Vec<SystemConfigurationExternalComputeNode>,
    #[serde(default)]
    pub ports: Vec<IntOrString>,
    #[serde(default = "default_ports_cooldown")]
    pub ports_cooldown_in_seconds: u32,
}

fn default_ports_cooldown() -> u32 { DEFAULT_PORTS_COOLDOWN_SECS }

impl Default for SystemConfigurationSpec {
    fn default() -> Self {
        Self {
            storage_nodes: Vec::new(),
            external_compute_nodes: Vec::new(),
            ports: Vec::new(),
            ports_cooldown_in_seconds: DEFAULT_PORTS_COOLDOWN_SECS,
        }
    }
}

impl SystemConfigurationSpec {
    /// Names of the computes reachable through a storage node, in list order.
    pub fn computes(&self) -> Vec<&str> {
        self.storage_nodes
            .iter()
            .flat_map(|node| node.computes_access.iter().map(|c| c.name.as_str()))
            .collect()
    }

    pub fn computes_external(&self) -> Vec<&str> {
        self.external_compute_nodes.iter().map(|c| c.name.as_str()).collect()
    }

    /// `computes()` followed by `computes_external()`, exact duplicates dropped
    /// (first occurrence kept).
    pub fn all_computes(&self) -> Vec<&str> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        self.computes()
            .into_iter()
            .chain(self.computes_external())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfigurationStatus {
    #[serde(default)]
    pub ready: bool,
}

// ---- Workflow ----

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub enum WorkflowState {
    #[default]
    Proposal,
    Setup,
    DataIn,
    PreRun,
    PostRun,
    DataOut,
    Teardown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDriverStatus {
    #[serde(rename = "driverID")]
    pub driver_id: String,
    #[serde(rename = "taskID")]
    pub task_id: String,
    pub dwd_index: i32,
    pub watch_state: WorkflowState,
    #[serde(default)]
    pub completed: bool,
    /// One of Pending, Queued, Running, Completed, TransientCondition, Error, DriverWait
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: String,
}

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[kube(
    group = "dataworkflowservices.github.io",
    version = "v1alpha3",
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
    /// Job identifier assigned by the WLM; numeric or free-form
    #[serde(rename = "jobID")]
    pub job_id: IntOrString,
    #[serde(rename = "userID")]
    pub user_id: u32,
    #[serde(rename = "groupID")]
    pub group_id: u32,
    /// Skip data-out and go straight to teardown
    #[serde(default)]
    pub hurry: bool,
    #[serde(default)]
    pub dw_directives: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStatus {
    #[serde(default)]
    pub state: WorkflowState,
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    /// Environment variables the WLM applies to the job
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub drivers: Vec<WorkflowDriverStatus>,
    #[serde(default)]
    pub directive_breakdowns: Vec<ObjectReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computes: Option<ObjectReference>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_node(name: &str, computes: &[&str]) -> SystemConfigurationStorageNode {
        SystemConfigurationStorageNode {
            node_type: "Rabbit".to_string(),
            name: name.to_string(),
            computes_access: computes
                .iter()
                .enumerate()
                .map(|(i, c)| SystemConfigurationComputeNodeReference { name: c.to_string(), index: i as i32 })
                .collect(),
        }
    }

    #[test]
    fn all_computes_keeps_order_and_drops_exact_duplicates() {
        let spec = SystemConfigurationSpec {
            storage_nodes: vec![storage_node("rabbit-0", &["c0", "c1"]), storage_node("rabbit-1", &["c2", "c1"])],
            external_compute_nodes: vec![
                SystemConfigurationExternalComputeNode { name: "x0".into() },
                SystemConfigurationExternalComputeNode { name: "c0".into() },
            ],
            ..Default::default()
        };
        assert_eq!(spec.computes(), vec!["c0", "c1", "c2", "c1"]);
        assert_eq!(spec.computes_external(), vec!["x0", "c0"]);
        assert_eq!(spec.all_computes(), vec!["c0", "c1", "c2", "x0"]);
        assert_eq!(spec.all_computes(), spec.all_computes());
    }

    #[test]
    fn system_configuration_cooldown_defaults() {
        let spec: SystemConfigurationSpec = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(spec.ports_cooldown_in_seconds, DEFAULT_PORTS_COOLDOWN_SECS);
    }

    #[test]
    fn workflow_wire_names() {
        let spec = WorkflowSpec {
            desired_state: WorkflowState::Proposal,
            wlm_id: "flux".into(),
            job_id: IntOrString::String("my job".into()),
            user_id: 1001,
            group_id: 1002,
            hurry: false,
            dw_directives: vec![],
        };
        let v = serde_json::to_value(&spec).unwrap();
        assert_eq!(v["wlmID"], "flux");
        assert_eq!(v["jobID"], "my job");
        assert_eq!(v["userID"], 1001);
        assert_eq!(v["desiredState"], "Proposal");
    }
}
