//! Field-for-field copies between `v1alpha1` and the hub.
//!
//! Sources are destructured in full and destinations are built as complete
//! literals, so a field added on either side stops the build until it is
//! mapped here or handed to an adapter.

use dws_api::{hub, v1alpha1};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use crate::adapt;

// ---- ClientMount ----

pub(super) fn client_mount_spec_up(src: &v1alpha1::ClientMountSpec) -> hub::ClientMountSpec {
    let v1alpha1::ClientMountSpec { node, desired_state, mounts } = src;
    hub::ClientMountSpec {
        node: node.clone(),
        desired_state: *desired_state,
        mounts: mounts.iter().map(client_mount_info_up).collect(),
    }
}

fn client_mount_info_up(src: &v1alpha1::ClientMountInfo) -> hub::ClientMountInfo {
    let v1alpha1::ClientMountInfo { mount_path, options, device, mount_type, target_type } = src;
    hub::ClientMountInfo {
        mount_path: mount_path.clone(),
        // restored by adapter
        user_id: 0,
        group_id: 0,
        set_permissions: false,
        options: options.clone(),
        device: device.clone(),
        mount_type: mount_type.clone(),
        target_type: target_type.clone(),
    }
}

pub(super) fn client_mount_spec_down(src: &hub::ClientMountSpec) -> v1alpha1::ClientMountSpec {
    let hub::ClientMountSpec { node, desired_state, mounts } = src;
    v1alpha1::ClientMountSpec {
        node: node.clone(),
        desired_state: *desired_state,
        mounts: mounts.iter().map(client_mount_info_down).collect(),
    }
}

fn client_mount_info_down(src: &hub::ClientMountInfo) -> v1alpha1::ClientMountInfo {
    let hub::ClientMountInfo {
        mount_path,
        user_id: _,
        group_id: _,
        set_permissions: _,
        options,
        device,
        mount_type,
        target_type,
    } = src;
    v1alpha1::ClientMountInfo {
        mount_path: mount_path.clone(),
        options: options.clone(),
        device: device.clone(),
        mount_type: mount_type.clone(),
        target_type: target_type.clone(),
    }
}

pub(super) fn client_mount_status_up(src: &v1alpha1::ClientMountStatus) -> hub::ClientMountStatus {
    let v1alpha1::ClientMountStatus { mounts, error: _ } = src;
    hub::ClientMountStatus {
        mounts: mounts.clone(),
        // restored by adapter
        all_ready: false,
        error: None,
    }
}

pub(super) fn client_mount_status_down(src: &hub::ClientMountStatus) -> v1alpha1::ClientMountStatus {
    let hub::ClientMountStatus { mounts, all_ready: _, error } = src;
    v1alpha1::ClientMountStatus { mounts: mounts.clone(), error: error.as_ref().map(adapt::error_down) }
}

// ---- Computes ----

pub(super) fn computes_spec_up(src: &v1alpha1::ComputesSpec) -> hub::ComputesSpec {
    let v1alpha1::ComputesSpec { data } = src;
    hub::ComputesSpec { data: data.clone() }
}

pub(super) fn computes_spec_down(src: &hub::ComputesSpec) -> v1alpha1::ComputesSpec {
    let hub::ComputesSpec { data } = src;
    v1alpha1::ComputesSpec { data: data.clone() }
}

// ---- DirectiveBreakdown ----

pub(super) fn directive_breakdown_spec_up(src: &v1alpha1::DirectiveBreakdownSpec) -> hub::DirectiveBreakdownSpec {
    let v1alpha1::DirectiveBreakdownSpec { directive, user_id } = src;
    hub::DirectiveBreakdownSpec { directive: directive.clone(), user_id: *user_id }
}

pub(super) fn directive_breakdown_spec_down(src: &hub::DirectiveBreakdownSpec) -> v1alpha1::DirectiveBreakdownSpec {
    let hub::DirectiveBreakdownSpec { directive, user_id } = src;
    v1alpha1::DirectiveBreakdownSpec { directive: directive.clone(), user_id: *user_id }
}

pub(super) fn directive_breakdown_status_up(
    src: &v1alpha1::DirectiveBreakdownStatus,
) -> hub::DirectiveBreakdownStatus {
    let v1alpha1::DirectiveBreakdownStatus { ready, requires, storage, error: _ } = src;
    hub::DirectiveBreakdownStatus {
        ready: *ready,
        requires: requires.clone(),
        storage: storage.clone(),
        // restored by adapter
        error: None,
    }
}

pub(super) fn directive_breakdown_status_down(
    src: &hub::DirectiveBreakdownStatus,
) -> v1alpha1::DirectiveBreakdownStatus {
    let hub::DirectiveBreakdownStatus { ready, requires, storage, error } = src;
    v1alpha1::DirectiveBreakdownStatus {
        ready: *ready,
        requires: requires.clone(),
        storage: storage.clone(),
        error: error.as_ref().map(adapt::error_down),
    }
}

// ---- PersistentStorageInstance ----

pub(super) fn psi_spec_up(src: &v1alpha1::PersistentStorageInstanceSpec) -> hub::PersistentStorageInstanceSpec {
    let v1alpha1::PersistentStorageInstanceSpec { name, fs_type, dw_directive, user_id, state, consumer_references } =
        src;
    hub::PersistentStorageInstanceSpec {
        name: name.clone(),
        fs_type: fs_type.clone(),
        dw_directive: dw_directive.clone(),
        user_id: *user_id,
        state: *state,
        consumer_references: consumer_references.clone(),
    }
}

pub(super) fn psi_spec_down(src: &hub::PersistentStorageInstanceSpec) -> v1alpha1::PersistentStorageInstanceSpec {
    let hub::PersistentStorageInstanceSpec { name, fs_type, dw_directive, user_id, state, consumer_references } = src;
    v1alpha1::PersistentStorageInstanceSpec {
        name: name.clone(),
        fs_type: fs_type.clone(),
        dw_directive: dw_directive.clone(),
        user_id: *user_id,
        state: *state,
        consumer_references: consumer_references.clone(),
    }
}

pub(super) fn psi_status_up(
    src: &v1alpha1::PersistentStorageInstanceStatus,
) -> hub::PersistentStorageInstanceStatus {
    let v1alpha1::PersistentStorageInstanceStatus { servers, state, ready, error: _ } = src;
    hub::PersistentStorageInstanceStatus {
        servers: servers.clone(),
        state: *state,
        ready: *ready,
        // restored by adapter
        error: None,
    }
}

pub(super) fn psi_status_down(
    src: &hub::PersistentStorageInstanceStatus,
) -> v1alpha1::PersistentStorageInstanceStatus {
    let hub::PersistentStorageInstanceStatus { servers, state, ready, error } = src;
    v1alpha1::PersistentStorageInstanceStatus {
        servers: servers.clone(),
        state: *state,
        ready: *ready,
        error: error.as_ref().map(adapt::error_down),
    }
}

// ---- Servers ----

pub(super) fn servers_spec_up(src: &v1alpha1::ServersSpec) -> hub::ServersSpec {
    let v1alpha1::ServersSpec { allocation_sets } = src;
    hub::ServersSpec { allocation_sets: allocation_sets.clone() }
}

pub(super) fn servers_spec_down(src: &hub::ServersSpec) -> v1alpha1::ServersSpec {
    let hub::ServersSpec { allocation_sets } = src;
    v1alpha1::ServersSpec { allocation_sets: allocation_sets.clone() }
}

pub(super) fn servers_status_up(src: &v1alpha1::ServersStatus) -> hub::ServersStatus {
    let v1alpha1::ServersStatus { ready, allocation_sets } = src;
    hub::ServersStatus {
        ready: *ready,
        allocation_sets: allocation_sets.clone(),
        // restored by adapter
        error: None,
    }
}

pub(super) fn servers_status_down(src: &hub::ServersStatus) -> v1alpha1::ServersStatus {
    let hub::ServersStatus { ready, allocation_sets, error: _ } = src;
    v1alpha1::ServersStatus { ready: *ready, allocation_sets: allocation_sets.clone() }
}

// ---- Storage ----

pub(super) fn storage_spec_up(src: &v1alpha1::StorageSpec) -> hub::StorageSpec {
    let v1alpha1::StorageSpec { state } = src;
    hub::StorageSpec {
        state: *state,
        // restored by adapter
        mode: hub::StorageMode::Live,
    }
}

pub(super) fn storage_spec_down(src: &hub::StorageSpec) -> v1alpha1::StorageSpec {
    let hub::StorageSpec { state, mode: _ } = src;
    v1alpha1::StorageSpec { state: *state }
}

// ---- SystemConfiguration ----

pub(super) fn system_configuration_spec_up(
    src: &v1alpha1::SystemConfigurationSpec,
) -> hub::SystemConfigurationSpec {
    let v1alpha1::SystemConfigurationSpec { compute_nodes: _, storage_nodes, ports } = src;
    hub::SystemConfigurationSpec {
        storage_nodes: storage_nodes.clone(),
        // restored by adapter
        external_compute_nodes: Vec::new(),
        ports: ports.clone(),
        ports_cooldown_in_seconds: dws_api::DEFAULT_PORTS_COOLDOWN_SECS,
    }
}

pub(super) fn system_configuration_spec_down(
    src: &hub::SystemConfigurationSpec,
) -> v1alpha1::SystemConfigurationSpec {
    let hub::SystemConfigurationSpec {
        storage_nodes,
        external_compute_nodes: _,
        ports,
        ports_cooldown_in_seconds: _,
    } = src;
    v1alpha1::SystemConfigurationSpec {
        compute_nodes: src
            .all_computes()
            .into_iter()
            .map(|name| v1alpha1::SystemConfigurationComputeNode { name: name.to_string() })
            .collect(),
        storage_nodes: storage_nodes.clone(),
        ports: ports.clone(),
    }
}

// ---- Workflow ----

pub(super) fn workflow_spec_up(src: &v1alpha1::WorkflowSpec) -> hub::WorkflowSpec {
    let v1alpha1::WorkflowSpec { desired_state, wlm_id, job_id, user_id, group_id, dw_directives } = src;
    hub::WorkflowSpec {
        desired_state: *desired_state,
        wlm_id: wlm_id.clone(),
        job_id: IntOrString::Int(*job_id),
        user_id: *user_id,
        group_id: *group_id,
        // restored by adapter
        hurry: false,
        dw_directives: dw_directives.clone(),
    }
}

pub(super) fn workflow_spec_down(src: &hub::WorkflowSpec) -> crate::Result<v1alpha1::WorkflowSpec> {
    let hub::WorkflowSpec { desired_state, wlm_id, job_id, user_id, group_id, hurry: _, dw_directives } = src;
    Ok(v1alpha1::WorkflowSpec {
        desired_state: *desired_state,
        wlm_id: wlm_id.clone(),
        job_id: adapt::job_id_to_int(job_id)?,
        user_id: *user_id,
        group_id: *group_id,
        dw_directives: dw_directives.clone(),
    })
}
