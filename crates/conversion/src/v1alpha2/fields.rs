//! Field-for-field copies between `v1alpha2` and the hub. Status types that
//! did not change are shared and cloned as a whole.

use dws_api::{hub, v1alpha2};

pub(super) fn client_mount_spec_up(src: &v1alpha2::ClientMountSpec) -> hub::ClientMountSpec {
    let v1alpha2::ClientMountSpec { node, desired_state, mounts } = src;
    hub::ClientMountSpec { node: node.clone(), desired_state: *desired_state, mounts: mounts.clone() }
}

pub(super) fn client_mount_spec_down(src: &hub::ClientMountSpec) -> v1alpha2::ClientMountSpec {
    let hub::ClientMountSpec { node, desired_state, mounts } = src;
    v1alpha2::ClientMountSpec { node: node.clone(), desired_state: *desired_state, mounts: mounts.clone() }
}

pub(super) fn client_mount_status_up(src: &v1alpha2::ClientMountStatus) -> hub::ClientMountStatus {
    let v1alpha2::ClientMountStatus { mounts, error } = src;
    hub::ClientMountStatus {
        mounts: mounts.clone(),
        // restored by adapter
        all_ready: false,
        error: error.clone(),
    }
}

pub(super) fn client_mount_status_down(src: &hub::ClientMountStatus) -> v1alpha2::ClientMountStatus {
    let hub::ClientMountStatus { mounts, all_ready: _, error } = src;
    v1alpha2::ClientMountStatus { mounts: mounts.clone(), error: error.clone() }
}

pub(super) fn computes_spec_up(src: &v1alpha2::ComputesSpec) -> hub::ComputesSpec {
    let v1alpha2::ComputesSpec { data } = src;
    hub::ComputesSpec { data: data.clone() }
}

pub(super) fn computes_spec_down(src: &hub::ComputesSpec) -> v1alpha2::ComputesSpec {
    let hub::ComputesSpec { data } = src;
    v1alpha2::ComputesSpec { data: data.clone() }
}

pub(super) fn directive_breakdown_spec_up(src: &v1alpha2::DirectiveBreakdownSpec) -> hub::DirectiveBreakdownSpec {
    let v1alpha2::DirectiveBreakdownSpec { directive, user_id } = src;
    hub::DirectiveBreakdownSpec { directive: directive.clone(), user_id: *user_id }
}

pub(super) fn directive_breakdown_spec_down(src: &hub::DirectiveBreakdownSpec) -> v1alpha2::DirectiveBreakdownSpec {
    let hub::DirectiveBreakdownSpec { directive, user_id } = src;
    v1alpha2::DirectiveBreakdownSpec { directive: directive.clone(), user_id: *user_id }
}

pub(super) fn psi_spec_up(src: &v1alpha2::PersistentStorageInstanceSpec) -> hub::PersistentStorageInstanceSpec {
    let v1alpha2::PersistentStorageInstanceSpec { name, fs_type, dw_directive, user_id, state, consumer_references } =
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

pub(super) fn psi_spec_down(src: &hub::PersistentStorageInstanceSpec) -> v1alpha2::PersistentStorageInstanceSpec {
    let hub::PersistentStorageInstanceSpec { name, fs_type, dw_directive, user_id, state, consumer_references } = src;
    v1alpha2::PersistentStorageInstanceSpec {
        name: name.clone(),
        fs_type: fs_type.clone(),
        dw_directive: dw_directive.clone(),
        user_id: *user_id,
        state: *state,
        consumer_references: consumer_references.clone(),
    }
}

pub(super) fn servers_spec_up(src: &v1alpha2::ServersSpec) -> hub::ServersSpec {
    let v1alpha2::ServersSpec { allocation_sets } = src;
    hub::ServersSpec { allocation_sets: allocation_sets.clone() }
}

pub(super) fn servers_spec_down(src: &hub::ServersSpec) -> v1alpha2::ServersSpec {
    let hub::ServersSpec { allocation_sets } = src;
    v1alpha2::ServersSpec { allocation_sets: allocation_sets.clone() }
}

pub(super) fn storage_spec_up(src: &v1alpha2::StorageSpec) -> hub::StorageSpec {
    let v1alpha2::StorageSpec { state, mode } = src;
    hub::StorageSpec { state: *state, mode: *mode }
}

pub(super) fn storage_spec_down(src: &hub::StorageSpec) -> v1alpha2::StorageSpec {
    let hub::StorageSpec { state, mode } = src;
    v1alpha2::StorageSpec { state: *state, mode: *mode }
}

pub(super) fn system_configuration_spec_up(
    src: &v1alpha2::SystemConfigurationSpec,
) -> hub::SystemConfigurationSpec {
    let v1alpha2::SystemConfigurationSpec { storage_nodes, external_compute_nodes, ports } = src;
    hub::SystemConfigurationSpec {
        storage_nodes: storage_nodes.clone(),
        external_compute_nodes: external_compute_nodes.clone(),
        ports: ports.clone(),
        // restored by adapter
        ports_cooldown_in_seconds: dws_api::DEFAULT_PORTS_COOLDOWN_SECS,
    }
}

pub(super) fn system_configuration_spec_down(
    src: &hub::SystemConfigurationSpec,
) -> v1alpha2::SystemConfigurationSpec {
    let hub::SystemConfigurationSpec { storage_nodes, external_compute_nodes, ports, ports_cooldown_in_seconds: _ } =
        src;
    v1alpha2::SystemConfigurationSpec {
        storage_nodes: storage_nodes.clone(),
        external_compute_nodes: external_compute_nodes.clone(),
        ports: ports.clone(),
    }
}

pub(super) fn workflow_spec_up(src: &v1alpha2::WorkflowSpec) -> hub::WorkflowSpec {
    let v1alpha2::WorkflowSpec { desired_state, wlm_id, job_id, user_id, group_id, hurry, dw_directives } = src;
    hub::WorkflowSpec {
        desired_state: *desired_state,
        wlm_id: wlm_id.clone(),
        job_id: job_id.clone(),
        user_id: *user_id,
        group_id: *group_id,
        hurry: *hurry,
        dw_directives: dw_directives.clone(),
    }
}

pub(super) fn workflow_spec_down(src: &hub::WorkflowSpec) -> v1alpha2::WorkflowSpec {
    let hub::WorkflowSpec { desired_state, wlm_id, job_id, user_id, group_id, hurry, dw_directives } = src;
    v1alpha2::WorkflowSpec {
        desired_state: *desired_state,
        wlm_id: wlm_id.clone(),
        job_id: job_id.clone(),
        user_id: *user_id,
        group_id: *group_id,
        hurry: *hurry,
        dw_directives: dw_directives.clone(),
    }
}
