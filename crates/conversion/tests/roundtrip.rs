#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt::Debug;

use dws_api::{hub, v1alpha1, v1alpha2, DEFAULT_PORTS_COOLDOWN_SECS};
use dws_conversion::prelude::*;
use dws_core::ResourceErrorInfo;
use k8s_openapi::api::core::v1::ObjectReference;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use proptest::prelude::*;

/// up(down(H)) == H and down(up(down(H))) == down(H).
///
/// Generated metadata never holds an empty annotation map: the codec reads an
/// empty map back as absent (see `empty_annotation_map_reads_back_as_absent`).
fn round_trip<S>(hub: &S::Hub) -> std::result::Result<(), TestCaseError>
where
    S: Convertible + Clone + PartialEq + Debug,
    S::Hub: PartialEq + Debug,
{
    let cx = ConvertContext::default();
    let first = down::<S>(hub, &cx).map_err(|e| TestCaseError::fail(e.to_string()))?;
    let mut spoke = first.clone();
    let back = up(&mut spoke, &cx).map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(&back, hub);
    let again = down::<S>(&back, &cx).map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(again, first);
    Ok(())
}

fn meta() -> impl Strategy<Value = ObjectMeta> {
    (
        "[a-z][a-z0-9-]{0,10}",
        prop::option::of(prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,6}", 1..3)),
    )
        .prop_map(|(name, annotations)| ObjectMeta {
            name: Some(name),
            namespace: Some("default".into()),
            annotations,
            ..Default::default()
        })
}

fn error() -> impl Strategy<Value = Option<ResourceErrorInfo>> {
    prop::option::of(("[a-z ]{0,12}", "[a-z ]{0,12}", any::<bool>(), 0..3u8).prop_map(
        |(user, debug, user_type, severity)| {
            let e = ResourceErrorInfo::new(debug).with_user_message(user);
            let e = if user_type { e.with_user() } else { e.with_internal() };
            match severity {
                0 => e.with_minor(),
                1 => e.with_major(),
                _ => e.with_fatal(),
            }
        },
    ))
}

fn reference() -> impl Strategy<Value = Option<ObjectReference>> {
    prop::option::of("[a-z]{1,8}".prop_map(|name| ObjectReference {
        name: Some(name),
        namespace: Some("default".into()),
        kind: Some("Servers".into()),
        ..Default::default()
    }))
}

fn names(max: usize) -> impl Strategy<Value = Vec<String>> { prop::collection::vec("[a-z][a-z0-9]{0,5}", 0..max) }

fn client_mount() -> impl Strategy<Value = hub::ClientMount> {
    let mount = ("/mnt/[a-z]{1,6}", any::<u32>(), any::<u32>(), any::<bool>(), "(lustre|xfs|gfs2)").prop_map(
        |(mount_path, user_id, group_id, set_permissions, mount_type)| hub::ClientMountInfo {
            mount_path,
            user_id,
            group_id,
            set_permissions,
            mount_type,
            ..Default::default()
        },
    );
    let status = (prop::collection::vec(any::<bool>(), 0..4), any::<bool>(), error()).prop_map(
        |(ready, all_ready, error)| hub::ClientMountStatus {
            mounts: ready
                .into_iter()
                .map(|ready| hub::ClientMountInfoStatus { state: hub::ClientMountState::Mounted, ready })
                .collect(),
            all_ready,
            error,
        },
    );
    (meta(), "[a-z0-9-]{1,10}", any::<bool>(), prop::collection::vec(mount, 0..4), prop::option::of(status)).prop_map(
        |(meta, node, mounted, mounts, status)| {
            let desired_state = if mounted { hub::ClientMountState::Mounted } else { hub::ClientMountState::Unmounted };
            hub::ClientMount::join(meta, hub::ClientMountSpec { node, desired_state, mounts }, status)
        },
    )
}

fn computes() -> impl Strategy<Value = hub::Computes> {
    (meta(), names(5)).prop_map(|(meta, data)| {
        let data = data.into_iter().map(|name| hub::ComputesData { name }).collect();
        hub::Computes::join(meta, hub::ComputesSpec { data }, None)
    })
}

fn directive_breakdown() -> impl Strategy<Value = hub::DirectiveBreakdown> {
    let status = (any::<bool>(), names(3), reference(), error()).prop_map(|(ready, requires, storage, error)| {
        hub::DirectiveBreakdownStatus { ready, requires, storage, error }
    });
    (meta(), "#DW [a-z]{1,8} name=[a-z]{1,4}", any::<u32>(), prop::option::of(status)).prop_map(
        |(meta, directive, user_id, status)| {
            hub::DirectiveBreakdown::join(meta, hub::DirectiveBreakdownSpec { directive, user_id }, status)
        },
    )
}

fn persistent_storage_instance() -> impl Strategy<Value = hub::PersistentStorageInstance> {
    let state = prop_oneof![
        Just(hub::PersistentStorageInstanceState::Active),
        Just(hub::PersistentStorageInstanceState::Destroying)
    ];
    let status = (reference(), state.clone(), any::<bool>(), error())
        .prop_map(|(servers, state, ready, error)| hub::PersistentStorageInstanceStatus { servers, state, ready, error });
    (meta(), "[a-z]{1,8}", "(lustre|xfs|gfs2|raw)", any::<u32>(), state, prop::option::of(status)).prop_map(
        |(meta, name, fs_type, user_id, state, status)| {
            let spec = hub::PersistentStorageInstanceSpec {
                dw_directive: format!("#DW create_persistent name={} type={}", name, fs_type),
                name,
                fs_type,
                user_id,
                state,
                consumer_references: vec![],
            };
            hub::PersistentStorageInstance::join(meta, spec, status)
        },
    )
}

fn servers() -> impl Strategy<Value = hub::Servers> {
    let spec_set = ("[a-z]{1,4}", any::<i64>(), prop::collection::vec(("rabbit-[0-9]", 1..16i32), 0..3)).prop_map(
        |(label, allocation_size, storage)| hub::ServersSpecAllocationSet {
            label,
            allocation_size,
            storage: storage
                .into_iter()
                .map(|(name, allocation_count)| hub::ServersSpecStorage { name, allocation_count })
                .collect(),
        },
    );
    let status_set = ("[a-z]{1,4}", prop::collection::btree_map("rabbit-[0-9]", any::<i64>(), 0..3)).prop_map(
        |(label, storage)| hub::ServersStatusAllocationSet {
            label,
            storage: storage
                .into_iter()
                .map(|(name, allocation_size)| (name, hub::ServersStatusStorage { allocation_size }))
                .collect::<BTreeMap<_, _>>(),
        },
    );
    let status = (any::<bool>(), prop::collection::vec(status_set, 0..3), error())
        .prop_map(|(ready, allocation_sets, error)| hub::ServersStatus { ready, allocation_sets, error });
    (meta(), prop::collection::vec(spec_set, 0..3), prop::option::of(status)).prop_map(
        |(meta, allocation_sets, status)| hub::Servers::join(meta, hub::ServersSpec { allocation_sets }, status),
    )
}

fn storage() -> impl Strategy<Value = hub::Storage> {
    let status = ("(Rabbit)?", any::<i64>(), any::<bool>(), "[a-z ]{0,10}").prop_map(
        |(storage_type, capacity, reboot_required, message)| hub::StorageStatus {
            storage_type,
            capacity,
            reboot_required,
            message,
            ..Default::default()
        },
    );
    (meta(), any::<bool>(), any::<bool>(), prop::option::of(status)).prop_map(|(meta, enabled, testing, status)| {
        let spec = hub::StorageSpec {
            state: if enabled { hub::ResourceState::Enabled } else { hub::ResourceState::Disabled },
            mode: if testing { hub::StorageMode::Testing } else { hub::StorageMode::Live },
        };
        hub::Storage::join(meta, spec, status)
    })
}

fn port() -> impl Strategy<Value = IntOrString> {
    prop_oneof![
        (1024..65535i32).prop_map(IntOrString::Int),
        (1024..60000u32).prop_map(|p| IntOrString::String(format!("{}-{}", p, p + 100))),
    ]
}

fn system_configuration() -> impl Strategy<Value = hub::SystemConfiguration> {
    let node = ("rabbit-[0-9]", names(4)).prop_map(|(name, computes)| hub::SystemConfigurationStorageNode {
        node_type: "Rabbit".into(),
        name,
        computes_access: computes
            .into_iter()
            .enumerate()
            .map(|(i, name)| hub::SystemConfigurationComputeNodeReference { name, index: i as i32 })
            .collect(),
    });
    (
        meta(),
        prop::collection::vec(node, 0..3),
        names(3),
        prop::collection::vec(port(), 0..3),
        any::<u32>(),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(meta, storage_nodes, external, ports, cooldown, ready)| {
            let spec = hub::SystemConfigurationSpec {
                storage_nodes,
                external_compute_nodes: external
                    .into_iter()
                    .map(|name| hub::SystemConfigurationExternalComputeNode { name })
                    .collect(),
                ports,
                ports_cooldown_in_seconds: cooldown,
            };
            let status = ready.map(|ready| hub::SystemConfigurationStatus { ready });
            hub::SystemConfiguration::join(meta, spec, status)
        })
}

fn workflow_state() -> impl Strategy<Value = hub::WorkflowState> {
    prop_oneof![
        Just(hub::WorkflowState::Proposal),
        Just(hub::WorkflowState::Setup),
        Just(hub::WorkflowState::DataIn),
        Just(hub::WorkflowState::PreRun),
        Just(hub::WorkflowState::PostRun),
        Just(hub::WorkflowState::DataOut),
        Just(hub::WorkflowState::Teardown),
    ]
}

/// Job IDs a plain integer field can still hold.
fn numeric_job_id() -> impl Strategy<Value = IntOrString> {
    prop_oneof![
        any::<i32>().prop_map(IntOrString::Int),
        any::<i32>().prop_map(|n| IntOrString::String(n.to_string())),
    ]
}

fn workflow() -> impl Strategy<Value = hub::Workflow> {
    let status = (workflow_state(), any::<bool>(), "(DriverWait|Completed)?", prop::collection::btree_map(
        "DW_[A-Z]{1,6}",
        "[a-z/]{0,10}",
        0..3,
    ))
        .prop_map(|(state, ready, status, env)| hub::WorkflowStatus { state, ready, status, env, ..Default::default() });
    (
        meta(),
        workflow_state(),
        "(flux|slurm)",
        numeric_job_id(),
        (any::<u32>(), any::<u32>()),
        any::<bool>(),
        prop::collection::vec("#DW jobdw type=(xfs|lustre) name=[a-z]{1,4}", 0..3),
        prop::option::of(status),
    )
        .prop_map(|(meta, desired_state, wlm_id, job_id, (user_id, group_id), hurry, dw_directives, status)| {
            let spec = hub::WorkflowSpec { desired_state, wlm_id, job_id, user_id, group_id, hurry, dw_directives };
            hub::Workflow::join(meta, spec, status)
        })
}

proptest! {
    #[test]
    fn client_mount_round_trips(hub in client_mount()) {
        round_trip::<v1alpha1::ClientMount>(&hub)?;
        round_trip::<v1alpha2::ClientMount>(&hub)?;
    }

    #[test]
    fn computes_round_trips(hub in computes()) {
        round_trip::<v1alpha1::Computes>(&hub)?;
        round_trip::<v1alpha2::Computes>(&hub)?;
    }

    #[test]
    fn directive_breakdown_round_trips(hub in directive_breakdown()) {
        round_trip::<v1alpha1::DirectiveBreakdown>(&hub)?;
        round_trip::<v1alpha2::DirectiveBreakdown>(&hub)?;
    }

    #[test]
    fn persistent_storage_instance_round_trips(hub in persistent_storage_instance()) {
        round_trip::<v1alpha1::PersistentStorageInstance>(&hub)?;
        round_trip::<v1alpha2::PersistentStorageInstance>(&hub)?;
    }

    #[test]
    fn servers_round_trips(hub in servers()) {
        round_trip::<v1alpha1::Servers>(&hub)?;
        round_trip::<v1alpha2::Servers>(&hub)?;
    }

    #[test]
    fn storage_round_trips(hub in storage()) {
        round_trip::<v1alpha1::Storage>(&hub)?;
        round_trip::<v1alpha2::Storage>(&hub)?;
    }

    #[test]
    fn system_configuration_round_trips(hub in system_configuration()) {
        round_trip::<v1alpha1::SystemConfiguration>(&hub)?;
        round_trip::<v1alpha2::SystemConfiguration>(&hub)?;
    }

    #[test]
    fn workflow_round_trips(hub in workflow()) {
        round_trip::<v1alpha1::Workflow>(&hub)?;
        round_trip::<v1alpha2::Workflow>(&hub)?;
    }

    #[test]
    fn combined_compute_list_is_deterministic(hub in system_configuration()) {
        let cx = ConvertContext::default();
        let a = down::<v1alpha1::SystemConfiguration>(&hub, &cx).unwrap();
        let b = down::<v1alpha1::SystemConfiguration>(&hub.clone(), &cx).unwrap();
        prop_assert_eq!(&a.spec.compute_nodes, &b.spec.compute_nodes);
        let combined: Vec<&str> = a.spec.compute_nodes.iter().map(|c| c.name.as_str()).collect();
        prop_assert_eq!(combined, hub.spec.all_computes());
    }

    /// Production drops the snapshot for SystemConfiguration. Externals that do
    /// not collide with attached computes come back from the combined list; the
    /// cooldown falls back to its default.
    #[test]
    fn production_derives_what_it_can(hub in system_configuration()) {
        let attached = hub.spec.computes();
        let mut seen = std::collections::BTreeSet::new();
        let disjoint = hub.spec.computes_external().iter().all(|n| !attached.contains(n) && seen.insert(*n));
        prop_assume!(disjoint);

        let prod = ConvertContext::new(Environment::Production);
        let mut spoke = down::<v1alpha1::SystemConfiguration>(&hub, &prod).unwrap();
        prop_assert_eq!(&spoke.metadata.annotations, &hub.metadata.annotations);

        let back = up(&mut spoke, &prod).unwrap();
        prop_assert_eq!(&back.spec.external_compute_nodes, &hub.spec.external_compute_nodes);
        prop_assert_eq!(&back.spec.storage_nodes, &hub.spec.storage_nodes);
        prop_assert_eq!(back.spec.ports_cooldown_in_seconds, DEFAULT_PORTS_COOLDOWN_SECS);
    }
}

#[test]
fn production_still_preserves_bounded_kinds() {
    let prod = ConvertContext::new(Environment::Production);
    let mut hub = hub::Storage::join(ObjectMeta::default(), hub::StorageSpec::default(), None);
    hub.spec.mode = hub::StorageMode::Testing;
    let mut spoke = down::<v1alpha1::Storage>(&hub, &prod).unwrap();
    assert_eq!(up(&mut spoke, &prod).unwrap(), hub);
}
