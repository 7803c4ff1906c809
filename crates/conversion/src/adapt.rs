//! Semantic adapters for fields whose meaning or shape changed between
//! representations.

use dws_api::{hub, v1alpha1};
use dws_core::{ResourceErrorInfo, ResourceErrorSeverity, ResourceErrorType};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use crate::{ConversionError, Result};

/// Collapse the hub error model onto the boolean one.
pub(crate) fn error_down(err: &ResourceErrorInfo) -> v1alpha1::ResourceErrorInfo {
    let ResourceErrorInfo { user_message, debug_message, error_type: _, severity: _ } = err;
    v1alpha1::ResourceErrorInfo {
        user_message: user_message.clone(),
        debug_message: debug_message.clone(),
        recoverable: err.is_recoverable(),
    }
}

/// Rebuild a hub error from the boolean model.
///
/// Without a restored hub error, severity is Minor or Fatal by the flag and the
/// type is Internal. With one, type and severity come from it. A spoke that
/// says unrecoverable always ends up Fatal.
pub(crate) fn error_up(
    src: Option<&v1alpha1::ResourceErrorInfo>,
    restored: Option<&ResourceErrorInfo>,
) -> Option<ResourceErrorInfo> {
    let v1alpha1::ResourceErrorInfo { user_message, debug_message, recoverable } = src?;
    let (error_type, mut severity) = match restored {
        Some(r) => (r.error_type, r.severity),
        None if *recoverable => (ResourceErrorType::Internal, ResourceErrorSeverity::Minor),
        None => (ResourceErrorType::Internal, ResourceErrorSeverity::Fatal),
    };
    if !*recoverable {
        severity = ResourceErrorSeverity::Fatal;
    }
    Some(ResourceErrorInfo {
        user_message: user_message.clone(),
        debug_message: debug_message.clone(),
        error_type,
        severity,
    })
}

/// Rollup of per-mount ready flags; true for no mounts.
pub(crate) fn all_ready(mounts: &[hub::ClientMountInfoStatus]) -> bool { mounts.iter().all(|m| m.ready) }

/// Put back the per-mount ownership fields the spoke cannot carry. Entries are
/// matched by position and must agree on the mount path.
pub(crate) fn restore_mount_permissions(mounts: &mut [hub::ClientMountInfo], restored: &[hub::ClientMountInfo]) {
    for (mount, prev) in mounts.iter_mut().zip(restored) {
        if mount.mount_path == prev.mount_path {
            mount.user_id = prev.user_id;
            mount.group_id = prev.group_id;
            mount.set_permissions = prev.set_permissions;
        }
    }
}

/// Narrow a job identifier to the plain integer older representations store.
pub(crate) fn job_id_to_int(job_id: &IntOrString) -> Result<i32> {
    match job_id {
        IntOrString::Int(n) => Ok(*n),
        IntOrString::String(s) => s.parse::<i32>().map_err(|e| ConversionError::Translation {
            kind: "Workflow",
            field: "spec.jobID",
            reason: format!("{:?} is not a 32-bit integer: {}", s, e),
        }),
    }
}
