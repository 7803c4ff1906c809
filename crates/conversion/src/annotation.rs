//! Round-trip codec: the hub snapshot carried on down-converted objects.
//!
//! The snapshot holds the hub's `apiVersion`, `kind`, `spec` and `status` as
//! JSON under [`DATA_ANNOTATION`]. Metadata is never included; the spoke object
//! already carries it.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use metrics::histogram;
use serde::{Deserialize, Serialize};

use crate::hub::Hub;
use crate::{ConversionError, Result};

/// Reserved annotation key. Nothing but the codec reads or writes it.
pub const DATA_ANNOTATION: &str = "dataworkflowservices.github.io/conversion-data";

/// Wire shape of the annotation value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<S, T> {
    pub api_version: String,
    pub kind: String,
    pub spec: S,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<T>,
}

/// Store `hub` under the reserved key of `meta`, keeping other annotations.
pub fn marshal_data<H: Hub>(hub: &H, meta: &mut ObjectMeta) -> Result<()> {
    let kind = H::RESOURCE.as_str();
    let (spec, status) = hub.split();
    let snapshot = Snapshot {
        api_version: H::api_version(&()).into_owned(),
        kind: kind.to_string(),
        spec,
        status,
    };
    let data = serde_json::to_string(&snapshot).map_err(|source| ConversionError::Encode { kind, source })?;
    histogram!("conversion_annotation_bytes", data.len() as f64, "kind" => kind);
    meta.annotations.get_or_insert_with(BTreeMap::new).insert(DATA_ANNOTATION.to_string(), data);
    Ok(())
}

/// Recover the hub snapshot stored on `meta`, if any.
///
/// `Ok(None)` is the normal case for objects that never went through a down
/// conversion. The reserved key is removed only once the payload parsed; an
/// annotation map left empty is dropped, so an empty map and an absent one
/// read back the same, as the API server treats them. The returned hub has
/// empty metadata.
pub fn unmarshal_data<H: Hub>(meta: &mut ObjectMeta) -> Result<Option<H>> {
    let kind = H::RESOURCE.as_str();
    let snapshot: Snapshot<H::Spec, H::Status> =
        match meta.annotations.as_ref().and_then(|a| a.get(DATA_ANNOTATION)) {
            None => return Ok(None),
            Some(data) => serde_json::from_str(data).map_err(|source| ConversionError::Decode { kind, source })?,
        };
    if snapshot.kind != kind {
        return Err(ConversionError::SnapshotKind { expected: kind, found: snapshot.kind });
    }

    if let Some(annotations) = meta.annotations.as_mut() {
        annotations.remove(DATA_ANNOTATION);
        if annotations.is_empty() {
            meta.annotations = None;
        }
    }
    Ok(Some(H::join(ObjectMeta::default(), snapshot.spec, snapshot.status)))
}
