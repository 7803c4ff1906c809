//! Conversion of untyped objects, keyed by `apiVersion` and `kind`.
//!
//! This is the entry point for callers holding raw JSON, such as a resource
//! store answering a read in a representation other than the stored one.

use dws_api::{hub, v1alpha1, v1alpha2};
use dws_core::{ResourceKind, Version};
use kube::Resource;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as Json;
use tracing::debug;

use crate::hub::Hub;
use crate::{down, up, ConversionError, ConvertContext, Convertible, Result};

fn type_field<'a>(obj: &'a Json, field: &str) -> Result<&'a str> {
    obj.get(field)
        .and_then(Json::as_str)
        .ok_or_else(|| ConversionError::Malformed(format!("missing {}", field)))
}

/// Convert `obj` to `desired_api_version`. The object comes back untouched when
/// it is already in that representation.
pub fn convert_object(obj: Json, desired_api_version: &str, cx: &ConvertContext) -> Result<Json> {
    let source: Version = type_field(&obj, "apiVersion")?.parse()?;
    let target: Version = desired_api_version.parse()?;
    let kind = type_field(&obj, "kind")?;

    if ResourceKind::parse_collection(kind).is_some() {
        let method = if source.is_hub() { "ConvertFrom" } else { "ConvertTo" };
        return Err(ConversionError::not_supported(kind, method));
    }
    let kind: ResourceKind = kind.parse()?;
    if source == target {
        debug!(parent: cx.span(), kind = kind.as_str(), version = source.as_str(), "no conversion needed");
        return Ok(obj);
    }

    match kind {
        ResourceKind::ClientMount => {
            convert_kind::<hub::ClientMount, v1alpha1::ClientMount, v1alpha2::ClientMount>(obj, source, target, cx)
        }
        ResourceKind::Computes => {
            convert_kind::<hub::Computes, v1alpha1::Computes, v1alpha2::Computes>(obj, source, target, cx)
        }
        ResourceKind::DirectiveBreakdown => convert_kind::<
            hub::DirectiveBreakdown,
            v1alpha1::DirectiveBreakdown,
            v1alpha2::DirectiveBreakdown,
        >(obj, source, target, cx),
        ResourceKind::PersistentStorageInstance => convert_kind::<
            hub::PersistentStorageInstance,
            v1alpha1::PersistentStorageInstance,
            v1alpha2::PersistentStorageInstance,
        >(obj, source, target, cx),
        ResourceKind::Servers => {
            convert_kind::<hub::Servers, v1alpha1::Servers, v1alpha2::Servers>(obj, source, target, cx)
        }
        ResourceKind::Storage => {
            convert_kind::<hub::Storage, v1alpha1::Storage, v1alpha2::Storage>(obj, source, target, cx)
        }
        ResourceKind::SystemConfiguration => convert_kind::<
            hub::SystemConfiguration,
            v1alpha1::SystemConfiguration,
            v1alpha2::SystemConfiguration,
        >(obj, source, target, cx),
        ResourceKind::Workflow => {
            convert_kind::<hub::Workflow, v1alpha1::Workflow, v1alpha2::Workflow>(obj, source, target, cx)
        }
    }
}

/// Convert a batch. The first failure aborts the whole batch.
pub fn convert_objects(objs: Vec<Json>, desired_api_version: &str, cx: &ConvertContext) -> Result<Vec<Json>> {
    objs.into_iter().map(|obj| convert_object(obj, desired_api_version, cx)).collect()
}

fn convert_kind<H, A, B>(obj: Json, source: Version, target: Version, cx: &ConvertContext) -> Result<Json>
where
    H: Hub,
    A: Convertible<Hub = H> + Resource<DynamicType = ()> + Serialize + DeserializeOwned,
    B: Convertible<Hub = H> + Resource<DynamicType = ()> + Serialize + DeserializeOwned,
{
    let hub: H = match source {
        Version::V1alpha1 => up(&mut decode::<A>(obj)?, cx)?,
        Version::V1alpha2 => up(&mut decode::<B>(obj)?, cx)?,
        Version::V1alpha3 => decode::<H>(obj)?,
    };
    match target {
        Version::V1alpha1 => encode(&down::<A>(&hub, cx)?),
        Version::V1alpha2 => encode(&down::<B>(&hub, cx)?),
        Version::V1alpha3 => encode(&hub),
    }
}

fn decode<K: DeserializeOwned>(obj: Json) -> Result<K> {
    serde_json::from_value(obj).map_err(|e| ConversionError::Malformed(e.to_string()))
}

fn encode<K: Resource<DynamicType = ()> + Serialize>(obj: &K) -> Result<Json> {
    let mut out = serde_json::to_value(obj).map_err(|e| ConversionError::Malformed(e.to_string()))?;
    if let Json::Object(map) = &mut out {
        map.insert("apiVersion".into(), Json::String(K::api_version(&()).into_owned()));
        map.insert("kind".into(), Json::String(K::kind(&()).into_owned()));
    }
    Ok(out)
}
