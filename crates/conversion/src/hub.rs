//! The hub side of every conversion.

use dws_api::hub;
use dws_core::ResourceKind;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::Resource;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A canonical (`v1alpha3`) resource. Spokes convert to and from exactly one
/// `Hub` type; the hub itself never converts.
pub trait Hub: Resource<DynamicType = ()> + Clone + Serialize + DeserializeOwned {
    type Spec: Clone + Serialize + DeserializeOwned;
    type Status: Clone + Serialize + DeserializeOwned;

    const RESOURCE: ResourceKind;

    /// Hub size grows with the installation. Conversion data for these kinds is
    /// not written in production.
    const UNBOUNDED: bool = false;

    fn split(&self) -> (&Self::Spec, Option<&Self::Status>);

    fn join(metadata: ObjectMeta, spec: Self::Spec, status: Option<Self::Status>) -> Self;
}

macro_rules! impl_hub {
    ($kind:ident, $spec:ident, $status:ident $(, unbounded = $unbounded:expr)?) => {
        impl Hub for hub::$kind {
            type Spec = hub::$spec;
            type Status = hub::$status;

            const RESOURCE: ResourceKind = ResourceKind::$kind;
            $(const UNBOUNDED: bool = $unbounded;)?

            fn split(&self) -> (&Self::Spec, Option<&Self::Status>) { (&self.spec, self.status.as_ref()) }

            fn join(metadata: ObjectMeta, spec: Self::Spec, status: Option<Self::Status>) -> Self {
                let mut obj = hub::$kind::new("", spec);
                obj.metadata = metadata;
                obj.status = status;
                obj
            }
        }
    };
}

impl_hub!(ClientMount, ClientMountSpec, ClientMountStatus);
impl_hub!(DirectiveBreakdown, DirectiveBreakdownSpec, DirectiveBreakdownStatus);
impl_hub!(PersistentStorageInstance, PersistentStorageInstanceSpec, PersistentStorageInstanceStatus);
impl_hub!(Servers, ServersSpec, ServersStatus);
impl_hub!(Storage, StorageSpec, StorageStatus);
impl_hub!(SystemConfiguration, SystemConfigurationSpec, SystemConfigurationStatus, unbounded = true);
impl_hub!(Workflow, WorkflowSpec, WorkflowStatus);

// Computes has no status subresource.
impl Hub for hub::Computes {
    type Spec = hub::ComputesSpec;
    type Status = ();

    const RESOURCE: ResourceKind = ResourceKind::Computes;

    fn split(&self) -> (&Self::Spec, Option<&Self::Status>) { (&self.spec, None) }

    fn join(metadata: ObjectMeta, spec: Self::Spec, _status: Option<()>) -> Self {
        let mut obj = hub::Computes::new("", spec);
        obj.metadata = metadata;
        obj
    }
}
