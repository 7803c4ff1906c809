//! Collections never convert. A snapshot annotation describes one object, and
//! there is no single object to hang it on.

use dws_api::{hub, v1alpha1, v1alpha2};
use kube::core::ObjectList;

use crate::{ConversionError, ConvertContext, Convertible, Result};

macro_rules! unsupported_list {
    ($($spoke:ident :: $kind:ident),* $(,)?) => {$(
        impl Convertible for ObjectList<$spoke::$kind> {
            type Hub = ObjectList<hub::$kind>;
            const KIND: &'static str = concat!(stringify!($kind), "List");

            fn up(&mut self, _cx: &ConvertContext) -> Result<Self::Hub> {
                Err(ConversionError::not_supported(Self::KIND, "ConvertTo"))
            }

            fn down(_hub: &Self::Hub, _cx: &ConvertContext) -> Result<Self> {
                Err(ConversionError::not_supported(Self::KIND, "ConvertFrom"))
            }
        }
    )*};
}

unsupported_list!(
    v1alpha1::ClientMount,
    v1alpha1::Computes,
    v1alpha1::DirectiveBreakdown,
    v1alpha1::PersistentStorageInstance,
    v1alpha1::Servers,
    v1alpha1::Storage,
    v1alpha1::SystemConfiguration,
    v1alpha1::Workflow,
    v1alpha2::ClientMount,
    v1alpha2::Computes,
    v1alpha2::DirectiveBreakdown,
    v1alpha2::PersistentStorageInstance,
    v1alpha2::Servers,
    v1alpha2::Storage,
    v1alpha2::SystemConfiguration,
    v1alpha2::Workflow,
);
