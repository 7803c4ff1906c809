//! `v1alpha2` <-> hub. Only ClientMount and SystemConfiguration need adapters;
//! everything else is a straight copy plus the snapshot.

mod fields;

use dws_api::{hub, v1alpha2, DEFAULT_PORTS_COOLDOWN_SECS};

use crate::adapt;
use crate::annotation::unmarshal_data;
use crate::hub::Hub;
use crate::{ConvertContext, Convertible, Result};

const VERSION: &str = "v1alpha2";

macro_rules! mechanical {
    ($kind:ident, $spec_up:path, $spec_down:path) => {
        impl Convertible for v1alpha2::$kind {
            type Hub = hub::$kind;
            const KIND: &'static str = stringify!($kind);

            fn up(&mut self, cx: &ConvertContext) -> Result<hub::$kind> {
                cx.log_up(self);
                unmarshal_data::<hub::$kind>(&mut self.metadata)?;
                Ok(hub::$kind::join(self.metadata.clone(), $spec_up(&self.spec), self.status.clone()))
            }

            fn down(hub: &hub::$kind, cx: &ConvertContext) -> Result<Self> {
                cx.log_down(hub, VERSION);
                let mut dst = v1alpha2::$kind::new("", $spec_down(&hub.spec));
                dst.metadata = hub.metadata.clone();
                dst.status = hub.status.clone();
                cx.preserve(hub, &mut dst.metadata)?;
                Ok(dst)
            }
        }
    };
}

mechanical!(DirectiveBreakdown, fields::directive_breakdown_spec_up, fields::directive_breakdown_spec_down);
mechanical!(PersistentStorageInstance, fields::psi_spec_up, fields::psi_spec_down);
mechanical!(Servers, fields::servers_spec_up, fields::servers_spec_down);
mechanical!(Storage, fields::storage_spec_up, fields::storage_spec_down);
mechanical!(Workflow, fields::workflow_spec_up, fields::workflow_spec_down);

impl Convertible for v1alpha2::Computes {
    type Hub = hub::Computes;
    const KIND: &'static str = "Computes";

    fn up(&mut self, cx: &ConvertContext) -> Result<hub::Computes> {
        cx.log_up(self);
        unmarshal_data::<hub::Computes>(&mut self.metadata)?;
        Ok(hub::Computes::join(self.metadata.clone(), fields::computes_spec_up(&self.spec), None))
    }

    fn down(hub: &hub::Computes, cx: &ConvertContext) -> Result<Self> {
        cx.log_down(hub, VERSION);
        let mut dst = v1alpha2::Computes::new("", fields::computes_spec_down(&hub.spec));
        dst.metadata = hub.metadata.clone();
        cx.preserve(hub, &mut dst.metadata)?;
        Ok(dst)
    }
}

impl Convertible for v1alpha2::ClientMount {
    type Hub = hub::ClientMount;
    const KIND: &'static str = "ClientMount";

    fn up(&mut self, cx: &ConvertContext) -> Result<hub::ClientMount> {
        cx.log_up(self);
        let restored = unmarshal_data::<hub::ClientMount>(&mut self.metadata)?;
        let restored_status = restored.as_ref().and_then(|r| r.status.as_ref());

        let status = self.status.as_ref().map(|src| {
            let mut status = fields::client_mount_status_up(src);
            status.all_ready = restored_status.map_or_else(|| adapt::all_ready(&status.mounts), |r| r.all_ready);
            status
        });
        Ok(hub::ClientMount::join(self.metadata.clone(), fields::client_mount_spec_up(&self.spec), status))
    }

    fn down(hub: &hub::ClientMount, cx: &ConvertContext) -> Result<Self> {
        cx.log_down(hub, VERSION);
        let mut dst = v1alpha2::ClientMount::new("", fields::client_mount_spec_down(&hub.spec));
        dst.metadata = hub.metadata.clone();
        dst.status = hub.status.as_ref().map(fields::client_mount_status_down);
        cx.preserve(hub, &mut dst.metadata)?;
        Ok(dst)
    }
}

impl Convertible for v1alpha2::SystemConfiguration {
    type Hub = hub::SystemConfiguration;
    const KIND: &'static str = "SystemConfiguration";

    fn up(&mut self, cx: &ConvertContext) -> Result<hub::SystemConfiguration> {
        cx.log_up(self);
        let restored = unmarshal_data::<hub::SystemConfiguration>(&mut self.metadata)?;

        let mut spec = fields::system_configuration_spec_up(&self.spec);
        spec.ports_cooldown_in_seconds =
            restored.map_or(DEFAULT_PORTS_COOLDOWN_SECS, |r| r.spec.ports_cooldown_in_seconds);
        Ok(hub::SystemConfiguration::join(self.metadata.clone(), spec, self.status.clone()))
    }

    fn down(hub: &hub::SystemConfiguration, cx: &ConvertContext) -> Result<Self> {
        cx.log_down(hub, VERSION);
        let mut dst = v1alpha2::SystemConfiguration::new("", fields::system_configuration_spec_down(&hub.spec));
        dst.metadata = hub.metadata.clone();
        dst.status = hub.status.clone();
        cx.preserve(hub, &mut dst.metadata)?;
        Ok(dst)
    }
}
