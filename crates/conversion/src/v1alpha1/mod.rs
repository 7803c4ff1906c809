//! `v1alpha1` <-> hub.

mod fields;

use dws_api::{hub, v1alpha1, DEFAULT_PORTS_COOLDOWN_SECS};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use crate::adapt;
use crate::annotation::unmarshal_data;
use crate::hub::Hub;
use crate::{ConvertContext, Convertible, Result};

const VERSION: &str = "v1alpha1";

impl Convertible for v1alpha1::ClientMount {
    type Hub = hub::ClientMount;
    const KIND: &'static str = "ClientMount";

    fn up(&mut self, cx: &ConvertContext) -> Result<hub::ClientMount> {
        cx.log_up(self);
        let restored = unmarshal_data::<hub::ClientMount>(&mut self.metadata)?;
        let restored_status = restored.as_ref().and_then(|r| r.status.as_ref());

        let mut spec = fields::client_mount_spec_up(&self.spec);
        if let Some(r) = &restored {
            adapt::restore_mount_permissions(&mut spec.mounts, &r.spec.mounts);
        }
        let status = self.status.as_ref().map(|src| {
            let mut status = fields::client_mount_status_up(src);
            status.all_ready = restored_status.map_or_else(|| adapt::all_ready(&status.mounts), |r| r.all_ready);
            status.error = adapt::error_up(src.error.as_ref(), restored_status.and_then(|r| r.error.as_ref()));
            status
        });
        Ok(hub::ClientMount::join(self.metadata.clone(), spec, status))
    }

    fn down(hub: &hub::ClientMount, cx: &ConvertContext) -> Result<Self> {
        cx.log_down(hub, VERSION);
        let mut dst = v1alpha1::ClientMount::new("", fields::client_mount_spec_down(&hub.spec));
        dst.metadata = hub.metadata.clone();
        dst.status = hub.status.as_ref().map(fields::client_mount_status_down);
        cx.preserve(hub, &mut dst.metadata)?;
        Ok(dst)
    }
}

impl Convertible for v1alpha1::Computes {
    type Hub = hub::Computes;
    const KIND: &'static str = "Computes";

    fn up(&mut self, cx: &ConvertContext) -> Result<hub::Computes> {
        cx.log_up(self);
        // Nothing hub-only to restore; the snapshot is consumed so it cannot leak.
        unmarshal_data::<hub::Computes>(&mut self.metadata)?;
        Ok(hub::Computes::join(self.metadata.clone(), fields::computes_spec_up(&self.spec), None))
    }

    fn down(hub: &hub::Computes, cx: &ConvertContext) -> Result<Self> {
        cx.log_down(hub, VERSION);
        let mut dst = v1alpha1::Computes::new("", fields::computes_spec_down(&hub.spec));
        dst.metadata = hub.metadata.clone();
        cx.preserve(hub, &mut dst.metadata)?;
        Ok(dst)
    }
}

impl Convertible for v1alpha1::DirectiveBreakdown {
    type Hub = hub::DirectiveBreakdown;
    const KIND: &'static str = "DirectiveBreakdown";

    fn up(&mut self, cx: &ConvertContext) -> Result<hub::DirectiveBreakdown> {
        cx.log_up(self);
        let restored = unmarshal_data::<hub::DirectiveBreakdown>(&mut self.metadata)?;
        let restored_error = restored.as_ref().and_then(|r| r.status.as_ref()).and_then(|s| s.error.as_ref());

        let status = self.status.as_ref().map(|src| {
            let mut status = fields::directive_breakdown_status_up(src);
            status.error = adapt::error_up(src.error.as_ref(), restored_error);
            status
        });
        Ok(hub::DirectiveBreakdown::join(
            self.metadata.clone(),
            fields::directive_breakdown_spec_up(&self.spec),
            status,
        ))
    }

    fn down(hub: &hub::DirectiveBreakdown, cx: &ConvertContext) -> Result<Self> {
        cx.log_down(hub, VERSION);
        let mut dst = v1alpha1::DirectiveBreakdown::new("", fields::directive_breakdown_spec_down(&hub.spec));
        dst.metadata = hub.metadata.clone();
        dst.status = hub.status.as_ref().map(fields::directive_breakdown_status_down);
        cx.preserve(hub, &mut dst.metadata)?;
        Ok(dst)
    }
}

impl Convertible for v1alpha1::PersistentStorageInstance {
    type Hub = hub::PersistentStorageInstance;
    const KIND: &'static str = "PersistentStorageInstance";

    fn up(&mut self, cx: &ConvertContext) -> Result<hub::PersistentStorageInstance> {
        cx.log_up(self);
        let restored = unmarshal_data::<hub::PersistentStorageInstance>(&mut self.metadata)?;
        let restored_error = restored.as_ref().and_then(|r| r.status.as_ref()).and_then(|s| s.error.as_ref());

        let status = self.status.as_ref().map(|src| {
            let mut status = fields::psi_status_up(src);
            status.error = adapt::error_up(src.error.as_ref(), restored_error);
            status
        });
        Ok(hub::PersistentStorageInstance::join(self.metadata.clone(), fields::psi_spec_up(&self.spec), status))
    }

    fn down(hub: &hub::PersistentStorageInstance, cx: &ConvertContext) -> Result<Self> {
        cx.log_down(hub, VERSION);
        let mut dst = v1alpha1::PersistentStorageInstance::new("", fields::psi_spec_down(&hub.spec));
        dst.metadata = hub.metadata.clone();
        dst.status = hub.status.as_ref().map(fields::psi_status_down);
        cx.preserve(hub, &mut dst.metadata)?;
        Ok(dst)
    }
}

impl Convertible for v1alpha1::Servers {
    type Hub = hub::Servers;
    const KIND: &'static str = "Servers";

    fn up(&mut self, cx: &ConvertContext) -> Result<hub::Servers> {
        cx.log_up(self);
        let restored = unmarshal_data::<hub::Servers>(&mut self.metadata)?;

        // No error model at all here, so only a snapshot can bring one back.
        let status = self.status.as_ref().map(|src| {
            let mut status = fields::servers_status_up(src);
            status.error = restored.as_ref().and_then(|r| r.status.as_ref()).and_then(|s| s.error.clone());
            status
        });
        Ok(hub::Servers::join(self.metadata.clone(), fields::servers_spec_up(&self.spec), status))
    }

    fn down(hub: &hub::Servers, cx: &ConvertContext) -> Result<Self> {
        cx.log_down(hub, VERSION);
        let mut dst = v1alpha1::Servers::new("", fields::servers_spec_down(&hub.spec));
        dst.metadata = hub.metadata.clone();
        dst.status = hub.status.as_ref().map(fields::servers_status_down);
        cx.preserve(hub, &mut dst.metadata)?;
        Ok(dst)
    }
}

impl Convertible for v1alpha1::Storage {
    type Hub = hub::Storage;
    const KIND: &'static str = "Storage";

    fn up(&mut self, cx: &ConvertContext) -> Result<hub::Storage> {
        cx.log_up(self);
        let restored = unmarshal_data::<hub::Storage>(&mut self.metadata)?;

        let mut spec = fields::storage_spec_up(&self.spec);
        if let Some(r) = &restored {
            spec.mode = r.spec.mode;
        }
        Ok(hub::Storage::join(self.metadata.clone(), spec, self.status.clone()))
    }

    fn down(hub: &hub::Storage, cx: &ConvertContext) -> Result<Self> {
        cx.log_down(hub, VERSION);
        let mut dst = v1alpha1::Storage::new("", fields::storage_spec_down(&hub.spec));
        dst.metadata = hub.metadata.clone();
        dst.status = hub.status.clone();
        cx.preserve(hub, &mut dst.metadata)?;
        Ok(dst)
    }
}

impl Convertible for v1alpha1::SystemConfiguration {
    type Hub = hub::SystemConfiguration;
    const KIND: &'static str = "SystemConfiguration";

    fn up(&mut self, cx: &ConvertContext) -> Result<hub::SystemConfiguration> {
        cx.log_up(self);
        let restored = unmarshal_data::<hub::SystemConfiguration>(&mut self.metadata)?;

        let mut spec = fields::system_configuration_spec_up(&self.spec);
        match restored {
            Some(r) => {
                spec.external_compute_nodes = r.spec.external_compute_nodes;
                spec.ports_cooldown_in_seconds = r.spec.ports_cooldown_in_seconds;
            }
            None => {
                spec.external_compute_nodes = self
                    .spec
                    .find_external_computes()
                    .into_iter()
                    .map(|name| hub::SystemConfigurationExternalComputeNode { name: name.to_string() })
                    .collect();
                spec.ports_cooldown_in_seconds = DEFAULT_PORTS_COOLDOWN_SECS;
            }
        }
        Ok(hub::SystemConfiguration::join(self.metadata.clone(), spec, self.status.clone()))
    }

    fn down(hub: &hub::SystemConfiguration, cx: &ConvertContext) -> Result<Self> {
        cx.log_down(hub, VERSION);
        let mut dst = v1alpha1::SystemConfiguration::new("", fields::system_configuration_spec_down(&hub.spec));
        dst.metadata = hub.metadata.clone();
        dst.status = hub.status.clone();
        cx.preserve(hub, &mut dst.metadata)?;
        Ok(dst)
    }
}

impl Convertible for v1alpha1::Workflow {
    type Hub = hub::Workflow;
    const KIND: &'static str = "Workflow";

    fn up(&mut self, cx: &ConvertContext) -> Result<hub::Workflow> {
        cx.log_up(self);
        let restored = unmarshal_data::<hub::Workflow>(&mut self.metadata)?;

        let mut spec = fields::workflow_spec_up(&self.spec);
        match restored {
            Some(r) => {
                spec.job_id = r.spec.job_id;
                spec.hurry = r.spec.hurry;
            }
            None => spec.job_id = IntOrString::Int(self.spec.job_id),
        }
        Ok(hub::Workflow::join(self.metadata.clone(), spec, self.status.clone()))
    }

    fn down(hub: &hub::Workflow, cx: &ConvertContext) -> Result<Self> {
        cx.log_down(hub, VERSION);
        let mut dst = v1alpha1::Workflow::new("", fields::workflow_spec_down(&hub.spec)?);
        dst.metadata = hub.metadata.clone();
        dst.status = hub.status.clone();
        cx.preserve(hub, &mut dst.metadata)?;
        Ok(dst)
    }
}
