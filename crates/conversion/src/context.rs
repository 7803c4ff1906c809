//! Per-call execution context: deployment environment and the logging span.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::{Resource, ResourceExt};
use tracing::{debug, info, Span};

use crate::annotation::marshal_data;
use crate::hub::Hub;
use crate::Result;

/// Deployment environment the conversions run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

fn environment_from_env() -> Environment {
    match std::env::var("DWS_ENVIRONMENT") {
        Ok(v) if v.trim().eq_ignore_ascii_case("production") => Environment::Production,
        _ => Environment::Development,
    }
}

/// Handed to every conversion. Carries the span all conversion events are
/// recorded under, so nothing here depends on ambient logger state.
#[derive(Debug, Clone)]
pub struct ConvertContext {
    environment: Environment,
    span: Span,
}

impl Default for ConvertContext {
    fn default() -> Self { Self::new(Environment::Development) }
}

impl ConvertContext {
    pub fn new(environment: Environment) -> Self {
        let span = tracing::debug_span!("conversion", environment = environment.as_str());
        Self { environment, span }
    }

    /// Context for the current process, from `DWS_ENVIRONMENT`.
    pub fn from_env() -> Self { Self::new(environment_from_env()) }

    /// Record events under `span` instead of the context's own.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn environment(&self) -> Environment { self.environment }

    pub fn span(&self) -> &Span { &self.span }

    /// Write the hub snapshot onto a down-converted object, unless this is
    /// production and the kind is unbounded.
    pub(crate) fn preserve<H: Hub>(&self, hub: &H, meta: &mut ObjectMeta) -> Result<()> {
        if H::UNBOUNDED && self.environment == Environment::Production {
            debug!(parent: &self.span, kind = H::RESOURCE.as_str(), "conversion data skipped for unbounded kind");
            return Ok(());
        }
        marshal_data(hub, meta)
    }

    pub(crate) fn log_up<K: Resource<DynamicType = ()>>(&self, obj: &K) {
        let name = obj.name_any();
        let namespace = obj.namespace().unwrap_or_default();
        info!(
            parent: &self.span,
            kind = %K::kind(&()),
            from = %K::version(&()),
            name = %name,
            namespace = %namespace,
            "convert to hub"
        );
    }

    pub(crate) fn log_down<H: Hub>(&self, hub: &H, to: &str) {
        let name = hub.name_any();
        let namespace = hub.namespace().unwrap_or_default();
        info!(
            parent: &self.span,
            kind = H::RESOURCE.as_str(),
            to,
            name = %name,
            namespace = %namespace,
            "convert from hub"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dws_api::hub;

    fn system_configuration() -> hub::SystemConfiguration {
        let mut obj = hub::SystemConfiguration::new("default", hub::SystemConfigurationSpec::default());
        obj.metadata.namespace = Some("default".into());
        obj
    }

    #[test]
    fn production_skips_unbounded_kinds() {
        let hub = system_configuration();
        let mut meta = ObjectMeta::default();
        ConvertContext::new(Environment::Production).preserve(&hub, &mut meta).unwrap();
        assert!(meta.annotations.is_none());

        ConvertContext::new(Environment::Development).preserve(&hub, &mut meta).unwrap();
        assert_eq!(meta.annotations.map(|a| a.len()), Some(1));
    }

    #[test]
    fn production_still_encodes_bounded_kinds() {
        let hub = hub::Storage::new("rabbit-0", hub::StorageSpec::default());
        let mut meta = ObjectMeta::default();
        ConvertContext::new(Environment::Production).preserve(&hub, &mut meta).unwrap();
        assert!(meta.annotations.is_some());
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
    }

    #[test]
    fn events_are_recorded_under_the_callers_span() {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("store_read", request = "r-42");
            let cx = ConvertContext::default().with_span(span);
            let hub = hub::Storage::new("rabbit-0", hub::StorageSpec::default());
            crate::down::<dws_api::v1alpha2::Storage>(&hub, &cx).unwrap();
        });
        let text = String::from_utf8_lossy(&out.0.lock().unwrap()).into_owned();
        assert!(text.contains("convert from hub"), "{}", text);
        assert!(text.contains("store_read"), "{}", text);
        assert!(text.contains("r-42"), "{}", text);
        assert!(!text.contains("conversion{"), "{}", text);
    }

    #[test]
    fn default_context_is_development() {
        assert_eq!(ConvertContext::default().environment(), Environment::Development);
        assert_eq!(Environment::Production.as_str(), "production");
    }
}
