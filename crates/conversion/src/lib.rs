//! DWS conversion engine.
//!
//! Every kind has one hub representation (`v1alpha3`). Spokes convert up to the
//! hub and down from it; spoke-to-spoke always goes through the hub. A down
//! conversion stores a snapshot of the hub on the spoke object so the next up
//! conversion can restore what the spoke cannot express.

#![forbid(unsafe_code)]

use metrics::counter;
use tracing::warn;

mod adapt;
pub mod annotation;
mod context;
pub mod dynamic;
mod error;
pub mod hub;
mod list;
mod v1alpha1;
mod v1alpha2;

pub use annotation::{marshal_data, unmarshal_data, Snapshot, DATA_ANNOTATION};
pub use context::{ConvertContext, Environment};
pub use dynamic::{convert_object, convert_objects};
pub use error::{ConversionError, Result};
pub use hub::Hub;

/// A spoke type bound to exactly one hub type.
pub trait Convertible: Sized {
    type Hub;

    /// Kind name used in logs, metrics and errors.
    const KIND: &'static str;

    /// Convert to the hub. Consumes the snapshot annotation from `self`.
    fn up(&mut self, cx: &ConvertContext) -> Result<Self::Hub>;

    /// Convert from the hub, attaching a snapshot of `hub` to the result.
    fn down(hub: &Self::Hub, cx: &ConvertContext) -> Result<Self>;
}

/// Spoke to hub.
pub fn up<S: Convertible>(spoke: &mut S, cx: &ConvertContext) -> Result<S::Hub> {
    counter!("conversion_total", 1u64, "kind" => S::KIND, "direction" => "up");
    spoke.up(cx).map_err(|e| failed(S::KIND, "up", e, cx))
}

/// Hub to spoke.
pub fn down<S: Convertible>(hub: &S::Hub, cx: &ConvertContext) -> Result<S> {
    counter!("conversion_total", 1u64, "kind" => S::KIND, "direction" => "down");
    S::down(hub, cx).map_err(|e| failed(S::KIND, "down", e, cx))
}

fn failed(kind: &'static str, direction: &'static str, e: ConversionError, cx: &ConvertContext) -> ConversionError {
    counter!("conversion_errors_total", 1u64, "kind" => kind, "direction" => direction);
    warn!(parent: cx.span(), kind, direction, error = %e, "conversion failed");
    e
}

pub mod prelude {
    pub use super::{down, up, ConversionError, ConvertContext, Convertible, Environment, Hub, Result};
}
