//! DWS resource schemas, one module per served representation.
//!
//! `v1alpha3` is the hub. The spokes re-use hub nested types wherever the shape
//! did not change, so field mappers only have to deal with real deltas.

#![forbid(unsafe_code)]

pub mod v1alpha1;
pub mod v1alpha2;
pub mod v1alpha3;

pub use v1alpha3 as hub;

/// Port cooldown applied when no earlier hub value can be recovered.
pub const DEFAULT_PORTS_COOLDOWN_SECS: u32 = 60;
