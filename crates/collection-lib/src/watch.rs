//! Boundary types for the upstream watch subsystem.
//!
//! The watch layer guarantees a `Deleted` event is eventually delivered for
//! every identity it previously delivered an `Added` for, and may deliver
//! duplicate `Added`/`Updated` events; re-deriving the same data is
//! harmless.

use crate::objects::KubernetesObject;
use serde::{Deserialize, Serialize};

/// A single resource-change notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "event")]
pub enum WatchEvent {
    Added(KubernetesObject),
    Updated(KubernetesObject),
    Deleted(KubernetesObject),
}

impl WatchEvent {
    pub fn object(&self) -> &KubernetesObject {
        match self {
            WatchEvent::Added(obj) | WatchEvent::Updated(obj) | WatchEvent::Deleted(obj) => obj,
        }
    }
}
