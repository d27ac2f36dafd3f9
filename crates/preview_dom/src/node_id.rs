//! Node identifiers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one node in a [`Document`](crate::Document).
///
/// Ids are random, so a deep clone never aliases the subtree it was copied
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Short form for log lines: the first eight hex digits
impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "#{}", &simple[..8])
    }
}
