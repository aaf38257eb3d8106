//! Per-node broadcast state.

use serde::{Deserialize, Serialize};

/// Broadcast state of a single node.
///
/// `Propagating` implies the node has received the message; it marks the
/// single round in which the node relays to its neighbours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum NodeState {
    /// The message has not reached the node.
    #[default]
    Pending,
    /// The node holds the message and has finished relaying it.
    Received,
    /// The node holds the message and relays it this round.
    Propagating,
}

impl NodeState {
    /// Returns `true` while the message has not reached the node.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` once the node holds the message.
    #[must_use]
    pub const fn has_received(self) -> bool {
        !self.is_pending()
    }
}
