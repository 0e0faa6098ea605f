//! Domain rules the stores enforce.

use serde::{Deserialize, Serialize};

/// Which domain rules the stores enforce.
///
/// The defaults harden the stores: a participant counts once per event,
/// full events refuse new registrations, and on-duty decisions are final.
/// Turning a flag off restores the permissive behaviour of the browser
/// client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorePolicy {
    /// Ignore a second registration of the same participant.
    pub deduplicate_registrations: bool,
    /// Refuse registrations once `attendees == capacity`.
    pub enforce_capacity: bool,
    /// Only allow `Pending -> Approved | Rejected`.
    pub strict_status_transitions: bool,
}

impl Default for StorePolicy {
    fn default() -> Self {
        Self {
            deduplicate_registrations: true,
            enforce_capacity: true,
            strict_status_transitions: true,
        }
    }
}

impl StorePolicy {
    /// No guards at all.
    pub fn permissive() -> Self {
        Self {
            deduplicate_registrations: false,
            enforce_capacity: false,
            strict_status_transitions: false,
        }
    }
}
