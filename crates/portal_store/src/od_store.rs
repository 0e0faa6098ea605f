//! On-duty request store.

use std::sync::Arc;

use entities::{NewOdRequest, OdRequest, OdStatus, Student};
use local_storage::{known_keys, LocalStorage};
use serde::{Deserialize, Serialize};

use crate::{OdRequestFilter, Persistence, PortalStoreError, PortalStoreResult, StorePolicy};

/// Persisted shape of the request collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OdState {
    pub requests: Vec<OdRequest>,
}

/// Owns the on-duty requests and their approval status.
#[derive(Debug)]
pub struct OdStore {
    state: OdState,
    policy: StorePolicy,
    persistence: Persistence,
}

impl OdStore {
    /// Creates an empty store that is not persisted.
    pub fn new(policy: StorePolicy) -> Self {
        Self {
            state: OdState::default(),
            policy,
            persistence: Persistence::in_memory(known_keys::OD_STORE),
        }
    }

    /// Opens the store persisted in `storage`.
    pub fn open(storage: Arc<dyn LocalStorage>, policy: StorePolicy) -> Self {
        let persistence = Persistence::new(storage, known_keys::OD_STORE);
        let state: OdState = persistence.load();
        tracing::info!(requests = state.requests.len(), "Opened on-duty store");
        Self {
            state,
            policy,
            persistence,
        }
    }

    /// All requests in submission order.
    pub fn requests(&self) -> &[OdRequest] {
        &self.state.requests
    }

    /// Gets a request by ID.
    pub fn get_request(&self, id: &str) -> Option<&OdRequest> {
        self.state.requests.iter().find(|r| r.id == id)
    }

    /// Requests submitted by one student.
    pub fn requests_for_student(&self, student_id: &str) -> Vec<&OdRequest> {
        let filter = OdRequestFilter::new().with_student(student_id);
        let (requests, _) = self.list_requests(&filter);
        requests
    }

    /// Requests currently in `status`.
    pub fn requests_with_status(&self, status: OdStatus) -> Vec<&OdRequest> {
        let filter = OdRequestFilter::new().with_status(status);
        let (requests, _) = self.list_requests(&filter);
        requests
    }

    /// Lists requests matching the filter, in submission order.
    ///
    /// Returns the page and the total number of matches.
    pub fn list_requests(&self, filter: &OdRequestFilter) -> (Vec<&OdRequest>, usize) {
        let matches: Vec<&OdRequest> = self
            .state
            .requests
            .iter()
            .filter(|r| filter.matches(r))
            .collect();
        let total = matches.len();

        let page = matches
            .into_iter()
            .skip(filter.offset.unwrap_or(0))
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect();

        (page, total)
    }

    /// Submits a request on behalf of `student`.
    ///
    /// The id is the next `OD-NNN` in sequence and the status is `Pending`.
    pub fn add_request(&mut self, fields: NewOdRequest, student: Student) -> OdRequest {
        let request = OdRequest::new(self.state.requests.len() + 1, fields, student);
        tracing::info!(
            request_id = %request.id,
            student_id = %request.student.id,
            event = %request.event,
            "Submitted on-duty request"
        );
        self.state.requests.push(request.clone());
        self.persist();
        request
    }

    /// Records a faculty decision.
    ///
    /// An unknown id is ignored. Moving back to `Pending` is always refused;
    /// with strict transitions a decided request cannot be changed either.
    pub fn update_request_status(
        &mut self,
        id: &str,
        status: OdStatus,
    ) -> PortalStoreResult<()> {
        let strict = self.policy.strict_status_transitions;
        let Some(request) = self.state.requests.iter_mut().find(|r| r.id == id) else {
            tracing::debug!(request_id = id, "Status update of unknown request ignored");
            return Ok(());
        };

        let allowed = if strict {
            request.status.can_transition_to(status)
        } else {
            status != OdStatus::Pending
        };
        if !allowed {
            tracing::warn!(
                request_id = id,
                from = %request.status,
                to = %status,
                "Rejected status transition"
            );
            return Err(PortalStoreError::invalid_transition(request.status, status));
        }

        request.status = status;
        tracing::info!(request_id = id, status = %status, "Updated on-duty request status");
        self.persist();
        Ok(())
    }

    fn persist(&self) {
        self.persistence.save(&self.state);
    }
}

impl Default for OdStore {
    fn default() -> Self {
        Self::new(StorePolicy::default())
    }
}
