//! Filter options for listing store contents.

use entities::{OdRequest, OdStatus};

/// Filter options for listing on-duty requests.
#[derive(Debug, Clone, Default)]
pub struct OdRequestFilter {
    /// Filter by student ID.
    pub student_id: Option<String>,
    /// Filter by status.
    pub status: Option<OdStatus>,
    /// Maximum number of results.
    pub limit: Option<usize>,
    /// Offset for pagination.
    pub offset: Option<usize>,
}

impl OdRequestFilter {
    /// Creates a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by student
    pub fn with_student(mut self, id: impl Into<String>) -> Self {
        self.student_id = Some(id.into());
        self
    }

    /// Filters by status
    pub fn with_status(mut self, status: OdStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Limits the number of results
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips the first `offset` matches
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns true if `request` passes the student and status filters.
    pub fn matches(&self, request: &OdRequest) -> bool {
        self.student_id
            .as_ref()
            .is_none_or(|id| &request.student.id == id)
            && self.status.is_none_or(|s| request.status == s)
    }
}
