//! Application state.

use std::sync::Arc;

use entities::{Certificate, CurrentUser, OdStatus};
use local_storage::{FileStorage, LocalStorage, MemoryStorage};
use portal_store::{
    CertificateStore, CertificateUploader, EventStore, MockPinataUploader, OdRequestFilter,
    OdStore, PublishedCertificate,
};
use serde::Serialize;
use session::Session;

use crate::config::Config;

/// Everything the portal screens work with, owned in one place and handed
/// to whoever needs it.
#[derive(Debug)]
pub struct PortalState {
    /// Portal configuration.
    pub config: Config,
    /// Signed-in identity.
    pub session: Session,
    /// Campus events.
    pub events: EventStore,
    /// Issued certificates.
    pub certificates: CertificateStore,
    /// On-duty requests.
    pub od_requests: OdStore,
    /// Scratch storage scoped to one browsing session.
    tab_storage: MemoryStorage,
    /// Pins rendered certificates.
    uploader: Arc<dyn CertificateUploader>,
}

impl PortalState {
    /// Creates state over the given storage, rehydrating every store.
    pub fn new(config: Config, storage: Arc<dyn LocalStorage>) -> Self {
        let policy = config.policy;
        Self {
            session: Session::new(storage.clone()),
            events: EventStore::open(storage.clone(), policy),
            certificates: CertificateStore::open(storage.clone()),
            od_requests: OdStore::open(storage, policy),
            tab_storage: MemoryStorage::new(),
            uploader: Arc::new(MockPinataUploader::default()),
            config,
        }
    }

    /// Replaces the certificate uploader.
    pub fn with_uploader(mut self, uploader: Arc<dyn CertificateUploader>) -> Self {
        self.uploader = uploader;
        self
    }

    /// Uploads and records a rendered certificate.
    pub async fn publish_certificate(
        &mut self,
        certificate: Certificate,
        image: &[u8],
    ) -> anyhow::Result<PublishedCertificate> {
        let published = self
            .certificates
            .publish_certificate(self.uploader.as_ref(), certificate, image)
            .await?;
        Ok(published)
    }

    /// Starts a browsing session, signing out first if configured to.
    ///
    /// Returns true if the identity was cleared.
    pub fn begin_visit(&self) -> anyhow::Result<bool> {
        if !self.config.clear_session_on_start {
            return Ok(false);
        }
        Ok(self.session.clear_on_initial_load(&self.tab_storage)?)
    }

    /// Counts shown on the landing page.
    pub fn summary(&self) -> anyhow::Result<PortalSummary> {
        let (_, pending_requests) = self
            .od_requests
            .list_requests(&OdRequestFilter::new().with_status(OdStatus::Pending));

        Ok(PortalSummary {
            current_user: self.session.current_user()?,
            events: self.events.events().len(),
            open_seats: self
                .events
                .events()
                .iter()
                .map(|e| u64::from(e.remaining_capacity()))
                .sum(),
            certificates: self.certificates.certificates().len(),
            od_requests: self.od_requests.requests().len(),
            pending_requests,
        })
    }
}

/// Snapshot of the portal contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSummary {
    pub current_user: Option<CurrentUser>,
    pub events: usize,
    pub open_seats: u64,
    pub certificates: usize,
    pub od_requests: usize,
    pub pending_requests: usize,
}

/// Opens the configured storage: the data directory when persisting,
/// memory otherwise.
pub fn open_storage(config: &Config) -> anyhow::Result<Arc<dyn LocalStorage>> {
    if config.persist {
        let storage = FileStorage::open(&config.data_dir)?;
        Ok(Arc::new(storage))
    } else {
        tracing::info!("Persistence disabled, state is kept in memory");
        Ok(Arc::new(MemoryStorage::new()))
    }
}

/// Creates the portal state from configuration.
pub fn create_state(config: Config) -> anyhow::Result<PortalState> {
    let storage = open_storage(&config)?;
    Ok(PortalState::new(config, storage))
}
