//! Certificate store.

use std::sync::Arc;

use entities::Certificate;
use local_storage::{known_keys, LocalStorage};
use serde::{Deserialize, Serialize};

use crate::{BulkRecipient, CertificateUploader, Persistence, PortalStoreError, PortalStoreResult};

/// Persisted shape of the certificate collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificateState {
    pub certificates: Vec<Certificate>,
    /// Highest `cert-NNN` number minted so far, including deleted ones.
    #[serde(default, rename = "lastIssued")]
    pub last_issued: u32,
}

const ID_PREFIX: &str = "cert-";

fn sequence_number(id: &str) -> Option<u32> {
    id.strip_prefix(ID_PREFIX)?.parse().ok()
}

/// A certificate recorded after its artifacts were pinned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedCertificate {
    pub certificate: Certificate,
    /// Gateway URL of the rendered image.
    pub image_url: String,
    /// Gateway URL of the token metadata.
    pub metadata_url: String,
}

/// Owns the issued certificates. Certificates are never edited, only added
/// and deleted.
#[derive(Debug)]
pub struct CertificateStore {
    state: CertificateState,
    persistence: Persistence,
}

impl CertificateStore {
    /// Creates an empty store that is not persisted.
    pub fn new() -> Self {
        Self {
            state: CertificateState::default(),
            persistence: Persistence::in_memory(known_keys::CERTIFICATE_STORE),
        }
    }

    /// Opens the store persisted in `storage`.
    pub fn open(storage: Arc<dyn LocalStorage>) -> Self {
        let persistence = Persistence::new(storage, known_keys::CERTIFICATE_STORE);
        let state: CertificateState = persistence.load();
        tracing::info!(
            certificates = state.certificates.len(),
            "Opened certificate store"
        );
        Self { state, persistence }
    }

    /// All certificates in issue order.
    pub fn certificates(&self) -> &[Certificate] {
        &self.state.certificates
    }

    /// Gets the first certificate with this ID.
    pub fn get_certificate(&self, id: &str) -> Option<&Certificate> {
        self.state.certificates.iter().find(|c| c.id == id)
    }

    /// Certificates issued to a register number.
    pub fn certificates_for_student(&self, register_number: &str) -> Vec<&Certificate> {
        self.state
            .certificates
            .iter()
            .filter(|c| c.register_number == register_number)
            .collect()
    }

    /// Next id in the `cert-001`, `cert-002`, ... sequence.
    ///
    /// Numbers are never reused, even after the certificate holding one is
    /// deleted.
    pub fn next_certificate_id(&self) -> String {
        format!("{ID_PREFIX}{:03}", self.next_sequence())
    }

    fn next_sequence(&self) -> u32 {
        let highest_stored = self
            .state
            .certificates
            .iter()
            .filter_map(|c| sequence_number(&c.id))
            .max()
            .unwrap_or(0);
        highest_stored.max(self.state.last_issued) + 1
    }

    fn mint_id(&mut self) -> String {
        let sequence = self.next_sequence();
        self.state.last_issued = sequence;
        format!("{ID_PREFIX}{sequence:03}")
    }

    /// Stores a certificate as given. Ids are not checked for uniqueness.
    pub fn add_certificate(&mut self, certificate: Certificate) {
        tracing::info!(
            certificate_id = %certificate.id,
            register_number = %certificate.register_number,
            "Issued certificate"
        );
        if let Some(sequence) = sequence_number(&certificate.id) {
            self.state.last_issued = self.state.last_issued.max(sequence);
        }
        self.state.certificates.push(certificate);
        self.persist();
    }

    /// Removes every certificate with this ID. Returns false if none matched.
    pub fn delete_certificate(&mut self, id: &str) -> bool {
        let before = self.state.certificates.len();
        self.state.certificates.retain(|c| c.id != id);
        if self.state.certificates.len() == before {
            tracing::debug!(certificate_id = id, "Delete of unknown certificate ignored");
            return false;
        }
        tracing::info!(certificate_id = id, "Deleted certificate");
        self.persist();
        true
    }

    /// Issues one certificate per recipient, copying everything else from
    /// `template`.
    ///
    /// Ids continue the `cert-NNN` sequence. A recipient description, when
    /// present, replaces the template content.
    pub fn issue_bulk(
        &mut self,
        recipients: &[BulkRecipient],
        template: &Certificate,
    ) -> Vec<Certificate> {
        let mut issued = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            let mut certificate = template
                .clone()
                .for_student(&recipient.name, &recipient.register_number)
                .with_date(&recipient.date);
            certificate.id = self.mint_id();
            if !recipient.description.is_empty() {
                certificate.content = Some(recipient.description.clone());
            }
            self.state.certificates.push(certificate.clone());
            issued.push(certificate);
        }
        tracing::info!(issued = issued.len(), "Issued certificates in bulk");
        self.persist();
        issued
    }

    /// Uploads a rendered certificate, records it, then pins its metadata.
    ///
    /// A blank id is replaced by the next `cert-NNN`, which is only taken
    /// once the certificate is recorded. Nothing is recorded when the image
    /// upload fails. A metadata failure is reported after the certificate
    /// has been recorded.
    pub async fn publish_certificate(
        &mut self,
        uploader: &dyn CertificateUploader,
        mut certificate: Certificate,
        image: &[u8],
    ) -> PortalStoreResult<PublishedCertificate> {
        if certificate.id.is_empty() {
            certificate.id = self.next_certificate_id();
        }

        let file_name = format!("{}.jpg", certificate.id);
        let image_upload = uploader.upload_file(&file_name, image).await;
        if !image_upload.success {
            tracing::warn!(
                certificate_id = %certificate.id,
                message = ?image_upload.message,
                "Certificate image upload failed"
            );
            return Err(PortalStoreError::Upload(
                image_upload
                    .message
                    .unwrap_or_else(|| "Failed to upload image".to_string()),
            ));
        }

        self.add_certificate(certificate.clone());

        let metadata_upload = uploader
            .upload_metadata(&certificate, &image_upload.pinata_url)
            .await;
        if !metadata_upload.success {
            tracing::warn!(
                certificate_id = %certificate.id,
                message = ?metadata_upload.message,
                "Certificate metadata upload failed"
            );
            return Err(PortalStoreError::Upload(
                metadata_upload
                    .message
                    .unwrap_or_else(|| "Failed to upload metadata".to_string()),
            ));
        }

        Ok(PublishedCertificate {
            certificate,
            image_url: image_upload.pinata_url,
            metadata_url: metadata_upload.pinata_url,
        })
    }

    fn persist(&self) {
        self.persistence.save(&self.state);
    }
}

impl Default for CertificateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use local_storage::MemoryStorage;

    use std::time::Duration;

    use super::*;
    use crate::{parse_csv, MockPinataUploader};

    fn certificate(id: &str, register_number: &str) -> Certificate {
        Certificate::new(id, "Hackathon", "Participation", "Prof. Sarah Johnson")
            .for_student("Asha", register_number)
            .with_date("2024-03-04")
    }

    #[test]
    fn test_add_and_delete() {
        let mut store = CertificateStore::new();
        store.add_certificate(certificate("cert-001", "R1"));
        store.add_certificate(certificate("cert-002", "R2"));

        assert_eq!(store.certificates().len(), 2);
        assert!(store.delete_certificate("cert-001"));
        assert!(!store.delete_certificate("cert-001"));
        assert_eq!(store.certificates().len(), 1);
        assert_eq!(store.certificates()[0].id, "cert-002");
    }

    #[test]
    fn test_duplicate_ids_are_stored_and_deleted_together() {
        let mut store = CertificateStore::new();
        store.add_certificate(certificate("dup", "R1"));
        store.add_certificate(certificate("dup", "R2"));
        assert_eq!(store.certificates().len(), 2);

        assert!(store.delete_certificate("dup"));
        assert!(store.certificates().is_empty());
    }

    #[test]
    fn test_certificates_for_student() {
        let mut store = CertificateStore::new();
        store.add_certificate(certificate("cert-001", "R1"));
        store.add_certificate(certificate("cert-002", "R2"));
        store.add_certificate(certificate("cert-003", "R1"));

        let ids: Vec<&str> = store
            .certificates_for_student("R1")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["cert-001", "cert-003"]);
        assert_eq!(store.next_certificate_id(), "cert-004");
    }

    #[test]
    fn test_issue_bulk() {
        let mut store = CertificateStore::new();
        store.add_certificate(certificate("cert-001", "R0"));

        let recipients =
            parse_csv("name,register_number,description\nJohn,R1,Best Speaker\nJane,R2,")
                .unwrap();
        let template = Certificate::new("", "Debate", "Achievement", "English Dept")
            .with_content("For participation")
            .with_template_url("/templates/gold.png");

        let issued = store.issue_bulk(&recipients, &template);

        assert_eq!(issued.len(), 2);
        assert_eq!(issued[0].id, "cert-002");
        assert_eq!(issued[1].id, "cert-003");
        assert_eq!(issued[0].content.as_deref(), Some("Best Speaker"));
        assert_eq!(issued[1].content.as_deref(), Some("For participation"));
        assert_eq!(issued[1].template_url.as_deref(), Some("/templates/gold.png"));
        assert_eq!(store.certificates().len(), 3);
    }

    #[test]
    fn test_persists_and_rehydrates() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut store = CertificateStore::open(storage.clone());
            store.add_certificate(certificate("cert-001", "R1"));
        }

        let store = CertificateStore::open(storage);
        assert_eq!(
            store.get_certificate("cert-001").map(|c| c.student.as_str()),
            Some("Asha")
        );
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut store = CertificateStore::new();
        let template = Certificate::new("", "Quiz", "Merit", "CSE");

        let recipients = parse_csv("name,register_number\nA,R1\nB,R2").unwrap();
        let first = store.issue_bulk(&recipients, &template);
        assert!(store.delete_certificate(&first[0].id));

        let recipients = parse_csv("name,register_number\nC,R3").unwrap();
        let second = store.issue_bulk(&recipients, &template);
        assert_eq!(first[1].id, "cert-002");
        assert_eq!(second[0].id, "cert-003");

        assert!(store.delete_certificate(&second[0].id));
        let left: Vec<&str> = store
            .certificates()
            .iter()
            .map(|c| c.student.as_str())
            .collect();
        assert_eq!(left, vec!["B"]);

        // Deleting the newest certificate does not hand its number out again
        assert_eq!(store.next_certificate_id(), "cert-004");
    }

    #[test]
    fn test_sequence_survives_restart() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut store = CertificateStore::open(storage.clone());
            let template = Certificate::new("", "Quiz", "Merit", "CSE");
            let recipients = parse_csv("name,register_number\nA,R1").unwrap();
            let issued = store.issue_bulk(&recipients, &template);
            store.delete_certificate(&issued[0].id);
        }

        let store = CertificateStore::open(storage);
        assert!(store.certificates().is_empty());
        assert_eq!(store.next_certificate_id(), "cert-002");
    }

    #[test]
    fn test_browser_payload_without_counter() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                known_keys::CERTIFICATE_STORE,
                r#"{"state":{"certificates":[{"id":"cert-007","title":"Quiz",
                "type":"Merit","issuedBy":"CSE","date":"2024-03-04","student":"Asha",
                "registerNumber":"R1"}]},"version":0}"#,
            )
            .unwrap();

        let store = CertificateStore::open(storage);
        assert_eq!(store.certificates().len(), 1);
        assert_eq!(store.next_certificate_id(), "cert-008");
    }

    #[tokio::test]
    async fn test_publish_certificate() {
        let mut store = CertificateStore::new();
        let uploader = MockPinataUploader::new(Duration::ZERO);
        let certificate =
            Certificate::new("", "Hackathon", "Winner", "CSE").for_student("Asha", "R1");

        let published = store
            .publish_certificate(&uploader, certificate, b"jpeg bytes")
            .await
            .unwrap();

        assert_eq!(published.certificate.id, "cert-001");
        assert!(published.image_url.contains("mockCID_"));
        assert!(published.metadata_url.contains("mockCID_JSON_"));
        assert_eq!(store.certificates_for_student("R1").len(), 1);

        store.delete_certificate("cert-001");
        assert_eq!(store.next_certificate_id(), "cert-002");
    }

    #[tokio::test]
    async fn test_failed_image_upload_records_nothing() {
        let mut store = CertificateStore::new();
        let uploader = MockPinataUploader::new(Duration::ZERO);
        let certificate = certificate("cert-001", "R1");

        let err = store
            .publish_certificate(&uploader, certificate, &[])
            .await
            .unwrap_err();

        assert!(matches!(err, PortalStoreError::Upload(_)));
        assert!(store.certificates().is_empty());
    }
}
