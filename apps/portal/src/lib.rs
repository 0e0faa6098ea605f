//! Campus portal
//!
//! Wires configuration, logging, the session helper and the portal stores
//! together into one owned [`state::PortalState`].

pub mod config;
pub mod state;

pub use state::{create_state, PortalState, PortalSummary};

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::NaiveDate;
    use entities::{Certificate, CurrentUser, EventDraft, NewOdRequest, OdStatus, Student, UserType};
    use portal_store::{MockPinataUploader, RegistrationOutcome, StorePolicy};
    use session::HistoryNavigator;

    use super::*;
    use crate::config::Config;

    fn config(data_dir: &std::path::Path) -> Config {
        Config {
            data_dir: data_dir.to_path_buf(),
            persist: true,
            clear_session_on_start: true,
            policy: StorePolicy::default(),
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_portal_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut state = create_state(config(dir.path())).unwrap();
            assert!(state.begin_visit().unwrap());

            state
                .session
                .login(&CurrentUser::new("S1", UserType::Student))
                .unwrap();

            let fest = state.events.add_event(
                EventDraft::new("Fest", NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
                    .with_capacity(2),
            );
            assert_eq!(
                state.events.register_for_event(&fest.id, "A"),
                RegistrationOutcome::Registered
            );
            assert_eq!(
                state.events.register_for_event(&fest.id, "B"),
                RegistrationOutcome::Registered
            );

            let request = state.od_requests.add_request(
                NewOdRequest::new("Fest volunteer", "Fest", "2024-03-04", "Stage crew"),
                Student::new("Asha", "S1"),
            );
            state
                .od_requests
                .update_request_status(&request.id, OdStatus::Approved)
                .unwrap();
            state.od_requests.add_request(
                NewOdRequest::new("Fest volunteer", "Fest", "2024-03-04", "Lights"),
                Student::new("Ravi", "S2"),
            );
        }

        let state = create_state(config(dir.path())).unwrap();
        let summary = state.summary().unwrap();
        assert_eq!(
            summary,
            PortalSummary {
                current_user: Some(CurrentUser::new("S1", UserType::Student)),
                events: 1,
                open_seats: 0,
                certificates: 0,
                od_requests: 2,
                pending_requests: 1,
            }
        );

        let event = &state.events.events()[0];
        assert_eq!(event.attendees, 2);
        assert_eq!(event.registered_users, vec!["A", "B"]);

        let mut navigator = HistoryNavigator::new();
        state.session.redirect_to_dashboard(&mut navigator).unwrap();
        assert_eq!(navigator.current(), Some("/dashboard/student?id=S1"));

        // A new browsing session starts signed out
        assert!(state.begin_visit().unwrap());
        assert!(state.summary().unwrap().current_user.is_none());
        assert!(!state.begin_visit().unwrap());
    }

    #[test]
    fn test_in_memory_state_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(&dir.path().join("unused"));
        config.persist = false;

        let mut state = create_state(config).unwrap();
        state.od_requests.add_request(
            NewOdRequest::new("Seminar", "AI Talk", "2024-04-01", "Attending"),
            Student::new("Asha", "S1"),
        );

        assert_eq!(state.summary().unwrap().pending_requests, 1);
        assert!(!dir.path().join("unused").exists());
    }

    #[tokio::test]
    async fn test_publish_certificate_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut state = create_state(config(dir.path()))
                .unwrap()
                .with_uploader(Arc::new(MockPinataUploader::new(Duration::ZERO)));
            let certificate =
                Certificate::new("", "Hackathon", "Winner", "CSE").for_student("Asha", "R1");

            let published = state
                .publish_certificate(certificate, b"jpeg bytes")
                .await
                .unwrap();
            assert_eq!(published.certificate.id, "cert-001");
            let blank = Certificate::new("", "Quiz", "Merit", "CSE");
            assert!(state.publish_certificate(blank, &[]).await.is_err());
        }

        let state = create_state(config(dir.path())).unwrap();
        assert_eq!(state.summary().unwrap().certificates, 1);
        assert_eq!(state.certificates.next_certificate_id(), "cert-002");
    }
}
