//! Presentation upload flow
//!
//! Drives the two upload slots of a presentation through their state
//! machine. Each slot moves Empty -> Uploading -> Uploaded -> Confirmed;
//! re-uploading resets the slot to Empty and clears its confirmation.
//! Submission is only permitted once both slots are confirmed, and the
//! flow ends immediately on success; server-side processing is not
//! polled from here.

use std::path::Path;

use orator_protocol::Presentation;

use crate::client::ApiClient;
use crate::error::{OratorError, Result};
use crate::presentation::PresentationService;
use crate::ui::UI;

/// Message shown when submit is attempted with an unconfirmed slot.
pub const CONFIRM_BOTH_MESSAGE: &str = "Please confirm both slide and media before submitting";

/// State of one upload slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Uploading,
    Uploaded,
    Confirmed,
}

/// Which slot an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Slide,
    Media,
}

impl SlotKind {
    fn label(&self) -> &'static str {
        match self {
            SlotKind::Slide => "slide",
            SlotKind::Media => "media",
        }
    }
}

/// Upload flow for a single presentation
pub struct UploadFlow<'a, C: ApiClient + ?Sized> {
    client: &'a C,
    presentation_id: i64,
    slide: SlotState,
    media: SlotState,
    progress_enabled: bool,
    ui: UI,
}

impl<'a, C: ApiClient + ?Sized> UploadFlow<'a, C> {
    /// Start a flow for a presentation, adopting the slot states the
    /// backend already knows about.
    pub fn new(client: &'a C, presentation: &Presentation, progress_enabled: bool) -> Self {
        Self {
            client,
            presentation_id: presentation.id,
            slide: Self::initial_slot(
                presentation.slide_file.is_some(),
                presentation.slide_confirmed,
            ),
            media: Self::initial_slot(
                presentation.media_file.is_some(),
                presentation.media_confirmed,
            ),
            progress_enabled,
            ui: UI::new(),
        }
    }

    fn initial_slot(uploaded: bool, confirmed: bool) -> SlotState {
        match (uploaded, confirmed) {
            (true, true) => SlotState::Confirmed,
            (true, false) => SlotState::Uploaded,
            _ => SlotState::Empty,
        }
    }

    pub fn slide_state(&self) -> SlotState {
        self.slide
    }

    pub fn media_state(&self) -> SlotState {
        self.media
    }

    /// Attach a file to a slot, uploading it.
    ///
    /// An occupied slot is reset first, so a re-upload always clears the
    /// previous confirmation.
    pub async fn attach(&mut self, kind: SlotKind, file_path: &Path) -> Result<Presentation> {
        self.set_slot(kind, SlotState::Empty);
        self.set_slot(kind, SlotState::Uploading);

        let progress_bar = if self.progress_enabled {
            Some(crate::ui::create_progress_bar(
                1,
                &format!("Uploading {}...", kind.label()),
            ))
        } else {
            None
        };

        let service = PresentationService::new(self.client);
        let result = match kind {
            SlotKind::Slide => service.upload_slide(self.presentation_id, file_path).await,
            SlotKind::Media => service.upload_media(self.presentation_id, file_path).await,
        };

        match result {
            Ok(presentation) => {
                self.set_slot(kind, SlotState::Uploaded);
                if let Some(pb) = progress_bar {
                    pb.inc(1);
                    pb.finish_with_message(format!("{} uploaded", kind.label()));
                }
                Ok(presentation)
            }
            Err(e) => {
                self.set_slot(kind, SlotState::Empty);
                if let Some(pb) = progress_bar {
                    pb.abandon_with_message(format!("{} upload failed", kind.label()));
                }
                Err(e)
            }
        }
    }

    /// Confirm an uploaded slot. Confirming an already-confirmed slot is a
    /// no-op; confirming an empty one is an error.
    pub async fn confirm(&mut self, kind: SlotKind) -> Result<()> {
        match self.slot(kind) {
            SlotState::Confirmed => return Ok(()),
            SlotState::Uploaded => {}
            SlotState::Empty | SlotState::Uploading => {
                return Err(OratorError::invalid_input(format!(
                    "No {} uploaded yet",
                    kind.label()
                )));
            }
        }

        let service = PresentationService::new(self.client);
        match kind {
            SlotKind::Slide => service.confirm_slide(self.presentation_id).await?,
            SlotKind::Media => service.confirm_media(self.presentation_id).await?,
        };

        self.set_slot(kind, SlotState::Confirmed);
        Ok(())
    }

    /// Submit the presentation for processing.
    ///
    /// Blocked client-side unless both slots are confirmed; no request is
    /// issued in that case.
    pub async fn submit(&mut self) -> Result<Presentation> {
        if self.slide != SlotState::Confirmed || self.media != SlotState::Confirmed {
            return Err(OratorError::submission_not_ready(CONFIRM_BOTH_MESSAGE));
        }

        let service = PresentationService::new(self.client);
        let presentation = service.submit(self.presentation_id).await?;

        self.ui.success("Presentation submitted");
        Ok(presentation)
    }

    fn slot(&self, kind: SlotKind) -> SlotState {
        match kind {
            SlotKind::Slide => self.slide,
            SlotKind::Media => self.media,
        }
    }

    fn set_slot(&mut self, kind: SlotKind, state: SlotState) {
        match kind {
            SlotKind::Slide => self.slide = state,
            SlotKind::Media => self.media = state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::tests::mocks::MockApiClient;
    use crate::tests::utils::test_helpers::*;
    use reqwest::Method;

    fn create_client() -> MockApiClient {
        MockApiClient::new(ClientConfig::default())
            .with_auth(sample_user(1, "leader@university.edu"))
    }

    fn script_slot_endpoints(client: &MockApiClient) {
        client.add_response(
            "/presentations/9/slides".to_string(),
            presentation_json(9, 5),
        );
        client.add_response(
            "/presentations/9/media".to_string(),
            presentation_json(9, 5),
        );
        client.add_response(
            "/presentations/9/slides/confirm".to_string(),
            presentation_json(9, 5),
        );
        client.add_response(
            "/presentations/9/media/confirm".to_string(),
            presentation_json(9, 5),
        );
        client.add_response(
            "/presentations/9/submit".to_string(),
            presentation_json(9, 5),
        );
    }

    #[tokio::test]
    async fn test_full_flow_uploads_confirms_and_submits() {
        let client = create_client();
        script_slot_endpoints(&client);

        let dir = create_temp_dir();
        let slide = create_temp_file_with_content(&dir, "deck.pdf", b"%PDF-1.7");
        let media = create_temp_file_with_content(&dir, "talk.mp4", b"video-bytes");

        let presentation = sample_presentation(9, 5);
        let mut flow = UploadFlow::new(&client, &presentation, false);

        flow.attach(SlotKind::Slide, &slide).await.unwrap();
        assert_eq!(flow.slide_state(), SlotState::Uploaded);

        flow.attach(SlotKind::Media, &media).await.unwrap();
        flow.confirm(SlotKind::Slide).await.unwrap();
        flow.confirm(SlotKind::Media).await.unwrap();
        assert_eq!(flow.slide_state(), SlotState::Confirmed);
        assert_eq!(flow.media_state(), SlotState::Confirmed);

        flow.submit().await.unwrap();

        let submits: Vec<_> = client
            .get_requests()
            .into_iter()
            .filter(|r| r.endpoint == "/presentations/9/submit")
            .collect();
        assert_eq!(submits.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_blocked_with_one_slot_unconfirmed() {
        let client = create_client();
        script_slot_endpoints(&client);

        let dir = create_temp_dir();
        let slide = create_temp_file_with_content(&dir, "deck.pdf", b"%PDF-1.7");

        let presentation = sample_presentation(9, 5);
        let mut flow = UploadFlow::new(&client, &presentation, false);

        flow.attach(SlotKind::Slide, &slide).await.unwrap();
        flow.confirm(SlotKind::Slide).await.unwrap();

        let err = flow.submit().await.unwrap_err();
        assert_eq!(
            err.display_message(),
            "Please confirm both slide and media before submitting"
        );

        let submit_requests: Vec<_> = client
            .get_requests()
            .into_iter()
            .filter(|r| r.method == Method::POST && r.endpoint.ends_with("/submit"))
            .collect();
        assert!(
            submit_requests.is_empty(),
            "blocked submit must not issue a request"
        );
    }

    #[tokio::test]
    async fn test_reupload_resets_confirmation() {
        let client = create_client();
        script_slot_endpoints(&client);

        let dir = create_temp_dir();
        let slide = create_temp_file_with_content(&dir, "deck.pdf", b"%PDF-1.7");

        let presentation = sample_presentation(9, 5);
        let mut flow = UploadFlow::new(&client, &presentation, false);

        flow.attach(SlotKind::Slide, &slide).await.unwrap();
        flow.confirm(SlotKind::Slide).await.unwrap();
        assert_eq!(flow.slide_state(), SlotState::Confirmed);

        flow.attach(SlotKind::Slide, &slide).await.unwrap();
        assert_eq!(
            flow.slide_state(),
            SlotState::Uploaded,
            "re-upload clears confirmation"
        );
    }

    #[tokio::test]
    async fn test_failed_upload_resets_slot_to_empty() {
        let client = create_client();
        client.add_error(
            "/presentations/9/slides".to_string(),
            OratorError::api(500, "Storage unavailable".to_string()),
        );

        let dir = create_temp_dir();
        let slide = create_temp_file_with_content(&dir, "deck.pdf", b"%PDF-1.7");

        let presentation = sample_presentation(9, 5);
        let mut flow = UploadFlow::new(&client, &presentation, false);

        assert!(flow.attach(SlotKind::Slide, &slide).await.is_err());
        assert_eq!(flow.slide_state(), SlotState::Empty);
    }

    #[tokio::test]
    async fn test_confirm_without_upload_is_local_error() {
        let client = create_client();

        let presentation = sample_presentation(9, 5);
        let mut flow = UploadFlow::new(&client, &presentation, false);

        let err = flow.confirm(SlotKind::Media).await.unwrap_err();
        assert!(err.to_string().contains("No media uploaded yet"));
        assert!(client.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_flow_adopts_server_side_slot_state() {
        let client = create_client();

        let mut presentation = sample_presentation(9, 5);
        presentation.slide_file = Some(orator_protocol::PresentationFile {
            file_name: "deck.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            size_bytes: 1024,
            uploaded_at: chrono::Utc::now(),
        });
        presentation.slide_confirmed = true;

        let flow = UploadFlow::new(&client, &presentation, false);
        assert_eq!(flow.slide_state(), SlotState::Confirmed);
        assert_eq!(flow.media_state(), SlotState::Empty);
    }

    #[tokio::test]
    async fn test_invalid_file_leaves_slot_empty_and_network_silent() {
        let client = create_client();

        let dir = create_temp_dir();
        let bogus = create_temp_file_with_content(&dir, "notes.txt", b"outline");

        let presentation = sample_presentation(9, 5);
        let mut flow = UploadFlow::new(&client, &presentation, false);

        assert!(flow.attach(SlotKind::Slide, &bogus).await.is_err());
        assert_eq!(flow.slide_state(), SlotState::Empty);
        assert!(client.get_requests().is_empty());
    }
}
