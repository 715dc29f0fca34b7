use async_trait::async_trait;
use carelink_core::models::{
    CommunityNews, HelpRequest, HelpRequestDraft, NewsCategory, RequestId, RequestStatus,
    Volunteer, VolunteerId,
};
use carelink_core::Result;

/// Reference to a stored audio clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioRef(pub String);

/// Port for the volunteer and help-request backend.
///
/// Calls are all-or-nothing and fail with `ServiceUnavailable` on
/// transport failure; retries, if any, are the caller's responsibility.
#[async_trait]
pub trait VolunteerDirectory: Send + Sync {
    /// List all registered volunteers
    async fn list_volunteers(&self) -> Result<Vec<Volunteer>>;

    /// List all help requests
    async fn list_help_requests(&self) -> Result<Vec<HelpRequest>>;

    /// Create a help request from a draft; the backend assigns identity,
    /// pending status, and timestamps
    async fn create_help_request(&self, draft: HelpRequestDraft) -> Result<HelpRequest>;

    /// Drive a request through the status workflow, optionally recording
    /// the assigned volunteer. Returns false when the id is unknown or
    /// the transition is rejected by the workflow table.
    async fn update_help_request_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
        volunteer: Option<VolunteerId>,
    ) -> Result<bool>;
}

/// Port for the conversational assistant backend
#[async_trait]
pub trait ConversationService: Send + Sync {
    /// Send a user utterance; returns the agent's reply text
    async fn send_user_message(&self, text: &str) -> Result<String>;

    /// Transcribe a recorded clip
    async fn speech_to_text(&self, audio: &AudioRef) -> Result<String>;

    /// Synthesize a clip for the given text
    async fn text_to_speech(&self, text: &str) -> Result<AudioRef>;
}

/// Port for the community news feed
#[async_trait]
pub trait NewsFeed: Send + Sync {
    /// List news, newest first, optionally restricted to one category
    async fn list_news(&self, category: Option<NewsCategory>) -> Result<Vec<CommunityNews>>;

    /// Keyword search over title and body
    async fn search(&self, keyword: &str) -> Result<Vec<CommunityNews>>;
}
