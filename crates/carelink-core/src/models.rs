pub mod chat;
pub mod location;
pub mod news;
pub mod request;
pub mod volunteer;

pub use chat::{AgentId, AiAgent, ChatMessage, MessageId, MessageKind, MessagePatch};
pub use location::{Coordinates, Location};
pub use news::{CommunityNews, NewsCategory, NewsId};
pub use request::{
    HelpRequest, HelpRequestDraft, HelpRequestPatch, RequestCategory, RequestId, RequestStatus,
    Urgency,
};
pub use volunteer::{Availability, Volunteer, VolunteerId, VolunteerPatch};
