//! In-memory mock implementations of the data-access ports.
//!
//! These return seeded datasets after a simulated transport delay and can
//! be switched offline to exercise `ServiceUnavailable` handling. State
//! lives behind `RwLock`; guards use `unwrap()` intentionally, since lock
//! poisoning only occurs after a panic in another thread holding the lock.

use crate::ports::{AudioRef, ConversationService, NewsFeed, VolunteerDirectory};
use async_trait::async_trait;
use carelink_core::models::{
    Availability, CommunityNews, HelpRequest, HelpRequestDraft, Location, NewsCategory, NewsId,
    RequestCategory, RequestId, RequestStatus, Urgency, Volunteer, VolunteerId,
};
use carelink_core::{CareError, Result};
use carelink_geo::encode_tag;
use chrono::{Duration as ChronoDuration, Utc, Weekday};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

fn seed_location(latitude: f64, longitude: f64, address: &str) -> Location {
    Location {
        latitude,
        longitude,
        tag: encode_tag(latitude, longitude),
        address: address.to_string(),
        accuracy_m: None,
        fixed_at: Utc::now(),
    }
}

async fn transport(service: &str, offline: &AtomicBool, latency: Duration) -> Result<()> {
    if offline.load(Ordering::SeqCst) {
        return Err(CareError::service_unavailable(service, "simulated transport failure"));
    }
    if !latency.is_zero() {
        debug!(service, latency_ms = latency.as_millis() as u64, "simulating transport latency");
        tokio::time::sleep(latency).await;
    }
    Ok(())
}

/// Mock volunteer/help-request backend
pub struct MockVolunteerDirectory {
    volunteers: RwLock<Vec<Volunteer>>,
    requests: RwLock<Vec<HelpRequest>>,
    latency: Duration,
    offline: AtomicBool,
}

impl MockVolunteerDirectory {
    pub fn new(latency: Duration) -> Self {
        Self {
            volunteers: RwLock::new(Vec::new()),
            requests: RwLock::new(Vec::new()),
            latency,
            offline: AtomicBool::new(false),
        }
    }

    /// Directory pre-populated with a neighbourhood of volunteers and a
    /// few open requests, all within walking distance of central Beijing
    pub fn seeded(latency: Duration) -> Self {
        let directory = Self::new(latency);

        *directory.volunteers.write().unwrap() = vec![
            Volunteer {
                id: VolunteerId::from("v-chen"),
                name: "Chen Jing".to_string(),
                phone: "13800000001".to_string(),
                location: seed_location(39.9132, 116.4074, "Dongzhimen Inner St"),
                skills: vec!["companionship".to_string(), "shopping".to_string()],
                rating: 4.8,
                online: true,
                availability: Availability {
                    weekdays: vec![Weekday::Mon, Weekday::Wed, Weekday::Fri],
                    hours: "09:00-17:00".to_string(),
                },
            },
            Volunteer {
                id: VolunteerId::from("v-li"),
                name: "Li Wei".to_string(),
                phone: "13800000002".to_string(),
                location: seed_location(39.9242, 116.4174, "Sanlitun West"),
                skills: vec!["medical care".to_string(), "companionship".to_string()],
                rating: 4.6,
                online: true,
                availability: Availability {
                    weekdays: vec![Weekday::Tue, Weekday::Thu],
                    hours: "08:00-20:00".to_string(),
                },
            },
            Volunteer {
                id: VolunteerId::from("v-zhang"),
                name: "Zhang Min".to_string(),
                phone: "13800000003".to_string(),
                location: seed_location(39.8942, 116.3974, "Wangfujing North"),
                skills: vec!["transport".to_string()],
                rating: 4.2,
                online: false,
                availability: Availability {
                    weekdays: vec![Weekday::Sat, Weekday::Sun],
                    hours: "10:00-16:00".to_string(),
                },
            },
            Volunteer {
                id: VolunteerId::from("v-wang"),
                name: "Wang Fang".to_string(),
                phone: "13800000004".to_string(),
                location: seed_location(39.9342, 116.4274, "Chaoyang Park South"),
                skills: vec!["cooking".to_string(), "shopping".to_string()],
                rating: 4.9,
                online: true,
                availability: Availability {
                    weekdays: vec![Weekday::Mon, Weekday::Tue, Weekday::Wed],
                    hours: "09:00-18:00".to_string(),
                },
            },
        ];

        let now = Utc::now();
        *directory.requests.write().unwrap() = vec![
            HelpRequest {
                id: RequestId::from("r-groceries"),
                requester_id: "elder-sun".to_string(),
                title: "Weekly grocery run".to_string(),
                description: "Need someone to carry groceries up to the 4th floor".to_string(),
                category: RequestCategory::Daily,
                urgency: Urgency::Medium,
                location: seed_location(39.9042, 116.4074, "Jiaodaokou South Alley 12"),
                status: RequestStatus::Pending,
                created_at: now - ChronoDuration::hours(3),
                updated_at: now - ChronoDuration::hours(3),
                assigned_volunteer: None,
            },
            HelpRequest {
                id: RequestId::from("r-clinic"),
                requester_id: "elder-ma".to_string(),
                title: "Accompany to the clinic".to_string(),
                description: "Blood pressure follow-up on Thursday morning".to_string(),
                category: RequestCategory::Medical,
                urgency: Urgency::High,
                location: seed_location(39.9092, 116.4124, "Beixinqiao 3rd Alley 8"),
                status: RequestStatus::Pending,
                created_at: now - ChronoDuration::hours(1),
                updated_at: now - ChronoDuration::hours(1),
                assigned_volunteer: None,
            },
            HelpRequest {
                id: RequestId::from("r-checkin"),
                requester_id: "elder-gu".to_string(),
                title: "Afternoon walk".to_string(),
                description: "A walk around the park and a chat".to_string(),
                category: RequestCategory::Companionship,
                urgency: Urgency::Low,
                location: seed_location(39.8992, 116.4024, "Di'anmen East St 5"),
                status: RequestStatus::Pending,
                created_at: now - ChronoDuration::minutes(20),
                updated_at: now - ChronoDuration::minutes(20),
                assigned_volunteer: None,
            },
        ];

        directory
    }

    /// Simulate the backend becoming unreachable
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl VolunteerDirectory for MockVolunteerDirectory {
    async fn list_volunteers(&self) -> Result<Vec<Volunteer>> {
        transport("volunteer-directory", &self.offline, self.latency).await?;
        Ok(self.volunteers.read().unwrap().clone())
    }

    async fn list_help_requests(&self) -> Result<Vec<HelpRequest>> {
        transport("volunteer-directory", &self.offline, self.latency).await?;
        Ok(self.requests.read().unwrap().clone())
    }

    async fn create_help_request(&self, draft: HelpRequestDraft) -> Result<HelpRequest> {
        transport("volunteer-directory", &self.offline, self.latency).await?;

        let now = Utc::now();
        let request = HelpRequest {
            id: RequestId(Uuid::new_v4().to_string()),
            requester_id: draft.requester_id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            urgency: draft.urgency,
            location: draft.location,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
            assigned_volunteer: None,
        };

        self.requests.write().unwrap().push(request.clone());
        Ok(request)
    }

    async fn update_help_request_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
        volunteer: Option<VolunteerId>,
    ) -> Result<bool> {
        transport("volunteer-directory", &self.offline, self.latency).await?;

        let mut requests = self.requests.write().unwrap();
        let Some(request) = requests.iter_mut().find(|r| &r.id == id) else {
            return Ok(false);
        };

        if !request.status.can_transition_to(status) {
            warn!(
                request = %id,
                from = ?request.status,
                to = ?status,
                "rejected help-request status transition"
            );
            return Ok(false);
        }

        request.status = status;
        request.updated_at = Utc::now();
        if let Some(volunteer) = volunteer {
            request.assigned_volunteer = Some(volunteer);
        }
        Ok(true)
    }
}

/// Mock conversational assistant with keyword-matched canned replies
pub struct MockConversationService {
    latency: Duration,
    offline: AtomicBool,
}

impl MockConversationService {
    pub fn new(latency: Duration) -> Self {
        Self { latency, offline: AtomicBool::new(false) }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn reply_for(text: &str) -> String {
        let lower = text.to_lowercase();
        if lower.contains("medicine") || lower.contains("pill") {
            "Remember to take your blood pressure medicine after lunch. \
             Would you like me to set a reminder?"
                .to_string()
        } else if lower.contains("lonely") || lower.contains("talk") {
            "I'm always happy to chat. Shall I also look for a volunteer \
             nearby who could visit this week?"
                .to_string()
        } else if lower.contains("help") {
            "I can connect you with a nearby volunteer. What do you need \
             help with?"
                .to_string()
        } else {
            "I'm here with you. Could you tell me a bit more?".to_string()
        }
    }
}

#[async_trait]
impl ConversationService for MockConversationService {
    async fn send_user_message(&self, text: &str) -> Result<String> {
        transport("conversation", &self.offline, self.latency).await?;
        Ok(Self::reply_for(text))
    }

    async fn speech_to_text(&self, audio: &AudioRef) -> Result<String> {
        transport("conversation", &self.offline, self.latency).await?;
        debug!(clip = %audio.0, "transcribing recorded clip");
        Ok("I would like someone to walk with me this afternoon".to_string())
    }

    async fn text_to_speech(&self, text: &str) -> Result<AudioRef> {
        transport("conversation", &self.offline, self.latency).await?;
        debug!(chars = text.len(), "synthesizing speech clip");
        Ok(AudioRef(format!("clip-{}", Uuid::new_v4())))
    }
}

/// Mock community news feed
pub struct MockNewsFeed {
    items: RwLock<Vec<CommunityNews>>,
    latency: Duration,
    offline: AtomicBool,
}

impl MockNewsFeed {
    pub fn new(latency: Duration) -> Self {
        Self { items: RwLock::new(Vec::new()), latency, offline: AtomicBool::new(false) }
    }

    pub fn seeded(latency: Duration) -> Self {
        let feed = Self::new(latency);
        let now = Utc::now();

        *feed.items.write().unwrap() = vec![
            CommunityNews {
                id: NewsId::from("n-checkup"),
                title: "Free health checkup on Saturday".to_string(),
                body: "Blood pressure and glucose screening at the community center, \
                       9am to noon. Bring your resident card."
                    .to_string(),
                category: NewsCategory::Health,
                author: "Community Health Office".to_string(),
                published_at: now - ChronoDuration::hours(6),
            },
            CommunityNews {
                id: NewsId::from("n-taiji"),
                title: "Morning taiji group resumes".to_string(),
                body: "The riverside taiji group meets again from Monday at 7am."
                    .to_string(),
                category: NewsCategory::Activity,
                author: "Residents' Committee".to_string(),
                published_at: now - ChronoDuration::days(1),
            },
            CommunityNews {
                id: NewsId::from("n-water"),
                title: "Planned water outage".to_string(),
                body: "Building 3 will have no water on Wednesday between 1pm and 5pm \
                       for pipe maintenance."
                    .to_string(),
                category: NewsCategory::Notice,
                author: "Property Management".to_string(),
                published_at: now - ChronoDuration::days(2),
            },
        ];

        feed
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl NewsFeed for MockNewsFeed {
    async fn list_news(&self, category: Option<NewsCategory>) -> Result<Vec<CommunityNews>> {
        transport("news-feed", &self.offline, self.latency).await?;

        let mut items: Vec<CommunityNews> = self
            .items
            .read()
            .unwrap()
            .iter()
            .filter(|item| category.map(|c| item.category == c).unwrap_or(true))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(items)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<CommunityNews>> {
        transport("news-feed", &self.offline, self.latency).await?;

        Ok(self
            .items
            .read()
            .unwrap()
            .iter()
            .filter(|item| item.matches_keyword(keyword))
            .cloned()
            .collect())
    }
}
