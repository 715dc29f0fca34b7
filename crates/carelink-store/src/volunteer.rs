use carelink_core::models::{
    HelpRequest, HelpRequestPatch, Location, RequestId, RequestStatus, Volunteer, VolunteerId,
    VolunteerPatch,
};
use carelink_geo::is_within_radius;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Change notifications broadcast after each effective mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolunteerEvent {
    VolunteersChanged,
    HelpRequestsChanged,
    LocationChanged,
    LoadingChanged,
    ErrorChanged,
}

#[derive(Debug, Clone, Default)]
struct VolunteerState {
    volunteers: Arc<Vec<Volunteer>>,
    help_requests: Arc<Vec<HelpRequest>>,
    current_location: Option<Location>,
    loading: bool,
    error: Option<String>,
}

/// Store for volunteers, help requests, and the current location.
///
/// Collections keep insertion order. Id uniqueness is assumed, not
/// enforced: adding a duplicate id creates a duplicate entry, and
/// targeted updates apply to every matching entry.
pub struct VolunteerStore {
    state: RwLock<VolunteerState>,
    events: broadcast::Sender<VolunteerEvent>,
}

impl Default for VolunteerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VolunteerStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self { state: RwLock::new(VolunteerState::default()), events }
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<VolunteerEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: VolunteerEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    // --- volunteers ---

    pub fn set_volunteers(&self, volunteers: Vec<Volunteer>) {
        self.state.write().unwrap().volunteers = Arc::new(volunteers);
        self.emit(VolunteerEvent::VolunteersChanged);
    }

    pub fn add_volunteer(&self, volunteer: Volunteer) {
        {
            let mut state = self.state.write().unwrap();
            let mut next = state.volunteers.as_ref().clone();
            next.push(volunteer);
            state.volunteers = Arc::new(next);
        }
        self.emit(VolunteerEvent::VolunteersChanged);
    }

    /// Silent no-op when the id is absent; the collection reference is
    /// left untouched so observers see no change
    pub fn update_volunteer(&self, id: &VolunteerId, patch: &VolunteerPatch) {
        let changed = {
            let mut state = self.state.write().unwrap();
            if state.volunteers.iter().any(|v| &v.id == id) {
                let mut next = state.volunteers.as_ref().clone();
                for volunteer in next.iter_mut().filter(|v| &v.id == id) {
                    patch.apply(volunteer);
                }
                state.volunteers = Arc::new(next);
                true
            } else {
                false
            }
        };
        if changed {
            self.emit(VolunteerEvent::VolunteersChanged);
        }
    }

    pub fn remove_volunteer(&self, id: &VolunteerId) {
        let changed = {
            let mut state = self.state.write().unwrap();
            if state.volunteers.iter().any(|v| &v.id == id) {
                let next: Vec<Volunteer> =
                    state.volunteers.iter().filter(|v| &v.id != id).cloned().collect();
                state.volunteers = Arc::new(next);
                true
            } else {
                false
            }
        };
        if changed {
            self.emit(VolunteerEvent::VolunteersChanged);
        }
    }

    // --- help requests ---

    pub fn set_help_requests(&self, requests: Vec<HelpRequest>) {
        self.state.write().unwrap().help_requests = Arc::new(requests);
        self.emit(VolunteerEvent::HelpRequestsChanged);
    }

    pub fn add_help_request(&self, request: HelpRequest) {
        {
            let mut state = self.state.write().unwrap();
            let mut next = state.help_requests.as_ref().clone();
            next.push(request);
            state.help_requests = Arc::new(next);
        }
        self.emit(VolunteerEvent::HelpRequestsChanged);
    }

    /// Silent no-op when the id is absent
    pub fn update_help_request(&self, id: &RequestId, patch: &HelpRequestPatch) {
        let changed = {
            let mut state = self.state.write().unwrap();
            if state.help_requests.iter().any(|r| &r.id == id) {
                let mut next = state.help_requests.as_ref().clone();
                for request in next.iter_mut().filter(|r| &r.id == id) {
                    patch.apply(request);
                }
                state.help_requests = Arc::new(next);
                true
            } else {
                false
            }
        };
        if changed {
            self.emit(VolunteerEvent::HelpRequestsChanged);
        }
    }

    pub fn remove_help_request(&self, id: &RequestId) {
        let changed = {
            let mut state = self.state.write().unwrap();
            if state.help_requests.iter().any(|r| &r.id == id) {
                let next: Vec<HelpRequest> =
                    state.help_requests.iter().filter(|r| &r.id != id).cloned().collect();
                state.help_requests = Arc::new(next);
                true
            } else {
                false
            }
        };
        if changed {
            self.emit(VolunteerEvent::HelpRequestsChanged);
        }
    }

    // --- scalars ---

    pub fn set_current_location(&self, location: Option<Location>) {
        self.state.write().unwrap().current_location = location;
        self.emit(VolunteerEvent::LocationChanged);
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.write().unwrap().loading = loading;
        self.emit(VolunteerEvent::LoadingChanged);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.write().unwrap().error = error;
        self.emit(VolunteerEvent::ErrorChanged);
    }

    // --- snapshots ---

    pub fn volunteers(&self) -> Arc<Vec<Volunteer>> {
        Arc::clone(&self.state.read().unwrap().volunteers)
    }

    pub fn help_requests(&self) -> Arc<Vec<HelpRequest>> {
        Arc::clone(&self.state.read().unwrap().help_requests)
    }

    pub fn current_location(&self) -> Option<Location> {
        self.state.read().unwrap().current_location.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.read().unwrap().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().unwrap().error.clone()
    }

    // --- derived queries ---

    /// Volunteers within `radius_km` of the current location, in
    /// insertion order (not distance-sorted). Empty when no current
    /// location is set.
    pub fn nearby_volunteers(&self, radius_km: f64) -> Vec<Volunteer> {
        let state = self.state.read().unwrap();
        let Some(center) = &state.current_location else {
            return Vec::new();
        };
        let center = center.coordinates();

        state
            .volunteers
            .iter()
            .filter(|v| is_within_radius(center, v.location.coordinates(), radius_km))
            .cloned()
            .collect()
    }

    /// Exact string membership test against each volunteer's skill list
    pub fn volunteers_with_skill(&self, skill: &str) -> Vec<Volunteer> {
        self.state
            .read()
            .unwrap()
            .volunteers
            .iter()
            .filter(|v| v.has_skill(skill))
            .cloned()
            .collect()
    }

    pub fn requests_by_status(&self, status: RequestStatus) -> Vec<HelpRequest> {
        self.state
            .read()
            .unwrap()
            .help_requests
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect()
    }

    /// Requests with high or emergency urgency
    pub fn urgent_requests(&self) -> Vec<HelpRequest> {
        self.state
            .read()
            .unwrap()
            .help_requests
            .iter()
            .filter(|r| r.urgency.is_urgent())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carelink_core::models::{
        Availability, HelpRequestPatch, RequestCategory, Urgency, VolunteerPatch,
    };
    use chrono::Utc;

    fn location_at(latitude: f64, longitude: f64) -> Location {
        Location {
            latitude,
            longitude,
            tag: carelink_geo::encode_tag(latitude, longitude),
            address: "test".to_string(),
            accuracy_m: None,
            fixed_at: Utc::now(),
        }
    }

    fn volunteer_at(id: &str, latitude: f64, longitude: f64) -> Volunteer {
        Volunteer {
            id: VolunteerId::from(id),
            name: format!("volunteer {id}"),
            phone: "13800000000".to_string(),
            location: location_at(latitude, longitude),
            skills: vec!["companionship".to_string()],
            rating: 4.0,
            online: true,
            availability: Availability { weekdays: vec![], hours: "09:00-17:00".to_string() },
        }
    }

    fn request_with(id: &str, urgency: Urgency) -> HelpRequest {
        let now = Utc::now();
        HelpRequest {
            id: RequestId::from(id),
            requester_id: "elder-1".to_string(),
            title: format!("request {id}"),
            description: String::new(),
            category: RequestCategory::Daily,
            urgency,
            location: location_at(39.9042, 116.4074),
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
            assigned_volunteer: None,
        }
    }

    #[test]
    fn test_nearby_empty_without_current_location() {
        let store = VolunteerStore::new();
        store.set_volunteers(vec![volunteer_at("v1", 39.9042, 116.4074)]);

        assert!(store.nearby_volunteers(100.0).is_empty());
    }

    #[test]
    fn test_nearby_filters_by_radius_preserving_order() {
        let store = VolunteerStore::new();
        // 0.009 degrees of latitude is roughly 1 km
        store.set_volunteers(vec![
            volunteer_at("near", 39.9132, 116.4074),  // ~1 km
            volunteer_at("mid", 39.9402, 116.4074),   // ~4 km
            volunteer_at("far", 39.9582, 116.4074),   // ~6 km
        ]);
        store.set_current_location(Some(location_at(39.9042, 116.4074)));

        let nearby = store.nearby_volunteers(5.0);

        let ids: Vec<&str> = nearby.iter().map(|v| v.id.0.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid"]);
    }

    #[test]
    fn test_update_missing_volunteer_is_noop() {
        let store = VolunteerStore::new();
        store.set_volunteers(vec![volunteer_at("v1", 39.9, 116.4)]);
        let before = store.volunteers();

        store.update_volunteer(&VolunteerId::from("ghost"), &VolunteerPatch {
            online: Some(false),
            ..Default::default()
        });

        // Collection reference untouched: observers see no change
        assert!(Arc::ptr_eq(&before, &store.volunteers()));
    }

    #[test]
    fn test_remove_then_update_is_noop() {
        let store = VolunteerStore::new();
        store.set_volunteers(vec![volunteer_at("v1", 39.9, 116.4)]);

        store.remove_volunteer(&VolunteerId::from("v1"));
        store.update_volunteer(&VolunteerId::from("v1"), &VolunteerPatch {
            rating: Some(5.0),
            ..Default::default()
        });

        assert!(store.volunteers().is_empty());
    }

    #[test]
    fn test_mutation_swaps_collection_reference() {
        let store = VolunteerStore::new();
        store.set_volunteers(vec![volunteer_at("v1", 39.9, 116.4)]);
        let before = store.volunteers();

        store.update_volunteer(&VolunteerId::from("v1"), &VolunteerPatch {
            online: Some(false),
            ..Default::default()
        });

        let after = store.volunteers();
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(!after[0].online);
        // The snapshot taken before the mutation is unaffected
        assert!(before[0].online);
    }

    #[test]
    fn test_duplicate_add_creates_duplicate_entry() {
        let store = VolunteerStore::new();
        store.add_volunteer(volunteer_at("v1", 39.9, 116.4));
        store.add_volunteer(volunteer_at("v1", 39.9, 116.4));

        assert_eq!(store.volunteers().len(), 2);
    }

    #[test]
    fn test_skill_query_is_exact() {
        let store = VolunteerStore::new();
        store.set_volunteers(vec![volunteer_at("v1", 39.9, 116.4)]);

        assert_eq!(store.volunteers_with_skill("companionship").len(), 1);
        assert!(store.volunteers_with_skill("companion").is_empty());
    }

    #[test]
    fn test_urgent_requests_filter() {
        let store = VolunteerStore::new();
        store.set_help_requests(vec![
            request_with("r1", Urgency::Low),
            request_with("r2", Urgency::Medium),
            request_with("r3", Urgency::High),
            request_with("r4", Urgency::Emergency),
        ]);

        let urgent = store.urgent_requests();
        let ids: Vec<&str> = urgent.iter().map(|r| r.id.0.as_str()).collect();
        assert_eq!(ids, vec!["r3", "r4"]);
    }

    #[test]
    fn test_requests_by_status() {
        let store = VolunteerStore::new();
        store.set_help_requests(vec![request_with("r1", Urgency::Low)]);
        store.update_help_request(&RequestId::from("r1"), &HelpRequestPatch {
            status: Some(RequestStatus::Accepted),
            ..Default::default()
        });

        assert!(store.requests_by_status(RequestStatus::Pending).is_empty());
        assert_eq!(store.requests_by_status(RequestStatus::Accepted).len(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_receive_mutation_events() {
        let store = VolunteerStore::new();
        let mut rx = store.subscribe();

        store.set_loading(true);
        store.set_volunteers(vec![]);

        assert_eq!(rx.recv().await.unwrap(), VolunteerEvent::LoadingChanged);
        assert_eq!(rx.recv().await.unwrap(), VolunteerEvent::VolunteersChanged);
    }
}
