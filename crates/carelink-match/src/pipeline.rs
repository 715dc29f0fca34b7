use carelink_core::models::{HelpRequestPatch, RequestId, RequestStatus, VolunteerId};
use carelink_core::{CareError, Result};
use carelink_data::VolunteerDirectory;
use carelink_geo::distance_between_km;
use carelink_store::VolunteerStore;
use std::sync::Arc;
use tracing::info;

use crate::models::{MatchCandidate, MatchPlan};

/// Matching pipeline over an injected directory and a shared store
pub struct MatchPipeline<D: VolunteerDirectory> {
    directory: D,
    store: Arc<VolunteerStore>,
}

impl<D: VolunteerDirectory> MatchPipeline<D> {
    pub fn new(directory: D, store: Arc<VolunteerStore>) -> Self {
        Self { directory, store }
    }

    /// Load volunteers and help requests from the directory into the
    /// store, managing the loading and error scalars. A failed refresh
    /// records the error in the store and propagates it; the collections
    /// keep their previous contents.
    pub async fn refresh(&self) -> Result<()> {
        self.store.set_loading(true);

        let loaded = async {
            let volunteers = self.directory.list_volunteers().await?;
            let requests = self.directory.list_help_requests().await?;
            Ok::<_, CareError>((volunteers, requests))
        }
        .await;

        match loaded {
            Ok((volunteers, requests)) => {
                info!(
                    volunteers = volunteers.len(),
                    requests = requests.len(),
                    "directory refresh complete"
                );
                self.store.set_volunteers(volunteers);
                self.store.set_help_requests(requests);
                self.store.set_error(None);
                self.store.set_loading(false);
                Ok(())
            }
            Err(e) => {
                self.store.set_error(Some(e.to_string()));
                self.store.set_loading(false);
                Err(e)
            }
        }
    }

    /// Ranked candidates for a plan: online volunteers within the plan
    /// radius of the store's current location, filtered by skill and
    /// rating when the plan asks for it, ordered by distance then rating.
    /// Pure over store contents; empty when no current location is set.
    pub fn candidates(&self, plan: &MatchPlan) -> Vec<MatchCandidate> {
        let Some(center) = self.store.current_location() else {
            return Vec::new();
        };
        let center = center.coordinates();

        let mut candidates: Vec<MatchCandidate> = self
            .store
            .volunteers()
            .iter()
            .filter(|v| v.online)
            .filter(|v| plan.required_skill.as_deref().map(|s| v.has_skill(s)).unwrap_or(true))
            .filter(|v| plan.min_rating.map(|r| v.rating >= r).unwrap_or(true))
            .map(|v| MatchCandidate {
                distance_km: distance_between_km(center, v.location.coordinates()),
                volunteer: v.clone(),
            })
            .filter(|c| c.distance_km <= plan.radius_km)
            .collect();

        candidates.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(
                    b.volunteer
                        .rating
                        .partial_cmp(&a.volunteer.rating)
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
        });
        candidates.truncate(plan.limit);
        candidates
    }

    /// Accept a pending request on behalf of a volunteer. Returns whether
    /// the assignment took; on success the accepted state is mirrored
    /// into the store.
    pub async fn assign(&self, request_id: &RequestId, volunteer_id: &VolunteerId) -> Result<bool> {
        let accepted = self
            .directory
            .update_help_request_status(
                request_id,
                RequestStatus::Accepted,
                Some(volunteer_id.clone()),
            )
            .await?;

        if accepted {
            info!(request = %request_id, volunteer = %volunteer_id, "request assigned");
            self.store.update_help_request(
                request_id,
                &HelpRequestPatch {
                    status: Some(RequestStatus::Accepted),
                    assigned_volunteer: Some(volunteer_id.clone()),
                    ..Default::default()
                },
            );
        }
        Ok(accepted)
    }
}
