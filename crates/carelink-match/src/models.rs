use carelink_core::models::Volunteer;

/// Parameters for a candidate search
#[derive(Debug, Clone)]
pub struct MatchPlan {
    /// Search radius around the store's current location
    pub radius_km: f64,
    /// Exact skill the volunteer must list, if any
    pub required_skill: Option<String>,
    /// Minimum acceptable rating, if any
    pub min_rating: Option<f32>,
    /// Maximum number of candidates returned
    pub limit: usize,
}

impl MatchPlan {
    pub fn new(radius_km: f64) -> Self {
        Self { radius_km, required_skill: None, min_rating: None, limit: 10 }
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skill = Some(skill.into());
        self
    }

    pub fn with_min_rating(mut self, rating: f32) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// A volunteer considered for a request, with the computed distance from
/// the current location
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    pub volunteer: Volunteer,
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_builder() {
        let plan = MatchPlan::new(5.0).with_skill("shopping").with_min_rating(4.5).with_limit(3);

        assert_eq!(plan.radius_km, 5.0);
        assert_eq!(plan.required_skill.as_deref(), Some("shopping"));
        assert_eq!(plan.min_rating, Some(4.5));
        assert_eq!(plan.limit, 3);
    }
}
