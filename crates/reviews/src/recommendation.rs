use serde::Serialize;

/// Business outlook derived from the mean star rating.
///
/// Bands are closed at their lower bound: 4.0 is `Strong`, 3.0 is `Mixed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Strong,
    Mixed,
    ActionRequired,
}

impl Recommendation {
    pub const STRONG_FROM: f64 = 4.0;
    pub const MIXED_FROM: f64 = 3.0;

    pub fn for_rating(avg_stars: f64) -> Self {
        if avg_stars >= Self::STRONG_FROM {
            Recommendation::Strong
        } else if avg_stars >= Self::MIXED_FROM {
            Recommendation::Mixed
        } else {
            Recommendation::ActionRequired
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::Strong => "Strong customer satisfaction!",
            Recommendation::Mixed => "Mixed reviews - Needs improvement.",
            Recommendation::ActionRequired => "Many negative reviews - Action required.",
        }
    }
}
