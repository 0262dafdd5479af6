//! Review aggregation.
//!
//! Aggregates are always rebuilt from the full review set rather than adjusted incrementally,
//! so a locality or service can be repaired by recomputing at any time.

/// Reviews needed before a locality counts as verified.
pub const DEFAULT_VERIFIED_THRESHOLD: u32 = 10;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// Forces a submitted rating into `0.0..=5.0`. NaN becomes 0.
pub fn clamp_rating(rating: f64) -> f64 {
    if rating.is_nan() {
        MIN_RATING
    } else {
        rating.clamp(MIN_RATING, MAX_RATING)
    }
}

/// Result of aggregating `N` rating dimensions over a review set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateStats<const N: usize> {
    pub averages: [f64; N],
    pub review_count: u32,
    pub is_verified: bool,
}

/// Averages each dimension across `reviews`.
///
/// An empty set yields zero averages, zero count and `is_verified = false`.
pub fn recompute<const N: usize>(reviews: &[[f64; N]], verified_threshold: u32) -> AggregateStats<N> {
    let review_count = u32::try_from(reviews.len()).unwrap_or(u32::MAX);
    let mut averages = [0.0; N];
    if !reviews.is_empty() {
        for review in reviews {
            for (sum, rating) in averages.iter_mut().zip(review) {
                *sum += clamp_rating(*rating);
            }
        }
        let n = reviews.len() as f64;
        for avg in averages.iter_mut() {
            *avg /= n;
        }
    }
    AggregateStats {
        averages,
        review_count,
        is_verified: review_count >= verified_threshold,
    }
}
