//! Rating aggregation for trust scores and profile summaries.

/// Average rating and count over a set of reviews
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    /// Mean rounded to one decimal place; `None` when there are no ratings
    pub average: Option<f64>,
    pub count: i64,
}

/// Mean of `ratings` rounded half away from zero to one decimal place.
///
/// Uses integer arithmetic so the result matches Postgres
/// `ROUND(AVG(rating)::numeric, 1)` exactly.
pub fn average_rating(ratings: &[i32]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }

    let count = ratings.len() as i64;
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();

    // tenths = round(sum * 10 / count), half away from zero
    let numerator = sum * 20;
    let denominator = count * 2;
    let tenths = if numerator >= 0 {
        (numerator + count) / denominator
    } else {
        (numerator - count) / denominator
    };

    Some(tenths as f64 / 10.0)
}

pub fn summarize(ratings: &[i32]) -> RatingSummary {
    RatingSummary {
        average: average_rating(ratings),
        count: ratings.len() as i64,
    }
}
