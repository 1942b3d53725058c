//! Price position relative to the market band for a make/model/year.

use serde::Serialize;

/// Where a listing's asking price sits against its market band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PricePosition {
    GreatDeal,
    Fair,
    AboveAverage,
    Overpriced,
    Unknown,
}

/// A market price band. Any bound may be absent when no band row matched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarketBand {
    pub low: Option<f64>,
    pub avg: Option<f64>,
    pub high: Option<f64>,
}

impl MarketBand {
    pub fn new(low: Option<f64>, avg: Option<f64>, high: Option<f64>) -> Self {
        Self { low, avg, high }
    }

    /// Classify `price` against this band.
    pub fn classify(&self, price: f64) -> PricePosition {
        price_position(price, self.low, self.avg, self.high)
    }
}

fn present(bound: Option<f64>) -> Option<f64> {
    bound.filter(|v| *v != 0.0 && !v.is_nan())
}

/// Classify a price against low/avg/high bounds.
///
/// Missing or zero bounds yield `Unknown`. The low bound is strict
/// (`price == low` is fair); avg and high are inclusive.
pub fn price_position(
    price: f64,
    low: Option<f64>,
    avg: Option<f64>,
    high: Option<f64>,
) -> PricePosition {
    let (Some(low), Some(avg), Some(high)) = (present(low), present(avg), present(high)) else {
        return PricePosition::Unknown;
    };

    if price < low {
        PricePosition::GreatDeal
    } else if price <= avg {
        PricePosition::Fair
    } else if price <= high {
        PricePosition::AboveAverage
    } else {
        PricePosition::Overpriced
    }
}
