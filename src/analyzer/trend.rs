use crate::model::{Direction, PriceRecord, Trend};

/// Number of rising and falling records in a set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrendCounts {
    pub ups: usize,
    pub downs: usize,
}

impl TrendCounts {
    pub fn tally(records: &[PriceRecord]) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut acc, r| {
                match r.direction() {
                    Some(Direction::Up) => acc.ups += 1,
                    Some(Direction::Down) => acc.downs += 1,
                    None => {}
                }
                acc
            })
    }
}

/// Classifies a present (possibly empty) record set. Ties are `Mixed`.
pub fn classify(records: &[PriceRecord]) -> Trend {
    let counts = TrendCounts::tally(records);
    if counts.ups > counts.downs {
        Trend::Upward
    } else if counts.downs > counts.ups {
        Trend::Downward
    } else {
        Trend::Mixed
    }
}

/// Like [`classify`], but an absent record set (rejected fetch) is `Unavailable`.
pub fn classify_outcome(records: Option<&[PriceRecord]>) -> Trend {
    records.map_or(Trend::Unavailable, classify)
}

impl Trend {
    /// Sentence for the market outlook card.
    pub fn outlook(self) -> &'static str {
        match self {
            Trend::Upward => "Prices trending upward across most protein categories this month. Beef and eggs lead increases while dairy shows some relief.",
            Trend::Downward => "Prices easing across several key categories. Buyers may find favorable conditions in dairy and ground beef.",
            Trend::Mixed => "Mixed signals across protein and dairy categories. Some items rising while others pull back.",
            Trend::Unavailable => "Check back for updated market analysis.",
        }
    }

    /// Short form used in the JSON snapshot.
    pub fn headline(self) -> &'static str {
        match self {
            Trend::Upward => "Prices trending upward across most protein categories.",
            Trend::Downward => "Prices easing across several key categories.",
            Trend::Mixed => "Mixed signals across protein and dairy categories.",
            Trend::Unavailable => "Check back for updated market analysis.",
        }
    }
}
