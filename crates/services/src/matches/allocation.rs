use quiz_core::model::{DifficultyBand, DifficultyLevel};
use serde::Serialize;

/// How many questions one band contributes to a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandAllocation {
    pub level: DifficultyLevel,
    pub proportion: u8,
    pub available: usize,
    pub count: usize,
}

impl BandAllocation {
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.count > self.available
    }
}

/// Per-band question counts for one match, easy to hard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    bands: [BandAllocation; 3],
}

impl Allocation {
    #[must_use]
    pub fn bands(&self) -> &[BandAllocation; 3] {
        &self.bands
    }

    #[must_use]
    pub fn count_for(&self, level: DifficultyLevel) -> usize {
        self.bands
            .iter()
            .find(|band| band.level == level)
            .map_or(0, |band| band.count)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.bands.iter().map(|band| band.count).sum()
    }

    /// The band that cannot cover its count, checked from hard down to easy.
    #[must_use]
    pub fn first_shortfall(&self) -> Option<&BandAllocation> {
        self.bands.iter().rev().find(|band| band.is_short())
    }
}

/// Split `match_size` across the three bands by their proportions.
///
/// Each band gets `round_half_up(match_size * proportion / 100)`. The band
/// with the largest proportion (earliest level on ties) then absorbs the
/// rounding remainder so the counts add up to `match_size`.
///
/// `bands` are expected to have passed validation (easy, medium, hard,
/// proportions summing to 100).
#[must_use]
pub fn allocate(bands: &[&DifficultyBand; 3], match_size: usize) -> Allocation {
    let size = match_size as u128;
    let rounded: [u128; 3] =
        std::array::from_fn(|i| (size * u128::from(bands[i].proportion()) + 50) / 100);

    let mut absorber = 0;
    for (index, band) in bands.iter().enumerate() {
        if band.proportion() > bands[absorber].proportion() {
            absorber = index;
        }
    }

    let assigned: u128 = rounded.iter().sum();
    let mut counts = rounded.map(|count| usize::try_from(count).unwrap_or(usize::MAX));
    if assigned > size {
        let excess = usize::try_from(assigned - size).unwrap_or(usize::MAX);
        counts[absorber] = counts[absorber].saturating_sub(excess);
    } else {
        let missing = usize::try_from(size - assigned).unwrap_or(usize::MAX);
        counts[absorber] = counts[absorber].saturating_add(missing);
    }

    Allocation {
        bands: std::array::from_fn(|i| BandAllocation {
            level: bands[i].level(),
            proportion: bands[i].proportion(),
            available: bands[i].total_questions(),
            count: counts[i],
        }),
    }
}
