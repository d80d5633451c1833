use chrono::Month;

use crate::{prelude::*, quantity::energy::KilowattHours};

/// Simulated DC energy output per calendar month, January first.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MonthlyEnergy([KilowattHours; 12]);

impl MonthlyEnergy {
    pub fn annual_total(&self) -> KilowattHours {
        self.0.iter().copied().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Month, KilowattHours)> + '_ {
        MONTHS.into_iter().zip(self.0.iter().copied())
    }

    pub fn max(&self) -> KilowattHours {
        self.0.iter().copied().max().unwrap_or(KilowattHours::ZERO)
    }
}

impl TryFrom<Vec<f64>> for MonthlyEnergy {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        let n_values = values.len();
        let values: [f64; 12] = values
            .try_into()
            .map_err(|_| anyhow!("expected 12 monthly values, got {n_values}"))?;
        ensure!(values.iter().all(|value| value.is_finite()), "monthly values must be finite");
        Ok(Self(values.map(KilowattHours)))
    }
}

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];
