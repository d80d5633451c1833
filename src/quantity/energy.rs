use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
};

use ordered_float::OrderedFloat;

#[repr(transparent)]
#[derive(Copy, Clone, derive_more::Add, derive_more::Sum)]
pub struct KilowattHours(pub f64);

impl KilowattHours {
    pub const ZERO: Self = Self(0.0);
}

impl Display for KilowattHours {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, formatter)?;
        formatter.write_str(" kWh")
    }
}

impl Debug for KilowattHours {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, formatter)?;
        formatter.write_str("kWh")
    }
}

impl PartialEq for KilowattHours {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.0) == OrderedFloat(other.0)
    }
}

impl Eq for KilowattHours {}

impl PartialOrd for KilowattHours {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KilowattHours {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.0).cmp(&OrderedFloat(other.0))
    }
}
