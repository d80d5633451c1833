use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::prelude::*;

/// Solar aerator assembly.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, clap::ValueEnum)]
pub enum HardwareVariant {
    #[default]
    #[value(name = "2-panel")]
    TwoPanel,

    #[value(name = "4-panel")]
    FourPanel,
}

impl Display for HardwareVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TwoPanel => write!(f, "2-Panel"),
            Self::FourPanel => write!(f, "4-Panel"),
        }
    }
}

/// Panel tilt angle in whole degrees, `0..=90`.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Tilt(u8);

impl Tilt {
    pub const MAX_DEGREES: u8 = 90;

    pub fn try_new(degrees: u8) -> Result<Self> {
        ensure!(
            degrees <= Self::MAX_DEGREES,
            "tilt must be within 0–{} degrees, got {degrees}",
            Self::MAX_DEGREES,
        );
        Ok(Self(degrees))
    }

    pub const fn degrees(self) -> u8 {
        self.0
    }
}

impl Default for Tilt {
    fn default() -> Self {
        Self(15)
    }
}

impl FromStr for Tilt {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let degrees = value.parse().with_context(|| format!("`{value}` is not a valid tilt"))?;
        Self::try_new(degrees)
    }
}

impl Display for Tilt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tilt_ok() -> Result {
        assert_eq!("0".parse::<Tilt>()?.degrees(), 0);
        assert_eq!("90".parse::<Tilt>()?.degrees(), 90);
        Ok(())
    }

    #[test]
    fn test_parse_tilt_out_of_range() {
        assert!("91".parse::<Tilt>().is_err());
        assert!("-1".parse::<Tilt>().is_err());
        assert!("15.5".parse::<Tilt>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(HardwareVariant::default(), HardwareVariant::TwoPanel);
        assert_eq!(Tilt::default().degrees(), 15);
    }

    #[test]
    fn test_variant_value_names() -> Result {
        use clap::ValueEnum;

        let variant = HardwareVariant::from_str("4-panel", false).map_err(Error::msg)?;
        assert_eq!(variant, HardwareVariant::FourPanel);
        assert_eq!(variant.to_string(), "4-Panel");
        Ok(())
    }
}
