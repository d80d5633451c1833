use crate::{
    core::{EstimationError, GeoPoint, HardwareVariant, MonthlyEnergy, Tilt},
    prelude::*,
};

/// What the user currently has selected.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Selection {
    pub point: Option<GeoPoint>,
    pub variant: HardwareVariant,
    pub tilt: Tilt,
}

impl Selection {
    /// Freeze the selection for a calculation.
    pub fn snapshot(&self) -> Result<CalculatedSelection> {
        let point = self.point.ok_or(EstimationError::NoLocationSelected)?;
        Ok(CalculatedSelection { point, variant: self.variant, tilt: self.tilt })
    }
}

/// Selection that a displayed result was calculated for.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
#[display("{point} with a {variant} aerator tilted at {tilt}")]
pub struct CalculatedSelection {
    pub point: GeoPoint,
    pub variant: HardwareVariant,
    pub tilt: Tilt,
}

/// Completed calculation together with its provenance.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Estimate {
    pub selection: CalculatedSelection,
    pub energy: MonthlyEnergy,
}

/// State of one interactive session.
#[must_use]
#[derive(Default)]
pub struct SessionState {
    selection: Selection,
    estimate: Option<Estimate>,
    is_processing: bool,
}

impl SessionState {
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub const fn estimate(&self) -> Option<&Estimate> {
        self.estimate.as_ref()
    }

    pub const fn is_processing(&self) -> bool {
        self.is_processing
    }

    /// Select the point, returns whether the selection actually changed.
    pub fn select_point(&mut self, point: GeoPoint) -> bool {
        let is_changed = self.selection.point != Some(point);
        self.selection.point = Some(point);
        is_changed
    }

    pub const fn select_variant(&mut self, variant: HardwareVariant) {
        self.selection.variant = variant;
    }

    pub const fn select_tilt(&mut self, tilt: Tilt) {
        self.selection.tilt = tilt;
    }

    pub(super) const fn set_processing(&mut self, is_processing: bool) {
        self.is_processing = is_processing;
    }

    /// Replace the displayed estimate wholesale.
    pub(super) fn publish(&mut self, estimate: Estimate) -> &Estimate {
        self.estimate.insert(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_without_point() {
        let error = Selection::default().snapshot().unwrap_err();
        assert_eq!(EstimationError::of(&error), Some(EstimationError::NoLocationSelected));
    }

    #[test]
    fn test_select_point_reports_change() -> Result {
        let mut session = SessionState::default();
        let point = GeoPoint::try_new(38.0367, -84.5078)?;
        assert!(session.select_point(point));
        assert!(!session.select_point(GeoPoint::try_new(38.036_71, -84.507_79)?));
        assert!(session.select_point(GeoPoint::try_new(40.0, -84.5078)?));
        Ok(())
    }

    #[test]
    fn test_estimate_keeps_its_provenance() -> Result {
        let mut session = SessionState::default();
        session.select_point(GeoPoint::try_new(38.0367, -84.5078)?);
        let calculated = session.selection().snapshot()?;
        session.publish(Estimate {
            selection: calculated,
            energy: MonthlyEnergy::try_from(vec![1.0; 12])?,
        });

        session.select_variant(HardwareVariant::FourPanel);
        session.select_tilt(Tilt::try_new(40)?);
        session.select_point(GeoPoint::try_new(0.0, 0.0)?);

        let estimate = session.estimate().context("the estimate is missing")?;
        assert_eq!(estimate.selection, calculated);
        assert_eq!(estimate.selection.variant, HardwareVariant::TwoPanel);
        assert_eq!(estimate.selection.tilt, Tilt::default());
        assert_eq!(session.selection().variant, HardwareVariant::FourPanel);
        assert_eq!(
            estimate.selection.to_string(),
            "38.0367, -84.5078 with a 2-Panel aerator tilted at 15°",
        );
        Ok(())
    }
}
