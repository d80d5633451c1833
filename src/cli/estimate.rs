use clap::Parser;

use crate::{
    cli::engine::EngineArgs,
    core::{GeoPoint, HardwareVariant, SessionState, Tilt},
    prelude::*,
    tables::build_estimate_table,
};

#[derive(Parser)]
pub struct EstimateArgs {
    #[clap(long, allow_negative_numbers = true)]
    latitude: f64,

    #[clap(long, allow_negative_numbers = true)]
    longitude: f64,

    #[clap(long, default_value = "2-panel")]
    aerator: HardwareVariant,

    /// Panel tilt in degrees.
    #[clap(long, default_value = "15")]
    tilt: Tilt,

    #[clap(flatten)]
    engine: EngineArgs,
}

impl EstimateArgs {
    pub async fn run(&self) -> Result {
        let engine = self.engine.build()?;

        let mut session = SessionState::default();
        session.select_point(GeoPoint::try_new(self.latitude, self.longitude)?);
        session.select_variant(self.aerator);
        session.select_tilt(self.tilt);

        let estimate = engine.run(&mut session).await?;
        println!("{}", estimate.selection);
        println!("{}", build_estimate_table(estimate));
        Ok(())
    }
}
