use std::path::PathBuf;

use bon::Builder;

use crate::{
    core::{
        CalculatedSelection,
        Estimate,
        EstimationError,
        GeoPoint,
        LocationCache,
        ResourceFetcher,
        SessionState,
        SimulationRequestBuilder,
        Simulator,
        eviction,
    },
    prelude::*,
};

/// Drives a single calculation from the selection to the published estimate.
#[derive(Builder)]
pub struct Orchestrator<F, S> {
    fetcher: F,
    simulator: S,
    request_builder: SimulationRequestBuilder,

    #[builder(into)]
    resource_dir: PathBuf,

    max_resource_files: usize,
}

impl<F: ResourceFetcher, S: Simulator> Orchestrator<F, S> {
    /// Calculate the estimate for the current selection and publish it into the session.
    ///
    /// On failure, the previously published estimate stays in place. Eviction failures are only
    /// logged.
    #[instrument(skip_all)]
    pub async fn run<'s>(&self, session: &'s mut SessionState) -> Result<&'s Estimate> {
        let selection = session.selection().snapshot()?;
        info!(
            point = %selection.point,
            variant = %selection.variant,
            tilt = %selection.tilt,
            "calculating the energy output…",
        );
        session.set_processing(true);
        let result = self.estimate(selection).await;
        session.set_processing(false);
        Ok(session.publish(result?))
    }

    async fn estimate(&self, selection: CalculatedSelection) -> Result<Estimate> {
        let resource_file = self
            .resolve_resource_file(selection.point)
            .await
            .context(EstimationError::ResourceFetchFailed)?;
        if let Err(error) =
            eviction::evict(&self.resource_dir, self.max_resource_files, Some(&resource_file))
        {
            warn!("failed to evict the old resource files: {error:#}");
        }
        let request =
            self.request_builder.build(selection.variant, selection.tilt, &resource_file)?;
        let energy = self
            .simulator
            .simulate(&request)
            .await
            .context(EstimationError::SimulationExecutionFailed)?;
        info!(annual_total = %energy.annual_total(), "calculated");
        Ok(Estimate { selection, energy })
    }

    /// Get the cached resource file, downloading it when missing.
    #[instrument(skip_all, fields(point = %point))]
    async fn resolve_resource_file(&self, point: GeoPoint) -> Result<PathBuf> {
        if let Some(entry) = LocationCache::scan(&self.resource_dir)?.lookup(&point) {
            info!(path = %entry.path.display(), "using the cached resource data");
            return Ok(entry.path.clone());
        }

        info!("downloading the solar resource data…");
        let reported_path = self.fetcher.fetch(&[point], &self.resource_dir).await?.remove(&point);
        if let Some(entry) = LocationCache::scan(&self.resource_dir)?.lookup(&point) {
            info!(path = %entry.path.display(), "the solar resource data is ready");
            return Ok(entry.path.clone());
        }
        match reported_path {
            Some(path) if path.is_file() => {
                warn!(path = %path.display(), "the fetched file is not recognized by the cache");
                Ok(path)
            }
            _ => bail!("no resource file has been produced for {point}"),
        }
    }
}
