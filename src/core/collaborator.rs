//! External services the estimation relies on.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::{
    core::{GeoPoint, MonthlyEnergy, SimulationRequest},
    prelude::*,
};

/// Downloads solar resource files.
#[async_trait]
pub trait ResourceFetcher: Sync {
    /// Download the resource files for the points into the directory.
    ///
    /// Returns the written file path for every requested point.
    async fn fetch(
        &self,
        points: &[GeoPoint],
        directory: &Path,
    ) -> Result<HashMap<GeoPoint, PathBuf>>;
}

/// Photovoltaic yield simulation engine.
#[async_trait]
pub trait Simulator: Sync {
    /// Set all the request parameters, execute, and collect the monthly DC output.
    async fn simulate(&self, request: &SimulationRequest) -> Result<MonthlyEnergy>;
}
