use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::{
    core::{EstimationError, HardwareVariant, Tilt},
    prelude::*,
};

/// Fully populated simulation parameter set.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationRequest {
    parameters: Map<String, Value>,
}

impl SimulationRequest {
    pub const TILT_KEY: &'static str = "subarray1_tilt";
    pub const RESOURCE_FILE_KEY: &'static str = "solar_resource_file";

    pub const fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    pub fn tilt(&self) -> Option<u64> {
        self.parameters.get(Self::TILT_KEY).and_then(Value::as_u64)
    }

    pub fn resource_file(&self) -> Option<&str> {
        self.parameters.get(Self::RESOURCE_FILE_KEY).and_then(Value::as_str)
    }
}

/// Template file locations per hardware variant.
#[derive(Clone, Debug)]
pub struct TemplatePaths {
    pub two_panel: PathBuf,
    pub four_panel: PathBuf,
}

impl TemplatePaths {
    pub fn get(&self, variant: HardwareVariant) -> &Path {
        match variant {
            HardwareVariant::TwoPanel => &self.two_panel,
            HardwareVariant::FourPanel => &self.four_panel,
        }
    }
}

pub struct SimulationRequestBuilder {
    templates: TemplatePaths,
}

impl SimulationRequestBuilder {
    /// Template key that carries the parameter count and is not a simulation input.
    const RESERVED_KEY: &'static str = "number_inputs";

    pub const fn new(templates: TemplatePaths) -> Self {
        Self { templates }
    }

    /// Load the variant's baseline template and apply the tilt and resource file overrides.
    #[instrument(skip_all, fields(variant = %variant, tilt = %tilt))]
    pub fn build(
        &self,
        variant: HardwareVariant,
        tilt: Tilt,
        resource_file: &Path,
    ) -> Result<SimulationRequest> {
        let path = self.templates.get(variant);
        let mut parameters = Self::load_template(path)
            .with_context(|| format!("failed to load the template `{}`", path.display()))
            .context(EstimationError::ConfigLoadError)?;
        parameters.remove(Self::RESERVED_KEY);
        parameters.insert(SimulationRequest::TILT_KEY.to_string(), tilt.degrees().into());
        parameters.insert(
            SimulationRequest::RESOURCE_FILE_KEY.to_string(),
            resource_file.to_string_lossy().into_owned().into(),
        );
        debug!(n_parameters = parameters.len(), "built");
        Ok(SimulationRequest { parameters })
    }

    fn load_template(path: &Path) -> Result<Map<String, Value>> {
        let contents = fs::read_to_string(path)?;
        match serde_json::from_str(&contents)? {
            Value::Object(parameters) => Ok(parameters),
            _ => bail!("the template must be a JSON object"),
        }
    }
}
