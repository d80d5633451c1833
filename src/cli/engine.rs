use clap::Parser;

use crate::{
    api::{nsrdb, simulator::ProcessSimulator},
    cli::{
        nsrdb::NsrdbArgs,
        resources::ResourceArgs,
        simulator::SimulatorArgs,
        templates::TemplateArgs,
    },
    core::{Orchestrator, SimulationRequestBuilder},
    prelude::*,
};

pub type Engine = Orchestrator<nsrdb::Client, ProcessSimulator>;

/// Everything needed to run a calculation.
#[derive(Parser)]
pub struct EngineArgs {
    #[clap(flatten)]
    resources: ResourceArgs,

    #[clap(flatten)]
    nsrdb: NsrdbArgs,

    #[clap(flatten)]
    templates: TemplateArgs,

    #[clap(flatten)]
    simulator: SimulatorArgs,
}

impl EngineArgs {
    pub fn build(&self) -> Result<Engine> {
        Ok(Orchestrator::builder()
            .fetcher(self.nsrdb.new_client()?)
            .simulator(self.simulator.new_simulator())
            .request_builder(SimulationRequestBuilder::new(self.templates.paths()))
            .resource_dir(&self.resources.directory)
            .max_resource_files(self.resources.max_files.get())
            .build())
    }

    pub const fn resources(&self) -> &ResourceArgs {
        &self.resources
    }
}
