use std::path::PathBuf;

use clap::Parser;

use crate::api::simulator::ProcessSimulator;

#[derive(Parser)]
pub struct SimulatorArgs {
    /// Simulation engine executable, reads the parameters from stdin and prints the outputs.
    #[clap(long = "simulator-program", env = "SIMULATOR_PROGRAM")]
    program: PathBuf,

    /// Extra argument for the simulation engine, may be repeated.
    #[clap(long = "simulator-arg", allow_hyphen_values = true)]
    args: Vec<String>,
}

impl SimulatorArgs {
    pub fn new_simulator(&self) -> ProcessSimulator {
        ProcessSimulator::new(self.program.clone(), self.args.clone())
    }
}
