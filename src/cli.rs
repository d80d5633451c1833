mod engine;
mod estimate;
mod nsrdb;
mod resources;
mod session;
mod simulator;
mod templates;

use clap::{Parser, Subcommand};

pub use self::{
    estimate::EstimateArgs,
    resources::{EvictArgs, LocationsArgs},
    session::SessionArgs,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Calculate the energy output for a single location and print it.
    #[clap(name = "estimate")]
    Estimate(Box<EstimateArgs>),

    /// Interactive session: select the location and the hardware, calculate, repeat.
    #[clap(name = "session")]
    Session(Box<SessionArgs>),

    /// List the locations that already have the solar resource data downloaded.
    #[clap(name = "locations")]
    Locations(LocationsArgs),

    /// Remove the oldest resource files above the limit.
    #[clap(name = "evict")]
    Evict(EvictArgs),
}
