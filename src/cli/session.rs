use std::{
    io::{self, BufRead, Write},
    ops::ControlFlow,
};

use clap::{Parser, Subcommand};

use crate::{
    cli::engine::{Engine, EngineArgs},
    core::{EstimationError, GeoPoint, HardwareVariant, LocationCache, SessionState, Tilt},
    prelude::*,
    tables::{build_estimate_table, build_locations_table, build_selection_table},
};

#[derive(Parser)]
pub struct SessionArgs {
    #[clap(flatten)]
    engine: EngineArgs,
}

impl SessionArgs {
    pub async fn run(&self) -> Result {
        let engine = self.engine.build()?;
        let mut session = SessionState::default();

        println!("Select a location, the aerator, and the tilt, then `calculate`. Try `help`.");
        prompt()?;
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read the input")?;
            if !line.trim().is_empty() {
                match SessionLine::try_parse_from(line.split_whitespace()) {
                    Ok(SessionLine { command }) => {
                        if self.apply(&engine, &mut session, command).await?.is_break() {
                            break;
                        }
                    }
                    Err(error) => println!("{error}"),
                }
            }
            prompt()?;
        }
        Ok(())
    }

    async fn apply(
        &self,
        engine: &Engine,
        session: &mut SessionState,
        command: SessionCommand,
    ) -> Result<ControlFlow<()>> {
        match command {
            SessionCommand::Select { latitude, longitude } => {
                match GeoPoint::try_new(latitude, longitude) {
                    Ok(point) => {
                        if session.select_point(point) {
                            println!("Selected {point}.");
                        } else {
                            println!("{point} is already selected.");
                        }
                    }
                    Err(error) => println!("{error:#}"),
                }
            }
            SessionCommand::Aerator { variant } => {
                session.select_variant(variant);
                println!("Selected the {variant} aerator.");
            }
            SessionCommand::Tilt { tilt } => {
                session.select_tilt(tilt);
                println!("Tilt is set to {tilt}.");
            }
            SessionCommand::Calculate => match engine.run(session).await {
                Ok(estimate) => {
                    println!("{}", estimate.selection);
                    println!("{}", build_estimate_table(estimate));
                }
                Err(error) => report(&error),
            },
            SessionCommand::Show => {
                println!("{}", build_selection_table(session.selection()));
                if let Some(estimate) = session.estimate() {
                    println!("Last calculated for {}:", estimate.selection);
                    println!("{}", build_estimate_table(estimate));
                }
            }
            SessionCommand::Locations => {
                match LocationCache::scan(&self.engine.resources().directory) {
                    Ok(cache) => {
                        println!("{}", build_locations_table(&cache, session.selection().point));
                    }
                    Err(error) => report(&error),
                }
            }
            SessionCommand::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }
}

fn prompt() -> Result {
    print!("> ");
    io::stdout().flush().context("failed to flush the prompt")
}

fn report(error: &Error) {
    error!("{error:#}");
    if let Some(kind) = EstimationError::of(error) {
        println!("{kind}: {}.", kind.hint());
    }
}

#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Debug, PartialEq, Subcommand)]
enum SessionCommand {
    /// Select the location.
    Select {
        #[clap(allow_negative_numbers = true)]
        latitude: f64,

        #[clap(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Select the aerator: `2-panel` or `4-panel`.
    Aerator { variant: HardwareVariant },

    /// Set the panel tilt in degrees.
    Tilt { tilt: Tilt },

    /// Calculate the energy output for the current selection.
    Calculate,

    /// Show the current selection and the last result.
    Show,

    /// List the locations with the downloaded resource data.
    Locations,

    /// End the session.
    #[clap(alias = "exit")]
    Quit,
}
