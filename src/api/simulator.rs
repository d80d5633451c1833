//! External simulation engine process.
//!
//! The engine receives the complete parameter set as a JSON object on stdin and must print
//! a JSON object with the `monthly_dc` array (12 values in kWh) to stdout.

use std::{path::PathBuf, process::Stdio};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::{io::AsyncWriteExt, process::Command};

use crate::{
    core::{MonthlyEnergy, SimulationRequest, Simulator},
    prelude::*,
};

pub struct ProcessSimulator {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessSimulator {
    pub const fn new(program: PathBuf, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

#[async_trait]
impl Simulator for ProcessSimulator {
    #[instrument(skip_all, fields(program = %self.program.display()))]
    async fn simulate(&self, request: &SimulationRequest) -> Result<MonthlyEnergy> {
        let input = serde_json::to_vec(request.parameters())?;

        info!(n_parameters = request.parameters().len(), "executing…");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start `{}`", self.program.display()))?;
        let mut stdin = child.stdin.take().context("the simulator stdin is not piped")?;

        // The engine may write before it has read everything, so the pipes are drained meanwhile.
        let write_input = async move {
            // Dropping `stdin` afterwards closes it.
            stdin.write_all(&input).await
        };
        let (written, output) = tokio::join!(write_input, child.wait_with_output());
        let output = output.context("failed to wait for the simulator")?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        ensure!(output.status.success(), "the simulator {}: {}", output.status, stderr.trim());
        written.context("failed to pass the parameters")?;
        if !stderr.trim().is_empty() {
            debug!(stderr = %stderr.trim(), "the simulator reported");
        }

        let outputs: Outputs =
            serde_json::from_slice(&output.stdout).context("failed to parse the simulator output")?;
        MonthlyEnergy::try_from(outputs.monthly_dc)
    }
}

#[derive(Deserialize)]
struct Outputs {
    monthly_dc: Vec<f64>,
}
