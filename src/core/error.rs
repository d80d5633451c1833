/// Failure kinds of an estimation run.
///
/// Attached as the outermost context of the [`anyhow::Error`], so that callers can tell them
/// apart with [`anyhow::Error::downcast_ref`] while the full chain stays available for logging.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
pub enum EstimationError {
    #[display("no location is selected")]
    NoLocationSelected,

    #[display("failed to fetch the solar resource data")]
    ResourceFetchFailed,

    #[display("failed to load the hardware configuration")]
    ConfigLoadError,

    #[display("the simulation failed")]
    SimulationExecutionFailed,
}

impl EstimationError {
    /// What the user can do about it.
    pub const fn hint(self) -> &'static str {
        match self {
            Self::NoLocationSelected => "select a location first",
            Self::ResourceFetchFailed => {
                "the download may have timed out, try to calculate again in a moment"
            }
            Self::ConfigLoadError => "check the hardware template files",
            Self::SimulationExecutionFailed => "check the simulator output above",
        }
    }

    pub fn of(error: &anyhow::Error) -> Option<Self> {
        error.downcast_ref::<Self>().copied()
    }
}
