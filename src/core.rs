mod collaborator;
mod energy;
mod error;
pub mod eviction;
mod geo_point;
mod hardware;
mod location_cache;
mod orchestrator;
mod request;
pub mod resource_file;
mod session;

pub use self::{
    collaborator::{ResourceFetcher, Simulator},
    energy::MonthlyEnergy,
    error::EstimationError,
    geo_point::GeoPoint,
    hardware::{HardwareVariant, Tilt},
    location_cache::{CacheEntry, LocationCache},
    orchestrator::Orchestrator,
    request::{SimulationRequest, SimulationRequestBuilder, TemplatePaths},
    session::{CalculatedSelection, Estimate, Selection, SessionState},
};
