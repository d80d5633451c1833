pub mod nsrdb;
pub mod simulator;
