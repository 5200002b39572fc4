pub mod energy_repo;

pub use energy_repo::{DatasetDto, EnergyRepository, PredictionDto};
