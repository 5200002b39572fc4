pub mod energy_dataset;
pub mod energy_prediction;

pub use energy_dataset::Entity as EnergyDataset;
pub use energy_prediction::Entity as EnergyPrediction;
