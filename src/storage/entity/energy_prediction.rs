use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "energy_predictions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub dataset_id: i32,
    pub prediction: f64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::energy_dataset::Entity",
        from = "Column::DatasetId",
        to = "super::energy_dataset::Column::Id"
    )]
    EnergyDataset,
}

impl Related<super::energy_dataset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EnergyDataset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
