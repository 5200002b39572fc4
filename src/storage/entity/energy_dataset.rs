use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 每次预测请求落一条不可变的特征快照
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "energy_dataset")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub building_type: String,
    pub primary_property_type: String,
    pub zip_code: i32,
    pub council_district_code: i32,
    pub neighborhood: String,
    pub latitude: f64,
    pub longitude: f64,
    pub year_built: i32,
    pub number_of_buildings: i32,
    pub number_of_floors: i32,
    pub property_gfa_total: f64,
    pub property_gfa_parking: f64,
    pub property_gfa_buildings: f64,
    pub list_of_all_property_use_types: String,
    pub largest_property_use_type: String,
    pub largest_property_use_type_gfa: f64,

    // 可选字段：NULL 与 0/空串必须区分
    #[sea_orm(nullable)]
    pub second_largest_property_use_type: Option<String>,
    #[sea_orm(nullable)]
    pub second_largest_property_use_type_gfa: Option<f64>,
    #[sea_orm(nullable)]
    pub third_largest_property_use_type: Option<String>,
    #[sea_orm(nullable)]
    pub third_largest_property_use_type_gfa: Option<f64>,
    #[sea_orm(nullable)]
    pub years_energystar_certified: Option<i32>,

    pub outlier: String,
    pub building_age: f64,
    pub surface_per_floor: f64,
    pub is_multi_use: bool,
    pub lat_zone: i32,
    pub lon_zone: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::energy_prediction::Entity")]
    EnergyPrediction,
}

impl Related<super::energy_prediction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EnergyPrediction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
