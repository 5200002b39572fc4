use crate::features::EnergyRequest;
use crate::storage::entity::energy_dataset::{
    ActiveModel as DatasetActiveModel, Entity as EnergyDataset, Model as DatasetModel,
};
use crate::storage::entity::energy_prediction::{
    self, ActiveModel as PredictionActiveModel, Entity as EnergyPrediction,
    Model as PredictionModel,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PredictionDto {
    pub id: i32,
    pub dataset_id: i32,
    pub prediction: f64,
    pub created_at: i64,
}

impl From<PredictionModel> for PredictionDto {
    fn from(model: PredictionModel) -> Self {
        Self {
            id: model.id,
            dataset_id: model.dataset_id,
            prediction: model.prediction,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DatasetDto {
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
    pub second_largest_property_use_type: Option<String>,
    pub second_largest_property_use_type_gfa: Option<f64>,
    pub third_largest_property_use_type: Option<String>,
    pub third_largest_property_use_type_gfa: Option<f64>,
    pub years_energystar_certified: Option<i32>,
    pub outlier: String,
    pub building_age: f64,
    pub surface_per_floor: f64,
    pub is_multi_use: bool,
    pub lat_zone: i32,
    pub lon_zone: i32,
    pub created_at: i64,
}

impl From<DatasetModel> for DatasetDto {
    fn from(model: DatasetModel) -> Self {
        Self {
            id: model.id,
            building_type: model.building_type,
            primary_property_type: model.primary_property_type,
            zip_code: model.zip_code,
            council_district_code: model.council_district_code,
            neighborhood: model.neighborhood,
            latitude: model.latitude,
            longitude: model.longitude,
            year_built: model.year_built,
            number_of_buildings: model.number_of_buildings,
            number_of_floors: model.number_of_floors,
            property_gfa_total: model.property_gfa_total,
            property_gfa_parking: model.property_gfa_parking,
            property_gfa_buildings: model.property_gfa_buildings,
            list_of_all_property_use_types: model.list_of_all_property_use_types,
            largest_property_use_type: model.largest_property_use_type,
            largest_property_use_type_gfa: model.largest_property_use_type_gfa,
            second_largest_property_use_type: model.second_largest_property_use_type,
            second_largest_property_use_type_gfa: model.second_largest_property_use_type_gfa,
            third_largest_property_use_type: model.third_largest_property_use_type,
            third_largest_property_use_type_gfa: model.third_largest_property_use_type_gfa,
            years_energystar_certified: model.years_energystar_certified,
            outlier: model.outlier,
            building_age: model.building_age,
            surface_per_floor: model.surface_per_floor,
            is_multi_use: model.is_multi_use,
            lat_zone: model.lat_zone,
            lon_zone: model.lon_zone,
            created_at: model.created_at,
        }
    }
}

pub struct EnergyRepository;

impl EnergyRepository {
    /// 一个事务写两行：先快照，再用其 id 写预测；要么都提交要么都回滚
    pub async fn record(
        db: &DatabaseConnection,
        features: &EnergyRequest,
        prediction: f64,
    ) -> Result<(i32, i32), DbErr> {
        let now = Utc::now().timestamp();
        let txn = db.begin().await?;

        let dataset = DatasetActiveModel {
            building_type: Set(features.building_type.clone()),
            primary_property_type: Set(features.primary_property_type.clone()),
            zip_code: Set(features.zip_code),
            council_district_code: Set(features.council_district_code),
            neighborhood: Set(features.neighborhood.clone()),
            latitude: Set(features.latitude),
            longitude: Set(features.longitude),
            year_built: Set(features.year_built),
            number_of_buildings: Set(features.number_of_buildings),
            number_of_floors: Set(features.number_of_floors),
            property_gfa_total: Set(features.property_gfa_total),
            property_gfa_parking: Set(features.property_gfa_parking),
            property_gfa_buildings: Set(features.property_gfa_buildings),
            list_of_all_property_use_types: Set(features.list_of_all_property_use_types.clone()),
            largest_property_use_type: Set(features.largest_property_use_type.clone()),
            largest_property_use_type_gfa: Set(features.largest_property_use_type_gfa),
            second_largest_property_use_type: Set(features
                .second_largest_property_use_type
                .clone()),
            second_largest_property_use_type_gfa: Set(features
                .second_largest_property_use_type_gfa),
            third_largest_property_use_type: Set(features.third_largest_property_use_type.clone()),
            third_largest_property_use_type_gfa: Set(features.third_largest_property_use_type_gfa),
            years_energystar_certified: Set(features.years_energystar_certified),
            outlier: Set(features.outlier.clone()),
            building_age: Set(features.building_age),
            surface_per_floor: Set(features.surface_per_floor),
            is_multi_use: Set(features.is_multi_use),
            lat_zone: Set(features.lat_zone),
            lon_zone: Set(features.lon_zone),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let prediction_row = PredictionActiveModel {
            dataset_id: Set(dataset.id),
            prediction: Set(prediction),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok((dataset.id, prediction_row.id))
    }

    /// Pagination-independent total plus one page, in primary-key order
    /// (stable proxy for insertion order).
    pub async fn history(
        db: &DatabaseConnection,
        skip: u64,
        limit: u64,
    ) -> Result<(u64, Vec<PredictionDto>), DbErr> {
        let total = EnergyPrediction::find().count(db).await?;
        let models = EnergyPrediction::find()
            .order_by_asc(energy_prediction::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await?;
        Ok((total, models.into_iter().map(PredictionDto::from).collect()))
    }

    pub async fn get_dataset(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<DatasetDto>, DbErr> {
        let model = EnergyDataset::find_by_id(id).one(db).await?;
        Ok(model.map(DatasetDto::from))
    }

    pub async fn get_prediction(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<PredictionDto>, DbErr> {
        let model = EnergyPrediction::find_by_id(id).one(db).await?;
        Ok(model.map(PredictionDto::from))
    }
}
