use serde::{Deserialize, Serialize};

/// 公开 API 的特征 schema（字段名与外部契约一致）
///
/// The one place this differs from the model-facing schema is
/// `PropertyGFABuildings`: the trained pipeline expects the column to be
/// called `PropertyGFABuilding(s)`. [`normalize`] performs that rename.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnergyRequest {
    #[serde(rename = "BuildingType")]
    pub building_type: String,
    #[serde(rename = "PrimaryPropertyType")]
    pub primary_property_type: String,
    #[serde(rename = "ZipCode")]
    pub zip_code: i32,
    #[serde(rename = "CouncilDistrictCode")]
    pub council_district_code: i32,
    #[serde(rename = "Neighborhood")]
    pub neighborhood: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "YearBuilt")]
    pub year_built: i32,
    #[serde(rename = "NumberofBuildings")]
    pub number_of_buildings: i32,
    #[serde(rename = "NumberofFloors")]
    pub number_of_floors: i32,
    #[serde(rename = "PropertyGFATotal")]
    pub property_gfa_total: f64,
    #[serde(rename = "PropertyGFAParking")]
    pub property_gfa_parking: f64,
    #[serde(rename = "PropertyGFABuildings")]
    pub property_gfa_buildings: f64,
    #[serde(rename = "ListOfAllPropertyUseTypes")]
    pub list_of_all_property_use_types: String,
    #[serde(rename = "LargestPropertyUseType")]
    pub largest_property_use_type: String,
    #[serde(rename = "LargestPropertyUseTypeGFA")]
    pub largest_property_use_type_gfa: f64,
    #[serde(rename = "SecondLargestPropertyUseType", default)]
    pub second_largest_property_use_type: Option<String>,
    #[serde(rename = "SecondLargestPropertyUseTypeGFA", default)]
    pub second_largest_property_use_type_gfa: Option<f64>,
    #[serde(rename = "ThirdLargestPropertyUseType", default)]
    pub third_largest_property_use_type: Option<String>,
    #[serde(rename = "ThirdLargestPropertyUseTypeGFA", default)]
    pub third_largest_property_use_type_gfa: Option<f64>,
    #[serde(rename = "YearsENERGYSTARCertified", default)]
    pub years_energystar_certified: Option<i32>,
    #[serde(rename = "Outlier")]
    pub outlier: String,
    #[serde(rename = "BuildingAge")]
    pub building_age: f64,
    #[serde(rename = "SurfacePerFloor")]
    pub surface_per_floor: f64,
    #[serde(rename = "IsMultiUse")]
    pub is_multi_use: bool,
    #[serde(rename = "LatZone")]
    pub lat_zone: i32,
    #[serde(rename = "LonZone")]
    pub lon_zone: i32,
}

impl EnergyRequest {
    /// Checks the fields serde cannot: upstream data was observed to carry
    /// garbage in `YearsENERGYSTARCertified` (concatenated year lists that
    /// one loader silently zeroed). We reject instead of coercing.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(years) = self.years_energystar_certified {
            if years < 0 {
                return Err(format!(
                    "YearsENERGYSTARCertified must be non-negative, got {}",
                    years
                ));
            }
        }
        for (name, gfa) in [
            ("SecondLargestPropertyUseTypeGFA", self.second_largest_property_use_type_gfa),
            ("ThirdLargestPropertyUseTypeGFA", self.third_largest_property_use_type_gfa),
        ] {
            if let Some(v) = gfa {
                if !v.is_finite() || v < 0.0 {
                    return Err(format!("{} must be a non-negative number, got {}", name, v));
                }
            }
        }
        Ok(())
    }
}

/// 模型行中的单个取值（保留原始类型，可为空）
#[derive(Clone, Debug, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl FeatureValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Int(v) => Some(*v as f64),
            FeatureValue::Float(v) => Some(*v),
            FeatureValue::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    fn opt_text(value: &Option<String>) -> FeatureValue {
        match value {
            Some(s) => FeatureValue::Text(s.clone()),
            None => FeatureValue::Null,
        }
    }

    fn opt_float(value: Option<f64>) -> FeatureValue {
        match value {
            Some(v) => FeatureValue::Float(v),
            None => FeatureValue::Null,
        }
    }
}

/// One row in the model's tabular schema. Column insertion order is
/// preserved; lookups are by column name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelInputRow {
    columns: Vec<(String, FeatureValue)>,
}

impl ModelInputRow {
    fn push(&mut self, name: &str, value: FeatureValue) {
        self.columns.push((name.to_string(), value));
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Maps the public schema to the model-facing row.
///
/// Renames exactly one key (`PropertyGFABuildings` →
/// `PropertyGFABuilding(s)`); every other field passes through unchanged.
/// Pure, no validation beyond what deserialization already enforced.
pub fn normalize(req: &EnergyRequest) -> ModelInputRow {
    let mut row = ModelInputRow::default();
    row.push("BuildingType", FeatureValue::Text(req.building_type.clone()));
    row.push(
        "PrimaryPropertyType",
        FeatureValue::Text(req.primary_property_type.clone()),
    );
    row.push("ZipCode", FeatureValue::Int(req.zip_code as i64));
    row.push(
        "CouncilDistrictCode",
        FeatureValue::Int(req.council_district_code as i64),
    );
    row.push("Neighborhood", FeatureValue::Text(req.neighborhood.clone()));
    row.push("Latitude", FeatureValue::Float(req.latitude));
    row.push("Longitude", FeatureValue::Float(req.longitude));
    row.push("YearBuilt", FeatureValue::Int(req.year_built as i64));
    row.push(
        "NumberofBuildings",
        FeatureValue::Int(req.number_of_buildings as i64),
    );
    row.push(
        "NumberofFloors",
        FeatureValue::Int(req.number_of_floors as i64),
    );
    row.push("PropertyGFATotal", FeatureValue::Float(req.property_gfa_total));
    row.push(
        "PropertyGFAParking",
        FeatureValue::Float(req.property_gfa_parking),
    );
    // 唯一的改名：对外 PropertyGFABuildings，模型侧 PropertyGFABuilding(s)
    row.push(
        "PropertyGFABuilding(s)",
        FeatureValue::Float(req.property_gfa_buildings),
    );
    row.push(
        "ListOfAllPropertyUseTypes",
        FeatureValue::Text(req.list_of_all_property_use_types.clone()),
    );
    row.push(
        "LargestPropertyUseType",
        FeatureValue::Text(req.largest_property_use_type.clone()),
    );
    row.push(
        "LargestPropertyUseTypeGFA",
        FeatureValue::Float(req.largest_property_use_type_gfa),
    );
    row.push(
        "SecondLargestPropertyUseType",
        FeatureValue::opt_text(&req.second_largest_property_use_type),
    );
    row.push(
        "SecondLargestPropertyUseTypeGFA",
        FeatureValue::opt_float(req.second_largest_property_use_type_gfa),
    );
    row.push(
        "ThirdLargestPropertyUseType",
        FeatureValue::opt_text(&req.third_largest_property_use_type),
    );
    row.push(
        "ThirdLargestPropertyUseTypeGFA",
        FeatureValue::opt_float(req.third_largest_property_use_type_gfa),
    );
    row.push(
        "YearsENERGYSTARCertified",
        match req.years_energystar_certified {
            Some(v) => FeatureValue::Int(v as i64),
            None => FeatureValue::Null,
        },
    );
    row.push("Outlier", FeatureValue::Text(req.outlier.clone()));
    row.push("BuildingAge", FeatureValue::Float(req.building_age));
    row.push("SurfacePerFloor", FeatureValue::Float(req.surface_per_floor));
    row.push("IsMultiUse", FeatureValue::Bool(req.is_multi_use));
    row.push("LatZone", FeatureValue::Int(req.lat_zone as i64));
    row.push("LonZone", FeatureValue::Int(req.lon_zone as i64));
    row
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_request() -> EnergyRequest {
        EnergyRequest {
            building_type: "NonResidential".to_string(),
            primary_property_type: "Office".to_string(),
            zip_code: 98101,
            council_district_code: 3,
            neighborhood: "Downtown".to_string(),
            latitude: 47.61,
            longitude: -122.33,
            year_built: 1999,
            number_of_buildings: 1,
            number_of_floors: 12,
            property_gfa_total: 100000.0,
            property_gfa_parking: 20000.0,
            property_gfa_buildings: 80000.0,
            list_of_all_property_use_types: "Office".to_string(),
            largest_property_use_type: "Office".to_string(),
            largest_property_use_type_gfa: 80000.0,
            second_largest_property_use_type: None,
            second_largest_property_use_type_gfa: None,
            third_largest_property_use_type: None,
            third_largest_property_use_type_gfa: None,
            years_energystar_certified: Some(0),
            outlier: "No".to_string(),
            building_age: 17.0,
            surface_per_floor: 80000.0,
            is_multi_use: false,
            lat_zone: 2,
            lon_zone: 3,
        }
    }

    #[test]
    fn normalize_renames_exactly_one_key() {
        let row = normalize(&sample_request());
        assert!(row.get("PropertyGFABuildings").is_none());
        assert_eq!(
            row.get("PropertyGFABuilding(s)"),
            Some(&FeatureValue::Float(80000.0))
        );
    }

    #[test]
    fn normalize_preserves_values_and_types() {
        let req = sample_request();
        let row = normalize(&req);
        assert_eq!(row.len(), 27);
        assert_eq!(
            row.get("BuildingType"),
            Some(&FeatureValue::Text("NonResidential".to_string()))
        );
        assert_eq!(row.get("ZipCode"), Some(&FeatureValue::Int(98101)));
        assert_eq!(row.get("Latitude"), Some(&FeatureValue::Float(47.61)));
        assert_eq!(row.get("IsMultiUse"), Some(&FeatureValue::Bool(false)));
        assert_eq!(
            row.get("SecondLargestPropertyUseType"),
            Some(&FeatureValue::Null)
        );
        assert_eq!(
            row.get("YearsENERGYSTARCertified"),
            Some(&FeatureValue::Int(0))
        );
    }

    #[test]
    fn normalize_keeps_column_order_stable() {
        let row = normalize(&sample_request());
        let names: Vec<&str> = row.columns().map(|(n, _)| n).collect();
        assert_eq!(names[0], "BuildingType");
        assert_eq!(names[12], "PropertyGFABuilding(s)");
        assert_eq!(names[26], "LonZone");
    }

    #[test]
    fn validate_rejects_negative_certified_years() {
        let mut req = sample_request();
        req.years_energystar_certified = Some(-2);
        assert!(req.validate().is_err());

        req.years_energystar_certified = None;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn deserializes_public_field_names() {
        let json = serde_json::to_string(&sample_request()).unwrap();
        assert!(json.contains("\"PropertyGFABuildings\""));
        assert!(json.contains("\"NumberofFloors\""));
        let back: EnergyRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample_request());
    }
}
