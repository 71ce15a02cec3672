use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub zipcode: String,
    pub growing_zone: String,
}

/// Soil types offered by the questionnaire. Wider than the editor's
/// [`crate::models::paint::SoilKind`] palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Clay,
    Loam,
    Sandy,
    Silt,
    Peat,
    Chalky,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAnswer {
    #[default]
    No,
    Unknown,
    Yes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowingHistory {
    pub has_history: HistoryAnswer,
    pub plants: Vec<String>,
    pub years_ago: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Construction {
    pub is_constructed: bool,
    pub has_trellis: bool,
    pub has_fence: bool,
    pub has_raised_bed: bool,
    pub has_irrigation: bool,
    pub has_weed_screen: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Feet,
    Meters,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotDetails {
    pub unit: LengthUnit,
    pub width: f64,
    pub height: f64,
}

impl Default for PlotDetails {
    fn default() -> Self {
        Self {
            unit: LengthUnit::Feet,
            width: 10.0,
            height: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GardenType {
    Herb,
    Food,
    Pollinator,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantPreferences {
    pub wanted: Vec<String>,
    pub unwanted: Vec<String>,
}

/// Every answer collected by the questionnaire. Owned by the wizard and
/// serialised into the plot-designer handoff on completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenData {
    pub location: Location,
    pub soil_types: Vec<SoilType>,
    pub growing_history: GrowingHistory,
    pub construction: Construction,
    pub plot_details: PlotDetails,
    pub garden_types: Vec<GardenType>,
    pub plant_preferences: PlantPreferences,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_questionnaire_initial_answers() {
        let data = GardenData::default();
        assert_eq!(data.growing_history.has_history, HistoryAnswer::No);
        assert_eq!(data.plot_details.unit, LengthUnit::Feet);
        assert_eq!(data.plot_details.width, 10.0);
        assert!(!data.construction.is_constructed);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(GardenData::default()).unwrap();
        assert_eq!(json["location"]["growingZone"], "");
        assert_eq!(json["growingHistory"]["hasHistory"], "no");
        assert_eq!(json["construction"]["hasWeedScreen"], false);
        assert_eq!(json["plotDetails"]["unit"], "feet");
        assert!(json["plantPreferences"]["wanted"].is_array());
    }

    #[test]
    fn test_deserializes_enums_from_lowercase() {
        let data: GardenData = serde_json::from_value(serde_json::json!({
            "location": { "zipcode": "10001", "growingZone": "7b" },
            "soilTypes": ["clay", "peat"],
            "growingHistory": { "hasHistory": "yes", "plants": ["Tomatoes"], "yearsAgo": 2 },
            "construction": {
                "isConstructed": true, "hasTrellis": false, "hasFence": true,
                "hasRaisedBed": false, "hasIrrigation": false, "hasWeedScreen": false
            },
            "plotDetails": { "unit": "meters", "width": 4, "height": 3 },
            "gardenTypes": ["herb", "pollinator"],
            "plantPreferences": { "wanted": ["Basil"], "unwanted": [] }
        }))
        .unwrap();
        assert_eq!(data.soil_types, vec![SoilType::Clay, SoilType::Peat]);
        assert_eq!(data.growing_history.has_history, HistoryAnswer::Yes);
        assert_eq!(data.plot_details.unit, LengthUnit::Meters);
        assert_eq!(data.garden_types, vec![GardenType::Herb, GardenType::Pollinator]);
    }
}
