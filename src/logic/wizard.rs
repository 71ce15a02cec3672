use actix_web::{error::QueryPayloadError, web};
use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::logic::zone::{is_valid_zipcode, ZoneError, ZoneLookup};
use crate::models::questionnaire::{
    Construction, GardenData, GardenType, GrowingHistory, HistoryAnswer, Location,
    PlantPreferences, PlotDetails, SoilType,
};

pub const TOTAL_STEPS: u8 = 6;
pub const PLOT_DESIGNER_ROUTE: &str = "/plot-designer";

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("invalid garden data JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid handoff query: {0}")]
    Query(#[from] QueryPayloadError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Location = 1,
    SoilType = 2,
    GrowingHistory = 3,
    Construction = 4,
    GardenType = 5,
    PlantPreferences = 6,
}

impl Step {
    pub fn from_number(n: u8) -> Option<Self> {
        Some(match n {
            1 => Self::Location,
            2 => Self::SoilType,
            3 => Self::GrowingHistory,
            4 => Self::Construction,
            5 => Self::GardenType,
            6 => Self::PlantPreferences,
            _ => return None,
        })
    }

    pub fn number(self) -> u8 {
        self as u8
    }
}

/// One step's answers, merged into the aggregate as a whole slice.
#[derive(Debug, Clone, PartialEq)]
pub enum StepUpdate {
    Location(Location),
    SoilTypes(Vec<SoilType>),
    GrowingHistory(GrowingHistory),
    Construction(Construction),
    PlotDetails(PlotDetails),
    GardenTypes(Vec<GardenType>),
    PlantPreferences(PlantPreferences),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardProgress {
    Step(Step),
    /// The questionnaire is complete; navigate to this URL.
    Finished(String),
}

/// Linear questionnaire controller. Owns the [`GardenData`] aggregate.
#[derive(Debug, Clone)]
pub struct Wizard {
    step: Step,
    data: GardenData,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: Step::Location,
            data: GardenData::default(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn data(&self) -> &GardenData {
        &self.data
    }

    pub fn is_last_step(&self) -> bool {
        self.step.number() == TOTAL_STEPS
    }

    pub fn progress_percent(&self) -> f64 {
        f64::from(self.step.number()) / f64::from(TOTAL_STEPS) * 100.0
    }

    /// Advances one step, or on the last step produces the plot-designer handoff.
    pub fn next(&mut self) -> Result<WizardProgress, WizardError> {
        match Step::from_number(self.step.number() + 1) {
            Some(step) => {
                self.step = step;
                Ok(WizardProgress::Step(step))
            }
            None => {
                let url = handoff_url(&self.data)?;
                info!("Questionnaire complete, handing off to {PLOT_DESIGNER_ROUTE}");
                Ok(WizardProgress::Finished(url))
            }
        }
    }

    /// Goes back one step; stays put on the first.
    pub fn previous(&mut self) -> Step {
        if let Some(step) = Step::from_number(self.step.number() - 1) {
            self.step = step;
        }
        self.step
    }

    pub fn update(&mut self, update: StepUpdate) {
        debug!("Merging questionnaire update: {update:?}");
        match update {
            StepUpdate::Location(location) => self.data.location = location,
            StepUpdate::SoilTypes(soil) => self.data.soil_types = soil,
            StepUpdate::GrowingHistory(history) => self.data.growing_history = history,
            StepUpdate::Construction(construction) => self.data.construction = construction,
            StepUpdate::PlotDetails(details) => self.data.plot_details = details,
            StepUpdate::GardenTypes(types) => self.data.garden_types = types,
            StepUpdate::PlantPreferences(prefs) => self.data.plant_preferences = prefs,
        }
    }

    /// Checks the zipcode, resolves its hardiness zone and only then stores
    /// both. On any failure the aggregate is left as it was.
    ///
    /// The exclusive borrow keeps a second lookup from starting while one is
    /// in flight.
    pub async fn confirm_location(
        &mut self,
        lookup: &dyn ZoneLookup,
        zipcode: &str,
    ) -> Result<&Location, ZoneError> {
        if !is_valid_zipcode(zipcode) {
            return Err(ZoneError::InvalidZipcode);
        }
        let growing_zone = lookup.lookup(zipcode).await.inspect_err(|e| {
            warn!("Zone lookup for {zipcode} failed: {e}");
        })?;
        self.update(StepUpdate::Location(Location {
            zipcode: zipcode.to_owned(),
            growing_zone,
        }));
        Ok(&self.data.location)
    }
}

/// `/plot-designer?data=<percent-encoded JSON>`
pub fn handoff_url(data: &GardenData) -> Result<String, WizardError> {
    let json = serde_json::to_string(data)?;
    Ok(format!(
        "{PLOT_DESIGNER_ROUTE}?data={}",
        urlencoding::encode(&json)
    ))
}

#[derive(Debug, Deserialize)]
struct HandoffQuery {
    data: String,
}

impl GardenData {
    /// Reads the aggregate back out of a handoff query string (with or
    /// without the leading route and `?`).
    pub fn from_handoff_query(query: &str) -> Result<Self, WizardError> {
        let query = query.split_once('?').map_or(query, |(_, q)| q);
        let handoff = web::Query::<HandoffQuery>::from_query(query)?.into_inner();
        Ok(serde_json::from_str(&handoff.data)?)
    }
}

/// Splits a comma-separated plant list, trimming entries and dropping blanks.
pub fn parse_plant_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect()
}

impl GrowingHistory {
    /// Builds the step's answer from the raw form fields. Plants and years are
    /// only meaningful when the answer is `Yes`, but are kept either way.
    pub fn from_form(has_history: HistoryAnswer, plants: &str, years_ago: u32) -> Self {
        Self {
            has_history,
            plants: parse_plant_list(plants),
            years_ago,
        }
    }
}

/// Adds `item` if absent, removes it if present.
pub fn toggle<T: PartialEq>(list: &mut Vec<T>, item: T) {
    match list.iter().position(|x| *x == item) {
        Some(i) => {
            list.remove(i);
        }
        None => list.push(item),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceList {
    Wanted,
    Unwanted,
}

impl PlantPreferences {
    /// Adds a trimmed plant name to one list. Blank names and plants already
    /// in either list are ignored; returns whether the plant was added.
    pub fn add(&mut self, plant: &str, list: PreferenceList) -> bool {
        let plant = plant.trim();
        if plant.is_empty() || self.contains(plant) {
            return false;
        }
        match list {
            PreferenceList::Wanted => self.wanted.push(plant.to_owned()),
            PreferenceList::Unwanted => self.unwanted.push(plant.to_owned()),
        }
        true
    }

    pub fn remove(&mut self, plant: &str, list: PreferenceList) -> bool {
        let target = match list {
            PreferenceList::Wanted => &mut self.wanted,
            PreferenceList::Unwanted => &mut self.unwanted,
        };
        let before = target.len();
        target.retain(|p| p != plant);
        target.len() != before
    }

    pub fn contains(&self, plant: &str) -> bool {
        self.wanted.iter().chain(&self.unwanted).any(|p| p == plant)
    }
}

impl GardenType {
    pub fn suggested_plants(self) -> &'static [&'static str] {
        match self {
            Self::Herb => &[
                "Basil", "Mint", "Rosemary", "Thyme", "Cilantro", "Parsley", "Sage", "Oregano",
            ],
            Self::Food => &[
                "Tomatoes",
                "Peppers",
                "Cucumbers",
                "Lettuce",
                "Carrots",
                "Strawberries",
                "Blueberries",
                "Zucchini",
            ],
            Self::Pollinator => &[
                "Lavender",
                "Sunflowers",
                "Bee Balm",
                "Coneflower",
                "Black-eyed Susan",
                "Butterfly Bush",
                "Milkweed",
            ],
        }
    }
}

/// Suggestions for the selected garden types, first occurrence order, without
/// duplicates or plants already placed in either preference list.
pub fn suggested_plants(types: &[GardenType], prefs: &PlantPreferences) -> Vec<&'static str> {
    let mut result: Vec<&'static str> = Vec::new();
    for &plant in types.iter().flat_map(|t| t.suggested_plants()) {
        if !result.contains(&plant) && !prefs.contains(plant) {
            result.push(plant);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::logic::zone::{RapidApiZoneLookup, StubZoneLookup, DEFAULT_RAPIDAPI_HOST};

    #[test]
    fn test_starts_on_first_step() {
        let wizard = Wizard::new();
        assert_eq!(wizard.step(), Step::Location);
        assert!((wizard.progress_percent() - 100.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_previous_on_first_step_is_noop() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.previous(), Step::Location);
    }

    #[test]
    fn test_next_walks_all_steps_then_finishes() {
        let mut wizard = Wizard::new();
        for n in 2..=TOTAL_STEPS {
            assert_eq!(wizard.next().unwrap(), WizardProgress::Step(Step::from_number(n).unwrap()));
        }
        assert!(wizard.is_last_step());
        match wizard.next().unwrap() {
            WizardProgress::Finished(url) => assert!(url.starts_with("/plot-designer?data=")),
            other => panic!("expected handoff, got {other:?}"),
        }
        assert_eq!(wizard.step(), Step::PlantPreferences);
    }

    #[test]
    fn test_update_merges_only_its_slice() {
        let mut wizard = Wizard::new();
        wizard.update(StepUpdate::SoilTypes(vec![SoilType::Clay]));
        wizard.update(StepUpdate::GardenTypes(vec![GardenType::Herb]));
        assert_eq!(wizard.data().soil_types, vec![SoilType::Clay]);
        assert_eq!(wizard.data().garden_types, vec![GardenType::Herb]);
        assert_eq!(wizard.data().location, Location::default());
    }

    #[test]
    fn test_handoff_round_trips() {
        let mut wizard = Wizard::new();
        wizard.update(StepUpdate::PlantPreferences(PlantPreferences {
            wanted: vec!["Black-eyed Susan".into(), "Bee Balm & Sage".into()],
            unwanted: vec![],
        }));
        let url = handoff_url(wizard.data()).unwrap();
        assert!(!url.contains(' '));
        let decoded = GardenData::from_handoff_query(&url).unwrap();
        assert_eq!(&decoded, wizard.data());
    }

    #[test]
    fn test_handoff_without_data_param() {
        assert!(matches!(
            GardenData::from_handoff_query("/plot-designer?foo=1"),
            Err(WizardError::Query(_))
        ));
    }

    #[test]
    fn test_parse_plant_list() {
        assert_eq!(
            parse_plant_list(" Tomatoes, ,Beans ,, Squash"),
            vec!["Tomatoes", "Beans", "Squash"]
        );
        assert!(parse_plant_list("").is_empty());
    }

    #[test]
    fn test_growing_history_from_form() {
        let history = GrowingHistory::from_form(HistoryAnswer::Yes, "Corn, Peas", 3);
        assert_eq!(history.plants, vec!["Corn", "Peas"]);
        assert_eq!(history.years_ago, 3);
    }

    #[test]
    fn test_toggle() {
        let mut types = vec![GardenType::Herb];
        toggle(&mut types, GardenType::Food);
        toggle(&mut types, GardenType::Herb);
        assert_eq!(types, vec![GardenType::Food]);
    }

    #[test]
    fn test_preferences_reject_duplicates_across_lists() {
        let mut prefs = PlantPreferences::default();
        assert!(prefs.add("  Basil ", PreferenceList::Wanted));
        assert!(!prefs.add("Basil", PreferenceList::Unwanted));
        assert!(!prefs.add("   ", PreferenceList::Wanted));
        assert!(prefs.add("Mint", PreferenceList::Unwanted));
        assert_eq!(prefs.wanted, vec!["Basil"]);
        assert_eq!(prefs.unwanted, vec!["Mint"]);
        assert!(prefs.remove("Mint", PreferenceList::Unwanted));
        assert!(!prefs.remove("Mint", PreferenceList::Unwanted));
    }

    #[test]
    fn test_suggestions_deduplicate_and_skip_chosen() {
        let mut prefs = PlantPreferences::default();
        prefs.add("Basil", PreferenceList::Wanted);
        let suggestions = suggested_plants(&[GardenType::Herb, GardenType::Herb], &prefs);
        assert_eq!(suggestions.len(), 7);
        assert!(!suggestions.contains(&"Basil"));
        assert!(suggested_plants(&[], &prefs).is_empty());
    }

    #[tokio::test]
    async fn test_confirm_location_sets_zone() {
        let mut wizard = Wizard::new();
        let location = wizard.confirm_location(&StubZoneLookup::new(), "10001").await.unwrap();
        assert_eq!(location.growing_zone, "7b");
        assert_eq!(wizard.data().location.zipcode, "10001");
    }

    #[tokio::test]
    async fn test_confirm_location_failed_lookup_leaves_state() {
        let mut wizard = Wizard::new();
        wizard.confirm_location(&StubZoneLookup::new(), "10001").await.unwrap();
        let failing =
            RapidApiZoneLookup::new(None, DEFAULT_RAPIDAPI_HOST, Duration::from_secs(1)).unwrap();
        let err = wizard.confirm_location(&failing, "90210").await.unwrap_err();
        assert!(matches!(err, ZoneError::MissingApiKey));
        assert_eq!(
            wizard.data().location,
            Location {
                zipcode: "10001".into(),
                growing_zone: "7b".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_confirm_location_invalid_leaves_state() {
        let mut wizard = Wizard::new();
        wizard.confirm_location(&StubZoneLookup::new(), "10001").await.unwrap();
        let err = wizard.confirm_location(&StubZoneLookup::new(), "123").await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid 5-digit US zipcode");
        assert_eq!(wizard.data().location.zipcode, "10001");
    }
}
