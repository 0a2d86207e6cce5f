// crates/geopick-core/src/model/selection.rs
use serde::{Deserialize, Serialize};

/// The normalized outcome of a country / state / city pick.
///
/// Ids are present only for entries chosen from a fetched list. A level
/// whose name was typed by hand has `is_custom_*` set and no id.
///
/// The record has no lifecycle of its own; it is recomputed from the
/// current selection (see [`crate::SelectionSession::response`]) and,
/// optionally, merged with free-text entries via [`LocationSelection::compose`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationSelection {
    pub country_id: Option<i64>,
    pub country_name: String,
    pub state_id: Option<i64>,
    pub state_name: String,
    pub city_id: Option<i64>,
    pub city_name: String,

    pub is_custom_country: bool,
    pub is_custom_state: bool,
    pub is_custom_city: bool,
}

impl LocationSelection {
    /// All three names are filled in, whether picked or typed.
    pub fn is_complete(&self) -> bool {
        !self.country_name.is_empty() && !self.state_name.is_empty() && !self.city_name.is_empty()
    }

    /// Overlays free-text entries on top of a picked selection.
    ///
    /// Each level in manual mode contributes its trimmed text, drops the id
    /// and raises its custom flag. Levels not in manual mode keep the picked
    /// id and name.
    pub fn compose(picked: &LocationSelection, manual: &ManualEntry) -> LocationSelection {
        let (country_id, country_name, is_custom_country) = merge_level(
            picked.country_id,
            &picked.country_name,
            manual.country.as_deref(),
        );
        let (state_id, state_name, is_custom_state) =
            merge_level(picked.state_id, &picked.state_name, manual.state.as_deref());
        let (city_id, city_name, is_custom_city) =
            merge_level(picked.city_id, &picked.city_name, manual.city.as_deref());

        LocationSelection {
            country_id,
            country_name,
            state_id,
            state_name,
            city_id,
            city_name,
            is_custom_country,
            is_custom_state,
            is_custom_city,
        }
    }
}

fn merge_level(id: Option<i64>, name: &str, manual: Option<&str>) -> (Option<i64>, String, bool) {
    match manual {
        Some(text) => (None, text.trim().to_string(), true),
        None => (id, name.to_string(), false),
    }
}

/// Free-text entry state, one optional value per level.
///
/// `Some(text)` means the level is typed by hand (possibly still empty).
/// Entering a level manually also puts every level below it in manual mode,
/// because a typed parent has no id to fetch children for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualEntry {
    country: Option<String>,
    state: Option<String>,
    city: Option<String>,
}

impl ManualEntry {
    /// Restores manual mode from a previously produced selection.
    pub fn from_selection(selection: &LocationSelection) -> Self {
        let pick = |custom: bool, name: &str| custom.then(|| name.to_string());
        Self {
            country: pick(selection.is_custom_country, &selection.country_name),
            state: pick(selection.is_custom_state, &selection.state_name),
            city: pick(selection.is_custom_city, &selection.city_name),
        }
    }

    pub fn set_country(&mut self, text: impl Into<String>) {
        self.country = Some(text.into());
        self.state.get_or_insert_with(String::new);
        self.city.get_or_insert_with(String::new);
    }

    pub fn set_state(&mut self, text: impl Into<String>) {
        self.state = Some(text.into());
        self.city.get_or_insert_with(String::new);
    }

    pub fn set_city(&mut self, text: impl Into<String>) {
        self.city = Some(text.into());
    }

    /// Leaves manual mode for the country and everything below it.
    pub fn clear_country(&mut self) {
        *self = Self::default();
    }

    /// Leaves manual mode for the state and the city.
    pub fn clear_state(&mut self) {
        self.state = None;
        self.city = None;
    }

    pub fn clear_city(&mut self) {
        self.city = None;
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// A state may be typed once the country is known, picked or typed.
    pub fn can_enter_state(&self, picked: &LocationSelection) -> bool {
        picked.country_id.is_some() || self.country.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// A city may be typed once the state is known, picked or typed.
    pub fn can_enter_city(&self, picked: &LocationSelection) -> bool {
        picked.state_id.is_some() || self.state.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picked() -> LocationSelection {
        LocationSelection {
            country_id: Some(1),
            country_name: "United States".into(),
            state_id: Some(101),
            state_name: "California".into(),
            city_id: Some(1001),
            city_name: "San Francisco".into(),
            ..LocationSelection::default()
        }
    }

    #[test]
    fn completeness_needs_all_three_names() {
        assert!(picked().is_complete());
        let mut partial = picked();
        partial.city_name.clear();
        assert!(!partial.is_complete());
        assert!(!LocationSelection::default().is_complete());
    }

    #[test]
    fn compose_without_manual_entry_is_identity() {
        let merged = LocationSelection::compose(&picked(), &ManualEntry::default());
        assert_eq!(merged, picked());
    }

    #[test]
    fn manual_city_drops_id_and_sets_flag() {
        let mut manual = ManualEntry::default();
        manual.set_city("  Sausalito ");
        let merged = LocationSelection::compose(&picked(), &manual);
        assert_eq!(merged.city_id, None);
        assert_eq!(merged.city_name, "Sausalito");
        assert!(merged.is_custom_city);
        assert_eq!(merged.state_id, Some(101));
        assert!(!merged.is_custom_state);
    }

    #[test]
    fn manual_country_cascades_to_children() {
        let mut manual = ManualEntry::default();
        manual.set_country("Atlantis");
        let merged = LocationSelection::compose(&LocationSelection::default(), &manual);
        assert!(merged.is_custom_country && merged.is_custom_state && merged.is_custom_city);
        assert_eq!(merged.country_name, "Atlantis");
        assert!(merged.state_name.is_empty());
        assert!(!merged.is_complete());
    }

    #[test]
    fn setting_a_parent_keeps_typed_children() {
        let mut manual = ManualEntry::default();
        manual.set_city("Springfield");
        manual.set_state("Oregon");
        assert_eq!(manual.city(), Some("Springfield"));
    }

    #[test]
    fn clearing_a_level_clears_below_it() {
        let mut manual = ManualEntry::default();
        manual.set_country("Atlantis");
        manual.set_state("Poseidonia");
        manual.clear_state();
        assert_eq!(manual.country(), Some("Atlantis"));
        assert_eq!(manual.state(), None);
        assert_eq!(manual.city(), None);
        manual.clear_country();
        assert_eq!(manual, ManualEntry::default());
    }

    #[test]
    fn hydrates_from_previous_selection() {
        let mut prev = picked();
        prev.city_id = None;
        prev.city_name = "Sausalito".into();
        prev.is_custom_city = true;
        let manual = ManualEntry::from_selection(&prev);
        assert_eq!(manual.country(), None);
        assert_eq!(manual.city(), Some("Sausalito"));
    }

    #[test]
    fn child_entry_requires_a_known_parent() {
        let mut manual = ManualEntry::default();
        let empty = LocationSelection::default();
        assert!(!manual.can_enter_state(&empty));
        manual.set_country("   ");
        assert!(!manual.can_enter_state(&empty));
        manual.set_country("Atlantis");
        assert!(manual.can_enter_state(&empty));
        assert!(!manual.can_enter_city(&empty));
        assert!(manual.can_enter_city(&picked()));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(picked()).unwrap();
        assert_eq!(json["countryId"], 1);
        assert_eq!(json["isCustomCity"], false);
        let back: LocationSelection = serde_json::from_str(r#"{"cityName":"Oslo"}"#).unwrap();
        assert_eq!(back.city_name, "Oslo");
        assert_eq!(back.country_id, None);
    }
}
