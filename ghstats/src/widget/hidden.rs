//! Hidden-series list mirrored into the `hidden_repos` form field.

use ghstats_common::SeriesId;

/// Separator used in the serialized field value.
const SEPARATOR: char = ',';

/// Series the user has hidden through the legend.
///
/// Each identifier appears at most once. Insertion order is kept so the
/// serialized field is stable across resubmissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenSeries {
    ids: Vec<SeriesId>,
}

impl HiddenSeries {
    /// Parse a hidden field value. An empty string means no hidden series.
    pub fn from_field_value(value: &str) -> Self {
        let mut hidden = Self::default();
        if value.is_empty() {
            return hidden;
        }
        for id in value.split(SEPARATOR) {
            hidden.hide(SeriesId::from(id));
        }
        hidden
    }

    /// Record a hide/show notification. Returns whether the list changed.
    pub fn apply(&mut self, id: &SeriesId, hidden: bool) -> bool {
        if hidden {
            self.hide(id.clone())
        } else {
            self.show(id)
        }
    }

    fn hide(&mut self, id: SeriesId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    fn show(&mut self, id: &SeriesId) -> bool {
        match self.ids.iter().position(|existing| existing == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    /// Comma-joined field value.
    pub fn field_value(&self) -> String {
        self.ids
            .iter()
            .map(SeriesId::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn contains(&self, id: &SeriesId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(hidden: &HiddenSeries) -> Vec<&str> {
        hidden.iter().map(SeriesId::as_str).collect()
    }

    #[test]
    fn test_parse_field_value() {
        let hidden = HiddenSeries::from_field_value("repoA,repoB");
        assert_eq!(ids(&hidden), vec!["repoA", "repoB"]);
    }

    #[test]
    fn test_empty_field_value() {
        let hidden = HiddenSeries::from_field_value("");
        assert!(hidden.is_empty());
        assert_eq!(hidden.field_value(), "");
    }

    #[test]
    fn test_hide_then_show() {
        let mut hidden = HiddenSeries::from_field_value("repoA,repoB");

        assert!(hidden.apply(&SeriesId::from("repoC"), true));
        assert_eq!(hidden.field_value(), "repoA,repoB,repoC");

        assert!(hidden.apply(&SeriesId::from("repoA"), false));
        assert_eq!(hidden.field_value(), "repoB,repoC");
    }

    #[test]
    fn test_hide_twice_does_not_duplicate() {
        let mut hidden = HiddenSeries::default();
        let id = SeriesId::from("repoA");

        assert!(hidden.apply(&id, true));
        assert!(!hidden.apply(&id, true));

        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden.field_value(), "repoA");
    }

    #[test]
    fn test_show_unknown_is_noop() {
        let mut hidden = HiddenSeries::from_field_value("repoA");
        assert!(!hidden.apply(&SeriesId::from("repoZ"), false));
        assert_eq!(hidden.field_value(), "repoA");
    }

    #[test]
    fn test_duplicate_ids_in_field_collapse() {
        let hidden = HiddenSeries::from_field_value("repoA,repoA,repoB");
        assert_eq!(ids(&hidden), vec!["repoA", "repoB"]);
    }
}
