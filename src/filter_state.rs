// Persists the events page filter controls between visits.
use crate::model::{ALL_CATEGORIES, EventRecord, FilterCriteria, filter_events};
use crate::storage::KeyValueStore;
use anyhow::Result;

pub const SEARCH_KEY: &str = "eventSearch";
pub const CATEGORY_KEY: &str = "eventCategory";
pub const DATE_KEY: &str = "eventDate";

/// Criteria restored at start-up, and whether they call for an initial filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredFilters {
    pub criteria: FilterCriteria,
    pub apply_on_load: bool,
}

/// Filter controls bound to a storage backend.
///
/// Storage is written only by `apply` and `clear`; editing `criteria`
/// directly does not persist anything.
pub struct FilterState<S: KeyValueStore> {
    store: S,
    pub criteria: FilterCriteria,
}

impl<S: KeyValueStore> FilterState<S> {
    /// Loads any saved values, keeping defaults for keys that are absent.
    pub fn restore(store: S) -> Result<(Self, bool)> {
        let restored = restore_criteria(&store)?;
        Ok((
            Self {
                store,
                criteria: restored.criteria,
            },
            restored.apply_on_load,
        ))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saves the current criteria and filters `events` with them.
    pub fn apply<'a>(&mut self, events: &'a [EventRecord]) -> Result<Vec<&'a EventRecord>> {
        save_criteria(&mut self.store, &self.criteria)?;
        Ok(filter_events(events, &self.criteria))
    }

    /// Resets the controls, forgets the saved values and filters `events`.
    pub fn clear<'a>(&mut self, events: &'a [EventRecord]) -> Result<Vec<&'a EventRecord>> {
        self.criteria = FilterCriteria::default();
        clear_criteria(&mut self.store)?;
        Ok(filter_events(events, &self.criteria))
    }
}

/// Reads the three filter keys. Absent keys keep their default value.
pub fn restore_criteria<S: KeyValueStore + ?Sized>(store: &S) -> Result<RestoredFilters> {
    let mut criteria = FilterCriteria::default();

    if let Some(search) = store.get(SEARCH_KEY)? {
        criteria.search_term = search;
    }
    if let Some(category) = store.get(CATEGORY_KEY)? {
        criteria.category = category;
    }
    if let Some(date) = store.get(DATE_KEY)? {
        criteria.iso_date = date;
    }

    let apply_on_load = criteria.is_active();
    log::debug!(
        "Restored filters {:?} (apply on load: {})",
        criteria,
        apply_on_load
    );
    Ok(RestoredFilters {
        criteria,
        apply_on_load,
    })
}

/// Writes all three keys, empty values included.
pub fn save_criteria<S: KeyValueStore + ?Sized>(store: &mut S, criteria: &FilterCriteria) -> Result<()> {
    store.set(SEARCH_KEY, &criteria.search_term)?;
    store.set(CATEGORY_KEY, &criteria.category)?;
    store.set(DATE_KEY, &criteria.iso_date)?;
    log::info!("Saved filters {:?}", criteria);
    Ok(())
}

/// Removes all three keys.
pub fn clear_criteria<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<()> {
    store.remove(SEARCH_KEY)?;
    store.remove(CATEGORY_KEY)?;
    store.remove(DATE_KEY)?;
    log::info!("Cleared saved filters (category reset to '{}')", ALL_CATEGORIES);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn events() -> Vec<EventRecord> {
        vec![
            EventRecord::new("Jazz Night", "live music", "music", "التاريخ: 15 تشرين الأول 2024"),
            EventRecord::new("Photo Walk", "old city", "art", "التاريخ: 5 شباط 2024"),
        ]
    }

    #[test]
    fn test_empty_store_restores_defaults_without_pass() {
        let (state, apply) = FilterState::restore(MemoryStore::new()).unwrap();
        assert_eq!(state.criteria, FilterCriteria::default());
        assert!(!apply);
    }

    #[test]
    fn test_apply_writes_all_keys() {
        let (mut state, _) = FilterState::restore(MemoryStore::new()).unwrap();
        state.criteria = FilterCriteria::new("", "art", "");
        let evs = events();
        let visible = state.apply(&evs).unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Photo Walk");

        let store = state.store();
        assert_eq!(store.get(SEARCH_KEY).unwrap().as_deref(), Some(""));
        assert_eq!(store.get(CATEGORY_KEY).unwrap().as_deref(), Some("art"));
        assert_eq!(store.get(DATE_KEY).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_editing_criteria_does_not_persist() {
        let (mut state, _) = FilterState::restore(MemoryStore::new()).unwrap();
        state.criteria.search_term = "jazz".to_string();
        assert_eq!(state.store().get(SEARCH_KEY).unwrap(), None);
    }

    #[test]
    fn test_clear_removes_keys_and_shows_all() {
        let (mut state, _) = FilterState::restore(MemoryStore::new()).unwrap();
        state.criteria = FilterCriteria::new("jazz", "music", "2024-10-15");
        let evs = events();
        assert_eq!(state.apply(&evs).unwrap().len(), 1);

        let visible = state.clear(&evs).unwrap();
        assert_eq!(visible.len(), 2);
        assert_eq!(state.criteria, FilterCriteria::default());
        for key in [SEARCH_KEY, CATEGORY_KEY, DATE_KEY] {
            assert_eq!(state.store().get(key).unwrap(), None);
        }
    }

    #[test]
    fn test_saved_values_restore_unchanged() {
        let evs = events();
        for criteria in [
            FilterCriteria::new("x", "", ""),
            FilterCriteria::new("", "Music", "2024-10-15"),
            FilterCriteria::new("  ", "all", ""),
        ] {
            let mut store = MemoryStore::new();
            save_criteria(&mut store, &criteria).unwrap();
            let restored = restore_criteria(&store).unwrap().criteria;
            assert_eq!(restored, criteria);
            assert_eq!(
                crate::model::visibility(&evs, &restored),
                crate::model::visibility(&evs, &criteria)
            );
        }
    }

    #[test]
    fn test_blank_values_do_not_request_pass() {
        let mut store = MemoryStore::new();
        save_criteria(&mut store, &FilterCriteria::new("   ", "All", "")).unwrap();
        assert!(!restore_criteria(&store).unwrap().apply_on_load);
    }

    #[test]
    fn test_restore_requests_pass_for_non_default_values() {
        let mut store = MemoryStore::new();
        store.set(DATE_KEY, "2024-02-05").unwrap();
        let restored = restore_criteria(&store).unwrap();
        assert!(restored.apply_on_load);
        assert_eq!(restored.criteria.iso_date, "2024-02-05");
        assert_eq!(restored.criteria.category, ALL_CATEGORIES);

        // Saved defaults do not trigger a pass
        let mut store = MemoryStore::new();
        save_criteria(&mut store, &FilterCriteria::default()).unwrap();
        assert!(!restore_criteria(&store).unwrap().apply_on_load);
    }
}
