// File: src/controller.rs
//! Page actions over a filesystem context.
//! The binary delegates every command here so that the same workflow (load
//! events, restore or persist state, filter) is shared and testable.
use crate::config::Config;
use crate::contact::{ContactForm, Submission};
use crate::context::AppContext;
use crate::filter_state::FilterState;
use crate::model::{ALL_CATEGORIES, EventRecord, FilterCriteria, filter_events, load_events};
use crate::preferences::{self, Theme};
use crate::scroll::ScrollToTop;
use crate::storage::FileStore;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Optional overrides for the filter controls; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaInput {
    pub search: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl CriteriaInput {
    pub fn apply_to(&self, criteria: &mut FilterCriteria) {
        if let Some(s) = &self.search {
            criteria.search_term = s.clone();
        }
        if let Some(c) = &self.category {
            // A blank selection means no category constraint.
            criteria.category = if c.trim().is_empty() {
                ALL_CATEGORIES.to_string()
            } else {
                c.clone()
            };
        }
        if let Some(d) = &self.date {
            criteria.iso_date = d.clone();
        }
    }
}

/// Result of a filter command: the criteria in effect and the visible events.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub criteria: FilterCriteria,
    pub filtered: bool,
    pub visible: Vec<EventRecord>,
    pub total: usize,
}

#[derive(Clone)]
pub struct PageController {
    pub ctx: Arc<dyn AppContext>,
    pub config: Config,
}

impl PageController {
    pub fn new(ctx: Arc<dyn AppContext>, config: Config) -> Self {
        Self { ctx, config }
    }

    fn resolve_events_path(&self, events: Option<&Path>) -> Result<PathBuf> {
        match events {
            Some(p) => Ok(p.to_path_buf()),
            None => self.config.events_path(self.ctx.as_ref()),
        }
    }

    fn load_events(&self, events: Option<&Path>) -> Result<Vec<EventRecord>> {
        load_events(&self.resolve_events_path(events)?)
    }

    fn restore_state(&self) -> Result<(FilterState<FileStore>, bool)> {
        FilterState::restore(self.ctx.open_store()?)
    }

    /// Start-up pass: restore saved filters and apply them if any is set.
    pub fn show(&self, events: Option<&Path>) -> Result<FilterOutcome> {
        let all = self.load_events(events)?;
        let (state, apply_on_load) = self.restore_state()?;
        let visible = if apply_on_load {
            filter_events(&all, &state.criteria)
                .into_iter()
                .cloned()
                .collect()
        } else {
            all.clone()
        };
        Ok(FilterOutcome {
            criteria: state.criteria,
            filtered: apply_on_load,
            total: all.len(),
            visible,
        })
    }

    /// The "filter" button: controls start from the saved values, take the
    /// given overrides, are saved, then applied.
    pub fn apply(&self, input: &CriteriaInput, events: Option<&Path>) -> Result<FilterOutcome> {
        let all = self.load_events(events)?;
        let (mut state, _) = self.restore_state()?;
        input.apply_to(&mut state.criteria);
        let visible = state.apply(&all)?.into_iter().cloned().collect();
        Ok(FilterOutcome {
            criteria: state.criteria,
            filtered: true,
            total: all.len(),
            visible,
        })
    }

    /// The "clear" button.
    pub fn clear(&self, events: Option<&Path>) -> Result<FilterOutcome> {
        let all = self.load_events(events)?;
        let (mut state, _) = self.restore_state()?;
        let visible = state.clear(&all)?.into_iter().cloned().collect();
        Ok(FilterOutcome {
            criteria: state.criteria,
            filtered: true,
            total: all.len(),
            visible,
        })
    }

    pub fn theme(&self) -> Result<Theme> {
        preferences::load_theme(&self.ctx.open_store()?)
    }

    pub fn toggle_theme(&self) -> Result<Theme> {
        preferences::toggle_theme(&mut self.ctx.open_store()?)
    }

    pub fn submit_contact(&self, mut form: ContactForm) -> Submission {
        form.submit()
    }

    /// Scroll-to-top button using the configured threshold.
    pub fn scroll_button(&self) -> ScrollToTop {
        ScrollToTop::new(self.config.scroll_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use std::fs;

    fn setup() -> (Arc<TestContext>, PageController) {
        let ctx = Arc::new(TestContext::new());
        let events = r#"[
            {"title": "Jazz Night", "description": "live", "category": "music", "date_text": "التاريخ: 15 تشرين الأول 2024"},
            {"title": "Photo Walk", "description": "old city", "category": "art", "date_text": "التاريخ: 5 شباط 2024"}
        ]"#;
        fs::write(ctx.get_default_events_path().unwrap(), events).unwrap();
        let controller = PageController::new(ctx.clone(), Config::default());
        (ctx, controller)
    }

    #[test]
    fn test_apply_then_show_restores() {
        let (_ctx, c) = setup();
        let input = CriteriaInput {
            category: Some("Music".to_string()),
            ..Default::default()
        };
        let out = c.apply(&input, None).unwrap();
        assert_eq!(out.visible.len(), 1);

        let shown = c.show(None).unwrap();
        assert!(shown.filtered);
        assert_eq!(shown.criteria.category, "Music");
        assert_eq!(shown.visible[0].title, "Jazz Night");
    }

    #[test]
    fn test_apply_keeps_saved_values_not_overridden() {
        let (_ctx, c) = setup();
        c.apply(
            &CriteriaInput {
                date: Some("2024-02-05".to_string()),
                ..Default::default()
            },
            None,
        )
        .unwrap();
        let out = c
            .apply(
                &CriteriaInput {
                    search: Some("photo".to_string()),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        assert_eq!(out.criteria.iso_date, "2024-02-05");
        assert_eq!(out.visible.len(), 1);
    }

    #[test]
    fn test_blank_category_is_saved_as_all() {
        let (_ctx, c) = setup();
        let out = c
            .apply(
                &CriteriaInput {
                    category: Some(String::new()),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        assert_eq!(out.criteria.category, ALL_CATEGORIES);
        assert_eq!(out.visible.len(), 2);

        let shown = c.show(None).unwrap();
        assert_eq!(shown.criteria, out.criteria);
        assert_eq!(shown.visible.len(), 2);
    }

    #[test]
    fn test_clear_shows_everything() {
        let (_ctx, c) = setup();
        c.apply(
            &CriteriaInput {
                search: Some("nothing matches".to_string()),
                ..Default::default()
            },
            None,
        )
        .unwrap();
        let out = c.clear(None).unwrap();
        assert_eq!(out.visible.len(), 2);
        let shown = c.show(None).unwrap();
        assert!(!shown.filtered);
    }

    #[test]
    fn test_theme_toggle_persists() {
        let (_ctx, c) = setup();
        assert_eq!(c.theme().unwrap(), Theme::Light);
        assert_eq!(c.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(c.theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_scroll_button_uses_config_threshold() {
        let ctx = Arc::new(TestContext::new());
        let config = Config {
            scroll_threshold: 10,
            ..Config::default()
        };
        let c = PageController::new(ctx, config);
        let mut btn = c.scroll_button();
        assert!(btn.on_scroll(11));
        assert!(btn.is_visible());
    }

    #[test]
    fn test_missing_events_file_is_error() {
        let ctx = Arc::new(TestContext::new());
        let c = PageController::new(ctx, Config::default());
        let err = c.show(None).unwrap_err();
        assert!(err.to_string().contains("Failed to read events file"));
    }
}
