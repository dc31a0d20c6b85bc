//! Application state and the reducer driving it.
//!
//! Everything the front-end shows is derived from an [`AppState`]; user
//! interaction becomes an [`Action`] that [`reduce`] folds into a new state.

use crate::data::CardRecord;
use crate::error::Result;
use crate::filter::{Criteria, FilterInputs};
use crate::store::RecordStore;

use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub load: LoadState,
    pub store: RecordStore,
    pub inputs: FilterInputs,
    pub criteria: Criteria,
    pub result: Vec<Arc<CardRecord>>,
    pub selected: Option<Arc<CardRecord>>,
}

/// A change to the filter controls. Criteria only follow on [`Action::Apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEdit {
    ToggleAttribute(String),
    ToggleExpansion(String),
    SetAttributes(BTreeSet<String>),
    SetExpansions(BTreeSet<String>),
    SetHpMin(String),
    SetHpMax(String),
    SetName(String),
}

#[derive(Debug)]
pub enum Action {
    Loaded(Result<RecordStore>),
    Edit(InputEdit),
    Apply,
    Reset,
    Select(Arc<CardRecord>),
    Dismiss,
}

impl AppState {
    pub fn is_ready(&self) -> bool {
        self.load == LoadState::Ready
    }

    /// Whether this exact record is part of the current result.
    pub fn in_result(&self, record: &Arc<CardRecord>) -> bool {
        self.result.iter().any(|r| Arc::ptr_eq(r, record))
    }
}

fn toggle(set: &mut BTreeSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

impl InputEdit {
    fn apply_to(self, inputs: &mut FilterInputs) {
        match self {
            Self::ToggleAttribute(v) => toggle(&mut inputs.attributes, v),
            Self::ToggleExpansion(v) => toggle(&mut inputs.expansions, v),
            Self::SetAttributes(vs) => inputs.attributes = vs,
            Self::SetExpansions(vs) => inputs.expansions = vs,
            Self::SetHpMin(v) => inputs.hp_min = v,
            Self::SetHpMax(v) => inputs.hp_max = v,
            Self::SetName(v) => inputs.name = v,
        }
    }
}

/// Folds one action into the state.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::Loaded(Ok(store)) => {
            state.criteria = Criteria::default();
            state.result = state.criteria.filter(store.records());
            state.store = store;
            state.selected = None;
            state.load = LoadState::Ready;
        }
        Action::Loaded(Err(e)) => {
            state.store = RecordStore::default();
            state.result.clear();
            state.selected = None;
            state.load = LoadState::Failed(e.to_string());
        }
        Action::Edit(edit) => edit.apply_to(&mut state.inputs),
        Action::Apply if state.is_ready() => {
            state.criteria = state.inputs.build();
            state.result = state.criteria.filter(state.store.records());
        }
        Action::Reset if state.is_ready() => {
            state.criteria = state.inputs.reset();
            state.result = state.criteria.filter(state.store.records());
        }
        Action::Select(record) if state.is_ready() && state.in_result(&record) => {
            state.selected = Some(record);
        }
        Action::Dismiss => state.selected = None,
        Action::Apply | Action::Reset | Action::Select(_) => {}
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;
    use crate::error::Error;

    fn card(name: &str, attribute: &str, hp: i64) -> CardRecord {
        CardRecord {
            identifier: name.to_lowercase(),
            name: name.to_string(),
            attribute: Some(attribute.to_string()),
            expansion: Some(String::from("SV10")),
            hp: Value::Int(hp),
            ..Default::default()
        }
    }

    fn loaded() -> AppState {
        let store = RecordStore::new([card("Bulbasaur", "Grass", 70), card("Charmander", "Fire", 60)]);
        reduce(AppState::default(), Action::Loaded(Ok(store)))
    }

    fn names(state: &AppState) -> Vec<&str> {
        state.result.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn starts_loading_then_shows_everything() {
        assert_eq!(AppState::default().load, LoadState::Loading);
        let state = loaded();
        assert!(state.is_ready());
        assert_eq!(names(&state), vec!["Bulbasaur", "Charmander"]);
        assert!(state.criteria.is_default());
    }

    #[test]
    fn load_failure_is_kept_as_a_message() {
        let state = reduce(
            AppState::default(),
            Action::Loaded(Err(Error::record_read("expected `[`"))),
        );
        assert!(matches!(&state.load, LoadState::Failed(msg) if msg.contains("expected `[`")));
        assert!(state.result.is_empty());
        let state = reduce(state, Action::Apply);
        assert!(state.result.is_empty());
    }

    #[test]
    fn edits_wait_for_apply() {
        let state = reduce(loaded(), Action::Edit(InputEdit::ToggleAttribute("Grass".into())));
        assert_eq!(state.result.len(), 2);
        assert!(state.criteria.is_default());
        let state = reduce(state, Action::Apply);
        assert_eq!(names(&state), vec!["Bulbasaur"]);
    }

    #[test]
    fn toggling_twice_unchecks() {
        let mut state = loaded();
        for _ in 0..2 {
            state = reduce(state, Action::Edit(InputEdit::ToggleAttribute("Fire".into())));
        }
        assert!(state.inputs.attributes.is_empty());
    }

    #[test]
    fn reset_restores_everything() {
        let mut state = loaded();
        for edit in [
            InputEdit::SetHpMin("65".into()),
            InputEdit::SetName("bulb".into()),
            InputEdit::ToggleExpansion("SV10".into()),
        ] {
            state = reduce(state, Action::Edit(edit));
        }
        let state = reduce(state, Action::Apply);
        assert_eq!(names(&state), vec!["Bulbasaur"]);

        let state = reduce(state, Action::Reset);
        assert_eq!(state.inputs, FilterInputs::default());
        assert!(state.criteria.is_default());
        assert_eq!(state.result.len(), state.store.len());
    }

    #[test]
    fn malformed_bounds_do_not_block_filtering() {
        let state = reduce(loaded(), Action::Edit(InputEdit::SetHpMax("lots".into())));
        let state = reduce(state, Action::Apply);
        assert_eq!(state.result.len(), 2);
    }

    #[test]
    fn selection_is_by_record_identity() {
        let state = loaded();
        let charmander = state.result[1].clone();
        let state = reduce(state, Action::Select(charmander.clone()));
        assert!(Arc::ptr_eq(state.selected.as_ref().unwrap(), &charmander));

        let state = reduce(state, Action::Dismiss);
        assert!(state.selected.is_none());

        let lookalike = Arc::new(charmander.as_ref().clone());
        let state = reduce(state, Action::Select(lookalike));
        assert!(state.selected.is_none());
    }

    #[test]
    fn refiltering_keeps_selection_bound_to_its_record() {
        let state = loaded();
        let bulbasaur = state.result[0].clone();
        let state = reduce(state, Action::Edit(InputEdit::ToggleAttribute("Fire".into())));
        let state = reduce(state, Action::Apply);
        let state = reduce(state, Action::Select(bulbasaur));
        assert!(state.selected.is_none());

        let charmander = state.result[0].clone();
        let state = reduce(state, Action::Select(charmander));
        assert_eq!(state.selected.as_ref().unwrap().name, "Charmander");
    }

    #[test]
    fn actions_before_load_are_ignored() {
        let state = reduce(AppState::default(), Action::Reset);
        let state = reduce(state, Action::Apply);
        assert_eq!(state.load, LoadState::Loading);
        assert!(state.result.is_empty());
    }
}
