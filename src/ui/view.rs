//! Everything the settings window shows, as plain data.
//!
//! The controller only ever mutates a [`ViewState`]; a front end renders it.
//! Keeping it free of toolkit types lets the whole synchronization flow run
//! headless in tests.

use crate::models::{AutoVote, BanInfo, EarlyQuitter, ListEntry, SettingsGroup, User};
use crate::ui::forms::{
    AccountDateForm, AccuracyForm, AutoVoterForm, CoreForm, EarlyQuitForm, EloLimitForm, IrcForm,
    MotdForm, PickupForm, ServerListForm,
};
use crate::validation::{FieldError, ValidationErrors};
use std::collections::HashMap;
use thiserror::Error;

/// Where a tab is in its edit/save cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupPhase {
    #[default]
    Idle,
    Editing,
    Validating,
    Committed,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Error,
}

/// A modal message waiting to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == DialogKind::Error
    }
}

/// Raised when a list control would end up with a selection past its last item.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("selection index {index} is out of range for {len} items")]
pub struct SelectionOutOfRange {
    pub index: isize,
    pub len: usize,
}

/// A selection-aware list box bound to a snapshot of a backing store.
///
/// Like the list widgets it stands in for, attaching a collection keeps the
/// current selection, so attaching one that is shorter than the selection
/// faults. Detach first.
#[derive(Debug, Clone)]
pub struct ListControl<T> {
    data_source: Option<Vec<T>>,
    selected_index: isize,
}

impl<T> Default for ListControl<T> {
    fn default() -> Self {
        Self {
            data_source: None,
            selected_index: -1,
        }
    }
}

impl<T: ListEntry> ListControl<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the data source and clear the selection.
    pub fn detach(&mut self) {
        self.data_source = None;
        self.selected_index = -1;
    }

    /// Bind `entries`, selecting the first item if nothing was selected.
    pub fn attach(&mut self, entries: Vec<T>) -> Result<(), SelectionOutOfRange> {
        let len = entries.len();
        if self.selected_index >= len as isize {
            return Err(SelectionOutOfRange {
                index: self.selected_index,
                len,
            });
        }
        if self.selected_index < 0 && len > 0 {
            self.selected_index = 0;
        }
        self.data_source = Some(entries);
        Ok(())
    }

    /// Select the item at `index`, or nothing with -1.
    pub fn select(&mut self, index: isize) -> Result<(), SelectionOutOfRange> {
        let len = self.len();
        if index < -1 || index >= len as isize {
            return Err(SelectionOutOfRange { index, len });
        }
        self.selected_index = index;
        Ok(())
    }

    pub fn selected_index(&self) -> isize {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&T> {
        let index = usize::try_from(self.selected_index).ok()?;
        self.data_source.as_ref()?.get(index)
    }

    pub fn entries(&self) -> &[T] {
        self.data_source.as_deref().unwrap_or_default()
    }

    /// Display text of every bound item.
    pub fn items(&self) -> Vec<String> {
        self.entries().iter().map(ListEntry::display).collect()
    }

    pub fn is_bound(&self) -> bool {
        self.data_source.is_some()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Full contents of the settings window.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub current_tab: SettingsGroup,

    pub core: CoreForm,
    pub account_date: AccountDateForm,
    pub accuracy: AccuracyForm,
    pub auto_voter: AutoVoterForm,
    pub early_quit: EarlyQuitForm,
    pub elo_limit: EloLimitForm,
    pub irc: IrcForm,
    pub motd: MotdForm,
    pub pickup: PickupForm,
    pub server_list: ServerListForm,

    pub bans: ListControl<BanInfo>,
    pub quitters: ListControl<EarlyQuitter>,
    pub votes: ListControl<AutoVote>,
    pub users: ListControl<User>,

    /// Aggregate "active modules" line at the bottom of the window.
    pub status_line: String,

    /// Modal message waiting to be shown, if any.
    pub dialog: Option<Dialog>,

    field_errors: HashMap<SettingsGroup, Vec<FieldError>>,
    phases: HashMap<SettingsGroup, GroupPhase>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_tab: SettingsGroup::Core,
            core: CoreForm::default(),
            account_date: AccountDateForm::default(),
            accuracy: AccuracyForm::default(),
            auto_voter: AutoVoterForm::default(),
            early_quit: EarlyQuitForm::default(),
            elo_limit: EloLimitForm::default(),
            irc: IrcForm::default(),
            motd: MotdForm::default(),
            pickup: PickupForm::default(),
            server_list: ServerListForm::default(),
            bans: ListControl::new(),
            quitters: ListControl::new(),
            votes: ListControl::new(),
            users: ListControl::new(),
            status_line: String::new(),
            dialog: None,
            field_errors: HashMap::new(),
            phases: HashMap::new(),
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, group: SettingsGroup) -> GroupPhase {
        self.phases.get(&group).copied().unwrap_or_default()
    }

    pub(crate) fn set_phase(&mut self, group: SettingsGroup, phase: GroupPhase) {
        let previous = self.phases.insert(group, phase).unwrap_or_default();
        if previous != phase {
            tracing::trace!("{} tab: {:?} -> {:?}", group, previous, phase);
        }
    }

    /// Fields of `group` currently marked invalid.
    pub fn field_errors(&self, group: SettingsGroup) -> &[FieldError] {
        self.field_errors
            .get(&group)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_field_error(&self, group: SettingsGroup, field: &str) -> bool {
        self.field_errors(group).iter().any(|e| e.field == field)
    }

    pub(crate) fn mark_invalid(&mut self, group: SettingsGroup, errors: &ValidationErrors) {
        self.field_errors.insert(group, errors.errors().to_vec());
    }

    /// Set or clear the mark on one field after a focus-loss check.
    pub(crate) fn mark_field(&mut self, group: SettingsGroup, field: &'static str, error: Option<String>) {
        let marks = self.field_errors.entry(group).or_default();
        marks.retain(|e| e.field != field);
        if let Some(message) = error {
            marks.push(FieldError { field, message });
        }
    }

    pub(crate) fn clear_marks(&mut self, group: SettingsGroup) {
        self.field_errors.remove(&group);
    }

    pub(crate) fn show(&mut self, dialog: Dialog) {
        tracing::debug!("Dialog: {} - {}", dialog.title, dialog.message);
        self.dialog = Some(dialog);
    }

    /// Take the pending dialog, as a front end does when it shows it.
    pub fn dismiss_dialog(&mut self) -> Option<Dialog> {
        self.dialog.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quitter(name: &str) -> EarlyQuitter {
        EarlyQuitter {
            player_name: name.to_string(),
            quit_count: 1,
        }
    }

    #[test]
    fn test_attach_selects_first_item() {
        let mut list = ListControl::new();
        list.attach(vec![quitter("a"), quitter("b")]).unwrap();

        assert_eq!(list.selected_index(), 0);
        assert_eq!(list.selected().map(|q| q.player_name.as_str()), Some("a"));
        assert_eq!(list.items(), vec!["a (1 quit)", "b (1 quit)"]);
    }

    #[test]
    fn test_attach_shorter_collection_faults() {
        let mut list = ListControl::new();
        list.attach(vec![quitter("a"), quitter("b"), quitter("c")])
            .unwrap();
        list.select(2).unwrap();

        let err = list.attach(vec![quitter("a")]).unwrap_err();
        assert_eq!(err, SelectionOutOfRange { index: 2, len: 1 });

        list.detach();
        assert_eq!(list.selected_index(), -1);
        list.attach(vec![quitter("a")]).unwrap();
        assert_eq!(list.selected_index(), 0);
    }

    #[test]
    fn test_empty_list_has_no_selection() {
        let mut list: ListControl<EarlyQuitter> = ListControl::new();
        list.attach(Vec::new()).unwrap();

        assert_eq!(list.selected_index(), -1);
        assert!(list.selected().is_none());
        assert!(list.select(0).is_err());
    }

    #[test]
    fn test_field_marks() {
        let mut view = ViewState::new();
        let group = SettingsGroup::Core;

        view.mark_field(group, "owner_name", Some("bad".to_string()));
        assert!(view.has_field_error(group, "owner_name"));

        view.mark_field(group, "owner_name", None);
        assert!(view.field_errors(group).is_empty());
    }

    #[test]
    fn test_dialog_dismiss() {
        let mut view = ViewState::new();
        view.show(Dialog::error("Oops", "Something failed"));

        let dialog = view.dismiss_dialog().unwrap();
        assert!(dialog.is_error());
        assert!(view.dialog.is_none());
    }
}
