// UI module - the settings window, headless
//
// This module contains:
// - SettingsController: keeps the window, the configuration and the live modules in step
// - UiBridge: queue that marshals background requests onto the UI-owning thread
// - ViewState, ListControl: what the window shows
// - Forms: typed snapshots of each tab's controls
// - ListDataRefresher: rebuilds the live lists from their stores

pub mod bridge;
pub mod controller;
pub mod forms;
pub mod lists;
pub mod view;

pub use bridge::{UiBridge, UiBridgeHandle, UiMessage};
pub use controller::{Collaborators, SettingsController, status_line};
pub use forms::{
    AccountDateForm, AccuracyForm, AutoVoterForm, CoreForm, EarlyQuitForm, EloLimitForm, IrcForm,
    MotdForm, PickupForm, ServerListForm, SettingsForm,
};
pub use lists::{ListDataRefresher, ListStores};
pub use view::{Dialog, DialogKind, GroupPhase, ListControl, SelectionOutOfRange, ViewState};
