// Settings Controller - Keeps the window, the configuration file and the live
// modules consistent
//
// This module contains the SettingsController which coordinates between:
// - ViewState (what the window shows)
// - ConfigManager (the configuration document on disk, the source of truth)
// - StateManager (live module state owned by the host)
// - ActivationController (module entry/exit actions)
// - ListDataRefresher (the four live lists)
// - UiBridge (requests posted from background activity)
//
// It handles:
// - Populating tabs from the configuration
// - Validating and saving tabs, then pushing values into the live modules
// - Admin list actions (bans, early quitters, auto votes, users)
// - Starting and stopping monitoring

use crate::activation::{ActivationController, ActivationOutcome};
use crate::config::ConfigManager;
use crate::error::{SyncError, SyncResult};
use crate::metrics::Metrics;
use crate::models::{
    AutoVote, BanInfo, BanType, ConfigurationDocument, IntendedVoteResult, ListKind, ModuleKind,
    ModuleRuntimeState, SettingsGroup, TimeScale, User, UserLevel,
};
use crate::services::{ModuleEffects, MonitoringSession};
use crate::state::StateManager;
use crate::ui::bridge::{UiBridge, UiBridgeHandle, UiMessage};
use crate::ui::forms::{
    AccountDateForm, AccuracyForm, AutoVoterForm, CoreForm, EarlyQuitForm, EloLimitForm, IrcForm,
    MotdForm, PickupForm, ServerListForm, SettingsForm,
};
use crate::ui::lists::{ListDataRefresher, ListStores};
use crate::ui::view::{Dialog, GroupPhase, ViewState};
use crate::validation::{FieldCollector, ValidationErrors, ValidationResult, core_options, lists};
use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub const ACCESS_LEVEL: &str = "access_level";
pub const FORGIVE_COUNT: &str = "forgive_count";

/// Run `$body` with `$form` bound to the form type of `$group`.
macro_rules! with_form {
    ($group:expr, $form:ident => $body:expr) => {
        match $group {
            SettingsGroup::Core => {
                type $form = CoreForm;
                $body
            }
            SettingsGroup::Module(ModuleKind::AccountDate) => {
                type $form = AccountDateForm;
                $body
            }
            SettingsGroup::Module(ModuleKind::Accuracy) => {
                type $form = AccuracyForm;
                $body
            }
            SettingsGroup::Module(ModuleKind::AutoVoter) => {
                type $form = AutoVoterForm;
                $body
            }
            SettingsGroup::Module(ModuleKind::EarlyQuit) => {
                type $form = EarlyQuitForm;
                $body
            }
            SettingsGroup::Module(ModuleKind::EloLimit) => {
                type $form = EloLimitForm;
                $body
            }
            SettingsGroup::Module(ModuleKind::Irc) => {
                type $form = IrcForm;
                $body
            }
            SettingsGroup::Module(ModuleKind::Motd) => {
                type $form = MotdForm;
                $body
            }
            SettingsGroup::Module(ModuleKind::Pickup) => {
                type $form = PickupForm;
                $body
            }
            SettingsGroup::Module(ModuleKind::ServerList) => {
                type $form = ServerListForm;
                $body
            }
        }
    };
}

/// The list shown on a module's tab, if it has one.
fn dependent_list(group: SettingsGroup) -> Option<ListKind> {
    match group {
        SettingsGroup::Module(ModuleKind::EarlyQuit) => Some(ListKind::Quitters),
        SettingsGroup::Module(ModuleKind::AutoVoter) => Some(ListKind::Votes),
        _ => None,
    }
}

/// Text of the status line for `doc`.
pub fn status_line(doc: &ConfigurationDocument) -> String {
    let active: Vec<&str> = ModuleKind::ALL
        .into_iter()
        .filter(|module| module.is_active_in(doc))
        .map(ModuleKind::short_name)
        .collect();

    if active.is_empty() {
        "Active modules: none".to_string()
    } else {
        format!("Active modules: {}", active.join(", "))
    }
}

/// The host objects the controller works against.
pub struct Collaborators {
    pub session: Arc<dyn MonitoringSession>,
    pub effects: Arc<dyn ModuleEffects>,
    pub stores: ListStores,
}

/// Two-way binding between the settings window and the configuration plus
/// live module state.
///
/// Runs on the single UI-owning thread. Every mutating operation re-reads the
/// configuration first, since the host may have written it since the last
/// call. Failures are returned to the caller *and* left in
/// [`ViewState::dialog`] as an error dialog; successes leave an info dialog.
///
/// # Example
/// ```ignore
/// let mut controller = SettingsController::new(config, state, collaborators, handle, metrics);
/// controller.populate_all_tabs()?;
///
/// controller.edit::<EloLimitForm>(|form| form.minimum_required_elo = "1200".into());
/// controller.save(SettingsGroup::Module(ModuleKind::EloLimit))?;
/// ```
pub struct SettingsController {
    view: ViewState,
    config: Arc<ConfigManager>,
    state: StateManager,
    session: Arc<dyn MonitoringSession>,
    activation: ActivationController,
    lists: ListDataRefresher,
    bridge: UiBridge,
    metrics: Arc<Metrics>,

    /// Activation tasks that may still be running
    side_effects: Vec<JoinHandle<()>>,
}

impl SettingsController {
    pub fn new(
        config: Arc<ConfigManager>,
        state: StateManager,
        collaborators: Collaborators,
        tokio_handle: tokio::runtime::Handle,
        metrics: Arc<Metrics>,
    ) -> Self {
        let activation = ActivationController::new(
            state.clone(),
            Arc::clone(&collaborators.session),
            collaborators.effects,
            tokio_handle,
            Arc::clone(&metrics),
        );
        let lists = ListDataRefresher::new(collaborators.stores, Arc::clone(&metrics));
        let bridge = UiBridge::new(Arc::clone(&metrics));

        tracing::info!("Settings controller initialized");

        Self {
            view: ViewState::new(),
            config,
            state,
            session: collaborators.session,
            activation,
            lists,
            bridge,
            metrics,
            side_effects: Vec::new(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// Handle for background code to post requests through.
    pub fn bridge_handle(&self) -> UiBridgeHandle {
        self.bridge.clone_handle()
    }

    /// Repopulate tabs whenever the host changes live module state.
    pub fn follow_state_changes(&self) -> std::thread::JoinHandle<()> {
        self.bridge.forward_state_changes(&self.state)
    }

    /// Run every request posted since the last call. Returns how many ran.
    pub fn pump(&mut self) -> usize {
        let messages = self.bridge.drain();
        let count = messages.len();

        for message in messages {
            self.metrics.record_ui_message();
            tracing::trace!("Handling UI message: {:?}", message);

            let result = match message {
                UiMessage::PopulateGroup(group) => self.populate(group),
                UiMessage::PopulateAll => self.populate_all_tabs(),
                UiMessage::RefreshList(kind) => {
                    self.refresh(kind);
                    Ok(())
                }
                UiMessage::Notify { title, message } => {
                    self.view.show(Dialog::info(title, message));
                    Ok(())
                }
            };
            if let Err(e) = result {
                tracing::error!("Failed to handle UI message: {}", e);
            }
        }

        count
    }

    // ----- Settings tabs -----

    /// Populate every tab and list from a fresh read of the configuration.
    pub fn populate_all_tabs(&mut self) -> SyncResult<()> {
        let result = self.read_config().map(|doc| {
            for group in SettingsGroup::all() {
                with_form!(group, F => self.populate_form::<F>(&doc));
            }
            self.sweep_expired();
            self.lists.refresh_all(&mut self.view);
            self.view.status_line = status_line(&doc);
            tracing::debug!("All tabs populated");
        });
        self.report(result)
    }

    /// Populate one tab from a fresh read of the configuration.
    pub fn populate(&mut self, group: SettingsGroup) -> SyncResult<()> {
        let result = self.read_config().map(|doc| {
            with_form!(group, F => self.populate_form::<F>(&doc));
            if let Some(kind) = dependent_list(group) {
                self.lists.refresh(&mut self.view, kind);
            }
            self.view.status_line = status_line(&doc);
            tracing::debug!("Populated {} tab", group);
        });
        self.report(result)
    }

    /// Change the controls of one tab, as typing or clicking does.
    pub fn edit<F: SettingsForm>(&mut self, change: impl FnOnce(&mut F)) {
        change(F::form_mut(&mut self.view));
        self.view.set_phase(F::GROUP, GroupPhase::Editing);
    }

    /// Check one field when it loses focus, marking or unmarking it.
    pub fn focus_lost(&mut self, group: SettingsGroup, field: &'static str) -> ValidationResult {
        let result = with_form!(group, F => F::form(&self.view).validate_field(field));
        self.view
            .mark_field(group, field, result.message().map(str::to_string));
        result
    }

    /// Validate and commit one tab.
    ///
    /// Nothing is written and no live state changes unless every field and
    /// cross rule passes; all failing fields are reported together.
    pub fn save(&mut self, group: SettingsGroup) -> SyncResult<()> {
        let result = with_form!(group, F => self.save_form::<F>());
        if result.is_ok() {
            self.view.show(Dialog::info(
                "Settings Saved",
                format!("The {} settings were saved.", group),
            ));
        }
        self.report(result)
    }

    /// Put the default values into one tab and save them.
    pub fn restore_defaults(&mut self, group: SettingsGroup) -> SyncResult<()> {
        with_form!(group, F => {
            *F::form_mut(&mut self.view) = F::from_options(&<F as SettingsForm>::Options::default());
        });
        tracing::info!("Restoring default {} settings", group);
        self.save(group)
    }

    /// Reset the whole configuration to defaults and switch off every module.
    ///
    /// Refused while any module still has an action running, since every
    /// module is reactivated.
    pub fn restore_all_defaults(&mut self) -> SyncResult<()> {
        if let Some(module) = ModuleKind::ALL
            .into_iter()
            .find(|module| self.activation.is_pending(*module))
        {
            return self.report(Err(SyncError::ActivationPending(SettingsGroup::Module(
                module,
            ))));
        }

        let result = self.config.restore_defaults().map_err(SyncError::from);
        let result = result.map(|doc| {
            // Tunables go back to defaults now; flags flip through activation
            self.state.update(|live| {
                let mut next = ModuleRuntimeState::from_document(&doc);
                for module in ModuleKind::ALL {
                    next.set_active(module, live.is_active(module));
                }
                *live = next;
            });
            for module in ModuleKind::ALL {
                let outcome = self.activation.activate(module, module.is_active_in(&doc));
                self.track(outcome);
            }
            tracing::info!("Configuration restored to defaults");
        });
        self.report(result)?;
        self.populate_all_tabs()?;
        self.view.show(Dialog::info(
            "Defaults Restored",
            "All settings were restored to their defaults.",
        ));
        Ok(())
    }

    /// Switch to another tab.
    ///
    /// Unsaved edits on the tab being left are discarded without asking: the
    /// configuration file wins.
    pub fn switch_tab(&mut self, group: SettingsGroup) -> SyncResult<()> {
        let leaving = self.view.current_tab;
        if matches!(
            self.view.phase(leaving),
            GroupPhase::Editing | GroupPhase::Rejected
        ) {
            tracing::info!("Discarding unsaved edits on the {} tab", leaving);
            self.populate(leaving)?;
        }
        self.view.current_tab = group;
        self.populate(group)
    }

    // ----- Lists -----

    pub fn refresh(&mut self, kind: ListKind) {
        self.lists.refresh(&mut self.view, kind);
    }

    pub fn refresh_bans(&mut self) {
        self.refresh(ListKind::Bans);
    }

    pub fn refresh_quitters(&mut self) {
        self.refresh(ListKind::Quitters);
    }

    pub fn refresh_votes(&mut self) {
        self.refresh(ListKind::Votes);
    }

    pub fn refresh_users(&mut self) {
        self.refresh(ListKind::Users);
    }

    /// Ban `player` for `duration` `scale`, kicking them if they are on the server.
    pub fn add_ban(&mut self, player: &str, duration: &str, scale: TimeScale) -> SyncResult<()> {
        let result = self.try_add_ban(player, duration, scale);
        self.refresh_bans();
        self.report(result)
    }

    fn try_add_ban(&mut self, player: &str, duration: &str, scale: TimeScale) -> SyncResult<()> {
        let doc = self.read_config()?;
        let now = Utc::now();

        let mut fields = FieldCollector::new();
        let name = fields.check(lists::PLAYER_NAME, player, lists::player_name);
        let amount = fields.check(lists::BAN_DURATION, duration, lists::ban_duration);
        let expiration = amount.and_then(|amount| {
            fields.check(lists::BAN_DURATION, duration, |_| {
                lists::ban_expiration(now, amount, scale)
            })
        });
        fields.finish()?;
        let (name, expiration) = (name.unwrap_or_default(), expiration.unwrap_or(now));

        self.sweep_expired();
        let ban = BanInfo {
            player_name: name.clone(),
            banned_by: doc.core.owner_name.clone(),
            ban_added: now,
            ban_expiration: expiration,
            ban_type: BanType::AddedByAdmin,
        };
        if !self.lists.stores().bans.add(ban) {
            return Err(SyncError::DuplicateEntry {
                list: ListKind::Bans,
                key: name,
            });
        }
        tracing::info!("Banned {} until {}", name, expiration);

        if self.session.is_monitoring() {
            if let Err(e) = self.session.kick_ban(&name) {
                self.external_failure("kick-ban", &e);
            }
        }

        self.view.show(Dialog::info(
            "Player Banned",
            format!("{} is banned for {} {}.", name, duration.trim(), scale),
        ));
        Ok(())
    }

    pub fn remove_ban(&mut self, player: &str) -> SyncResult<()> {
        let result = match self.lists.stores().bans.remove(player) {
            Some(ban) => {
                tracing::info!("Unbanned {}", ban.player_name);
                if self.session.is_monitoring() {
                    if let Err(e) = self.session.unban(&ban.player_name) {
                        self.external_failure("unban", &e);
                    }
                }
                self.view.show(Dialog::info(
                    "Ban Removed",
                    format!("{} is no longer banned.", ban.player_name),
                ));
                Ok(())
            }
            None => Err(not_found(ListKind::Bans, player)),
        };
        self.refresh_bans();
        self.report(result)
    }

    pub fn clear_bans(&mut self) -> SyncResult<()> {
        let result = self.clear(ListKind::Bans, |stores| stores.bans.clear());
        self.report(result)
    }

    /// Drop every expired ban. Returns how many were dropped.
    pub fn sweep_expired_bans(&mut self) -> usize {
        let removed = self.sweep_expired();
        self.refresh_bans();
        removed
    }

    /// Lower `player`'s early quit count by `count`, dropping them at zero.
    pub fn forgive_quitter(&mut self, player: &str, count: u32) -> SyncResult<()> {
        let result = if count == 0 {
            Err(ValidationErrors::single(
                FORGIVE_COUNT,
                "Forgive at least one quit.",
            )
            .into())
        } else {
            match self.lists.stores().quitters.decrement_count(player, count) {
                Some(0) => {
                    tracing::info!("Forgave all early quits of {}", player);
                    self.view.show(Dialog::info(
                        "Quits Forgiven",
                        format!("{} was removed from the early quitter list.", player.trim()),
                    ));
                    Ok(())
                }
                Some(remaining) => {
                    tracing::info!("Forgave {} quits of {}, {} left", count, player, remaining);
                    self.view.show(Dialog::info(
                        "Quits Forgiven",
                        format!("{} now has {} early quits.", player.trim(), remaining),
                    ));
                    Ok(())
                }
                None => Err(not_found(ListKind::Quitters, player)),
            }
        };
        self.refresh_quitters();
        self.report(result)
    }

    pub fn remove_quitter(&mut self, player: &str) -> SyncResult<()> {
        let result = match self.lists.stores().quitters.remove(player) {
            Some(quitter) => {
                tracing::info!("Removed {} from the early quitter list", quitter.player_name);
                Ok(())
            }
            None => Err(not_found(ListKind::Quitters, player)),
        };
        self.refresh_quitters();
        self.report(result)
    }

    pub fn clear_quitters(&mut self) -> SyncResult<()> {
        let result = self.clear(ListKind::Quitters, |stores| stores.quitters.clear());
        self.report(result)
    }

    /// Have the auto-voter answer every vote matching `text` with `intended`.
    pub fn add_vote(&mut self, text: &str, intended: IntendedVoteResult) -> SyncResult<()> {
        let result = self.try_add_vote(text, intended);
        self.refresh_votes();
        self.report(result)
    }

    fn try_add_vote(&mut self, text: &str, intended: IntendedVoteResult) -> SyncResult<()> {
        let doc = self.read_config()?;
        let vote_text = lists::vote_text(text)
            .map_err(|message| ValidationErrors::single(lists::VOTE_TEXT, message))?;

        let vote = AutoVote {
            vote_text: vote_text.clone(),
            intended_result: intended,
            added_by: doc.core.owner_name.clone(),
        };
        if !self.lists.stores().votes.add(vote) {
            return Err(SyncError::DuplicateEntry {
                list: ListKind::Votes,
                key: vote_text,
            });
        }
        tracing::info!("Auto vote added: {} {}", intended, vote_text);
        Ok(())
    }

    pub fn remove_vote(&mut self, text: &str) -> SyncResult<()> {
        let key = lists::vote_text(text).unwrap_or_else(|_| text.to_string());
        let result = match self.lists.stores().votes.remove(&key) {
            Some(vote) => {
                tracing::info!("Auto vote removed: {}", vote.vote_text);
                Ok(())
            }
            None => Err(not_found(ListKind::Votes, text)),
        };
        self.refresh_votes();
        self.report(result)
    }

    pub fn clear_votes(&mut self) -> SyncResult<()> {
        let result = self.clear(ListKind::Votes, |stores| stores.votes.clear());
        self.report(result)
    }

    /// Register `name` with `level`. Owner access cannot be granted here.
    pub fn add_user(&mut self, name: &str, level: UserLevel) -> SyncResult<()> {
        let result = self.try_add_user(name, level);
        self.refresh_users();
        self.report(result)
    }

    fn try_add_user(&mut self, name: &str, level: UserLevel) -> SyncResult<()> {
        let doc = self.read_config()?;

        let mut fields = FieldCollector::new();
        let name = fields.check(lists::PLAYER_NAME, name, lists::player_name);
        if level == UserLevel::Owner {
            fields.reject(ACCESS_LEVEL, "Owner access cannot be granted.");
        }
        fields.finish()?;
        let name = name.unwrap_or_default();

        let user = User {
            name: name.clone(),
            access_level: level,
            added_by: doc.core.owner_name.clone(),
            date_added: Utc::now(),
        };
        if !self.lists.stores().users.add(user) {
            return Err(SyncError::DuplicateEntry {
                list: ListKind::Users,
                key: name,
            });
        }
        tracing::info!("User {} added with {} access", name, level);
        self.view.show(Dialog::info(
            "User Added",
            format!("{} now has {} access.", name, level),
        ));
        Ok(())
    }

    /// Unregister `name`, taking away operator status on the server if monitoring.
    pub fn remove_user(&mut self, name: &str) -> SyncResult<()> {
        let result = match self.lists.stores().users.remove(name) {
            Some(user) => {
                tracing::info!("User {} removed", user.name);
                if self.session.is_monitoring() {
                    if let Err(e) = self.session.deop(&user.name) {
                        self.external_failure("deop", &e);
                    }
                }
                Ok(())
            }
            None => Err(not_found(ListKind::Users, name)),
        };
        self.refresh_users();
        self.report(result)
    }

    // ----- Monitoring -----

    /// Start monitoring, then run the entry actions deferred while stopped.
    ///
    /// Refused before the session is touched while the core options still
    /// carry the placeholder owner or account name. Returns false if the
    /// session could not start.
    pub fn start_monitoring(&mut self) -> SyncResult<bool> {
        let result = self.try_start_monitoring();
        self.report(result)
    }

    fn try_start_monitoring(&mut self) -> SyncResult<bool> {
        let doc = self.read_config()?;
        let core = &doc.core;
        if !core.has_identity()
            || core_options::owner_name(&core.owner_name).is_err()
            || core_options::account_name(&core.account_name).is_err()
        {
            return Err(SyncError::OwnerNotConfigured);
        }

        if self.session.is_monitoring() {
            tracing::debug!("Already monitoring");
            return Ok(true);
        }

        if let Err(e) = self.session.begin_monitoring() {
            tracing::error!("Could not start monitoring: {}", e);
            self.metrics.record_side_effect_failed();
            self.view.show(Dialog::error(
                "Could Not Start Monitoring",
                format!("Monitoring could not be started: {}", e),
            ));
            return Ok(false);
        }

        tracing::info!("Monitoring started as {}", core.account_name);
        let deferred = self.activation.apply_deferred();
        tracing::debug!("Applying {} deferred module actions", deferred.len());
        self.side_effects.extend(deferred);
        Ok(true)
    }

    pub fn stop_monitoring(&mut self) {
        if !self.session.is_monitoring() {
            return;
        }
        match self.session.stop_monitoring() {
            Ok(()) => tracing::info!("Monitoring stopped"),
            Err(e) => {
                self.external_failure("stop monitoring", &e);
                self.view.show(Dialog::error(
                    "Could Not Stop Monitoring",
                    e.to_string(),
                ));
            }
        }
    }

    /// Wait until every activation task started so far has finished.
    pub async fn wait_for_side_effects(&mut self) {
        for handle in std::mem::take(&mut self.side_effects) {
            if let Err(e) = handle.await {
                tracing::error!("Activation task panicked: {}", e);
            }
        }
    }

    /// Whether `group` still has an activation action running.
    pub fn is_pending(&self, group: SettingsGroup) -> bool {
        group
            .module()
            .is_some_and(|module| self.activation.is_pending(module))
    }

    // ----- Internals -----

    fn read_config(&self) -> SyncResult<ConfigurationDocument> {
        Ok(self.config.read()?)
    }

    fn populate_form<F: SettingsForm>(&mut self, doc: &ConfigurationDocument) {
        *F::form_mut(&mut self.view) = F::from_options(F::section(doc));
        self.view.clear_marks(F::GROUP);
        self.view.set_phase(F::GROUP, GroupPhase::Idle);
    }

    fn save_form<F: SettingsForm>(&mut self) -> SyncResult<()> {
        let group = F::GROUP;
        if self.is_pending(group) {
            return Err(SyncError::ActivationPending(group));
        }

        self.view.set_phase(group, GroupPhase::Validating);
        let options = match F::form(&self.view).parse() {
            Ok(options) => options,
            Err(errors) => {
                tracing::warn!(
                    "Rejected {} settings: {} invalid field(s)",
                    group,
                    errors.len()
                );
                self.view.mark_invalid(group, &errors);
                self.view.set_phase(group, GroupPhase::Rejected);
                self.metrics.record_save_rejected();
                return Err(errors.into());
            }
        };

        let doc = match self.write_section::<F>(&options) {
            Ok(doc) => doc,
            Err(e) => {
                // Leaves the edits discardable by a tab switch
                self.view.set_phase(group, GroupPhase::Rejected);
                return Err(e);
            }
        };
        self.view.set_phase(group, GroupPhase::Committed);

        self.state.update(|live| F::push_runtime(&options, live));
        if let (Some(module), Some(active)) = (group.module(), F::desired_active(&options)) {
            let outcome = self.activation.activate(module, active);
            self.track(outcome);
        }

        // Show what was stored, e.g. trimmed text
        *F::form_mut(&mut self.view) = F::from_options(&options);
        self.view.clear_marks(group);
        if let Some(kind) = dependent_list(group) {
            self.lists.refresh(&mut self.view, kind);
        }
        self.view.status_line = status_line(&doc);
        self.view.set_phase(group, GroupPhase::Idle);
        self.metrics.record_save_committed();
        Ok(())
    }

    /// Store `options` as `F`'s section unless it is already there.
    fn write_section<F: SettingsForm>(
        &self,
        options: &F::Options,
    ) -> SyncResult<ConfigurationDocument> {
        let mut doc = self.read_config()?;
        if F::section(&doc) != options {
            *F::section_mut(&mut doc) = options.clone();
            self.config.write(&doc)?;
            tracing::info!("Saved {} settings", F::GROUP);
        } else {
            tracing::debug!("{} settings unchanged; nothing written", F::GROUP);
        }
        Ok(doc)
    }

    fn track(&mut self, outcome: ActivationOutcome) {
        self.side_effects.retain(|handle| !handle.is_finished());
        if let ActivationOutcome::Started(handle) = outcome {
            self.side_effects.push(handle);
        }
    }

    fn sweep_expired(&self) -> usize {
        let expired = self.lists.stores().bans.remove_expired(Utc::now());
        for ban in &expired {
            tracing::info!("Ban on {} expired", ban.player_name);
        }
        expired.len()
    }

    fn clear(
        &mut self,
        kind: ListKind,
        clear: impl FnOnce(&ListStores) -> usize,
    ) -> SyncResult<()> {
        let removed = clear(self.lists.stores());
        self.refresh(kind);
        if removed == 0 {
            return Err(SyncError::EmptyCollection(kind));
        }
        tracing::info!("Cleared {} entries from the {}", removed, kind);
        self.view.show(Dialog::info(
            "List Cleared",
            format!("Removed {} entries from the {}.", removed, kind),
        ));
        Ok(())
    }

    fn external_failure(&self, action: &str, error: &crate::services::ExternalActionError) {
        tracing::warn!("Best-effort {} failed: {}", action, error);
        self.metrics.record_side_effect_failed();
    }

    /// Log a failure and leave an error dialog for it.
    fn report<T>(&mut self, result: SyncResult<T>) -> SyncResult<T> {
        if let Err(e) = &result {
            if e.is_fatal() {
                tracing::error!("{}", e);
            } else {
                tracing::warn!("{}", e);
            }
            self.view
                .show(Dialog::error(e.dialog_title(), e.to_string()));
        }
        result
    }
}

fn not_found(list: ListKind, key: &str) -> SyncError {
    SyncError::NotFound {
        list,
        key: key.trim().to_string(),
    }
}
