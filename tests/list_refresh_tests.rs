//! Integration tests for the live lists (bans, early quitters, auto votes, users)
//!
//! These tests verify that:
//! - Refreshing rebinds the list control without stale selections
//! - Admin list actions validate their input and reject duplicates
//! - Live server commands are only sent while monitoring

mod common;

use chrono::{Duration, Utc};
use common::{Harness, RecordingSession, configured_document};
use qladmin::SyncError;
use qladmin::models::{
    BanInfo, BanType, EarlyQuitter, IntendedVoteResult, ListKind, ModuleKind, SettingsGroup,
    TimeScale, UserLevel,
};
use qladmin::services::EntryStore;
use qladmin::ui::ListControl;
use qladmin::ui::controller::{ACCESS_LEVEL, FORGIVE_COUNT};
use qladmin::validation::lists;
use std::sync::atomic::Ordering;
use tokio_test::{assert_err, assert_ok};

fn ban(name: &str, expires_in: Duration) -> BanInfo {
    let now = Utc::now();
    BanInfo {
        player_name: name.to_string(),
        banned_by: "klesk".to_string(),
        ban_added: now,
        ban_expiration: now + expires_in,
        ban_type: BanType::AddedByEarlyQuit,
    }
}

fn quitter(name: &str, quit_count: u32) -> EarlyQuitter {
    EarlyQuitter {
        player_name: name.to_string(),
        quit_count,
    }
}

#[tokio::test]
async fn test_empty_refresh_leaves_nothing_selected() {
    let mut h = Harness::new(&configured_document());

    h.controller.refresh_bans();
    h.controller.refresh_users();

    let view = h.controller.view();
    assert_eq!(view.bans.selected_index(), -1);
    assert!(!view.bans.is_bound());
    assert!(view.users.items().is_empty());
    assert_eq!(h.metrics.list_refreshes.load(Ordering::Relaxed), 2);
}

#[tokio::test]
async fn test_refresh_after_removal_drops_stale_selection() {
    let mut h = Harness::new(&configured_document());
    h.stores.quitters.add(quitter("doom", 2));
    h.stores.quitters.add(quitter("orbb", 4));
    h.controller.refresh_quitters();
    assert_ok!(h.controller.view_mut().quitters.select(1));

    assert_ok!(h.controller.remove_quitter("orbb"));

    let quitters = &h.controller.view().quitters;
    assert_eq!(quitters.len(), 1);
    assert_eq!(quitters.selected_index(), 0);
    assert_eq!(quitters.items(), vec!["doom (2 quits)"]);
}

#[tokio::test]
async fn test_add_ban_and_reject_duplicate() {
    let mut h = Harness::new(&configured_document());

    assert_ok!(h.controller.add_ban("sarge", "2", TimeScale::Hours));
    let error = assert_err!(h.controller.add_ban("SARGE", "5", TimeScale::Days));

    assert!(matches!(
        error,
        SyncError::DuplicateEntry { list: ListKind::Bans, ref key } if key == "SARGE"
    ));
    let bans = h.stores.bans.get_all();
    assert_eq!(bans.len(), 1);
    assert_eq!(bans[0].player_name, "sarge");
    assert_eq!(bans[0].banned_by, "klesk");
    assert_eq!((bans[0].ban_expiration - bans[0].ban_added).num_hours(), 2);

    let view = h.controller.view();
    assert_eq!(view.bans.len(), 1);
    assert_eq!(view.bans.selected_index(), 0);
    assert_eq!(view.dialog.as_ref().map(|d| d.title.as_str()), Some("Already Exists"));
    // Not monitoring: nothing was sent to the server
    assert!(h.session.commands().is_empty());
}

#[tokio::test]
async fn test_add_ban_reports_every_bad_input() {
    let mut h = Harness::new(&configured_document());

    let error = assert_err!(h.controller.add_ban("  ", "-3", TimeScale::Minutes));

    match error {
        SyncError::Validation(errors) => {
            assert!(errors.contains(lists::PLAYER_NAME));
            assert!(errors.contains(lists::BAN_DURATION));
        }
        other => panic!("expected a validation error, got {:?}", other),
    }
    assert!(h.stores.bans.is_empty());
}

#[tokio::test]
async fn test_ban_commands_sent_while_monitoring() {
    let mut h = Harness::with_session(&configured_document(), RecordingSession::monitoring());

    assert_ok!(h.controller.add_ban("sarge", "1", TimeScale::Weeks));
    assert_ok!(h.controller.remove_ban("sarge"));

    assert_eq!(h.session.commands(), vec!["kickban sarge", "unban sarge"]);
    assert!(h.controller.view().bans.is_empty());
    assert_eq!(h.controller.view().bans.selected_index(), -1);
}

#[tokio::test]
async fn test_remove_unknown_ban() {
    let mut h = Harness::new(&configured_document());

    let error = assert_err!(h.controller.remove_ban(" nobody "));

    assert!(matches!(
        error,
        SyncError::NotFound { list: ListKind::Bans, ref key } if key == "nobody"
    ));
}

#[tokio::test]
async fn test_expired_bans_are_swept_on_populate() {
    let mut h = Harness::new(&configured_document());
    h.stores.bans.add(ban("gone", -Duration::minutes(1)));
    h.stores.bans.add(ban("stays", Duration::days(1)));

    assert_ok!(h.controller.populate_all_tabs());

    let names: Vec<String> = h
        .controller
        .view()
        .bans
        .entries()
        .iter()
        .map(|b| b.player_name.clone())
        .collect();
    assert_eq!(names, vec!["stays"]);
    assert_eq!(h.controller.sweep_expired_bans(), 0);
}

#[tokio::test]
async fn test_clearing_lists() {
    let mut h = Harness::new(&configured_document());

    let error = assert_err!(h.controller.clear_bans());
    assert!(matches!(error, SyncError::EmptyCollection(ListKind::Bans)));

    h.stores.bans.add(ban("a", Duration::days(1)));
    h.stores.bans.add(ban("b", Duration::days(1)));
    h.controller.refresh_bans();
    assert_eq!(h.controller.view().bans.selected_index(), 0);

    assert_ok!(h.controller.clear_bans());
    assert!(h.stores.bans.is_empty());
    assert_eq!(h.controller.view().bans.selected_index(), -1);
    assert!(!h.controller.view().bans.is_bound());
}

#[tokio::test]
async fn test_forgive_quitter() {
    let mut h = Harness::new(&configured_document());
    h.stores.quitters.add(quitter("doom", 3));

    assert_ok!(h.controller.forgive_quitter("doom", 1));
    assert_eq!(h.controller.view().quitters.items(), vec!["doom (2 quits)"]);

    let error = assert_err!(h.controller.forgive_quitter("doom", 0));
    assert!(matches!(error, SyncError::Validation(ref errors) if errors.contains(FORGIVE_COUNT)));

    assert_ok!(h.controller.forgive_quitter("doom", 5));
    assert!(h.stores.quitters.is_empty());
    assert_eq!(h.controller.view().quitters.selected_index(), -1);

    let error = assert_err!(h.controller.forgive_quitter("doom", 1));
    assert!(matches!(error, SyncError::NotFound { list: ListKind::Quitters, .. }));
}

#[tokio::test]
async fn test_saving_early_quit_tab_refreshes_quitters() {
    let mut h = Harness::new(&configured_document());
    assert_ok!(h.controller.populate_all_tabs());
    assert!(h.controller.view().quitters.is_empty());

    h.stores.quitters.add(quitter("visor", 1));
    assert_ok!(h.controller.save(SettingsGroup::Module(ModuleKind::EarlyQuit)));

    assert_eq!(h.controller.view().quitters.items(), vec!["visor (1 quit)"]);
}

#[tokio::test]
async fn test_votes_are_normalized_and_unique() {
    let mut h = Harness::new(&configured_document());

    assert_ok!(h.controller.add_vote("  Map   Campgrounds ", IntendedVoteResult::No));
    let error = assert_err!(h.controller.add_vote("map campgrounds", IntendedVoteResult::Yes));
    assert!(matches!(error, SyncError::DuplicateEntry { list: ListKind::Votes, .. }));

    assert_eq!(h.controller.view().votes.items(), vec!["NO: map campgrounds"]);
    assert_eq!(h.stores.votes.get_all()[0].added_by, "klesk");

    assert_ok!(h.controller.remove_vote("MAP CAMPGROUNDS"));
    assert!(h.controller.view().votes.is_empty());
    assert!(matches!(
        h.controller.clear_votes(),
        Err(SyncError::EmptyCollection(ListKind::Votes))
    ));
}

#[tokio::test]
async fn test_owner_access_cannot_be_granted() {
    let mut h = Harness::new(&configured_document());

    let error = assert_err!(h.controller.add_user("sarge", UserLevel::Owner));

    assert!(matches!(error, SyncError::Validation(ref errors) if errors.contains(ACCESS_LEVEL)));
    assert!(h.stores.users.is_empty());
}

#[tokio::test]
async fn test_removing_user_deops_while_monitoring() {
    let mut h = Harness::with_session(&configured_document(), RecordingSession::monitoring());

    assert_ok!(h.controller.add_user("sarge", UserLevel::Admin));
    assert_eq!(h.controller.view().users.items(), vec!["sarge (ADMIN)"]);

    assert_ok!(h.controller.remove_user("Sarge"));
    assert_eq!(h.session.commands(), vec!["deop sarge"]);
    assert!(h.controller.view().users.is_empty());
}

#[test]
fn test_list_control_rejects_selection_past_the_end() {
    let mut control: ListControl<EarlyQuitter> = ListControl::new();
    control
        .attach(vec![quitter("a", 1), quitter("b", 1), quitter("c", 1)])
        .unwrap();
    control.select(2).unwrap();

    let error = control.attach(vec![quitter("a", 1)]).unwrap_err();
    assert_eq!(error.index, 2);
    assert_eq!(error.len, 1);

    control.detach();
    assert!(control.attach(vec![quitter("a", 1)]).is_ok());
    assert_eq!(control.selected().map(|q| q.player_name.as_str()), Some("a"));
}
