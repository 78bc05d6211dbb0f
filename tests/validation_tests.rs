//! Property tests for the field validators and settings forms
//!
//! These tests verify that:
//! - Every valid section survives a trip through its form unchanged
//! - The Elo cross rule accepts exactly the ordered bounds
//! - Validators never panic, whatever the admin types

use chrono::Utc;
use proptest::prelude::*;
use qladmin::models::{
    EarlyQuitOptions, EloLimitOptions, GameType, MotdOptions, PickupOptions, TimeScale,
};
use qladmin::ui::{EarlyQuitForm, EloLimitForm, MotdForm, PickupForm, SettingsForm};
use qladmin::validation::{core_options, elo_limit, irc, lists, motd};

fn time_scale() -> impl Strategy<Value = TimeScale> {
    prop::sample::select(TimeScale::ALL.to_vec())
}

fn game_type() -> impl Strategy<Value = GameType> {
    prop::sample::select(GameType::ALL.to_vec())
}

fn elo_options() -> impl Strategy<Value = EloLimitOptions> {
    (any::<bool>(), game_type(), 0u32..4000, prop::option::of(0u32..4000)).prop_map(
        |(is_active, game_type, minimum, extra)| EloLimitOptions {
            is_active,
            game_type,
            minimum_required_elo: minimum,
            maximum_required_elo: extra.map(|extra| (minimum + extra).max(1)),
        },
    )
}

fn early_quit_options() -> impl Strategy<Value = EarlyQuitOptions> {
    (any::<bool>(), 1u32..100, 0.01f64..10_000.0, time_scale()).prop_map(
        |(is_active, max_quits_allowed, ban_time, ban_time_scale)| EarlyQuitOptions {
            is_active,
            max_quits_allowed,
            ban_time,
            ban_time_scale,
        },
    )
}

fn pickup_options() -> impl Strategy<Value = PickupOptions> {
    (
        any::<bool>(),
        1u32..=8,
        1u32..20,
        1u32..20,
        0.01f64..1000.0,
        time_scale(),
        0.01f64..1000.0,
        time_scale(),
    )
        .prop_map(
            |(is_active, team_size, subs, no_shows, subs_ban, subs_scale, ns_ban, ns_scale)| {
                PickupOptions {
                    is_active,
                    team_size,
                    max_subs_per_player: subs,
                    max_no_shows_per_player: no_shows,
                    excessive_subs_ban_time: subs_ban,
                    excessive_subs_ban_time_scale: subs_scale,
                    excessive_no_shows_ban_time: ns_ban,
                    excessive_no_shows_ban_time_scale: ns_scale,
                }
            },
        )
}

proptest! {
    #[test]
    fn elo_section_survives_form(options in elo_options()) {
        let parsed = EloLimitForm::from_options(&options).parse();
        prop_assert_eq!(parsed, Ok(options));
    }

    #[test]
    fn early_quit_section_survives_form(options in early_quit_options()) {
        let parsed = EarlyQuitForm::from_options(&options).parse();
        prop_assert_eq!(parsed, Ok(options));
    }

    #[test]
    fn pickup_section_survives_form(options in pickup_options()) {
        let parsed = PickupForm::from_options(&options).parse();
        prop_assert_eq!(parsed, Ok(options));
    }

    #[test]
    fn elo_bounds_accept_only_ordered_pairs(minimum in 0u32..5000, maximum in 1u32..5000) {
        let form = EloLimitForm {
            minimum_required_elo: minimum.to_string(),
            maximum_required_elo: maximum.to_string(),
            ..EloLimitForm::default()
        };

        match form.parse() {
            Ok(options) => {
                prop_assert!(maximum >= minimum);
                prop_assert_eq!(options.maximum_required_elo, Some(maximum));
            }
            Err(errors) => {
                prop_assert!(maximum < minimum);
                prop_assert_eq!(errors.fields(), vec![elo_limit::MAXIMUM_REQUIRED_ELO]);
            }
        }
    }

    #[test]
    fn motd_message_without_quotes_is_accepted(message in "[a-zA-Z0-9 .,!?^]{0,150}") {
        let form = MotdForm {
            is_active: !message.trim().is_empty(),
            message: message.clone(),
            ..MotdForm::from_options(&MotdOptions::default())
        };

        let options = form.parse().unwrap();
        prop_assert_eq!(options.message, message.trim());
    }

    #[test]
    fn motd_message_with_quote_is_rejected(prefix in "[a-z ]{0,20}", suffix in "[a-z ]{0,20}") {
        let message = format!("{}\"{}", prefix, suffix);
        prop_assert!(motd::message(&message).is_err());
    }

    #[test]
    fn vote_text_normalization_is_stable(raw in "[A-Za-z0-9 \t]{1,60}") {
        if let Ok(once) = lists::vote_text(&raw) {
            prop_assert_eq!(lists::vote_text(&once), Ok(once.clone()));
            prop_assert!(!once.contains("  "));
            prop_assert_eq!(once.to_lowercase(), once);
        }
    }

    #[test]
    fn ban_expiration_is_in_the_future(amount in 0.01f64..100.0, scale in time_scale()) {
        let now = Utc::now();
        let expires = lists::ban_expiration(now, amount, scale).unwrap();
        prop_assert!(expires > now);
    }

    #[test]
    fn ban_longer_than_a_century_is_rejected(amount in 100.01f64..10_000.0) {
        let error = lists::ban_expiration(Utc::now(), amount, TimeScale::Years).unwrap_err();
        prop_assert!(error.contains("too long"));
    }

    #[test]
    fn validators_never_panic(raw in "\\PC{0,80}") {
        let _ = core_options::owner_name(&raw);
        let _ = core_options::required_time_between_commands(&raw);
        let _ = elo_limit::maximum_required_elo(&raw);
        let _ = irc::bot_nick(&raw);
        let _ = irc::channel(&raw);
        let _ = irc::server_port(&raw);
        let _ = motd::message(&raw);
        let _ = lists::player_name(&raw);
        let _ = lists::ban_duration(&raw);
    }
}

#[test]
fn test_every_default_section_parses() {
    let defaults = qladmin::ConfigurationDocument::default();

    assert_eq!(
        EloLimitForm::from_options(&defaults.elo_limit).parse(),
        Ok(defaults.elo_limit)
    );
    assert_eq!(
        MotdForm::from_options(&defaults.motd).parse(),
        Ok(defaults.motd)
    );
    assert_eq!(
        PickupForm::from_options(&defaults.pickup).parse(),
        Ok(defaults.pickup)
    );
}
