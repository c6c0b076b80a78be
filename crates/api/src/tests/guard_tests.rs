// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Access guard and role enforcement tests.

use cleaning_bot::{Action, Conversation};
use cleaning_bot_domain::Role;

use crate::{
    ApiError, AuthError, AuthenticationService, AuthorizationService, Keyboard, UpdateOutcome,
    handle_update,
};

use super::helpers::{
    ADMIN_ID, CHECKER_ID, CLEANER_ID, UNKNOWN_ID, callback, get_user, setup_test_persistence,
    test_now, text,
};

#[test]
fn test_unregistered_sender_is_rejected_with_their_id() {
    let mut persistence = setup_test_persistence();

    let outcome: UpdateOutcome = handle_update(
        &mut persistence,
        &Conversation::Idle,
        text(UNKNOWN_ID, "/start"),
        test_now(),
    );

    assert_eq!(outcome.state, Conversation::Idle);
    assert_eq!(outcome.messages.len(), 1);
    assert!(outcome.messages[0].text.contains("not registered"));
    assert!(outcome.messages[0].text.contains("999"));
    assert!(outcome.messages[0].keyboard.is_none());
}

#[test]
fn test_unregistered_sender_leaves_state_untouched() {
    let mut persistence = setup_test_persistence();
    let state = Conversation::AwaitingScheduleFile;

    let outcome = handle_update(
        &mut persistence,
        &state,
        callback(UNKNOWN_ID, "cancel"),
        test_now(),
    );

    assert_eq!(outcome.state, state);
}

#[test]
fn test_resolve_sender_returns_stored_user() {
    let mut persistence = setup_test_persistence();

    let user = AuthenticationService::resolve_sender(&mut persistence, CHECKER_ID)
        .expect("Registered sender should resolve");

    assert_eq!(user.id, CHECKER_ID);
    assert_eq!(user.role, Role::Checker);
}

#[test]
fn test_resolve_sender_unknown_id() {
    let mut persistence = setup_test_persistence();

    let result = AuthenticationService::resolve_sender(&mut persistence, UNKNOWN_ID);

    assert_eq!(
        result,
        Err(ApiError::NotRegistered {
            user_id: UNKNOWN_ID
        })
    );
}

#[test]
fn test_start_shows_admin_panel_button_to_admin() {
    let mut persistence = setup_test_persistence();

    let outcome = handle_update(
        &mut persistence,
        &Conversation::Idle,
        text(ADMIN_ID, " /start "),
        test_now(),
    );

    assert_eq!(outcome.messages.len(), 1);
    let Some(Keyboard::Inline { rows }) = &outcome.messages[0].keyboard else {
        panic!("Expected an inline keyboard");
    };
    assert_eq!(rows[0][0].callback_data, "admin_panel");
}

#[test]
fn test_start_shows_role_specific_menu() {
    let mut persistence = setup_test_persistence();

    for (id, data) in [(CHECKER_ID, "view_schedule"), (CLEANER_ID, "view_stats")] {
        let outcome = handle_update(
            &mut persistence,
            &Conversation::Idle,
            text(id, "/start"),
            test_now(),
        );
        let Some(Keyboard::Inline { rows }) = &outcome.messages[0].keyboard else {
            panic!("Expected an inline keyboard");
        };
        assert_eq!(rows[0][0].callback_data, data);
    }
}

#[test]
fn test_start_resets_a_flow_in_progress() {
    let mut persistence = setup_test_persistence();

    let outcome = handle_update(
        &mut persistence,
        &Conversation::AwaitingNewUserId,
        text(ADMIN_ID, "/start"),
        test_now(),
    );

    assert_eq!(outcome.state, Conversation::Idle);
}

#[test]
fn test_admin_action_rejected_for_checker() {
    let mut persistence = setup_test_persistence();

    let outcome = handle_update(
        &mut persistence,
        &Conversation::Idle,
        callback(CHECKER_ID, "add_person"),
        test_now(),
    );

    assert_eq!(outcome.state, Conversation::Idle);
    assert_eq!(outcome.messages.len(), 1);
    assert!(outcome.messages[0].text.contains("permission"));
}

#[test]
fn test_admin_action_rejected_for_cleaner() {
    let mut persistence = setup_test_persistence();

    let outcome = handle_update(
        &mut persistence,
        &Conversation::Idle,
        callback(CLEANER_ID, "add_schedule"),
        test_now(),
    );

    assert_eq!(outcome.state, Conversation::Idle);
    assert!(outcome.messages[0].text.contains("permission"));
}

#[test]
fn test_authorize_action_allows_open_actions() {
    let mut persistence = setup_test_persistence();
    let cleaner = get_user(&mut persistence, CLEANER_ID);

    assert!(AuthorizationService::authorize_action(&cleaner, &Action::ViewStats).is_ok());
    assert!(AuthorizationService::authorize_action(&cleaner, &Action::Cancel).is_ok());
    assert!(matches!(
        AuthorizationService::authorize_action(&cleaner, &Action::AdminPanel),
        Err(AuthError::Unauthorized { .. })
    ));
}

#[test]
fn test_unknown_callback_data_is_rejected() {
    let mut persistence = setup_test_persistence();

    let outcome = handle_update(
        &mut persistence,
        &Conversation::AwaitingDeleteId,
        callback(ADMIN_ID, "launch_rockets"),
        test_now(),
    );

    assert_eq!(outcome.state, Conversation::AwaitingDeleteId);
    assert_eq!(outcome.messages.len(), 1);
    assert!(outcome.messages[0].text.starts_with('❌'));
}

#[test]
fn test_text_while_idle_asks_for_menu() {
    let mut persistence = setup_test_persistence();

    let outcome = handle_update(
        &mut persistence,
        &Conversation::Idle,
        text(CLEANER_ID, "hello"),
        test_now(),
    );

    assert_eq!(outcome.state, Conversation::Idle);
    assert_eq!(outcome.messages.len(), 1);
    assert!(outcome.messages[0].text.contains("menu"));
}
