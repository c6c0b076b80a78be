// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    checklist_items (item_id) {
        item_id -> BigInt,
        checklist_id -> BigInt,
        item_type -> Text,
        item_order -> Integer,
        description -> Text,
        mark -> Integer,
    }
}

diesel::table! {
    checklists (checklist_id) {
        checklist_id -> BigInt,
        name -> Text,
        area -> Integer,
        created_at -> Text,
    }
}

diesel::table! {
    inspection_problems (problem_id) {
        problem_id -> BigInt,
        inspection_id -> BigInt,
        description -> Text,
        photo_ref -> Nullable<Text>,
    }
}

diesel::table! {
    inspections (inspection_id) {
        inspection_id -> BigInt,
        inspection_date -> Text,
        area -> Integer,
        cleaner_id -> Text,
        inspector_id -> Text,
    }
}

diesel::table! {
    schedule_active_inspections (entry_id) {
        entry_id -> BigInt,
        schedule_id -> BigInt,
        inspection_date -> Text,
        area -> Integer,
        cleaner_id -> Text,
        inspector_id -> Nullable<Text>,
        checklist_id -> Text,
        status -> Text,
        created_at -> Text,
        updated_at -> Nullable<Text>,
    }
}

diesel::table! {
    schedule_free_inspectors (free_id) {
        free_id -> BigInt,
        schedule_id -> BigInt,
        inspector_id -> Text,
    }
}

diesel::table! {
    schedules (schedule_id) {
        schedule_id -> BigInt,
        singleton_key -> Integer,
        created_at -> Text,
    }
}

diesel::table! {
    users (user_id) {
        user_id -> BigInt,
        surname -> Text,
        name -> Text,
        patronymic -> Text,
        role -> Text,
        username -> Text,
        team -> Text,
        area -> Nullable<Integer>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::joinable!(checklist_items -> checklists (checklist_id));
diesel::joinable!(inspection_problems -> inspections (inspection_id));
diesel::joinable!(schedule_active_inspections -> schedules (schedule_id));
diesel::joinable!(schedule_free_inspectors -> schedules (schedule_id));

diesel::allow_tables_to_appear_in_same_query!(
    checklist_items,
    checklists,
    inspection_problems,
    inspections,
    schedule_active_inspections,
    schedule_free_inspectors,
    schedules,
    users,
);
