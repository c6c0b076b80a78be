// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Conversation, Event, Transition, apply};

pub fn text(value: &str) -> Event {
    Event::Text(String::from(value))
}

pub fn document(file_name: &str, content: &str) -> Event {
    Event::Document {
        file_name: String::from(file_name),
        content: content.as_bytes().to_vec(),
    }
}

pub const fn action(action: Action) -> Event {
    Event::Action(action)
}

/// Feeds events one after another, returning the final transition.
pub fn run(events: Vec<Event>) -> Transition {
    let mut transition: Transition = Transition::to(Conversation::Idle, Vec::new());
    for event in events {
        transition = apply(&transition.state, event);
    }
    transition
}
