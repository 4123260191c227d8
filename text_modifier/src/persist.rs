// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persisted state for [`ClickableTextAction`].
//!
//! The command is always persisted. Listeners are opaque to this crate, so they go through a
//! [`ListenerCodec`] supplied by the application. The listener list is a sequence of keyed
//! entries: each persistable listener is written under [`LISTENER_KEY`], and an entry without a key
//! terminates the list. Readers skip entries with keys they do not recognize.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::{ClickableTextAction, ListenerHandle};
use crate::error::{Error, Result};

/// Key under which action listeners are persisted.
pub const LISTENER_KEY: &str = "actionL";

/// Converts listeners to and from their persisted form.
pub trait ListenerCodec {
    /// Encodes `listener`, or returns `None` if it cannot be persisted (it is then skipped).
    fn encode(&self, listener: &ListenerHandle) -> Option<Value>;

    /// Rebuilds a listener from its persisted form.
    fn decode(&self, value: &Value) -> Result<ListenerHandle>;
}

/// One entry of a persisted listener list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListenerEntry {
    /// The entry's key; `None` terminates the list.
    pub key: Option<String>,
    /// The persisted listener, absent for the terminator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ListenerEntry {
    /// The entry ending a listener list.
    pub fn terminator() -> Self {
        Self {
            key: None,
            value: None,
        }
    }
}

/// The persisted form of a [`ClickableTextAction`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action's command string.
    pub command: String,
    /// Keyed listener entries, ending with [`ListenerEntry::terminator`].
    pub listeners: Vec<ListenerEntry>,
}

impl ActionRecord {
    /// Captures `action`, encoding its listeners with `codec`.
    pub fn capture(action: &ClickableTextAction, codec: &impl ListenerCodec) -> Self {
        let mut listeners: Vec<ListenerEntry> = action
            .listeners()
            .iter()
            .filter_map(|listener| codec.encode(listener))
            .map(|value| ListenerEntry {
                key: Some(LISTENER_KEY.into()),
                value: Some(value),
            })
            .collect();
        listeners.push(ListenerEntry::terminator());
        Self {
            command: action.command().into(),
            listeners,
        }
    }

    /// Rebuilds the action, decoding its listeners with `codec`.
    pub fn restore(&self, codec: &impl ListenerCodec) -> Result<ClickableTextAction> {
        let action = ClickableTextAction::new(Arc::<str>::from(self.command.as_str()));
        for entry in &self.listeners {
            match entry.key.as_deref() {
                None => return Ok(action),
                Some(LISTENER_KEY) => {
                    let value = entry.value.as_ref().unwrap_or(&Value::Null);
                    action.add_action_listener(codec.decode(value)?);
                }
                Some(other) => {
                    log::debug!(
                        target: "text_modifier::persist",
                        "skipping unrecognized listener key `{other}`"
                    );
                }
            }
        }
        Err(Error::UnterminatedListeners)
    }
}

/// Serializes `action` to JSON.
pub fn to_json(action: &ClickableTextAction, codec: &impl ListenerCodec) -> Result<String> {
    let record = ActionRecord::capture(action, codec);
    Ok(serde_json::to_string(&record)?)
}

/// Deserializes an action from JSON produced by [`to_json`].
pub fn from_json(json: &str, codec: &impl ListenerCodec) -> Result<ClickableTextAction> {
    let record: ActionRecord = serde_json::from_str(json)?;
    record.restore(codec)
}
