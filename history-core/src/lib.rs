use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

pub type UserId = String;

pub type HistoryRecord = Value;

pub const NULL_USER: &str = "null";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("invalid history json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} cannot be used as a user key")]
    UnhashableKey(&'static str),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct History {
    users: BTreeMap<UserId, Vec<HistoryRecord>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, HistoryError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, HistoryError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn append(&mut self, user: impl Into<UserId>, record: HistoryRecord) {
        self.users.entry(user.into()).or_default().push(record);
    }

    pub fn records(&self, user: &str) -> Option<&[HistoryRecord]> {
        self.users.get(user).map(Vec::as_slice)
    }

    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Maps a submitted `userHash` onto the string key it is stored under.
///
/// Scalars are stringified the way a JSON object key would be written out;
/// arrays and objects have no key form and are refused.
pub fn user_key(value: &Value) -> Result<UserId, HistoryError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(NULL_USER.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(_) => Err(HistoryError::UnhashableKey("array")),
        Value::Object(_) => Err(HistoryError::UnhashableKey("object")),
    }
}
