use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Query parameter carrying the venue title.
pub const TITLE_PARAM: &str = "t";
/// Query parameter carrying the access credential.
pub const API_KEY_PARAM: &str = "apikey";

const SUCCESS_FLAG: &str = "True";
const FAILURE_FLAG: &str = "False";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupPayload {
    pub title: String,
    pub year: String,
    pub genre: String,
    pub director: String,
    pub awards: String,
}

/// Body returned by the remote metadata endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteLookupResponse {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RemoteLookupResponse {
    pub fn found(payload: &LookupPayload) -> Self {
        Self {
            response: SUCCESS_FLAG.to_string(),
            title: Some(payload.title.clone()),
            year: Some(payload.year.clone()),
            genre: Some(payload.genre.clone()),
            director: Some(payload.director.clone()),
            awards: Some(payload.awards.clone()),
            error: None,
        }
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self {
            response: FAILURE_FLAG.to_string(),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Interprets the success flag. A success body missing any payload field
    /// or an unknown flag value is treated as malformed.
    pub fn into_outcome(self) -> Result<LookupPayload, LookupError> {
        match self.response.as_str() {
            SUCCESS_FLAG => {
                let (Some(title), Some(year), Some(genre), Some(director), Some(awards)) =
                    (self.title, self.year, self.genre, self.director, self.awards)
                else {
                    return Err(LookupError::network(
                        "malformed response: success body is missing payload fields",
                    ));
                };
                Ok(LookupPayload {
                    title,
                    year,
                    genre,
                    director,
                    awards,
                })
            }
            FAILURE_FLAG => Err(LookupError::NotFound),
            other => Err(LookupError::network(format!(
                "malformed response: unexpected Response flag {other:?}"
            ))),
        }
    }
}

/// Outcome of the most recent lookup attempt. Replaced wholesale per attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum LookupResult {
    #[default]
    Empty,
    Found(LookupPayload),
    NotFound,
    Failed {
        cause: LookupError,
    },
}

impl LookupResult {
    pub fn from_outcome(outcome: Result<LookupPayload, LookupError>) -> Self {
        match outcome {
            Ok(payload) => Self::Found(payload),
            Err(LookupError::NotFound) => Self::NotFound,
            Err(cause) => Self::Failed { cause },
        }
    }

    pub fn payload(&self) -> Option<&LookupPayload> {
        match self {
            Self::Found(payload) => Some(payload),
            _ => None,
        }
    }
}
