use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    PermissionDenied,
    PositionUnavailable,
    InvalidQuery,
    LookupNotFound,
    LookupNetwork,
}

impl ErrorCode {
    /// Notification title shown to the end user.
    pub fn user_title(self) -> &'static str {
        match self {
            Self::PermissionDenied => "Permissão de localização não concedida",
            Self::PositionUnavailable => "Localização indisponível",
            Self::InvalidQuery => "Aviso",
            Self::LookupNotFound | Self::LookupNetwork => "Erro",
        }
    }

    /// Notification body shown to the end user.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Por favor, conceda permissão de localização para obter a localização."
            }
            Self::PositionUnavailable => "Não foi possível obter a sua localização atual.",
            Self::InvalidQuery => "Por favor, insira um nome de academia válido.",
            Self::LookupNotFound => {
                "Academia não encontrada. Verifique o título e tente novamente."
            }
            Self::LookupNetwork => {
                "Houve um problema na busca da academia. Tente novamente mais tarde."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("foreground location permission denied")]
    PermissionDenied,
    #[error("position unavailable: {cause}")]
    Unavailable { cause: String },
}

impl PositionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::PermissionDenied => ErrorCode::PermissionDenied,
            Self::Unavailable { .. } => ErrorCode::PositionUnavailable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupError {
    #[error("query is empty")]
    Invalid,
    #[error("no venue matches the query")]
    NotFound,
    #[error("lookup transport failure: {cause}")]
    Network { cause: String },
}

impl LookupError {
    pub fn network(cause: impl Into<String>) -> Self {
        Self::Network {
            cause: cause.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Invalid => ErrorCode::InvalidQuery,
            Self::NotFound => ErrorCode::LookupNotFound,
            Self::Network { .. } => ErrorCode::LookupNetwork,
        }
    }
}
