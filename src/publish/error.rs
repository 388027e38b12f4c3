use std::error::Error;
use std::fmt;

/// Failure classes reported by a server connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishErrorCategory {
    Internal,
    InvalidArgument,
    Transport,
    Server,
    NotAuthenticated,
    BadPayload,
    Init,
    Unknown,
}

impl PublishErrorCategory {
    pub const ALL: [PublishErrorCategory; 8] = [
        PublishErrorCategory::Internal,
        PublishErrorCategory::InvalidArgument,
        PublishErrorCategory::Transport,
        PublishErrorCategory::Server,
        PublishErrorCategory::NotAuthenticated,
        PublishErrorCategory::BadPayload,
        PublishErrorCategory::Init,
        PublishErrorCategory::Unknown,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            PublishErrorCategory::Internal => "INTERNAL_ERROR",
            PublishErrorCategory::InvalidArgument => "INVALID_ARGUMENT",
            PublishErrorCategory::Transport => "TRANSPORT_ERROR",
            PublishErrorCategory::Server => "SERVER_ERROR",
            PublishErrorCategory::NotAuthenticated => "NOT_AUTHENTICATED",
            PublishErrorCategory::BadPayload => "BAD_PAYLOAD",
            PublishErrorCategory::Init => "INIT_ERROR",
            PublishErrorCategory::Unknown => "UNKNOWN_ERROR",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PublishError {
    category: PublishErrorCategory,
    message: String,
}

impl PublishError {
    pub fn new(category: PublishErrorCategory, message: &str) -> PublishError {
        PublishError {
            category,
            message: message.to_string(),
        }
    }

    pub fn invalid_argument(message: &str) -> PublishError {
        Self::new(PublishErrorCategory::InvalidArgument, message)
    }

    pub fn transport(message: &str) -> PublishError {
        Self::new(PublishErrorCategory::Transport, message)
    }

    pub fn server(message: &str) -> PublishError {
        Self::new(PublishErrorCategory::Server, message)
    }

    pub fn not_authenticated(message: &str) -> PublishError {
        Self::new(PublishErrorCategory::NotAuthenticated, message)
    }

    pub fn init(message: &str) -> PublishError {
        Self::new(PublishErrorCategory::Init, message)
    }

    pub fn category(&self) -> PublishErrorCategory {
        self.category
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tag = self.category.tag();
        match self.category {
            PublishErrorCategory::Internal => {
                write!(f, "{} - Could not parse the response from the server.", tag)
            }
            PublishErrorCategory::BadPayload => write!(
                f,
                "{} - Unknown response from the server. \
                 Make sure this client is compatible with your server.",
                tag
            ),
            PublishErrorCategory::Unknown => write!(f, "{} - An unknown error occurred.", tag),
            _ => write!(f, "{} - {}", tag, self.message),
        }
    }
}

impl Error for PublishError {}
