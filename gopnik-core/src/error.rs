use thiserror::Error;

/// Everything that can go wrong between raw user input and a reply.
///
/// `CityNotFound` is an expected, user-correctable outcome. The other two
/// variants carry a diagnostic string for logs; to the user they read the
/// same ("try again"), per `user_reply`.
#[derive(Debug, Error)]
pub enum ResolutionFailure {
    #[error("city not found")]
    CityNotFound,

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl ResolutionFailure {
    pub(crate) fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// The single user-facing sentence for this failure. Exactly one reply
    /// per failure, never silence.
    pub fn user_reply(&self) -> &'static str {
        match self {
            Self::CityNotFound => "Couldn't find that city, try another one, mate.",
            Self::UpstreamUnavailable(_) | Self::MalformedResponse(_) => {
                "The weather service is not answering right now, try again in a bit."
            }
        }
    }
}
