use std::fmt;

// === ConfigError ===

/// Errors raised while loading configuration from the environment.
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    Missing(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "Missing configuration value: {}", var),
        }
    }
}

impl std::error::Error for ConfigError {}

// === AuthError ===

/// Errors related to identity provider operations.
///
/// The session gate swallows every variant into the signed-out state; these
/// reach the user only through the diagnostic channel.
#[derive(Debug)]
pub enum AuthError {
    /// A network error occurred while contacting the identity provider.
    Network(String),
    /// The identity provider returned an error response.
    Provider(String),
    /// The sign-in redirect address could not be assembled.
    InvalidRedirect(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Network(msg) => write!(f, "Auth network error: {}", msg),
            AuthError::Provider(msg) => write!(f, "Auth provider error: {}", msg),
            AuthError::InvalidRedirect(msg) => write!(f, "Invalid sign-in redirect: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

// === StoreError ===

/// Errors related to bookmark row operations against the backend store.
#[derive(Debug)]
pub enum StoreError {
    /// A network error occurred while contacting the store.
    Network(String),
    /// The backend rejected the operation; carries the backend's own message,
    /// which is surfaced to the user verbatim.
    Backend(String),
    /// The backend response could not be decoded.
    Decode(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Network(msg) => write!(f, "Store network error: {}", msg),
            StoreError::Backend(msg) => write!(f, "{}", msg),
            StoreError::Decode(msg) => write!(f, "Store decode error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// === FeedError ===

/// Errors related to the live change feed.
///
/// A feed that ends after connecting is not an error: the subscription's
/// event stream simply finishes.
#[derive(Debug)]
pub enum FeedError {
    /// The feed connection could not be established.
    Connect(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Connect(msg) => write!(f, "Feed connect error: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {}

// === WriterError ===

/// Errors raised by the bookmark writer's submit path.
#[derive(Debug)]
pub enum WriterError {
    /// The title is empty after trimming. No backend call was made.
    EmptyTitle,
    /// The URL is empty after trimming. No backend call was made.
    EmptyUrl,
    /// The backend rejected the create request.
    Store(StoreError),
}

impl fmt::Display for WriterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriterError::EmptyTitle => write!(f, "Title is required"),
            WriterError::EmptyUrl => write!(f, "URL is required"),
            WriterError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for WriterError {}

impl From<StoreError> for WriterError {
    fn from(err: StoreError) -> Self {
        WriterError::Store(err)
    }
}
