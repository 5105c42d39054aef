/// Errors raised while fetching and decoding the report feeds.
#[derive(Debug, Clone)]
pub enum AppError {
    NetworkError(String),
    TimeoutError(String),
    ParseError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NetworkError(msg) => write!(f, "Network Error: {}", msg),
            AppError::TimeoutError(msg) => write!(f, "Timeout Error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Simple convenience type alias
pub type FetchResult<T> = Result<T, AppError>;
