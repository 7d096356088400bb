use thiserror::Error;

#[derive(Error, Debug)]
pub enum DepGraphError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API request failed with status {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    #[error("Graphviz program '{0}' not found. Please install graphviz (in debian: graphviz)")]
    GraphvizNotFound(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type DepGraphResult<T> = Result<T, DepGraphError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> DepGraphResult<T>;
    fn with_context<F>(self, f: F) -> DepGraphResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> DepGraphResult<T> {
        self.map_err(|e| DepGraphError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> DepGraphResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| DepGraphError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> DepGraphResult<T> {
        self.ok_or_else(|| DepGraphError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> DepGraphResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| DepGraphError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! depgraph_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::DepGraphError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::DepGraphError::$error_type(format!($fmt, $($arg)*))
    };
}
