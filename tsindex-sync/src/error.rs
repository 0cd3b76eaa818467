use tsindex_container::ContainerError;
use tsindex_db::OperationError;

/// Errors from fetching a remote feed or payload.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Nothing to fetch at {0}")]
    NotFound(String),
}

/// Errors that abort a synchronization, download or import.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Database error: {0}")]
    Db(#[from] OperationError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Container error: {0}")]
    Container(#[from] ContainerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed feed at {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Resource {0} has no resource container format")]
    MissingContainerFormat(String),

    #[error("Unknown project '{project}'; only projects already in the index can be imported")]
    UnknownProject { project: String },
}

impl SyncError {
    pub fn parse(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            url: url.into(),
            source,
        }
    }
}
