//! Shared constants.

/// Config file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "photogrid.toml";

/// Directory under the platform config dir holding the user config.
pub const APP_DIR: &str = "photogrid";

/// User-level config file name inside [`APP_DIR`].
pub const USER_CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding `service.base_url`.
pub const ENV_BASE_URL: &str = "PHOTOGRID_BASE_URL";

/// Default width of the sidebar chart bars, in columns.
pub const DEFAULT_CHART_WIDTH: usize = 30;

/// Default number of cells per grid row.
pub const DEFAULT_GRID_COLUMNS: usize = 3;

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "photo";

/// Maximum characters of an error response body kept in a `TransportError`.
pub const ERROR_BODY_EXCERPT: usize = 200;

/// Label for a photo whose `created_at` could not be read.
pub const INVALID_DATE_LABEL: &str = "Invalid Date";
