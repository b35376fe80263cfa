use thiserror::Error;

pub type Result<T> = std::result::Result<T, MapError>;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("Missing column '{0}'")]
    MissingColumn(String),

    #[error("Column '{column}' row {row}: '{value}' is not numeric")]
    NonNumericValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Invalid data shape at row {row}: {message}")]
    DataShape { row: usize, message: String },

    #[error("Unknown coordinate reference system: {0}")]
    UnknownCrs(String),

    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),

    #[error("Nothing to plot: {0}")]
    EmptyFrame(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Viewer failed: {0}")]
    Viewer(String),
}
