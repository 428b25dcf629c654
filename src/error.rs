use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShowerError {
    #[error("Run geometry too short: found {found} gpar values, need at least {required}")]
    GeometryTooShort { found: usize, required: usize },

    #[error("Run geometry value gpar[{index}] is not finite: {value}")]
    NonFiniteGeometry { index: usize, value: f64 },

    #[error("Hit building requested before init_run")]
    RunNotInitialized,

    #[error(
        "Yield model declared {npe} photons but returned {wavelengths} wavelengths and {momenta} momenta"
    )]
    YieldMismatch {
        npe: usize,
        wavelengths: usize,
        momenta: usize,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ShowerResult<T> = Result<T, ShowerError>;
