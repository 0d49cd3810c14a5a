use crate::config::ConfigError;
use crate::preprocess::LayoutDecodeError;
use crate::store::StoreError;
use crate::upload::UploadError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    LayoutDecode(#[from] LayoutDecodeError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Report metadata JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
