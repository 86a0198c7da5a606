use thiserror::Error;

use crate::model::{CatalogError, StudyItemError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Item(#[from] StudyItemError),
}
