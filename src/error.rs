use std::sync::Arc;

use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::server::dataloader::LoadError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The client sent input that fails validation; nothing was written.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("batched lookup failed: {0}")]
    Load(#[from] LoadError<Arc<StoreError>>),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl ErrorExtensions for ServiceError {
    fn extend(&self) -> async_graphql::Error {
        match self {
            Self::Validation(message) => async_graphql::Error::new(message.clone())
                .extend_with(|_, ext| ext.set("code", "BAD_USER_INPUT")),
            _ => {
                tracing::error!(error = %self, "request failed");
                async_graphql::Error::new("internal server error")
                    .extend_with(|_, ext| ext.set("code", "INTERNAL_SERVER_ERROR"))
            }
        }
    }
}
