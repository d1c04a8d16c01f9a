//! Environment and platform directory operations.

use std::env;
use std::path::PathBuf;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn env_var_impl(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn home_dir_impl(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn document_dir_impl(&self) -> Option<PathBuf> {
        dirs::document_dir()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn data_local_dir_impl(&self) -> Option<PathBuf> {
        dirs::data_local_dir()
    }
}
