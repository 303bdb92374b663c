//! Bootstrap runner
//!
//! Reports the search path (and optionally the process arguments) on the
//! given writer, then brings up the data store followed by authentication.
//! The first failure aborts the run; nothing after it executes.

use std::ffi::OsString;
use std::io::Write;

use tracing::{debug, info};

use super::{Initializer, SearchPath};
use crate::Result;

pub struct BootstrapRunner<D, A> {
    search_path: SearchPath,
    args: Option<Vec<OsString>>,
    data_store: D,
    auth: A,
}

impl<D, A> BootstrapRunner<D, A>
where
    D: Initializer,
    A: Initializer,
{
    pub fn new(search_path: SearchPath, data_store: D, auth: A) -> Self {
        Self {
            search_path,
            args: None,
            data_store,
            auth,
        }
    }

    /// Echo `args` (program name already stripped) before initializing.
    ///
    /// Arguments stay as `OsString` so bytes that are not UTF-8 are shown
    /// escaped instead of replaced.
    #[must_use]
    pub fn with_args(mut self, args: Vec<OsString>) -> Self {
        self.args = Some(args);
        self
    }

    /// Run the bootstrap once. Consumes the runner.
    pub async fn run<W: Write>(self, out: &mut W) -> Result<()> {
        self.report(out)?;

        info!(initializer = self.data_store.name(), "Initializing data store");
        self.data_store.initialize().await?;
        debug!(initializer = self.data_store.name(), "Data store ready");

        info!(initializer = self.auth.name(), "Initializing authentication");
        self.auth.initialize().await?;
        debug!(initializer = self.auth.name(), "Authentication ready");

        info!("Bootstrap completed");
        Ok(())
    }

    fn report<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "search path {}", self.search_path)?;
        if let Some(args) = &self.args {
            writeln!(out, "args {args:?}")?;
        }
        out.flush()?;
        Ok(())
    }
}
