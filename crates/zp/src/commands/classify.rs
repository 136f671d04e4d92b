//! `zp classify` command implementation.

use clap::Args;
use zp_tabs::{classify_fence_language, classify_header, zone_pivot_for_language, zone_pivot_open};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the classify command.
#[derive(Args)]
pub(crate) struct ClassifyArgs {
    /// Tab header (e.g. "# [C#](#tab/csharp)") or, with --fence, a fence language.
    name: String,

    /// Treat the name as a code fence language (e.g. "javascript").
    #[arg(long)]
    fence: bool,

    /// Print the full `::: zone pivot` open marker instead of the pivot id.
    #[arg(long)]
    marker: bool,
}

impl ClassifyArgs {
    /// Execute the classify command.
    ///
    /// # Errors
    ///
    /// Returns an error if a tab header is not recognized.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        output.result(&self.resolve()?);
        Ok(())
    }

    fn resolve(&self) -> Result<String, CliError> {
        let line = match (self.fence, self.marker) {
            (true, true) => zone_pivot_for_language(&self.name),
            (true, false) => classify_fence_language(&self.name),
            (false, marker) => {
                let pivot_id = classify_header(&self.name)?.pivot_id();
                if marker {
                    zone_pivot_open(&pivot_id)
                } else {
                    pivot_id
                }
            }
        };
        Ok(line)
    }
}
