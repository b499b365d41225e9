//! `helpdocs modules` command implementation.

use clap::Args;

use super::{CommonArgs, help_pages};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the modules command.
#[derive(Args)]
pub(crate) struct ModulesArgs {
    /// List only active modules.
    #[arg(long)]
    active: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ModulesArgs {
    /// Execute the modules command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or output cannot be written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.common.load_config(None)?;
        let pages = help_pages(&config);
        let registry = pages.registry();

        let modules = if self.active {
            registry.active()
        } else {
            registry.installed()
        };

        if modules.is_empty() {
            output.warning(&format!(
                "No modules found in {}",
                config.docs_resolved.root_dir.join("Modules").display()
            ));
        }
        for module in &modules {
            output.print(module)?;
        }

        Ok(())
    }
}
