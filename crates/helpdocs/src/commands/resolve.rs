//! `helpdocs resolve` command implementation.

use std::path::Path;

use clap::Args;
use helpdocs_help::ContentCategory;

use super::{CommonArgs, PageArgs, help_pages};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    page: PageArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a module request names no module.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        self.page.check_module()?;
        let config = self.common.load_config(self.page.lang.clone())?;
        let request = self.page.request(&config);
        if request.category == ContentCategory::ModuleHelp && request.module_id.is_none() {
            return Err(CliError::Validation(
                "--module is required for module help".to_owned(),
            ));
        }

        let pages = help_pages(&config);
        let resolved = pages.resolver().resolve(&request);

        if !resolved.is_resolved() {
            output.warning("No page found at any fallback tier");
        }
        output.field("content", &display(resolved.content_path.as_deref()))?;
        output.field("navigation", &display(resolved.summary_path.as_deref()))?;
        if request.category == ContentCategory::ModuleHelp {
            output.field(
                "dev navigation",
                &display(resolved.dev_summary_path.as_deref()),
            )?;
        }

        Ok(())
    }
}

fn display(path: Option<&Path>) -> String {
    path.map_or_else(|| "-".to_owned(), |path| path.display().to_string())
}
