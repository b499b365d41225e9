//! `helpdocs show` command implementation.

use clap::Args;
use helpdocs_help::HelpView;

use super::{CommonArgs, PageArgs, help_pages};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Print the assembled view as JSON.
    #[arg(long)]
    json: bool,

    /// Also print the rendered navigation.
    #[arg(long, conflicts_with = "json")]
    navigation: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// A module request for a missing or inactive module prints the module
    /// list instead of a page.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or output cannot be written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        self.page.check_module()?;
        let config = self.common.load_config(self.page.lang.clone())?;
        let request = self.page.request(&config);
        let view = help_pages(&config).show(&request);

        if self.json {
            output.print(&serde_json::to_string_pretty(&view)?)?;
            return Ok(());
        }

        match view {
            HelpView::Page(page) => {
                if page.content.is_empty() {
                    output.warning("No page found at any fallback tier");
                }
                if let Some(title) = &page.content.title {
                    output.heading(title)?;
                }
                output.print(page.content.html.trim_end())?;

                if self.navigation {
                    output.heading("Navigation")?;
                    output.print(page.navigation.html.trim_end())?;
                    if let Some(dev_navigation) = &page.dev_navigation {
                        output.heading("Developer navigation")?;
                        output.print(dev_navigation.html.trim_end())?;
                    }
                }
            }
            HelpView::ModuleList { modules } => {
                output.heading("Modules")?;
                for module in &modules {
                    output.print(module)?;
                }
            }
        }

        Ok(())
    }
}
