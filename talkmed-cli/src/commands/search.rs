use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use talkmed_client::{SearchOptions, SearchOrchestrator, SearchProvider, TalkMedError};
use tokio::io::{AsyncBufRead, BufReader};
use tracing::debug;

pub const USAGE_EXAMPLES: &str = "
Examples:
  talkmed-search \"heart disease\"                 # Search all content types
  talkmed-search \"diabetes\" --type course        # Courses only
  talkmed-search \"conference\" --type live        # Live sessions only
  talkmed-search \"medicine\" --page 2             # Second page of results
  talkmed-search \"surgery\" --interactive         # Explore the results interactively
  talkmed-search --check                         # Check that the API is reachable
";

#[derive(Args, Debug)]
pub struct Search {
    /// Search keyword
    #[arg(value_name = "KEYWORD")]
    pub keyword: Option<String>,

    /// Content type: all, course or live (anything else searches all)
    #[arg(short = 't', long = "type", default_value = "all")]
    pub content_type: String,

    /// Result page, starting at 1
    #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
    pub page: String,

    /// Explore the results with an interactive command loop
    #[arg(short, long)]
    pub interactive: bool,
}

impl Search {
    pub async fn execute<P: SearchProvider>(&self, provider: P) -> Result<ExitCode> {
        let input = BufReader::new(tokio::io::stdin());
        let mut out = std::io::stdout();
        let mut err = std::io::stderr();
        self.execute_with_io(provider, input, &mut out, &mut err)
            .await
    }

    /// Run the search against the given streams
    ///
    /// Search failures have already been rendered to `err` when they come back, so they
    /// only turn into a failing exit code. Stream errors are propagated.
    pub async fn execute_with_io<P, R, W, E>(
        &self,
        provider: P,
        input: R,
        out: &mut W,
        err: &mut E,
    ) -> Result<ExitCode>
    where
        P: SearchProvider,
        R: AsyncBufRead + Unpin,
        W: Write,
        E: Write,
    {
        let keyword = self.keyword.as_deref().unwrap_or_default();
        let orchestrator = SearchOrchestrator::new(provider);

        match orchestrator
            .perform_search(keyword, &self.options(), input, out, err)
            .await
        {
            Ok(()) => Ok(ExitCode::SUCCESS),
            Err(TalkMedError::Io(e)) => Err(e.into()),
            Err(e) => {
                debug!(error = %e, "Search command failed");
                Ok(ExitCode::FAILURE)
            }
        }
    }

    fn options(&self) -> SearchOptions {
        SearchOptions::new()
            .with_content_type(self.content_type.as_str())
            .with_page(&self.page)
            .interactive(self.interactive)
    }
}
