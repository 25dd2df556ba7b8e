use std::{io::Write, process::ExitCode};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use weather_lookup_core::{
    Config, HttpRecordSource, LookupForm, Outcome, RecordSource,
    config::DEFAULT_BASE_URL,
    render::{INPUT_LABEL, INPUT_PLACEHOLDER, TITLE, render_form, render_outcome},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-lookup", version, about = "Look up stored weather records")]
pub struct Cli {
    /// Base URL of the weather record service. Overrides the environment and config file.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up a single weather record and print it.
    Lookup {
        /// Weather request ID.
        id: String,
    },

    /// Prompt for IDs repeatedly until cancelled (Esc or Ctrl-C).
    Interactive,

    /// Set the base URL of the weather record service.
    Configure,

    /// Print the path of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Lookup { id } => {
                let source = source_from(self.base_url.as_deref())?;
                let failed = lookup_once(&source, id, &mut std::io::stdout()).await?;
                Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
            }
            Command::Interactive => {
                let source = source_from(self.base_url.as_deref())?;
                interactive(&source).await?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn source_from(flag: Option<&str>) -> anyhow::Result<HttpRecordSource> {
    let config = Config::load()?;
    let base_url = config.resolve_base_url_from_env(flag)?;
    tracing::debug!(base_url = %base_url, "using weather record service");

    Ok(HttpRecordSource::new(base_url))
}

/// Submit `id` once and write the outcome panel to `out`. Returns whether
/// the lookup failed.
///
/// A blank `id` is skipped: nothing is fetched and nothing is written.
async fn lookup_once(
    source: &dyn RecordSource,
    id: String,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let mut form = LookupForm::new();
    form.set_input(id);

    form.submit(source).await;
    write!(out, "{}", render_outcome(form.outcome())).context("Failed to write lookup result")?;

    Ok(matches!(form.outcome(), Outcome::Failed(_)))
}

async fn interactive(source: &dyn RecordSource) -> anyhow::Result<()> {
    let mut form = LookupForm::new();
    println!("{TITLE}");

    loop {
        let input = match Text::new(&format!("{INPUT_LABEL}:"))
            .with_placeholder(INPUT_PLACEHOLDER)
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read weather request ID"),
        };

        form.set_input(input);
        let Some(pending) = form.begin_submit() else {
            continue;
        };

        println!("[ {} ]", form.submit_label());
        let response = source.fetch(pending.identifier()).await;
        form.complete(pending, response);

        println!("{}", render_form(&form));
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let current = config.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let answer = Text::new("Weather service base URL:")
        .with_default(&current)
        .prompt()
        .context("Failed to read base URL")?;

    config.set_base_url(&answer)?;
    config.save()?;

    println!(
        "Saved base URL {} to {}",
        config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
        Config::config_file_path()?.display()
    );

    Ok(())
}
