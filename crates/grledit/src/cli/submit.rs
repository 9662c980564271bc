//! `grledit submit`: headless, one-shot evaluation.
//!
//! Exit code 0 when the outcome is a success, 1 otherwise. `--json` prints
//! the request body that would be sent and exits without contacting the
//! service.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use grledit::{submit_once, EditorSession};
use tracing::info;

use super::{read_contexts, read_input, Settings};

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// GRL rule file
    #[arg(long)]
    pub grl: PathBuf,

    /// Context JSON file; repeat for more blocks, in order
    #[arg(long = "context")]
    pub contexts: Vec<PathBuf>,

    /// Evaluation service base URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Print the request body instead of sending it
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: SubmitArgs) -> anyhow::Result<ExitCode> {
    let settings = Settings::load(args.endpoint.as_deref())?;
    let rule = read_input(&args.grl)?;
    let contexts = read_contexts(&args.contexts)?;

    let session = EditorSession::with_contents(rule, contexts, settings.config.block_placement);
    let request = session.snapshot();
    let shape = settings.config.request_shape;

    if args.json {
        println!("{}", request.to_body(shape)?);
        return Ok(ExitCode::SUCCESS);
    }

    let transport = settings.transport()?;
    info!(url = transport.url(), blocks = request.json_input.len(), "headless submit");
    let outcome = submit_once(&transport, &request, shape).await;
    println!("{}", outcome.render());

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
