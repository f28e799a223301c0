use std::path::PathBuf;

use grader_core::{action, style, testing::ProcessRunner};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub file: PathBuf,

    #[arg(short, long)]
    pub lang: Option<String>,

    /// File fed to stdin. Empty stdin if omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

pub async fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let cfg = util::load_config()?;
    let runner = ProcessRunner::new(cfg.runner_config());

    let bar = util::spinner(format!("Running {} ...", args.file.to_string_lossy()));
    let res = action::run_file(
        &runner,
        &args.file,
        args.lang.as_deref(),
        args.input.as_deref(),
    )
    .await;
    bar.finish_and_clear();

    style::print_outcome(&res?);
    Ok(())
}
