use grader_core::{action, print_success};
use std::path::PathBuf;

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(default_value = "./")]
    dir: PathBuf,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let cfg = action::init_repository(&args.dir)?;
    print_success!(
        "Successfully initialized grader repository. (problems: {})",
        util::replace_homedir_to_tilde(&cfg.storage.problems_dir).to_string_lossy()
    );
    Ok(())
}
