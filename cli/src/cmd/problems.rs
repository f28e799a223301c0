use std::io;

use colored::Colorize as _;
use grader_core::{action, judge::Judge};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(short, long)]
    pub json: bool,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let cfg = util::load_config()?;
    let judge = Judge::from_config(&cfg);
    let problems = action::list_problems(&judge)?;

    if args.json {
        serde_json::to_writer_pretty(io::stdout(), &problems)?;
        println!();
        return Ok(());
    }

    if problems.is_empty() {
        println!(
            "No problems in {}",
            util::replace_homedir_to_tilde(judge.problems().home()).to_string_lossy()
        );
        return Ok(());
    }

    for p in problems {
        let mark = if p.solved {
            "✔".green().bold()
        } else {
            " ".normal()
        };
        println!("{} {:<32} {}", mark, p.id.to_string().cyan(), p.title);
    }
    Ok(())
}
