use std::{io, path::PathBuf};

use grader_core::{action, judge::Judge, style};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// `<group>-<problem>`
    #[arg()] // positional argument
    pub problem_id: String,

    #[arg()]
    pub file: PathBuf,

    /// cpp, python or java. Inferred from the file extension if omitted.
    #[arg(short, long)]
    pub lang: Option<String>,

    #[arg(short, long)]
    pub json: bool,
}

pub async fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let cfg = util::load_config()?;
    let judge = Judge::from_config(&cfg);

    let bar = util::spinner(format!("Grading {} ...", args.problem_id));
    let res = action::grade_file(&judge, &args.problem_id, &args.file, args.lang.as_deref()).await;
    bar.finish_and_clear();
    let report = res?;

    if args.json {
        serde_json::to_writer_pretty(io::stdout(), &report)?;
        println!();
        return Ok(());
    }

    report.details.iter().for_each(style::print_case_line);
    style::print_report(&report);
    Ok(())
}
