use std::io;

use chrono::{Local, TimeZone as _, Utc};
use grader_core::{action, judge::Judge, style};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub problem_id: String,

    #[arg(short, long)]
    pub json: bool,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let cfg = util::load_config()?;
    let judge = Judge::from_config(&cfg);
    let subs = action::list_submissions(&judge, &args.problem_id)?;

    if args.json {
        serde_json::to_writer_pretty(io::stdout(), &subs)?;
        println!();
        return Ok(());
    }

    if subs.is_empty() {
        println!(
            "No submissions for {} in {}",
            args.problem_id,
            util::replace_homedir_to_tilde(judge.submissions().home()).to_string_lossy()
        );
        return Ok(());
    }

    for s in subs {
        let submitted_at = Utc
            .timestamp_millis_opt(s.timestamp)
            .single()
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_owned());
        println!(
            "{}  {} {:>3}/{:<3} {:<7} {}",
            submitted_at,
            style::judge_icon(s.final_status),
            s.passed_count,
            s.total_count,
            s.language,
            s.id,
        );
    }
    Ok(())
}
