use colored::Colorize as _;
use grader_core::{action, storage::ProblemStore};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub problem_id: String,

    /// Also print the editorial.
    #[arg(short, long)]
    pub editorial: bool,

    /// Also print the notes of the problem's group.
    #[arg(short, long)]
    pub docs: bool,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let cfg = util::load_config()?;
    let store = ProblemStore::new(&cfg.storage.problems_dir);
    let problem = action::show_problem(&store, &args.problem_id)?;

    println!("{} {}", problem.id.to_string().cyan(), problem.title.bold());
    println!("\n{}\n", problem.description);

    let sample = problem.sample().unwrap_or_default();
    println!("{}", "[sample input]".cyan().bold());
    println!("{}", sample.input);
    println!("{}", "[sample output]".cyan().bold());
    println!("{}", sample.expected_output);

    if args.editorial {
        println!("\n{}", "[editorial]".cyan().bold());
        println!("{}", problem.editorial);
    }

    if args.docs {
        println!("\n{}", "[docs]".cyan().bold());
        match store.group_docs(problem.id.group()) {
            Some(docs) => println!("{}", docs.trim_end()),
            None => println!("{}", "<NONE>".magenta().dimmed()),
        }
    }
    Ok(())
}
