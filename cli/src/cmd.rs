pub mod grade;
pub mod init;
pub mod problems;
pub mod run;
pub mod show;
pub mod submissions;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    Init(init::Args),

    #[command(alias("g"))]
    Grade(grade::Args),

    #[command(alias("r"))]
    Run(run::Args),

    Problems(problems::Args),
    Show(show::Args),
    Submissions(submissions::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Init(args) => init::exec(args, self),
            Grade(args) => grade::exec(args, self).await,
            Run(args) => run::exec(args, self).await,
            Problems(args) => problems::exec(args, self),
            Show(args) => show::exec(args, self),
            Submissions(args) => submissions::exec(args, self),
        }
    }
}
