use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape Fundamentus, reconcile the table, and load it into the
    /// database, running the history procedure afterwards.
    Harvest {
        /// Run timestamp supplied by the scheduler (YYYY-MM-DDTHH:MM:SS).
        ///
        /// If omitted, the current local time is used.
        #[arg(short = 's', long)]
        timestamp: Option<String>,
    },

    /// Invoke the post-load history procedure on its own.
    CallProc {
        /// Procedure to execute; defaults to the history procedure.
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}
