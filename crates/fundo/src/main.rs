mod cli;
mod etl;

// remote imports
use chrono::NaiveDateTime;
use clap::Parser;
use cli::{Cli, TraceLevel};
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// preproccess the trace level, and open the .env file
fn preprocess(trace_level: Level) {
    dotenv::dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // set the trace level
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        });
    } else {
        dotenv::dotenv().ok();
    }
    trace!("command line input recorded: {cli:?}");

    // if no trace level provided, use tui
    let tui = cli.trace.is_none();

    // read cli inputs
    use cli::Commands::*;
    match cli.command {
        // `fundo harvest [-s <timestamp>]`: run the full pipeline
        Harvest { timestamp } => {
            let timestamp = timestamp
                .map(|raw| {
                    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S").map_err(|err| {
                        anyhow::anyhow!("invalid --timestamp '{raw}', error({err})")
                    })
                })
                .transpose()?;
            etl::run(timestamp, tui).await?;
        }

        // `fundo call-proc [-n <name>]`: run the history procedure alone
        CallProc { name } => {
            etl::call_procedure(name).await?;
        }
    }

    Ok(())
}
