mod inspect;
mod utils;

use clap::{Parser, Subcommand};
use inspect::{InspectArgs, StreamArgs};
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Load a roadmap file and summarise its contents.
    Inspect {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  InspectArgs,
    },

    /// Walk a roadmap file one sequence at a time.
    Stream {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  StreamArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Inspect { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Stream { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
    }
    Ok(())
}
