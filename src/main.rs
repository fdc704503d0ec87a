mod diagnostics;
mod face;
mod runner;
mod surface;
mod time_provider;
mod ui;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};

use crate::face::model::Mode;
use crate::ui::app::Theme;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliMode {
    Clock,
    Timer,
    Alarm,
}

impl From<CliMode> for Mode {
    fn from(value: CliMode) -> Self {
        match value {
            CliMode::Clock => Mode::Clock,
            CliMode::Timer => Mode::Timer,
            CliMode::Alarm => Mode::Alarm,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliTheme {
    Dark,
    Light,
}

impl From<CliTheme> for Theme {
    fn from(value: CliTheme) -> Self {
        match value {
            CliTheme::Dark => Theme::Dark,
            CliTheme::Light => Theme::Light,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "segclock",
    version,
    about = "Six-digit segment clock with timer and alarm modes"
)]
struct Cli {
    #[arg(long, value_enum, default_value_t = CliMode::Clock)]
    mode: CliMode,

    #[arg(long, value_enum, default_value_t = CliTheme::Dark)]
    theme: CliTheme,

    #[arg(long)]
    diagnostics: bool,

    #[arg(long, default_value_t = 10)]
    check_ticks: u32,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.check_ticks == 0 {
        bail!("--check-ticks must be greater than zero");
    }

    if cli.diagnostics {
        return diagnostics::run_self_check(cli.check_ticks);
    }

    ui::app::run_gui(cli.mode.into(), cli.theme.into())
}
