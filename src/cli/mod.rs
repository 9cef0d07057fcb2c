pub mod edit;
pub mod output;
pub mod ticker;

use std::{io::IsTerminal, path::PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use edit::Endpoint;
use output::{render_summary, render_week, Palette};
use ticker::{detect_shutdown, run_ticker, LiveClock, TICK_INTERVAL};
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, level_filters::LevelFilter};

use crate::{
    schedule::{math::format_minutes_to_hhmm, summary::Summary, DayKey, WeekSchedule},
    settings::{
        interchange::{export_settings, import_into},
        store::{FileSettingsStore, SettingsStore, ThemeStore},
        Settings, Theme,
    },
    utils::{
        clock::{Clock, DefaultClock},
        dir::create_application_path,
        logging::{enable_logging, CLI_PREFIX},
        time::day_key_of,
    },
};

#[derive(Parser, Debug)]
#[command(name = "Workhours", version, long_about = None)]
#[command(about = "Live clock and weekly work schedule tracker", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Show a live clock with today's and this week's progress. Stop with Ctrl-C")]
    Clock,
    #[command(about = "Show worked time against targets")]
    Summary {
        #[arg(long, help = "Day to treat as today, for example \"fri\". Defaults to the current day")]
        day: Option<DayKey>,
    },
    #[command(about = "Show the weekly schedule")]
    Show,
    #[command(about = "Set an interval of a day, for example `set mon 1 09:00 12:00`")]
    Set {
        day: DayKey,
        #[arg(help = "Interval number. 1 is the morning, 2 is the afternoon")]
        slot: usize,
        #[arg(help = "Start as HH:MM, or - to leave unset")]
        start: Endpoint,
        #[arg(help = "End as HH:MM, or - to leave unset")]
        end: Endpoint,
    },
    #[command(about = "Remove all intervals of a day")]
    Clear { day: DayKey },
    #[command(about = "Restore a day to the default intervals")]
    Restore { day: DayKey },
    #[command(about = "Show or change targets. Values are in hours, for example --daily 7.5")]
    Targets {
        #[arg(long, allow_negative_numbers = true)]
        daily: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        weekly: Option<f64>,
    },
    #[command(about = "Restore the default schedule and targets")]
    Reset,
    #[command(about = "Print settings as JSON")]
    Export {
        #[arg(long, short, help = "Write into a file instead of stdout")]
        output: Option<PathBuf>,
    },
    #[command(about = "Replace settings with a JSON payload. Reads stdin when no file is given")]
    Import { input: Option<PathBuf> },
    #[command(about = "Show or change the colour theme")]
    Theme { choice: Option<ThemeChoice> },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = create_application_path(args.dir)?;
    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir, logging_level, args.log)?;

    let store = FileSettingsStore::new(&app_dir);
    let palette = if std::io::stdout().is_terminal() {
        Palette::for_theme(store.load_theme().await?)
    } else {
        Palette::plain()
    };

    match args.commands {
        Commands::Clock => {
            let shutdown = CancellationToken::new();
            let mut live = LiveClock::new(&store, palette, std::io::stdout());
            let (_, result) = tokio::join!(detect_shutdown(shutdown.clone()), async {
                let result = run_ticker(&DefaultClock, TICK_INTERVAL, shutdown.clone(), &mut live).await;
                shutdown.cancel();
                result
            });
            println!();
            result
        }
        Commands::Summary { day } => {
            let settings = store.load().await?;
            let today = day.unwrap_or_else(|| day_key_of(&DefaultClock.time()));
            print!("{}", render_summary(&Summary::compute(&settings, today), &palette));
            Ok(())
        }
        Commands::Show => {
            print!("{}", render_week(&store.load().await?.schedule, &palette));
            Ok(())
        }
        Commands::Set {
            day,
            slot,
            start,
            end,
        } => {
            let settings = edit::set_interval(&store, day, slot, start, end)
                .await
                .map_err(|e| {
                    Args::command().error(clap::error::ErrorKind::ValueValidation, e.to_string())
                })?;
            print!("{}", render_week(&single_day(&settings, day), &palette));
            Ok(())
        }
        Commands::Clear { day } => {
            let settings = edit::clear_day(&store, day).await?;
            print!("{}", render_week(&single_day(&settings, day), &palette));
            Ok(())
        }
        Commands::Restore { day } => {
            let settings = edit::restore_day(&store, day).await?;
            print!("{}", render_week(&single_day(&settings, day), &palette));
            Ok(())
        }
        Commands::Targets { daily, weekly } => {
            let targets = if daily.is_none() && weekly.is_none() {
                store.load().await?.targets
            } else {
                edit::set_targets(&store, daily, weekly)
                    .await
                    .map_err(|e| {
                        Args::command()
                            .error(clap::error::ErrorKind::ValueValidation, e.to_string())
                    })?
                    .targets
            };
            println!(
                "Daily  {}\nWeekly {}",
                format_minutes_to_hhmm(targets.daily_minutes as i64, false),
                format_minutes_to_hhmm(targets.weekly_minutes as i64, false)
            );
            Ok(())
        }
        Commands::Reset => {
            edit::reset(&store).await?;
            println!("Restored default schedule and targets");
            Ok(())
        }
        Commands::Export { output } => {
            let exported = export_settings(&store.load().await?)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, exported)
                        .await
                        .with_context(|| format!("Failed to write export into {path:?}"))?;
                    info!("Exported settings into {path:?}");
                }
                None => println!("{exported}"),
            }
            Ok(())
        }
        Commands::Import { input } => {
            let raw = match input {
                Some(path) if path.as_os_str() != "-" => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {path:?}"))?,
                _ => {
                    let mut raw = String::new();
                    tokio::io::stdin().read_to_string(&mut raw).await?;
                    raw
                }
            };
            match import_into(&store, &raw).await? {
                Some(settings) => print!("{}", render_week(&settings.schedule, &palette)),
                None => println!("Nothing to import"),
            }
            Ok(())
        }
        Commands::Theme { choice } => {
            let current = store.load_theme().await?;
            let theme = match choice {
                None => current,
                Some(ThemeChoice::Light) => Theme::Light,
                Some(ThemeChoice::Dark) => Theme::Dark,
                Some(ThemeChoice::Toggle) => current.toggled(),
            };
            if theme != current {
                store.save_theme(theme).await?;
            }
            println!("{theme}");
            Ok(())
        }
    }
}

/// Only `day` out of the schedule, for showing what an edit changed.
fn single_day(settings: &Settings, day: DayKey) -> WeekSchedule {
    settings
        .schedule
        .get_key_value(&day)
        .map(|(key, value)| (*key, value.clone()))
        .into_iter()
        .collect()
}
