use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use garden_core::breathing::format_clock;
use garden_core::garden::{entries_in_week, garden_week, week_start_of, PlantVisual};
use garden_core::ticker::{run_breathing, run_breathing_with_controls, run_guided};
use garden_core::trend::{
    bar_width, entries_from_trend, series_average, trend_direction, weekly_series, MoodTone,
};
use garden_core::*;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

#[derive(Parser)]
#[command(name = "garden")]
#[command(about = "Mood garden and mindful breathing companion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a breathing exercise
    Breathe {
        /// Preset to use (478, box, simple)
        #[arg(long)]
        pattern: Option<String>,

        /// Custom inhale seconds (requires --hold and --exhale)
        #[arg(long, requires_all = ["hold", "exhale"], conflicts_with = "pattern")]
        inhale: Option<u32>,

        #[arg(long, requires = "inhale")]
        hold: Option<u32>,

        #[arg(long, requires = "inhale")]
        exhale: Option<u32>,

        /// Stop after this many cycles (default: run until stopped with 'q')
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        cycles: Option<u32>,

        /// Tick instantly instead of once per second (for testing)
        #[arg(long)]
        fast: bool,
    },

    /// Run a guided mindfulness activity
    Activity {
        /// Activity slug (see `garden activities`)
        slug: String,

        /// Tick instantly instead of once per second (for testing)
        #[arg(long)]
        fast: bool,
    },

    /// List breathing presets and guided activities
    Activities,

    /// Show the emotion garden for a week
    Garden {
        /// CSV file with `date,mood` rows (default: fetch from backend)
        #[arg(long)]
        entries: Option<PathBuf>,

        /// Any date inside the week to show (default: today)
        #[arg(long)]
        week_of: Option<NaiveDate>,
    },

    /// Show the weekly mood trend from the backend
    Trend,

    /// Fetch a journal prompt
    Prompt,

    /// Fetch a motivational affirmation
    Affirmation,

    /// Ask the backend for a cognitive-support insight
    Insight,

    /// Send a mood check-in to the backend
    Checkin {
        /// Mood rating from 1 (terrible) to 5 (amazing)
        #[arg(long, conflicts_with = "emotion", required_unless_present = "emotion")]
        mood: Option<i32>,

        /// Quick check-in emotion (happy, calm, sad, anxious, angry, tired)
        #[arg(long)]
        emotion: Option<String>,

        /// Free-text notes (scored format only)
        #[arg(long)]
        notes: Option<String>,

        /// Payload encoding (label or scored), overrides api.checkin_format
        #[arg(long)]
        format: Option<CheckinFormat>,
    },

    /// Show or toggle the colour theme
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    garden_core::logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Breathe {
            pattern,
            inhale,
            hold,
            exhale,
            cycles,
            fast,
        } => {
            let custom = match (inhale, hold, exhale) {
                (Some(i), Some(h), Some(e)) => Some(BreathingPattern::new(i, h, e)?),
                _ => None,
            };
            cmd_breathe(&config, pattern, custom, cycles, fast)
        }
        Commands::Activity { slug, fast } => cmd_activity(&slug, fast),
        Commands::Activities => {
            cmd_activities();
            Ok(())
        }
        Commands::Garden { entries, week_of } => cmd_garden(&config, entries, week_of),
        Commands::Trend => cmd_trend(&config),
        Commands::Prompt => cmd_prompt(&config),
        Commands::Affirmation => cmd_affirmation(&config),
        Commands::Insight => cmd_insight(&config),
        Commands::Checkin {
            mood,
            emotion,
            notes,
            format,
        } => cmd_checkin(&config, mood, emotion, notes, format),
        Commands::Theme { toggle } => cmd_theme(config, cli.config.as_deref(), toggle),
    }
}

/// Each invocation runs exactly one activity, so the CLI has no need for
/// an `ActivityCoordinator`.
fn cmd_breathe(
    config: &Config,
    preset: Option<String>,
    custom: Option<BreathingPattern>,
    cycles: Option<u32>,
    fast: bool,
) -> Result<()> {
    const FAST_DEFAULT_CYCLES: u32 = 3;

    let catalog = get_default_catalog();
    let (name, pattern) = match custom {
        Some(p) => ("Custom Breathing".to_string(), p),
        None => {
            let slug = preset.unwrap_or_else(|| config.breathing.default_pattern.clone());
            let preset = catalog.preset(&slug)?;
            (preset.name.clone(), preset.pattern)
        }
    };

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", name);
    println!("╰─────────────────────────────────────────╯");
    println!(
        "  Inhale {}s · Hold {}s · Exhale {}s",
        pattern.inhale, pattern.hold, pattern.exhale
    );
    println!();

    let mut session = BreathingSession::new();
    session.start(pattern);
    println!("[{}] {}", format_clock(0), session.instruction());

    let on_tick = |s: &BreathingSession, outcome: TickOutcome| match outcome {
        TickOutcome::PhaseChanged(_) | TickOutcome::CycleCompleted => {
            println!(
                "[{}] {}  (cycles: {})",
                format_clock(s.state().elapsed_seconds),
                s.instruction(),
                s.cycle_count()
            );
        }
        _ => {}
    };

    let summary = if fast {
        let limit = cycles.unwrap_or(FAST_DEFAULT_CYCLES);
        let ticks = u64::from(limit).saturating_mul(pattern.cycle_seconds());
        run_breathing(&mut session, &mut ManualTicker::new(ticks), Some(limit), on_tick)
    } else {
        println!("  'p' + Enter to pause/resume, 'q' + Enter to stop\n");
        let commands = spawn_control_reader();
        let controls = |s: &BreathingSession| {
            let control = commands.try_recv().ok()?;
            match (control, s.status()) {
                (SessionControl::TogglePause, SessionStatus::Running) => println!("  ⏸ Paused"),
                (SessionControl::TogglePause, _) => println!("  ▶ Resumed"),
                (SessionControl::Stop, _) => {}
            }
            Some(control)
        };
        run_breathing_with_controls(
            &mut session,
            &mut IntervalTicker::every_second(),
            cycles,
            controls,
            on_tick,
        )
    };

    println!(
        "\n✓ Completed {} {} in {}",
        summary.cycles,
        if summary.cycles == 1 { "cycle" } else { "cycles" },
        format_clock(summary.elapsed_seconds)
    );
    Ok(())
}

fn cmd_activity(slug: &str, fast: bool) -> Result<()> {
    let activity = get_default_catalog().activity(slug)?.clone();

    println!("\n  {} ({})", activity.title, format_clock(u64::from(activity.duration_seconds)));
    println!("  {}\n", activity.description);

    let mut session = GuidedSession::start(activity.clone());
    let on_tick = |s: &GuidedSession, outcome: GuidedTick| {
        if let GuidedTick::Running { remaining } = outcome {
            if remaining % 60 == 0 {
                println!("  {} remaining", format_clock(u64::from(s.remaining())));
            }
        }
    };

    let completed = if fast {
        let ticks = u64::from(activity.duration_seconds);
        run_guided(&mut session, &mut ManualTicker::new(ticks), on_tick)
    } else {
        run_guided(&mut session, &mut IntervalTicker::every_second(), on_tick)
    };

    if completed {
        println!("\n✓ {} completed", activity.title);
    } else {
        println!("\n{} stopped at {}", activity.title, format_clock(u64::from(session.elapsed())));
    }
    Ok(())
}

/// Forward 'p' and 'q' lines from stdin to the breathing loop.
///
/// The reader thread ends at EOF; it is left blocked on stdin otherwise and
/// dies with the process.
fn spawn_control_reader() -> Receiver<SessionControl> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let control = match line.trim().to_lowercase().as_str() {
                "p" => SessionControl::TogglePause,
                "q" => SessionControl::Stop,
                _ => continue,
            };
            if tx.send(control).is_err() {
                break;
            }
        }
    });
    rx
}

fn cmd_activities() {
    let catalog = get_default_catalog();

    println!("Breathing patterns:");
    for preset in &catalog.presets {
        let p = preset.pattern;
        println!(
            "  {:<8} {} ({}-{}-{}, {}) - {}",
            preset.slug, preset.name, p.inhale, p.hold, p.exhale, preset.suggested_duration,
            preset.description
        );
        println!("           ℹ {}", preset.reference_url);
    }

    println!("\nGuided activities:");
    for activity in &catalog.activities {
        println!(
            "  {:<16} {} ({}) - {}",
            activity.slug,
            activity.title,
            format_clock(u64::from(activity.duration_seconds)),
            activity.description
        );
    }
}

fn cmd_garden(config: &Config, entries: Option<PathBuf>, week_of: Option<NaiveDate>) -> Result<()> {
    let entries = match entries {
        Some(path) => load_entries_csv(&path)?,
        None => {
            let client = ApiClient::new(&config.api)?;
            entries_from_trend(&client.fetch_mood_trend()?)
        }
    };

    let day = week_of.unwrap_or_else(|| Local::now().date_naive());
    let week = garden_week(&entries, day);
    let in_week = entries_in_week(&entries, day);

    println!("\nYour Emotion Garden · week of {}", week_start_of(day));
    match garden_health_score(&in_week) {
        Some(score) => println!("Garden Health: {}%", score),
        None => println!("Garden Health: not enough data"),
    }
    println!();

    for plot in &week {
        match (plot.state, plot.mood) {
            (Some(state), mood) => {
                let visual = PlantVisual::for_growth(state.growth_percent);
                let flair = if visual.sparkle {
                    " ✨"
                } else if visual.growth_ring {
                    " ○"
                } else {
                    ""
                };
                println!(
                    "  {}  {} {} {:>3}%  {}{}",
                    plot.weekday,
                    mood.map(|m| m.emoji()).unwrap_or("❓"),
                    state.plant_type.symbol(),
                    state.growth_percent,
                    plot.status(),
                    flair
                );
            }
            (None, _) => println!("  {}  ·          {}", plot.weekday, plot.status()),
        }
    }
    println!();
    Ok(())
}

fn cmd_trend(config: &Config) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let trend = client.fetch_mood_trend().unwrap_or_else(|e| {
        tracing::warn!("Could not fetch mood trend: {}", e);
        MoodTrend::default()
    });

    let series = weekly_series(&trend, Local::now().date_naive());
    println!("\nMood over the last 7 days");
    for point in &series {
        let bar = "█".repeat(bar_width(point.score));
        println!("  {}  {:<20} {:.1}", point.label, bar, point.score);
    }
    let average = series_average(&series);
    let tone = MoodTone::from_average(average);
    println!("\n  Average: {:.1} ({}, {})", average, tone.label(), tone.colour());
    if let Some(direction) = trend_direction(&series) {
        println!("  {}", direction.label());
    }
    Ok(())
}

fn cmd_prompt(config: &Config) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let prompts = client.fetch_journal_prompts().unwrap_or_else(|e| {
        tracing::warn!("Could not fetch journal prompts: {}", e);
        Vec::new()
    });

    if prompts.is_empty() {
        println!("No prompts available right now.");
    }
    for prompt in prompts {
        println!("✎ {}", prompt);
    }
    Ok(())
}

fn cmd_affirmation(config: &Config) -> Result<()> {
    let quote = ApiClient::new(&config.api)?.fetch_affirmation()?;
    println!("\n  “{}”", quote.text);
    if let Some(author) = quote.author {
        println!("      — {}", author);
    }
    Ok(())
}

fn cmd_insight(config: &Config) -> Result<()> {
    let insight = ApiClient::new(&config.api)?.fetch_cognitive_insight()?;
    println!("{}", serde_json::to_string_pretty(&insight)?);
    Ok(())
}

fn cmd_checkin(
    config: &Config,
    mood: Option<i32>,
    emotion: Option<String>,
    notes: Option<String>,
    format: Option<CheckinFormat>,
) -> Result<()> {
    let format = format.or(config.api.checkin_format).ok_or_else(|| {
        Error::Config(
            "No check-in format configured; set api.checkin_format or pass --format".into(),
        )
    })?;

    let checkin = match (mood, emotion) {
        (Some(value), _) => {
            let level = MoodLevel::from_value(value)
                .ok_or_else(|| Error::Other(format!("Mood must be 1-5, got {}", value)))?;
            MoodCheckin::from_level(format, level, notes)
        }
        (None, Some(name)) => {
            let emotion = Emotion::parse(&name)
                .ok_or_else(|| Error::Other(format!("Unknown emotion: {}", name)))?;
            if format != CheckinFormat::Label {
                return Err(Error::Config(
                    "Emotion check-ins need the label format".into(),
                ));
            }
            MoodCheckin::from_emotion(emotion)
        }
        (None, None) => return Err(Error::Other("Pass --mood or --emotion".into())),
    };

    let reply = ApiClient::new(&config.api)?.post_mood(&checkin)?;
    println!("✓ Mood checked in");
    if let Some(message) = reply.get("message").and_then(|m| m.as_str()) {
        println!("  {}", message);
    }
    Ok(())
}

fn cmd_theme(mut config: Config, path: Option<&Path>, toggle: bool) -> Result<()> {
    let mut theme = ThemeContext::from_config(&config);

    if toggle {
        theme.toggle();
        config.ui.dark_mode = theme.is_dark();
        match path {
            Some(p) => config.save_to(p)?,
            None => config.save()?,
        }
    }

    let palette = theme.palette();
    println!("Theme: {:?}", theme.mode());
    println!("  primary     {}", palette.primary);
    println!("  background  {}", palette.background);
    println!("  surface     {}", palette.surface);
    println!("  text        {}", palette.text);
    println!("  accent      {}", palette.accent);
    Ok(())
}
