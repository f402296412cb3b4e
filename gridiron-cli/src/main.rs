mod logic;
mod terminal;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use gridiron_game::{
    DriveRules, ResultSummary, RngBundle, Specialty, decode_share_code, run_drive,
    share_code_from_entropy,
};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use logic::seeds::parse_seed;
use logic::{
    DriveRecord, SeedInfo, SimulationPlan, StrategyAggregate, aggregate_drives, parse_strategies,
    resolve_seed_inputs, run_simulation,
};
use terminal::{ConsoleSink, TerminalInput};
use util::split_csv;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    /// Play one drive interactively in the terminal
    Play,
    /// Run automated drives and report per-strategy results
    Simulate,
}

#[derive(Debug, Parser)]
#[command(name = "gridiron", version = "0.1.0")]
#[command(about = "Gridiron - march one drive down the field in six plays")]
struct Args {
    /// Play interactively or simulate automated drives
    #[arg(long, value_enum, default_value_t = Mode::Play)]
    mode: Mode,

    /// Player name (play mode asks when omitted)
    #[arg(long)]
    name: Option<String>,

    /// Player specialty: passing or running (simulate mode runs both when omitted)
    #[arg(long)]
    specialty: Option<String>,

    /// Seed for play mode: an integer or a share code like GR-BLITZ07
    #[arg(long)]
    seed: Option<String>,

    /// Seeds to simulate (comma-separated integers or share codes)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Drives per seed, strategy, and specialty (simulate mode)
    #[arg(long, default_value_t = 25)]
    iterations: usize,

    /// Strategies to simulate (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    strategies: String,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON file overriding the drive rules
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let rules = load_rules(args.rules.as_deref())?;
    match args.mode {
        Mode::Play => run_play(&args, rules),
        Mode::Simulate => run_simulate(&args, rules),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn announce_banner() {
    println!("{}", "🏈 Gridiron Drive".bright_cyan().bold());
    println!("{}", "=================".cyan());
}

fn load_rules(path: Option<&Path>) -> Result<DriveRules> {
    let Some(path) = path else {
        return Ok(DriveRules::default());
    };
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let rules = DriveRules::from_json(&raw)
        .with_context(|| format!("failed to parse rules from {}", path.display()))?;
    rules
        .validate()
        .with_context(|| format!("invalid rules in {}", path.display()))?;
    log::debug!("loaded rules override from {}", path.display());
    Ok(rules)
}

fn play_seed(token: Option<&str>) -> Result<SeedInfo> {
    if let Some(token) = token {
        return parse_seed(token);
    }
    let code = share_code_from_entropy(rand::random());
    let seed = decode_share_code(&code)
        .with_context(|| format!("generated share code {code} does not decode"))?;
    Ok(SeedInfo::from_share_code(seed, code))
}

fn run_play(args: &Args, rules: DriveRules) -> Result<()> {
    let seed_info = play_seed(args.seed.as_deref())?;
    announce_banner();
    println!("Seed: {}", seed_info.label().bright_white());

    let stdin = io::stdin();
    let mut input = TerminalInput::new(
        stdin.lock(),
        stdout(),
        args.name.clone(),
        args.specialty.clone(),
    );
    let mut sink = ConsoleSink::new(stdout());
    let dice = RngBundle::from_user_seed(seed_info.seed);

    let Ok(summary) = run_drive(&mut input, &mut sink, rules, dice) else {
        // The sink has already shown why setup failed.
        std::process::exit(1);
    };

    println!();
    println!(
        "🔁 Replay this drive with {}",
        format!("--seed {}", seed_info.label()).bright_white()
    );
    if let Some(path) = &args.output {
        write_play_summary(path, &summary)?;
    }
    Ok(())
}

fn write_play_summary(path: &Path, summary: &ResultSummary) -> Result<()> {
    let mut output_target = OutputTarget::new(Some(path.to_path_buf()))?;
    let json_output = serde_json::to_string_pretty(summary)?;
    writeln!(&mut output_target, "{json_output}")?;
    output_target.flush_inner()?;
    Ok(())
}

fn run_simulate(args: &Args, rules: DriveRules) -> Result<()> {
    let start_time = Instant::now();
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let strategies = parse_strategies(&split_csv(&args.strategies))?;
    let specialties = match args.specialty.as_deref() {
        Some(raw) => vec![Specialty::from_input(raw)?],
        None => vec![Specialty::Running, Specialty::Passing],
    };

    announce_banner();
    println!(
        "{}",
        format!(
            "🧠 Simulating {} strategies × {} seeds × {} iterations",
            strategies.len(),
            seeds.len(),
            args.iterations
        )
        .bright_yellow()
        .bold()
    );

    let plan = SimulationPlan {
        strategies,
        seeds,
        iterations: args.iterations,
        specialties,
        rules,
    };
    let records = run_simulation(&plan)?;
    let aggregates = aggregate_drives(&records);

    write_reports(args, &plan, &aggregates, &records, start_time)
}

fn write_reports(
    args: &Args,
    plan: &SimulationPlan,
    aggregates: &[StrategyAggregate],
    records: &[DriveRecord],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(
            &mut output_target,
            &plan.seeds,
            plan.iterations,
            aggregates,
            records,
        )?,
        "markdown" => logic::reports::generate_markdown_report(
            &mut output_target,
            &plan.seeds,
            aggregates,
            records,
        )?,
        _ => {
            if records.is_empty() {
                writeln!(&mut output_target, "No drives simulated.")?;
            } else {
                logic::reports::generate_console_report(&mut output_target, aggregates, records)?;
            }
            let duration = start_time.elapsed();
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::policy::GameplayStrategy;

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "gridiron-main-{label}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    fn base_args() -> Args {
        Args {
            mode: Mode::Simulate,
            name: None,
            specialty: None,
            seed: None,
            seeds: "1337".to_string(),
            iterations: 1,
            strategies: "greedy".to_string(),
            report: "json".to_string(),
            output: None,
            rules: None,
            verbose: false,
        }
    }

    fn small_plan() -> SimulationPlan {
        SimulationPlan {
            strategies: vec![GameplayStrategy::Greedy],
            seeds: vec![SeedInfo::from_numeric(1337)],
            iterations: 2,
            specialties: vec![Specialty::Running],
            rules: DriveRules::default(),
        }
    }

    #[test]
    fn write_reports_covers_every_format() {
        let plan = small_plan();
        let records = run_simulation(&plan).unwrap();
        let aggregates = aggregate_drives(&records);
        for (format, marker) in [
            ("json", "\"aggregates\""),
            ("markdown", "# Gridiron Drive Simulation"),
            ("console", "Total time"),
        ] {
            let path = temp_path(format);
            let mut args = base_args();
            args.report = format.to_string();
            args.output = Some(path.clone());
            write_reports(&args, &plan, &aggregates, &records, Instant::now()).unwrap();
            let content = fs::read_to_string(&path).unwrap();
            assert!(content.contains(marker), "{format}: {content}");
            let _ = fs::remove_file(path);
        }
    }

    #[test]
    fn console_report_handles_no_drives() {
        let path = temp_path("empty");
        let mut args = base_args();
        args.report = "console".to_string();
        args.output = Some(path.clone());
        write_reports(&args, &small_plan(), &[], &[], Instant::now()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("No drives simulated."));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rules_file_overrides_defaults() {
        let path = temp_path("rules");
        fs::write(&path, r#"{ "start_position": 70, "max_plays": 8 }"#).unwrap();
        let rules = load_rules(Some(&path)).unwrap();
        assert_eq!(rules.start_position, 70);
        assert_eq!(rules.max_plays, 8);
        assert_eq!(rules.fumble_one_in, DriveRules::default().fumble_one_in);

        fs::write(&path, r#"{ "max_plays": 0 }"#).unwrap();
        let err = load_rules(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("invalid rules"));
        let _ = fs::remove_file(path);

        assert_eq!(load_rules(None).unwrap(), DriveRules::default());
        assert!(load_rules(Some(Path::new("/nonexistent/rules.json"))).is_err());
    }

    #[test]
    fn play_seed_accepts_codes_and_generates_one() {
        let info = play_seed(Some("GR-ENDZONE42")).unwrap();
        assert_eq!(info.code.as_deref(), Some("GR-ENDZONE42"));
        let generated = play_seed(None).unwrap();
        let code = generated.code.unwrap();
        assert_eq!(decode_share_code(&code), Some(generated.seed));
        assert!(play_seed(Some("not-a-seed")).is_err());
    }

    #[test]
    fn output_target_writes_file() {
        let path = temp_path("target");
        let mut target = OutputTarget::new(Some(path.clone())).unwrap();
        writeln!(target, "hello").unwrap();
        target.flush_inner().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        let _ = fs::remove_file(path);
    }
}
