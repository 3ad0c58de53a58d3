//! lg-specs: replay link-grammar expected-results files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use lg_linkage_replay::ReplayDictionary;
use lg_linkage_specs::{
    format_failure, format_summary, run_suite, CandidateOrder, CaseOutcome, ExpectedFailures,
    HarnessResult, OptionOverrides, OracleConfig, SpecError, Suite, DATA_DIR_ENV,
};

#[derive(Parser)]
#[command(name = "lg-specs", version, about = "Replay link-grammar expected results")]
struct Cli {
    /// Directory holding the parses-*.txt files [default: $srcdir, or .]
    #[arg(long)]
    srcdir: Option<PathBuf>,

    /// Directory holding recorded corpora, one subdirectory per language.
    #[arg(long, env = DATA_DIR_ENV, default_value = "data")]
    data_dir: PathBuf,

    /// Suite manifest (TOML). Defaults to the standard English suite.
    #[arg(long)]
    suite: Option<PathBuf>,

    /// Expected failures file. Defaults to expected-failures.toml in srcdir.
    #[arg(long)]
    expected_failures: Option<PathBuf>,

    /// Also run every parses-*.txt under srcdir that the suite does not list.
    #[arg(long)]
    discover: bool,

    /// Only run cases for this language.
    #[arg(long)]
    lang: Option<String>,

    /// Value forced into the `test` parse option.
    #[arg(long)]
    test: Option<String>,

    /// Value forced into the `debug` parse option.
    #[arg(long)]
    debug: Option<String>,

    /// Value forced into the `verbosity` parse option.
    #[arg(long)]
    verbosity: Option<i32>,

    /// Compare linkages in engine order instead of sorting equal-cost runs.
    #[arg(long)]
    no_eqcost_order: bool,

    /// End each file at its first failed check.
    #[arg(long)]
    stop_on_failure: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let outcome = run(Cli::parse());
    if let Err(e) = &outcome {
        eprintln!("error: {}", e);
    }
    ExitCode::from(exit_status(&outcome))
}

/// 0 without regressions, 1 with regressions, 2 when a run could not finish.
fn exit_status(outcome: &Result<HarnessResult, SpecError>) -> u8 {
    match outcome {
        Ok(result) => result.exit_code() as u8,
        Err(_) => 2,
    }
}

fn run(cli: Cli) -> Result<HarnessResult, SpecError> {
    let order = if cli.no_eqcost_order {
        CandidateOrder::Engine
    } else {
        CandidateOrder::EqualCost
    };
    let mut config = OracleConfig::from_env().with_order(order);
    if let Some(srcdir) = cli.srcdir {
        config = config.with_srcdir(srcdir);
    }
    config.stop_on_failure = cli.stop_on_failure;
    config.overrides = OptionOverrides {
        test: cli.test,
        debug: cli.debug,
        verbosity: cli.verbosity,
    };

    let mut suite = match &cli.suite {
        Some(path) => Suite::load(path)?,
        None => Suite::standard(),
    };
    if cli.discover {
        let added = suite.add_discovered(&config.srcdir)?;
        tracing::info!(added, srcdir = %config.srcdir.display(), "discovered expected results");
    }
    if let Some(lang) = &cli.lang {
        suite.retain_lang(lang);
    }

    let failures_path = cli
        .expected_failures
        .unwrap_or_else(|| config.srcdir.join("expected-failures.toml"));
    let expected = ExpectedFailures::load(&failures_path).map_err(|message| SpecError::Load {
        path: failures_path.display().to_string(),
        message,
    })?;

    let data_dir = cli.data_dir;
    let outcomes = run_suite(&suite, &config, |lang| {
        ReplayDictionary::open(&data_dir, lang).map_err(|e| SpecError::Load {
            path: data_dir.display().to_string(),
            message: e.to_string(),
        })
    })?;

    let mut total = HarnessResult::new();
    for outcome in &outcomes {
        match outcome {
            CaseOutcome::Skipped { name, reason } => {
                println!("\nSKIP: {} ({})", name, reason);
                total.record_skip();
            }
            CaseOutcome::Ran(report) => {
                let mut file = HarnessResult::new();
                file.record_report(report, &expected);
                for failure in &report.failures {
                    print!("{}", format_failure(failure, expected.classify(failure)));
                    let reason = expected
                        .get_entry(failure.file_name(), failure.line)
                        .and_then(|entry| entry.reason.as_deref());
                    if let Some(reason) = reason {
                        println!("  expected: {}", reason);
                    }
                }
                print!(
                    "{}",
                    format_summary(
                        report.file_name(),
                        file.passed,
                        report.failures.len(),
                        file.expected_failures,
                        file.regressions,
                    )
                );
                total.record_report(report, &expected);
            }
        }
    }

    println!(
        "\n{} checks: {} passed, {} expected failures, {} regressions, {} skipped",
        total.total, total.passed, total.expected_failures, total.regressions, total.skipped
    );
    Ok(total)
}
