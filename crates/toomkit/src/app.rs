//! Application entry point and dispatch.

use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use toomkit_calibration::calibration::{CalibrationEngine, CalibrationMode};
use toomkit_calibration::{io, CalibrationProfile};
use toomkit_core::reference::{from_limbs, to_limbs};
use toomkit_core::{MulOptions, Toom};

use crate::config::{AppConfig, CalibrateArgs, Command, MulArgs, VerifyArgs};
use crate::errors::CliError;
use crate::output::{format_duration, format_product, parse_operand, write_to_file};
use crate::verify::{run_verify, VerifyPlan};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    match &config.command {
        Command::Completion { shell } => {
            let mut cmd = <AppConfig as clap::CommandFactory>::command();
            clap_complete::generate(*shell, &mut cmd, "toomkit", &mut std::io::stdout());
            Ok(())
        }
        Command::Calibrate(args) => run_calibration(config, args),
        Command::Config => show_config(config),
        Command::Mul(args) => run_mul(config, args),
        Command::Verify(args) => run_verification(config, args),
    }
}

/// Saved profile, unless disabled.
fn load_profile(config: &AppConfig) -> Option<CalibrationProfile> {
    if config.tuning.no_profile {
        return None;
    }
    io::load_validated_profile()
}

fn options(config: &AppConfig) -> MulOptions {
    let opts = config.tuning.resolve(load_profile(config).as_ref());
    tracing::debug!(?opts, "effective multiplication options");
    opts
}

fn run_mul(config: &AppConfig, args: &MulArgs) -> Result<()> {
    let a = parse_operand(&args.a, args.radix)?;
    let b = parse_operand(&args.b, args.radix)?;
    let toom = Toom::new(options(config));

    let start = Instant::now();
    let product = match args.algo.variant() {
        None => toom.multiply_biguint(&a, &b),
        Some(variant) => from_limbs(&toom.try_multiply(variant, &to_limbs(&a), &to_limbs(&b))?),
    };
    let elapsed = start.elapsed();

    let text = format_product(&product, args.radix);
    match &args.output {
        Some(path) => write_to_file(path, &text)
            .with_context(|| format!("writing product to {}", path.display()))?,
        None => println!("{text}"),
    }
    if config.verbose {
        eprintln!(
            "{} x {} limbs in {}",
            a.to_u64_digits().len(),
            b.to_u64_digits().len(),
            format_duration(elapsed)
        );
    }
    Ok(())
}

fn run_verification(config: &AppConfig, args: &VerifyArgs) -> Result<()> {
    if args.min_limbs > args.max_limbs {
        return Err(CliError::Config(format!(
            "--min-limbs {} exceeds --max-limbs {}",
            args.min_limbs, args.max_limbs
        ))
        .into());
    }
    let plan = VerifyPlan {
        target: args.target,
        cases: args.cases,
        min_limbs: args.min_limbs,
        max_limbs: args.max_limbs,
        seed: args.seed.unwrap_or_else(rand::random),
    };
    let opts = options(config);

    let progress = if config.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(plan.cases as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} cases [{elapsed_precise}]") {
            bar.set_style(style);
        }
        bar
    };
    let report = run_verify(&plan, opts, &progress);

    for failure in &report.failures {
        eprintln!(
            "case {} ({}, {} x {} limbs) disagrees; rerun with --seed {}",
            failure.case, failure.kernel, failure.an, failure.bn, plan.seed
        );
    }
    if !report.passed() {
        return Err(CliError::Mismatch {
            failures: report.failures.len(),
            cases: report.cases,
        }
        .into());
    }
    if !config.quiet {
        println!(
            "{} cases passed in {} (seed {})",
            report.cases,
            format_duration(report.elapsed),
            plan.seed
        );
    }
    Ok(())
}

fn run_calibration(config: &AppConfig, args: &CalibrateArgs) -> Result<()> {
    if args.reset {
        let removed = io::delete_profile()?;
        if !config.quiet {
            println!("{}", if removed { "Profile deleted" } else { "No saved profile" });
        }
        return Ok(());
    }

    let mode = if args.auto {
        CalibrationMode::Auto
    } else {
        CalibrationMode::Full
    };

    let mut engine = CalibrationEngine::new(mode);
    if !config.quiet {
        let bar = ProgressBar::new_spinner();
        engine = engine.with_progress(Box::new(move |p| {
            bar.set_message(format!("[{}/{}] {}", p.current, p.total, p.step));
            bar.tick();
        }));
    }
    let profile = engine.calibrate();

    if !config.quiet {
        let t = &profile.thresholds;
        println!("Calibration complete:");
        println!("  Karatsuba threshold: {} limbs", t.toom22);
        println!("  Toom-3 threshold:    {} limbs", t.toom33);
        println!("  Toom-4 threshold:    {} limbs", t.toom44);
        println!("  Toom-5x3 threshold:  {} limbs", t.toom53);
        println!("  Pointwise mode:      {}", profile.pointwise);
    }

    if !args.dry_run {
        let path = io::save_profile(&profile)?;
        if !config.quiet {
            println!("Saved to {}", path.display());
        }
    }
    Ok(())
}

fn show_config(config: &AppConfig) -> Result<()> {
    let profile = load_profile(config);
    let opts = config.tuning.resolve(profile.as_ref());
    let view = serde_json::json!({
        "options": opts,
        "profile": {
            "path": io::profile_path().display().to_string(),
            "loaded": profile.is_some(),
        },
    });
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
