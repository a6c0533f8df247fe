use std::path::{Path, PathBuf};
use std::process::ExitCode;

use qls_io::{
    PERFORMANCE_LOG, PerformanceRecord, SETTINGS_FILE, append_performance_record, load_settings,
    write_solution,
};
use qls_solver::{SolverConfig, run_solve};

fn usage() {
    eprintln!("usage: qls solve <matrix_file> <rhs_file> [out_file] [--quantum]");
}

#[derive(Debug, PartialEq, Eq)]
struct SolveArgs {
    matrix_path: PathBuf,
    rhs_path: PathBuf,
    out_path: PathBuf,
    force_quantum: bool,
}

/// Parse the `solve` arguments. Fewer than two positional arguments is
/// a usage error; nothing touches the filesystem before this check
/// passes.
fn parse_solve_args(args: &[String]) -> Result<SolveArgs, String> {
    let mut positionals = Vec::new();
    let mut force_quantum = false;
    for arg in args {
        match arg.as_str() {
            "--quantum" => force_quantum = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option: {flag}")),
            _ => positionals.push(arg.clone()),
        }
    }
    if positionals.len() < 2 || positionals.len() > 3 {
        return Err("expected <matrix_file> <rhs_file> [out_file]".to_string());
    }

    let out_path = positionals
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("solution.dat"));
    Ok(SolveArgs {
        matrix_path: PathBuf::from(&positionals[0]),
        rhs_path: PathBuf::from(&positionals[1]),
        out_path,
        force_quantum,
    })
}

/// Run one solve: resolve settings, execute the pipeline, persist the
/// solution and append the performance record. Any error here is fatal
/// (exit code 2).
fn run(args: &SolveArgs, settings_path: &Path, perf_log: &Path) -> Result<(), String> {
    let settings = load_settings(settings_path);
    let config = SolverConfig::resolve(settings.as_ref(), args.force_quantum);

    let outcome =
        run_solve(&args.matrix_path, &args.rhs_path, &config).map_err(|err| err.to_string())?;

    if let Some(warning) = outcome.info.warning {
        eprintln!("warning: {warning}");
    }

    println!("Solution calculated. Norm: {}", outcome.x.norm());
    println!("--> SOLVER TIME: {:.6} seconds", outcome.elapsed_seconds);

    write_solution(&args.out_path, outcome.x.as_slice())
        .map_err(|err| format!("failed to write {}: {err}", args.out_path.display()))?;
    println!("Solution written to {}", args.out_path.display());

    let record = PerformanceRecord {
        timestamp: chrono::Local::now()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
        mode: outcome.info.mode_used.as_str().to_string(),
        matrix_size: outcome.matrix_size(),
        elapsed_seconds: outcome.elapsed_seconds,
    };
    append_performance_record(perf_log, &record)
        .map_err(|err| format!("failed to update {}: {err}", perf_log.display()))?;
    println!("Performance logged to {}", perf_log.display());

    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("solve") => match parse_solve_args(&args[2..]) {
            Ok(solve_args) => {
                match run(
                    &solve_args,
                    Path::new(SETTINGS_FILE),
                    Path::new(PERFORMANCE_LOG),
                ) {
                    Ok(()) => ExitCode::SUCCESS,
                    Err(err) => {
                        eprintln!("fatal: {err}");
                        ExitCode::from(2)
                    }
                }
            }
            Err(err) => {
                eprintln!("usage error: {err}");
                usage();
                ExitCode::from(1)
            }
        },
        _ => {
            usage();
            ExitCode::from(1)
        }
    }
}
