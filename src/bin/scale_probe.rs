use std::env;
use std::time::Instant;

use clcs_dp::oracle::{exhaustive_optimum, is_feasible, EXHAUSTIVE_LIMIT};
use clcs_dp::{ClcsEngine, ClcsProblem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("scale_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("CLCS Scaling Probe");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Every run checks that the solution length equals the table optimum and");
    eprintln!("that the solution passes the feasibility oracle. Runs whose shorter input");
    eprintln!("has at most {} symbols are also compared with brute force.", options.verify_limit);
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/3] Small instances against brute force...");
    measurements.extend(run_clcs_small(&options, &mut sys));
    eprintln!();

    eprintln!("[2/3] Constrained instances with growing inputs...");
    measurements.extend(run_clcs_scaling(&options, &mut sys));
    eprintln!();

    eprintln!("[3/3] Empty constraint against a plain LCS baseline...");
    measurements.extend(run_plain_lcs(&options, &mut sys));
    eprintln!();

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("scale_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 16usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            }
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg.clone(), None),
            };
            let mut value = || -> Result<String, String> {
                match &inline {
                    Some(v) => Ok(v.clone()),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {flag}")),
                }
            };
            match flag.as_str() {
                "--format" => format = OutputFormat::from_str(&value()?)?,
                "--verify-limit" => verify_limit = parse_verify_limit(&value()?)?,
                _ => return Err(format!("unrecognized argument '{flag}'")),
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin scale_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest shorter-input length compared with brute force (default: 16, max: {EXHAUSTIVE_LIMIT})
  -h, --help                    Print this help message

Examples:
  cargo run --release --bin scale_probe
  cargo run --release --bin scale_probe -- --format table --verify-limit 12
"
        );
    }
}

fn parse_verify_limit(value: &str) -> Result<usize, String> {
    let limit = value
        .parse::<usize>()
        .map_err(|_| "verify limit must be a non-negative integer".to_string())?;
    if limit > EXHAUSTIVE_LIMIT {
        return Err(format!("verify limit must not exceed {EXHAUSTIVE_LIMIT}"));
    }
    Ok(limit)
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

struct Measurement {
    scenario: &'static str,
    size_desc: String,
    wall_s: f64,
    rss_delta_kib: u64,
    optimum: Option<u32>,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VerificationStatus {
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
        }
    }
}

type Verdict = (Option<u32>, VerificationStatus, Option<String>);

fn run_clcs_small(options: &Options, sys: &mut System) -> Vec<Measurement> {
    const SIZES: &[usize] = &[4, 6, 8, 10, 12, 14, 16, 18, 20];
    const CONSTRAINT_LEN: usize = 3;
    SIZES
        .iter()
        .enumerate()
        .map(|(idx, &len)| {
            eprint!("      [{}/{}] n=m={len}, r={CONSTRAINT_LEN}... ", idx + 1, SIZES.len());
            let mut rng = StdRng::seed_from_u64(0xC1C5 ^ len as u64);
            let a = random_dna(&mut rng, len);
            let b = random_dna(&mut rng, len);
            let c = random_dna(&mut rng, CONSTRAINT_LEN);
            let m = measure("clcs_small", format!("len={len},r={CONSTRAINT_LEN}"), sys, || {
                solve_and_verify(&a, &b, &c, options)
            });
            report(&m);
            m
        })
        .collect()
}

fn run_clcs_scaling(options: &Options, sys: &mut System) -> Vec<Measurement> {
    const SIZES: &[usize] = &[64, 128, 256, 512, 1024];
    const CONSTRAINT_LENS: &[usize] = &[2, 8, 32];
    let total = SIZES.len() * CONSTRAINT_LENS.len();
    let mut out = Vec::with_capacity(total);
    for &len in SIZES {
        for &r in CONSTRAINT_LENS {
            eprint!("      [{}/{}] n=m={len}, r={r}... ", out.len() + 1, total);
            let a = deterministic_dna(len);
            let b = deterministic_dna_offset(len, 1);
            let c = deterministic_dna_offset(r, 2);
            let m = measure("clcs", format!("len={len},r={r}"), sys, || {
                solve_and_verify(&a, &b, &c, options)
            });
            report(&m);
            out.push(m);
        }
    }
    out
}

fn run_plain_lcs(options: &Options, sys: &mut System) -> Vec<Measurement> {
    const SIZES: &[usize] = &[256, 512, 1024, 2048];
    SIZES
        .iter()
        .enumerate()
        .map(|(idx, &len)| {
            eprint!("      [{}/{}] n=m={len}, r=0... ", idx + 1, SIZES.len());
            let mut rng = StdRng::seed_from_u64(len as u64);
            let a = random_dna(&mut rng, len);
            let b = random_dna(&mut rng, len);
            let m = measure("lcs_degenerate", format!("len={len}"), sys, || {
                let (optimum, status, detail) = solve_and_verify(&a, &b, &[], options);
                if status == VerificationStatus::Failed {
                    return (optimum, status, detail);
                }
                let baseline = full_lcs_len(&a, &b);
                if optimum == Some(baseline) {
                    (optimum, VerificationStatus::Passed, None)
                } else {
                    (
                        optimum,
                        VerificationStatus::Failed,
                        Some(format!("expected LCS {baseline}, got {optimum:?}")),
                    )
                }
            });
            report(&m);
            m
        })
        .collect()
}

fn solve_and_verify(a: &[u8], b: &[u8], c: &[u8], options: &Options) -> Verdict {
    let (optimum, solution) = match ClcsEngine::new(ClcsProblem::new(a, b, c)).run() {
        Ok(out) => out,
        Err(err) => return (None, VerificationStatus::Failed, Some(format!("solve failed: {err}"))),
    };

    let expected_len = optimum.unwrap_or(0) as usize;
    if solution.len() != expected_len {
        return (
            optimum,
            VerificationStatus::Failed,
            Some(format!("solution has {} symbols, optimum is {optimum:?}", solution.len())),
        );
    }
    if optimum.is_some() && !is_feasible(a, b, c, &solution) {
        return (
            optimum,
            VerificationStatus::Failed,
            Some("solution is not feasible".to_string()),
        );
    }
    if a.len().min(b.len()) <= options.verify_limit {
        let brute = exhaustive_optimum(a, b, c).map(|len| len as u32);
        if brute != optimum {
            return (
                optimum,
                VerificationStatus::Failed,
                Some(format!("brute force found {brute:?}, table has {optimum:?}")),
            );
        }
    }
    (optimum, VerificationStatus::Passed, None)
}

fn report(m: &Measurement) {
    eprintln!(
        "{} optimum={}, time={:.3}s, status={}",
        m.verification_status.icon(),
        optimum_label(m.optimum),
        m.wall_s,
        m.verification_status.label()
    );
}

fn optimum_label(optimum: Option<u32>) -> String {
    optimum.map_or_else(|| "infeasible".to_string(), |len| len.to_string())
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("{}", "=".repeat(80));
    eprintln!("Summary");
    eprintln!("{}", "=".repeat(80));

    let failed: Vec<&Measurement> = measurements
        .iter()
        .filter(|m| m.verification_status == VerificationStatus::Failed)
        .collect();
    let total = measurements.len().max(1);
    eprintln!("  Runs: {}", measurements.len());
    eprintln!(
        "  ✓ Passed: {} ({:.1}%)",
        measurements.len() - failed.len(),
        100.0 * (measurements.len() - failed.len()) as f64 / total as f64
    );
    eprintln!("  ✗ Failed: {}", failed.len());
    eprintln!("  Brute-force comparison up to {} symbols", options.verify_limit);
    eprintln!();

    for m in &failed {
        eprintln!("  ✗ {} ({})", m.scenario, m.size_desc);
        if let Some(ref detail) = m.verification_detail {
            eprintln!("     {detail}");
        }
    }

    let mut scenarios: Vec<&'static str> = measurements.iter().map(|m| m.scenario).collect();
    scenarios.dedup();
    for scenario in scenarios {
        let runs: Vec<&Measurement> = measurements
            .iter()
            .filter(|m| m.scenario == scenario)
            .collect();
        let max_time = runs.iter().map(|m| m.wall_s).fold(0.0, f64::max);
        let max_mem = runs.iter().map(|m| m.rss_delta_kib).max().unwrap_or(0);
        eprintln!(
            "  {scenario}: {} runs, max time {max_time:.3}s, max RSS delta {max_mem} KiB",
            runs.len()
        );
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn measure<F>(
    scenario: &'static str,
    size_desc: String,
    sys: &mut System,
    compute: F,
) -> Measurement
where
    F: FnOnce() -> Verdict,
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let (optimum, status, detail) = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        size_desc,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        optimum,
        verification_status: status,
        verification_detail: detail,
    }
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,size_desc,optimum,wall_s,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},\"{}\",{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.size_desc,
            optimum_label(m.optimum),
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let col1 = measurements
        .iter()
        .map(|m| m.scenario.len())
        .chain(["scenario".len()])
        .max()
        .unwrap_or(0);
    let col2 = measurements
        .iter()
        .map(|m| m.size_desc.len())
        .chain(["size".len()])
        .max()
        .unwrap_or(0);

    println!(
        "{:<col1$}  {:<col2$}  {:>10}  {:>10}  {:>14}  {:>8}  detail",
        "scenario", "size", "optimum", "wall_s", "rss_delta_kib", "status"
    );
    println!(
        "{:-<col1$}  {:-<col2$}  {:-<10}  {:-<10}  {:-<14}  {:-<8}  {:-<6}",
        "", "", "", "", "", "", ""
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:<col2$}  {:>10}  {:>10.3}  {:>14}  {:>8}  {}",
            m.scenario,
            m.size_desc,
            optimum_label(m.optimum),
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            m.verification_detail.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = match m.verification_detail.as_ref() {
            Some(d) => format!("\"{}\"", d.replace('"', "'")),
            None => "null".to_string(),
        };
        let optimum = m.optimum.map_or_else(|| "null".to_string(), |v| v.to_string());
        println!(
            "  {{\"scenario\":\"{}\",\"size\":\"{}\",\"optimum\":{},\"wall_s\":{:.3},\"rss_delta_kib\":{},\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.scenario,
            m.size_desc,
            optimum,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail,
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        Some(process) => process.memory() / 1024,
        None => 0,
    }
}

fn deterministic_dna(len: usize) -> Vec<u8> {
    deterministic_dna_offset(len, 0)
}

fn deterministic_dna_offset(len: usize, offset: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|i| ALPHABET[(i + offset) % ALPHABET.len()])
        .collect()
}

fn random_dna(rng: &mut StdRng, len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx]
        })
        .collect()
}

fn full_lcs_len(s: &[u8], t: &[u8]) -> u32 {
    let m = t.len();
    let mut prev = vec![0u32; m + 1];
    let mut curr = vec![0u32; m + 1];
    for &cs in s {
        for j in 1..=m {
            let diag = prev[j - 1] + u32::from(cs == t[j - 1]);
            curr[j] = prev[j].max(curr[j - 1]).max(diag);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_dna_is_reproducible_per_seed() {
        let a = random_dna(&mut StdRng::seed_from_u64(7), 64);
        let b = random_dna(&mut StdRng::seed_from_u64(7), 64);
        let c = random_dna(&mut StdRng::seed_from_u64(8), 64);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|ch| b"ACGT".contains(ch)));
    }

    #[test]
    fn plain_lcs_baseline_agrees_with_engine() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = random_dna(&mut rng, 40);
        let b = random_dna(&mut rng, 40);
        let (optimum, _) = ClcsEngine::new(ClcsProblem::new(&a, &b, &[])).run().unwrap();
        assert_eq!(optimum, Some(full_lcs_len(&a, &b)));
    }
}
