use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::search::SearchReport;
use crate::simulate::CandidateResult;

/// Writes everything to both sinks; used to mirror stdout into a file.
pub struct Tee<A, B> {
    primary: A,
    mirror: B,
}

impl<A: Write, B: Write> Tee<A, B> {
    pub fn new(primary: A, mirror: B) -> Self {
        Self { primary, mirror }
    }
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.primary.write_all(buf)?;
        self.mirror.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.primary.flush()?;
        self.mirror.flush()
    }
}

/// Shortest round-trip float text, laid out like Python's `repr`:
/// positional for exponents in `-4..16`, otherwise `1.5e+16` / `1e-07`.
pub fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let sci = format!("{:e}", value.abs());
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return format!("{value:?}");
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return format!("{value:?}");
    };

    if (-4..16).contains(&exp) {
        let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
        let point = exp + 1;
        let body = if point <= 0 {
            format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
        } else if point as usize >= digits.len() {
            format!("{digits}{}.0", "0".repeat(point as usize - digits.len()))
        } else {
            let (whole, frac) = digits.split_at(point as usize);
            format!("{whole}.{frac}")
        };
        format!("{sign}{body}")
    } else {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        format!("{sign}{mantissa}e{exp_sign}{:02}", exp.unsigned_abs())
    }
}

pub fn format_result(result: &CandidateResult) -> String {
    format!(
        "({}, {}, {})",
        float_repr(result.position),
        float_repr(result.velocity),
        result.inputs
    )
}

/// Text report: results best-last, then the run counters. `limit` keeps only
/// the last (best) `limit` results.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &SearchReport,
    limit: Option<usize>,
) -> io::Result<()> {
    let skip = limit
        .map(|limit| report.results.len().saturating_sub(limit))
        .unwrap_or(0);

    writeln!(out, "done, outputting (useful inputs are at the bottom)")?;
    writeln!(out)?;
    for result in &report.results[skip..] {
        writeln!(out, "{}", format_result(result))?;
    }
    writeln!(out)?;
    writeln!(out, "frames: {}", report.frames)?;
    writeln!(out, "total permutations: {}", report.total_permutations)?;
    writeln!(out, "shown permutations: {}", report.shown_permutations)?;
    writeln!(out, "seed: {:#018x}", report.seed)?;
    writeln!(out, "processing time: {:.3} s", report.processing_time_s)?;
    out.flush()
}

pub fn write_summary(path: &Path, report: &SearchReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }
    fs::write(
        path,
        serde_json::to_vec_pretty(report).context("failed to serialize summary json")?,
    )
    .with_context(|| format!("failed writing {}", path.display()))
}
