//! conv1d-helpers: classic CLI args and small utilities.

pub mod probe;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use conv1d_augment::{ConvMode, KernelStrategy};

#[derive(Debug, Parser)]
#[command(name = "conv1d", version, about = "Convolve two sequences", long_about = None)]
pub struct CommonCli {
    /// First sequence, comma separated
    #[arg(long, default_value = "1,2,3", allow_hyphen_values = true)]
    pub a: String,
    /// Second sequence, comma separated
    #[arg(long, default_value = "0,1,0.5", allow_hyphen_values = true)]
    pub b: String,
    /// Output window: full, same or valid
    #[arg(long, default_value_t = ConvMode::Full)]
    pub mode: ConvMode,
    /// Inner-loop scan: direct or bounded
    #[arg(long, default_value_t = KernelStrategy::Bounded)]
    pub strategy: KernelStrategy,
    /// Optional interactive CLI dialog (old-school)
    #[arg(long, action = ArgAction::SetTrue)]
    pub dialog: bool,
}

/// Dialog answer meaning "empty sequence"; a blank answer keeps the current value.
pub const EMPTY_SEQUENCE: &str = "-";

/// Parse a comma separated list of floats. Blank input is the empty sequence.
pub fn parse_sequence(s: &str) -> Result<Vec<f64>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(str::trim)
        .map(|tok| {
            tok.parse::<f64>()
                .with_context(|| format!("invalid number '{tok}' in sequence"))
        })
        .collect()
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<String> {
    write!(out, "{label}: ")?;
    out.flush()?;
    let mut s = String::new();
    input.read_line(&mut s)?;
    Ok(s.trim().to_string())
}

impl CommonCli {
    pub fn sequences(&self) -> Result<(Vec<f64>, Vec<f64>)> {
        Ok((parse_sequence(&self.a)?, parse_sequence(&self.b)?))
    }

    pub fn parse_or_dialog() -> Result<Self> {
        let mut args = Self::parse();
        if args.dialog {
            let stdin = std::io::stdin();
            args.dialog_with(&mut stdin.lock(), &mut std::io::stdout())?;
        }
        Ok(args)
    }

    /// Interactive prompts; a blank answer keeps the shown value.
    pub fn dialog_with<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<()> {
        for (name, slot) in [("A", &mut self.a), ("B", &mut self.b)] {
            let label = format!("{name} (comma separated, '{EMPTY_SEQUENCE}' for empty) [{slot}]");
            match prompt(input, out, &label)?.as_str() {
                "" => {}
                EMPTY_SEQUENCE => slot.clear(),
                answer => {
                    parse_sequence(answer)?;
                    *slot = answer.to_string();
                }
            }
        }
        let answer = prompt(input, out, &format!("Mode (full/same/valid) [{}]", self.mode))?;
        if !answer.is_empty() {
            self.mode = answer.parse()?;
        }
        let answer = prompt(input, out, &format!("Strategy (direct/bounded) [{}]", self.strategy))?;
        if !answer.is_empty() {
            self.strategy = answer.parse()?;
        }
        Ok(())
    }
}
