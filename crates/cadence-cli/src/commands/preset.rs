//! User preset management.

use clap::Subcommand;

use cadence_core::phrase::format_clock;
use cadence_core::{FilePresetStore, PresetRepository, Sequence, Step};

#[derive(Subcommand)]
pub enum PresetAction {
    /// List saved presets
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show a preset's steps
    Show {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Save a preset
    Save {
        name: String,
        /// Comma-separated steps, e.g. "Bloom=30,First pour=60"
        #[arg(long)]
        steps: String,
    },
    /// Delete a preset
    Delete { name: String },
}

pub fn run(action: PresetAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = FilePresetStore::open()?;
    match action {
        PresetAction::List { json } => {
            let names = store.list();
            if json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
        PresetAction::Show { name, json } => {
            let sequence = store
                .get(&name)
                .ok_or_else(|| format!("preset '{name}' not found"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sequence)?);
            } else {
                for (idx, step) in sequence.steps().iter().enumerate() {
                    println!("  {}. {}  {}", idx + 1, step.name, format_clock(step.seconds));
                }
                println!("total {}", format_clock(sequence.total_seconds()));
            }
        }
        PresetAction::Save { name, steps } => {
            let sequence = parse_steps(&steps)?;
            store.save(&name, sequence)?;
            println!("saved '{name}'");
        }
        PresetAction::Delete { name } => {
            store.delete(&name)?;
            println!("deleted '{name}'");
        }
    }
    Ok(())
}

/// Parse "name=seconds" pairs separated by commas. Seconds are coerced the
/// same way preset files are: floored, clamped to zero.
fn parse_steps(spec: &str) -> Result<Sequence, String> {
    let mut steps = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (name, seconds) = part
            .rsplit_once('=')
            .ok_or_else(|| format!("step '{part}' must be name=seconds"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("step '{part}' has an empty name"));
        }
        let seconds = seconds
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid seconds in '{part}'"))?;
        let seconds = if seconds.is_finite() && seconds > 0.0 {
            seconds.floor() as u64
        } else {
            0
        };
        steps.push(Step::new(name, seconds));
    }
    Ok(Sequence::new(steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_with_equals_signs() {
        let seq = parse_steps("in=out=30, Rest =60").unwrap();
        assert_eq!(seq.steps()[0].name, "in=out");
        assert_eq!(seq.steps()[0].seconds, 30);
        assert_eq!(seq.steps()[1].name, "Rest");
        assert_eq!(seq.steps()[1].seconds, 60);
    }

    #[test]
    fn coerces_fractional_and_negative_seconds() {
        let seq = parse_steps("a=30.9,b=-5").unwrap();
        assert_eq!(seq.steps()[0].seconds, 30);
        assert_eq!(seq.steps()[1].seconds, 0);
    }

    #[test]
    fn rejects_malformed_steps() {
        assert!(parse_steps("no seconds").is_err());
        assert!(parse_steps("=30").is_err());
        assert!(parse_steps("a=lots").is_err());
    }

    #[test]
    fn skips_empty_segments() {
        let seq = parse_steps("a=1,,b=2,").unwrap();
        assert_eq!(seq.len(), 2);
    }
}
