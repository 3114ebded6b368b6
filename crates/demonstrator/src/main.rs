//! TCA9537 demonstrator
//!
//! Drives an emulated TCA9537 through the driver and prints the resulting
//! pin table.
//!
//! Run with: cargo run -p demonstrator -- --directions ooii --pin 1 --state on -v

// Desktop tool: unwrap/expect/panic acceptable outside the driver crate.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tca953x::bus::ExclusiveBus;
use tca953x::mocks::EmulatedI2c;
use tca953x::registers::decode_polarities;
use tca953x::{Direction, Pin, Tca9537};

#[derive(Parser)]
#[command(name = "demonstrator")]
#[command(about = "Drive an emulated TCA9537 I/O expander", long_about = None)]
#[command(version)]
struct Cli {
    /// Pin directions, one character per pin starting at P0 (`o` output, `i` input)
    #[arg(long, default_value = "iiii", value_parser = parse_directions)]
    directions: [Direction; 4],

    /// Polarity inversion mask; bit n inverts pin n
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=15))]
    invert: u8,

    /// Pin to drive (requires --state)
    #[arg(long, requires = "state")]
    pin: Option<u8>,

    /// Level to drive --pin to
    #[arg(long, value_enum, requires = "pin")]
    state: Option<State>,

    /// Log every register access
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum State {
    On,
    Off,
}

fn parse_directions(s: &str) -> Result<[Direction; 4], String> {
    let chars: Vec<char> = s.chars().collect();
    let [p0, p1, p2, p3] = chars.as_slice() else {
        return Err(format!("expected 4 characters, got {}", chars.len()));
    };
    let mut directions = [Direction::Input; 4];
    for (slot, c) in directions.iter_mut().zip([p0, p1, p2, p3]) {
        *slot = match c.to_ascii_lowercase() {
            'o' => Direction::Output,
            'i' => Direction::Input,
            other => return Err(format!("unknown direction '{other}', use 'o' or 'i'")),
        };
    }
    Ok(directions)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    tracing::debug!("start");

    let mut expander = Tca9537::new(ExclusiveBus::new(EmulatedI2c::with_tca9537()));
    expander
        .reset_device_registers()
        .context("resetting device registers")?;

    expander
        .set_pin_directions(cli.directions)
        .context("writing configuration register")?;
    expander
        .set_pin_polarities(decode_polarities(cli.invert))
        .context("writing polarity inversion register")?;

    if let (Some(pin), Some(state)) = (cli.pin, cli.state) {
        let active = matches!(state, State::On);
        let applied = expander
            .set_pin_state(pin, active)
            .with_context(|| format!("driving pin {pin}"))?;
        if applied {
            tracing::info!("pin {pin} set {}", if active { "active" } else { "inactive" });
        } else {
            bail!("pin {pin} is configured as an input and cannot be driven");
        }
    }

    let directions = expander.get_pin_directions()?;
    let polarities = expander.get_pin_polarities()?;

    println!("pin  direction  polarity  state");
    for pin in Pin::ALL {
        let index = usize::from(pin.index());
        let state = expander.get_pin_state(pin.index())?;
        println!(
            "P{}   {:<9}  {:<8}  {}",
            pin.index(),
            directions.get(index).map_or("?", |d| d.as_str()),
            polarities.get(index).map_or("?", |p| p.as_str()),
            if state { "active" } else { "inactive" },
        );
    }

    tracing::debug!("exit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_directions_accepts_mixed_case() {
        assert_eq!(
            parse_directions("oIio").unwrap(),
            [
                Direction::Output,
                Direction::Input,
                Direction::Input,
                Direction::Output
            ]
        );
    }

    #[test]
    fn parse_directions_rejects_wrong_length() {
        assert!(parse_directions("ooi").is_err());
        assert!(parse_directions("ooiio").is_err());
    }

    #[test]
    fn parse_directions_rejects_unknown_characters() {
        assert!(parse_directions("oxio").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
