use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use roomgen::mix_seed_stream;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Config(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Config(seed) | Self::Generated(seed) => seed,
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            Self::Cli(_) => "command line",
            Self::Config(_) => "configuration",
            Self::Generated(_) => "generated",
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64) ^ ((now_nanos >> 64) as u64) ^ pid.rotate_left(17);
    mix_seed_stream(entropy, counter)
}

/// Command line beats the configuration file; entropy fills in when neither names a seed.
pub fn resolve_seed(cli_seed: Option<u64>, config_seed: Option<u64>, generated: u64) -> SeedChoice {
    match (cli_seed, config_seed) {
        (Some(seed), _) => SeedChoice::Cli(seed),
        (None, Some(seed)) => SeedChoice::Config(seed),
        (None, None) => SeedChoice::Generated(generated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_seed_takes_precedence() {
        assert_eq!(resolve_seed(Some(4), Some(9), 77), SeedChoice::Cli(4));
        assert_eq!(resolve_seed(None, Some(9), 77), SeedChoice::Config(9));
        assert_eq!(resolve_seed(None, None, 77), SeedChoice::Generated(77));
        assert_eq!(SeedChoice::Generated(77).value(), 77);
    }

    #[test]
    fn runtime_seeds_differ_between_calls() {
        assert_ne!(generate_runtime_seed(), generate_runtime_seed());
    }
}
