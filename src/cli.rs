//! Run configuration for the binaries.
//!
//! Values are layered: built-in defaults, then `MATCH3_*` environment
//! variables, then command-line flags.

use anyhow::{anyhow, Result};

use crate::core::{BoardConfig, Palette, WildRule};
use crate::types::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Swaps the simulator plays when `--swaps` is not given
pub const DEFAULT_SWAPS: u32 = 20;

/// How `Wild` pieces take part in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildMode {
    /// No wild pieces are generated
    Off,
    On(WildRule),
}

impl WildMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "off" | "none" | "0" | "false" => Some(WildMode::Off),
            other => WildRule::from_str(other).map(WildMode::On),
        }
    }
}

/// Which binary the flags are for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Play,
    Sim,
}

impl Tool {
    fn name(self) -> &'static str {
        match self {
            Tool::Play => "tui-match3",
            Tool::Sim => "match3-sim",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub width: u8,
    pub height: u8,
    pub colors: u8,
    pub wild: WildMode,
    pub seed: u32,
    /// Simulator only
    pub swaps: u32,
    /// Append JSON lines of board events here when set
    pub log_path: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            colors: palette.size,
            wild: WildMode::Off,
            seed: 1,
            swaps: DEFAULT_SWAPS,
            log_path: None,
        }
    }
}

impl RunConfig {
    /// Defaults overridden by `MATCH3_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`RunConfig::from_env`] with a custom variable source.
    ///
    /// Unparseable values fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let width = lookup("MATCH3_WIDTH")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.width);
        let height = lookup("MATCH3_HEIGHT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.height);
        let colors = lookup("MATCH3_COLORS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.colors);
        let wild = lookup("MATCH3_WILD")
            .and_then(|s| WildMode::from_str(&s))
            .unwrap_or(defaults.wild);
        let seed = lookup("MATCH3_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let log_path = lookup("MATCH3_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            width,
            height,
            colors,
            wild,
            seed,
            swaps: defaults.swaps,
            log_path,
        }
    }

    /// Apply command-line flags (program name already stripped)
    pub fn parse_args(mut self, args: &[String], tool: Tool) -> Result<Self> {
        let name = tool.name();
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--width" | "--height" | "--colors" | "--wild" | "--seed" | "--log" => {}
                "--swaps" if tool == Tool::Sim => {}
                other => {
                    return Err(anyhow!("{}: unknown argument: {}", name, other));
                }
            }
            i += 1;
            let v = args
                .get(i)
                .ok_or_else(|| anyhow!("{}: missing value for {}", name, flag))?;
            match flag {
                "--width" => self.width = parse_num(name, flag, v)?,
                "--height" => self.height = parse_num(name, flag, v)?,
                "--colors" => self.colors = parse_num(name, flag, v)?,
                "--seed" => self.seed = parse_num(name, flag, v)?,
                "--swaps" => self.swaps = parse_num(name, flag, v)?,
                "--wild" => {
                    self.wild = WildMode::from_str(v)
                        .ok_or_else(|| anyhow!("{}: invalid --wild value: {}", name, v))?;
                }
                _ => {
                    let path = v.trim();
                    self.log_path = (!path.is_empty()).then(|| path.to_string());
                }
            }
            i += 1;
        }
        Ok(self)
    }

    /// Board configuration for these settings (validated when the board is built)
    pub fn to_board_config(&self) -> BoardConfig {
        let config = BoardConfig::default()
            .with_size(self.width, self.height)
            .with_seed(self.seed);
        match self.wild {
            WildMode::Off => config.with_palette(self.colors, false),
            WildMode::On(rule) => config.with_palette(self.colors, true).with_wild_rule(rule),
        }
    }
}

fn parse_num<T: std::str::FromStr>(name: &str, flag: &str, v: &str) -> Result<T> {
    v.parse::<T>()
        .map_err(|_| anyhow!("{}: invalid {} value: {}", name, flag, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_args_applies_flags() {
        let cfg = RunConfig::default()
            .parse_args(
                &args(&["--width", "5", "--height", "7", "--wild", "strict", "--seed", "9"]),
                Tool::Play,
            )
            .unwrap();
        assert_eq!(cfg.width, 5);
        assert_eq!(cfg.height, 7);
        assert_eq!(cfg.wild, WildMode::On(WildRule::Strict));
        assert_eq!(cfg.seed, 9);
    }

    #[test]
    fn parse_args_uses_defaults() {
        let cfg = RunConfig::default().parse_args(&[], Tool::Sim).unwrap();
        assert_eq!(cfg, RunConfig::default());
    }

    #[test]
    fn parse_args_rejects_bad_input() {
        let err = RunConfig::default()
            .parse_args(&args(&["--width"]), Tool::Play)
            .unwrap_err();
        assert!(err.to_string().contains("missing value for --width"));

        let err = RunConfig::default()
            .parse_args(&args(&["--colors", "many"]), Tool::Play)
            .unwrap_err();
        assert!(err.to_string().contains("invalid --colors value"));

        let err = RunConfig::default()
            .parse_args(&args(&["--swaps", "3"]), Tool::Play)
            .unwrap_err();
        assert!(err.to_string().contains("unknown argument: --swaps"));
    }

    #[test]
    fn from_lookup_reads_and_trims() {
        let cfg = RunConfig::from_lookup(|key| match key {
            "MATCH3_WIDTH" => Some("6".to_string()),
            "MATCH3_WILD" => Some("joker".to_string()),
            "MATCH3_SEED" => Some("not a number".to_string()),
            "MATCH3_LOG_PATH" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(cfg.width, 6);
        assert_eq!(cfg.height, DEFAULT_HEIGHT);
        assert_eq!(cfg.wild, WildMode::On(WildRule::Joker));
        assert_eq!(cfg.seed, 1);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn board_config_carries_palette() {
        let cfg = RunConfig {
            colors: 4,
            wild: WildMode::On(WildRule::Joker),
            ..RunConfig::default()
        };
        let board = cfg.to_board_config();
        assert_eq!(board.palette, Palette::new(4, true));
        assert_eq!(board.wild_rule, WildRule::Joker);
        assert!(board.validate().is_ok());
    }
}
