use crate::params::SynthesisParameters;
use crate::sweep::ParameterRanges;
use clap::{Args, ValueEnum};
use std::fmt::Display;
use std::str::FromStr;

/// Parse a comma separated list of values (e.g., "50,100,150")
fn parse_list<T: FromStr>(s: &str) -> Result<Vec<T>, String>
where
    T::Err: Display,
{
    let values = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<T>()
                .map_err(|e| format!("Invalid list value '{}': {}", part, e))
        })
        .collect::<Result<Vec<T>, String>>()?;

    if values.is_empty() {
        return Err("List must contain at least one value".to_string());
    }
    Ok(values)
}

/// Wrapper for a comma separated value list that clap treats as one argument
#[derive(Debug, Clone, PartialEq)]
pub struct ValueList<T>(pub Vec<T>);

impl<T: FromStr> FromStr for ValueList<T>
where
    T::Err: Display,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_list(s).map(ValueList)
    }
}

impl<T: Display> Display for ValueList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// How gathers and sweeps spread work across cores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExecutionMode {
    /// One thread, deterministic artifact numbering - Default
    #[default]
    Sequential,
    /// Rayon worker pool
    Parallel,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::Sequential => write!(f, "sequential"),
            ExecutionMode::Parallel => write!(f, "parallel"),
        }
    }
}

/// Parameters of a single gather
#[derive(Args, Debug, Clone)]
pub struct SynthesisArgs {
    /// Number of traces (gather columns)
    #[arg(long, default_value_t = 100)]
    pub num_traces: usize,

    /// Number of time samples per trace (gather rows)
    #[arg(long, default_value_t = 1000)]
    pub num_time_samples: usize,

    /// Constant offset in samples added to every trace's start row
    #[arg(long, default_value_t = 50)]
    pub time_shift: usize,

    /// Chirp start frequency in Hz
    #[arg(long, default_value_t = 5.0)]
    pub freq_low: f64,

    /// Chirp end frequency in Hz
    #[arg(long, default_value_t = 20.0)]
    pub freq_high: f64,

    /// Receiver spacing in meters
    #[arg(long, default_value_t = 5.0)]
    pub dx: f64,

    /// Sampling interval in seconds
    #[arg(long, default_value_t = 0.002)]
    pub dt: f64,

    /// Ground-roll propagation velocity in m/s
    #[arg(long, default_value_t = 100.0)]
    pub velocity: f64,

    /// Per-trace amplitude decay factor
    #[arg(long, default_value_t = 0.92)]
    pub distance_degradation: f64,

    /// Taper sharpness; larger values give shorter edge ramps
    #[arg(long, default_value_t = 4.0)]
    pub win_scale: f64,

    /// Chirp duration growth per trace in seconds
    #[arg(long, default_value_t = 0.04)]
    pub duration_ratio: f64,
}

impl SynthesisArgs {
    pub fn to_parameters(&self) -> SynthesisParameters {
        SynthesisParameters {
            num_traces: self.num_traces,
            num_time_samples: self.num_time_samples,
            time_shift: self.time_shift,
            freq_low: self.freq_low,
            freq_high: self.freq_high,
            dx: self.dx,
            dt: self.dt,
            velocity: self.velocity,
            distance_degradation: self.distance_degradation,
            win_scale: self.win_scale,
            duration_ratio: self.duration_ratio,
        }
    }
}

/// Sweep value lists; any list given here replaces the one from the config
/// file or the built-in default
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Trace counts (default: 50,100,150)
    #[arg(long)]
    pub num_traces: Option<ValueList<usize>>,

    /// Time sample counts (default: 500,1000,1500)
    #[arg(long)]
    pub num_time_samples: Option<ValueList<usize>>,

    /// Time shifts in samples (default: 30,50,70)
    #[arg(long)]
    pub time_shift: Option<ValueList<usize>>,

    /// Chirp start frequencies in Hz (default: 3,5,7)
    #[arg(long)]
    pub freq_low: Option<ValueList<f64>>,

    /// Chirp end frequencies in Hz (default: 15,20,25)
    #[arg(long)]
    pub freq_high: Option<ValueList<f64>>,

    /// Receiver spacings in meters (default: 3,5,7)
    #[arg(long)]
    pub dx: Option<ValueList<f64>>,

    /// Sampling intervals in seconds (default: 0.001,0.002,0.003)
    #[arg(long)]
    pub dt: Option<ValueList<f64>>,

    /// Velocities in m/s (default: 80,100,120)
    #[arg(long)]
    pub velocity: Option<ValueList<f64>>,

    /// Decay factors (default: 0.9,0.92,0.94)
    #[arg(long)]
    pub distance_degradation: Option<ValueList<f64>>,

    /// Window scales (default: 2,4,6)
    #[arg(long)]
    pub win_scale: Option<ValueList<f64>>,

    /// Duration ratios (default: 0.02,0.04,0.06)
    #[arg(long)]
    pub duration_ratio: Option<ValueList<f64>>,
}

impl RangeArgs {
    /// Overwrite every list of `ranges` that was given on the command line
    pub fn apply_to(&self, ranges: &mut ParameterRanges) {
        fn replace<T: Clone>(slot: &mut Vec<T>, value: &Option<ValueList<T>>) {
            if let Some(ValueList(values)) = value {
                *slot = values.clone();
            }
        }

        replace(&mut ranges.num_traces, &self.num_traces);
        replace(&mut ranges.num_time_samples, &self.num_time_samples);
        replace(&mut ranges.time_shift, &self.time_shift);
        replace(&mut ranges.freq_low, &self.freq_low);
        replace(&mut ranges.freq_high, &self.freq_high);
        replace(&mut ranges.dx, &self.dx);
        replace(&mut ranges.dt, &self.dt);
        replace(&mut ranges.velocity, &self.velocity);
        replace(&mut ranges.distance_degradation, &self.distance_degradation);
        replace(&mut ranges.win_scale, &self.win_scale);
        replace(&mut ranges.duration_ratio, &self.duration_ratio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct GatherCli {
        #[command(flatten)]
        synthesis: SynthesisArgs,
    }

    #[derive(Parser, Debug)]
    struct SweepCli {
        #[command(flatten)]
        ranges: RangeArgs,
    }

    #[test]
    fn test_list_parsing() {
        assert_eq!(parse_list::<usize>("50,100,150").unwrap(), vec![50, 100, 150]);
        assert_eq!(parse_list::<f64>(" 0.001, 0.002 ").unwrap(), vec![0.001, 0.002]);
        assert_eq!(parse_list::<usize>("7").unwrap(), vec![7]);

        assert!(parse_list::<usize>("").is_err());
        assert!(parse_list::<usize>("1,x,3").is_err());
        assert!(parse_list::<usize>("-1").is_err());
    }

    #[test]
    fn test_value_list_display_round_trips() {
        let list: ValueList<f64> = "0.9,0.92".parse().unwrap();
        assert_eq!(list.to_string(), "0.9,0.92");
    }

    #[test]
    fn test_synthesis_defaults_match_parameters() {
        let cli = GatherCli::parse_from(["synth"]);
        assert_eq!(cli.synthesis.to_parameters(), SynthesisParameters::default());
    }

    #[test]
    fn test_synthesis_overrides() {
        let cli = GatherCli::parse_from(["synth", "--num-traces", "12", "--win-scale", "6"]);
        let params = cli.synthesis.to_parameters();
        assert_eq!(params.num_traces, 12);
        assert_eq!(params.win_scale, 6.0);
        assert_eq!(params.dt, 0.002);
    }

    #[test]
    fn test_range_args_replace_only_given_lists() {
        let cli = SweepCli::parse_from(["sweep", "--dt", "0.002", "--num-traces", "10,20"]);
        let mut ranges = ParameterRanges::default();
        cli.ranges.apply_to(&mut ranges);

        assert_eq!(ranges.dt, vec![0.002]);
        assert_eq!(ranges.num_traces, vec![10, 20]);
        assert_eq!(ranges.velocity, ParameterRanges::default().velocity);
    }

    #[test]
    fn test_range_args_reject_bad_list() {
        assert!(SweepCli::try_parse_from(["sweep", "--dx", "3,,abc"]).is_err());
    }

    #[test]
    fn test_execution_mode_display() {
        assert_eq!(ExecutionMode::default(), ExecutionMode::Sequential);
        assert_eq!(ExecutionMode::Parallel.to_string(), "parallel");
    }
}
