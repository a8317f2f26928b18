use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use forestops_core::map::Coordinate;
use forestops_service::device::{FixedLocation, ScriptedPicker, SimulatedShare};

use crate::screens::{Devices, Timing};

#[derive(Debug, Clone, Parser)]
#[command(name = "forestops", about = "Forestry operations console")]
pub struct Config {
    /// Where tracing output goes. The terminal belongs to the UI.
    #[arg(long, env = "FORESTOPS_LOG", default_value = "forestops.log")]
    pub log_file: PathBuf,

    /// Emergency resource refresh period (seconds)
    #[arg(long, env = "FORESTOPS_RESOURCE_REFRESH", default_value = "30")]
    pub resource_refresh_secs: u64,

    /// System health sampling period (seconds)
    #[arg(long, env = "FORESTOPS_HEALTH_REFRESH", default_value = "5")]
    pub health_refresh_secs: u64,

    /// Simulated download time (milliseconds)
    #[arg(long, default_value = "2000")]
    pub download_delay_ms: u64,

    /// Refuse the location permission prompt
    #[arg(long)]
    pub deny_location: bool,

    /// Reported device latitude
    #[arg(long, default_value = "37.78825", allow_negative_numbers = true)]
    pub latitude: f64,

    /// Reported device longitude
    #[arg(long, default_value = "-122.4324", allow_negative_numbers = true)]
    pub longitude: f64,

    /// File names the upload picker hands out, in order. Once exhausted the
    /// picker reports a cancel.
    #[arg(long = "pick-file")]
    pub pick_file: Vec<String>,

    /// Make the share sheet fail
    #[arg(long)]
    pub share_unavailable: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_from(["forestops"])
    }
}

impl Config {
    pub fn devices(&self) -> Devices {
        let location = if self.deny_location {
            FixedLocation::denied()
        } else {
            FixedLocation::new(Coordinate::new(self.latitude, self.longitude))
        };
        Devices {
            location: Box::new(location),
            picker: Box::new(ScriptedPicker::new(self.pick_file.clone())),
            share: Box::new(SimulatedShare::new(!self.share_unavailable)),
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            resource_refresh: Duration::from_secs(self.resource_refresh_secs.max(1)),
            health_refresh: Duration::from_secs(self.health_refresh_secs.max(1)),
            download_delay: Duration::from_millis(self.download_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.log_file, PathBuf::from("forestops.log"));
        assert_eq!(c.timing().health_refresh, Duration::from_secs(5));
        assert_eq!(c.timing().download_delay, Duration::from_millis(2000));
        assert!(!c.deny_location);
        assert!(c.pick_file.is_empty());
    }

    #[test]
    fn flags_override() {
        let c = Config::parse_from([
            "forestops",
            "--deny-location",
            "--pick-file",
            "a.csv",
            "--pick-file",
            "b.pdf",
            "--longitude",
            "-120.5",
        ]);
        assert!(c.deny_location);
        assert_eq!(c.pick_file, vec!["a.csv", "b.pdf"]);
        assert_eq!(c.longitude, -120.5);
    }
}
