// focus.rs - Focus-stage selector
//
// The control panel can narrow the animation to one stage of the cycle.
// A focus maps to a Schedule: which sub-updates run each tick and how
// hard the focused stage is pushed.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Focus {
    #[default]
    All,
    Evaporation,
    Condensation,
    Precipitation,
    Collection,
    Groundwater,
}

/// How landed drops that miss the inland region are split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Infiltration {
    /// Configured surface chance.
    Configured,
    /// Every such drop stays on the surface.
    Never,
    /// Every such drop soaks in.
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    pub water: bool,
    pub evaporation: bool,
    pub transpiration: bool,
    pub vapor: bool,
    pub condensation: bool,
    pub clouds: bool,
    pub rain: bool,
    pub precipitation: bool,
    pub groundwater: bool,

    // Multipliers on the configured rates
    pub evaporation_boost: f32,
    pub condensation_boost: f32,
    pub rain_boost: f32,

    pub infiltration: Infiltration,

    /// Rain-driven foci run no vapor, so the sky is fed directly: clouds
    /// are held full and part of the ocean stays parked as their water.
    pub replenish: bool,
}

const FULL: Schedule = Schedule {
    water: true,
    evaporation: true,
    transpiration: true,
    vapor: true,
    condensation: true,
    clouds: true,
    rain: true,
    precipitation: true,
    groundwater: true,
    evaporation_boost: 1.0,
    condensation_boost: 1.0,
    rain_boost: 1.0,
    infiltration: Infiltration::Configured,
    replenish: false,
};

const BOOST: f32 = 3.0;

impl Focus {
    pub const ALL: [Focus; 6] = [
        Focus::All,
        Focus::Evaporation,
        Focus::Condensation,
        Focus::Precipitation,
        Focus::Collection,
        Focus::Groundwater,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Focus::All => "all",
            Focus::Evaporation => "evaporation",
            Focus::Condensation => "condensation",
            Focus::Precipitation => "precipitation",
            Focus::Collection => "collection",
            Focus::Groundwater => "groundwater",
        }
    }

    pub fn schedule(self) -> Schedule {
        match self {
            Focus::All => FULL,
            Focus::Evaporation => Schedule {
                transpiration: false,
                condensation: false,
                clouds: false,
                rain: false,
                precipitation: false,
                groundwater: false,
                evaporation_boost: BOOST,
                ..FULL
            },
            Focus::Condensation => Schedule {
                rain: false,
                precipitation: false,
                groundwater: false,
                evaporation_boost: BOOST,
                condensation_boost: BOOST,
                ..FULL
            },
            Focus::Precipitation => Schedule {
                evaporation: false,
                transpiration: false,
                vapor: false,
                condensation: false,
                groundwater: false,
                rain_boost: BOOST,
                replenish: true,
                ..FULL
            },
            Focus::Collection => Schedule {
                evaporation: false,
                transpiration: false,
                vapor: false,
                condensation: false,
                groundwater: false,
                infiltration: Infiltration::Never,
                replenish: true,
                ..FULL
            },
            Focus::Groundwater => Schedule {
                evaporation: false,
                transpiration: false,
                vapor: false,
                condensation: false,
                infiltration: Infiltration::Always,
                replenish: true,
                ..FULL
            },
        }
    }

    /// Cloud water content right after switching to this focus, as a
    /// fraction of the maximum.
    pub fn cloud_fill(self) -> f32 {
        if self.schedule().replenish { 1.0 } else { 0.0 }
    }
}

impl Schedule {
    /// Surface chance for a non-inland landing under this schedule.
    pub fn surface_chance(&self, configured: f32) -> f32 {
        match self.infiltration {
            Infiltration::Configured => configured,
            Infiltration::Never => 1.0,
            Infiltration::Always => 0.0,
        }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Focus {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Focus::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownFocus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("all", Focus::All)]
    #[test_case("evaporation", Focus::Evaporation)]
    #[test_case("Condensation", Focus::Condensation)]
    #[test_case(" precipitation ", Focus::Precipitation)]
    #[test_case("collection", Focus::Collection)]
    #[test_case("GROUNDWATER", Focus::Groundwater)]
    fn parses(name: &str, expected: Focus) {
        assert_eq!(name.parse::<Focus>().unwrap(), expected);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "transmogrify".parse::<Focus>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFocus(ref s) if s == "transmogrify"));
    }

    #[test]
    fn display_round_trips() {
        for f in Focus::ALL {
            assert_eq!(f.to_string().parse::<Focus>().unwrap(), f);
        }
    }

    #[test]
    fn evaporation_focus_keeps_clouds_still() {
        let s = Focus::Evaporation.schedule();
        assert!(s.evaporation && s.vapor);
        assert!(!s.condensation && !s.clouds && !s.precipitation);
    }

    #[test]
    fn collection_focus_keeps_rain_on_the_surface() {
        let s = Focus::Collection.schedule();
        assert_eq!(s.surface_chance(0.6), 1.0);
        assert_eq!(Focus::Groundwater.schedule().surface_chance(0.6), 0.0);
        assert_eq!(Focus::All.schedule().surface_chance(0.6), 0.6);
    }

    #[test_case(Focus::All, false)]
    #[test_case(Focus::Evaporation, false)]
    #[test_case(Focus::Condensation, false)]
    #[test_case(Focus::Precipitation, true)]
    #[test_case(Focus::Collection, true)]
    #[test_case(Focus::Groundwater, true)]
    fn rain_driven_foci_feed_the_sky(focus: Focus, fed: bool) {
        let s = focus.schedule();
        assert_eq!(s.replenish, fed);
        // Fed foci never run vapor, so nothing else could fill the clouds
        assert_eq!(s.replenish, !s.vapor);
        assert_eq!(focus.cloud_fill(), if fed { 1.0 } else { 0.0 });
    }
}
