//! Timer modes and chart periods.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};


/// Countdown mode of the Pomodoro timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum TimerMode {
    #[serde(rename = "pomodoro")]
    #[value(name = "pomodoro", alias = "focus")]
    Focus,
    #[serde(rename = "short_break")]
    #[value(name = "short_break")]
    ShortBreak,
    #[serde(rename = "long_break")]
    #[value(name = "long_break")]
    LongBreak,
}


impl TimerMode {
    pub const ALL: [TimerMode; 3] = [TimerMode::Focus, TimerMode::ShortBreak, TimerMode::LongBreak];

    /// Name sent to the server as `sessionType`.
    pub fn wire_name(self) -> &'static str {
        match self {
            TimerMode::Focus => "pomodoro",
            TimerMode::ShortBreak => "short_break",
            TimerMode::LongBreak => "long_break",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Focus => "Pomodoro",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    /// Minutes used when the configured value is missing or invalid.
    pub fn default_minutes(self) -> u32 {
        match self {
            TimerMode::Focus => 25,
            TimerMode::ShortBreak => 5,
            TimerMode::LongBreak => 15,
        }
    }

    pub fn is_focus(self) -> bool {
        self == TimerMode::Focus
    }
}


impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}


impl FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pomodoro" | "focus" => Ok(TimerMode::Focus),
            "short_break" => Ok(TimerMode::ShortBreak),
            "long_break" => Ok(TimerMode::LongBreak),
            other => Err(format!("unknown timer mode: {other}")),
        }
    }
}


/// Aggregation granularity of the bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Period {
    #[default]
    Week,
    Month,
    Year,
}


impl Period {
    pub const ALL: [Period; 3] = [Period::Week, Period::Month, Period::Year];

    pub fn description(self) -> &'static str {
        match self {
            Period::Week => "Focus minutes per day this week",
            Period::Month => "Focus minutes per day this month",
            Period::Year => "Focus minutes per month this year",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Week => "This Week",
            Period::Month => "This Month",
            Period::Year => "This Year",
        }
    }

    /// Next period in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Period::Week => Period::Month,
            Period::Month => Period::Year,
            Period::Year => Period::Week,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        for mode in TimerMode::ALL {
            assert_eq!(mode.wire_name().parse::<TimerMode>().unwrap(), mode);
        }
        assert_eq!("focus".parse::<TimerMode>().unwrap(), TimerMode::Focus);
        assert!("nap".parse::<TimerMode>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&TimerMode::ShortBreak).unwrap();
        assert_eq!(json, "\"short_break\"");
    }

    #[test]
    fn test_period_cycle() {
        assert_eq!(Period::Week.next(), Period::Month);
        assert_eq!(Period::Year.next(), Period::Week);
    }
}
