//! Distance-bucketed guidance text.
//!
//! There is no path network, so instructions are a pure function of the
//! remaining distance, the bearing to the destination and (when the sensor
//! reports one) the direction of travel.

use nav_core::compass_point;

/// Upper bounds of the instruction buckets, ascending.
pub const ARRIVE_MAX_M:   f64 = 10.0;
pub const APPROACH_MAX_M: f64 = 50.0;
pub const CONTINUE_MAX_M: f64 = 100.0;
pub const TURN_MAX_M:     f64 = 200.0;

/// Relative bearings within this many degrees of dead ahead count as straight.
const STRAIGHT_CONE_DEG: f64 = 20.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Maneuver {
    Arrive,
    Approach,
    Continue,
    Turn,
    Head,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    pub maneuver:   Maneuver,
    pub text:       String,
    pub distance_m: f64,
}

/// Pick the instruction for `distance_m`; the first bucket that fits wins.
///
/// `bearing_deg` is the bearing from the user to the destination and
/// `heading_deg` the user's direction of travel.
pub fn instruction_for(
    distance_m:  f64,
    bearing_deg: f64,
    heading_deg: Option<f64>,
    destination: &str,
) -> Instruction {
    let name = if destination.trim().is_empty() { "your destination" } else { destination };
    let (maneuver, text) = if distance_m <= ARRIVE_MAX_M {
        (Maneuver::Arrive, format!("You have arrived at {name}"))
    } else if distance_m <= APPROACH_MAX_M {
        (Maneuver::Approach, "You are approaching your destination".to_owned())
    } else if distance_m <= CONTINUE_MAX_M {
        (Maneuver::Continue, format!("Continue straight towards {name}"))
    } else if distance_m <= TURN_MAX_M {
        let text = match heading_deg.map(|h| turn_side(h, bearing_deg)) {
            Some(Some(side)) => format!("Turn {side} at the next pathway"),
            _ => "Upcoming turn at the next pathway".to_owned(),
        };
        (Maneuver::Turn, text)
    } else {
        (Maneuver::Head, format!("Head {} towards {name}", compass_point(bearing_deg)))
    };
    Instruction { maneuver, text, distance_m }
}

/// `"left"` or `"right"` depending on which side of the current heading the
/// destination lies; `None` when it is roughly straight ahead.
pub fn turn_side(heading_deg: f64, bearing_deg: f64) -> Option<&'static str> {
    let relative = (bearing_deg - heading_deg).rem_euclid(360.0);
    if relative <= STRAIGHT_CONE_DEG || relative >= 360.0 - STRAIGHT_CONE_DEG {
        None
    } else if relative < 180.0 {
        Some("right")
    } else {
        Some("left")
    }
}
