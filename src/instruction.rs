//! Turn instructions for passing through a junction from one road to another.
//!
//! Every function here is a pure function of the object and the pair of roads.

use std::fmt;

use crate::data::object::{MapObject, ObjectKind};
use crate::errors::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    ContinueRenamed(String),
    ContinueAhead(String),
    TurnLeft(String),
    TurnRight(String),
    /// Exits are counted clockwise from the entry arm, not counting it.
    Roundabout { exit: usize },
    ExitLeft(String),
    CrossLevelCrossing(String),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::ContinueRenamed(road) => {
                write!(f, "Continue onto renamed road {}", road)
            }
            Instruction::ContinueAhead(road) => write!(f, "Continue ahead onto {}", road),
            Instruction::TurnLeft(road) => write!(f, "Turn left onto {}", road),
            Instruction::TurnRight(road) => write!(f, "Turn right onto {}", road),
            Instruction::Roundabout { exit } => {
                write!(f, "Enter roundabout and take exit {}", exit)
            }
            Instruction::ExitLeft(road) => write!(f, "Exit left onto {}", road),
            Instruction::CrossLevelCrossing(road) => {
                write!(f, "Cross the level crossing onto {}", road)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Left,
    Right,
    Ahead,
}

impl Turn {
    fn onto(self, road: &str) -> Instruction {
        let road = road.to_string();
        match self {
            Turn::Left => Instruction::TurnLeft(road),
            Turn::Right => Instruction::TurnRight(road),
            Turn::Ahead => Instruction::ContinueAhead(road),
        }
    }
}

/// Derives the instruction for entering `object` from `in_road` and leaving
/// onto `out_road`.
///
/// Junctions and roundabouts need both roads to be among the object's
/// connections. Street switches, motorway junctions and level crossings only
/// lead one way, so the traversal is not inspected.
pub fn instruction_for(object: &MapObject, in_road: &str, out_road: &str) -> Result<Instruction> {
    let roads = &object.roads;
    match &object.kind {
        ObjectKind::StreetSwitch => Ok(Instruction::ContinueRenamed(out_road.to_string())),
        ObjectKind::RtJunction | ObjectKind::TJunction => {
            let layout = [arm(roads, 0)?, arm(roads, 1)?, arm(roads, 2)?];
            Ok(t_junction(layout, in_road, out_road)?.onto(out_road))
        }
        ObjectKind::LtJunction => {
            // [branch, bar, bar] read from the other end of the bar.
            let layout = [arm(roads, 2)?, arm(roads, 1)?, arm(roads, 0)?];
            Ok(t_junction(layout, in_road, out_road)?.onto(out_road))
        }
        ObjectKind::XJunction => Ok(x_junction(roads, in_road, out_road)?.onto(out_road)),
        ObjectKind::Roundabout => Ok(Instruction::Roundabout {
            exit: roundabout_exit(object, in_road, out_road)?,
        }),
        ObjectKind::MotorJunction { .. } => Ok(Instruction::ExitLeft(out_road.to_string())),
        ObjectKind::TrainCrossing | ObjectKind::Other(_) => {
            Ok(Instruction::CrossLevelCrossing(out_road.to_string()))
        }
    }
}

fn arm(roads: &[String], index: usize) -> Result<&str> {
    roads
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| Error::malformed(format!("junction has no arm {}", index)))
}

fn position(roads: &[&str], road: &str) -> Result<usize> {
    roads
        .iter()
        .position(|&r| r == road)
        .ok_or_else(|| Error::malformed(format!("{} does not meet this junction", road)))
}

/// `layout` is `[bar, bar, branch]` with the branch on the right when
/// travelling from the first road to the second.
fn t_junction(layout: [&str; 3], in_road: &str, out_road: &str) -> Result<Turn> {
    let from = position(&layout, in_road)?;
    let to = position(&layout, out_road)?;
    match (from, to) {
        (0, 1) | (1, 0) => Ok(Turn::Ahead),
        (0, 2) | (2, 1) => Ok(Turn::Right),
        (1, 2) | (2, 0) => Ok(Turn::Left),
        _ => Err(Error::malformed(format!("cannot turn back onto {} at a T-junction", out_road))),
    }
}

/// Roads are listed `[north, west, east, south]`.
fn x_junction(roads: &[String], in_road: &str, out_road: &str) -> Result<Turn> {
    const COMPASS: [usize; 4] = [0, 3, 1, 2];
    let layout = [arm(roads, 0)?, arm(roads, 1)?, arm(roads, 2)?, arm(roads, 3)?];
    let from = COMPASS[position(&layout, in_road)?];
    let to = COMPASS[position(&layout, out_road)?];
    match (to + 4 - from) % 4 {
        1 => Ok(Turn::Left),
        2 => Ok(Turn::Ahead),
        3 => Ok(Turn::Right),
        _ => Err(Error::malformed(format!("cannot turn back onto {} at a crossroads", out_road))),
    }
}

/// Counts the arms passed, clockwise, between entering and leaving. Leaving by
/// the entry arm goes all the way round.
fn roundabout_exit(object: &MapObject, in_road: &str, out_road: &str) -> Result<usize> {
    let roads = &object.roads;
    let entry = object
        .position(in_road)
        .ok_or_else(|| Error::malformed(format!("{} does not meet this roundabout", in_road)))?;
    let count = roads.len();
    (1..=count)
        .find(|step| roads[(entry + step) % count] == out_road)
        .ok_or_else(|| Error::malformed(format!("{} does not leave this roundabout", out_road)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn object(kind: ObjectKind, roads: &[&str]) -> MapObject {
        MapObject {
            roads: roads.iter().map(|r| r.to_string()).collect(),
            kind,
        }
    }

    fn say(object: &MapObject, in_road: &str, out_road: &str) -> String {
        object.instruction(in_road, out_road).unwrap().to_string()
    }

    #[test]
    fn street_switch_ignores_the_entry() {
        let switch = object(ObjectKind::StreetSwitch, &["Old Road", "New Road"]);
        assert_eq!(say(&switch, "Old Road", "New Road"), "Continue onto renamed road New Road");
        assert_eq!(say(&switch, "anything", "Elsewhere"), "Continue onto renamed road Elsewhere");
    }

    #[test]
    fn right_t_junction() {
        let t = object(ObjectKind::RtJunction, &["A", "B", "C"]);
        assert_eq!(say(&t, "A", "B"), "Continue ahead onto B");
        assert_eq!(say(&t, "A", "C"), "Turn right onto C");
        assert_eq!(say(&t, "B", "A"), "Continue ahead onto A");
        assert_eq!(say(&t, "B", "C"), "Turn left onto C");
        assert_eq!(say(&t, "C", "A"), "Turn left onto A");
        assert_eq!(say(&t, "C", "B"), "Turn right onto B");
    }

    #[test]
    fn collapsed_t_junction_reads_like_right_t() {
        let rt = object(ObjectKind::RtJunction, &["A", "B", "C"]);
        let t = object(ObjectKind::TJunction, &["A", "B", "C"]);
        for (from, to) in [("A", "B"), ("A", "C"), ("B", "A"), ("B", "C"), ("C", "A"), ("C", "B")] {
            assert_eq!(rt.instruction(from, to).unwrap(), t.instruction(from, to).unwrap());
        }
    }

    #[test]
    fn left_t_junction() {
        let t = object(ObjectKind::LtJunction, &["Side", "West", "East"]);
        assert_eq!(say(&t, "Side", "West"), "Turn right onto West");
        assert_eq!(say(&t, "Side", "East"), "Turn left onto East");
        assert_eq!(say(&t, "West", "Side"), "Turn left onto Side");
        assert_eq!(say(&t, "West", "East"), "Continue ahead onto East");
        assert_eq!(say(&t, "East", "Side"), "Turn right onto Side");
        assert_eq!(say(&t, "East", "West"), "Continue ahead onto West");
    }

    #[test]
    fn crossroads() {
        let x = object(ObjectKind::XJunction, &["N", "W", "E", "S"]);
        let expected = [
            ("N", "W", "Turn right onto W"),
            ("N", "E", "Turn left onto E"),
            ("N", "S", "Continue ahead onto S"),
            ("W", "N", "Turn left onto N"),
            ("W", "E", "Continue ahead onto E"),
            ("W", "S", "Turn right onto S"),
            ("E", "N", "Turn right onto N"),
            ("E", "W", "Continue ahead onto W"),
            ("E", "S", "Turn left onto S"),
            ("S", "N", "Continue ahead onto N"),
            ("S", "W", "Turn left onto W"),
            ("S", "E", "Turn right onto E"),
        ];
        for (from, to, said) in expected {
            assert_eq!(say(&x, from, to), said, "{} -> {}", from, to);
        }
    }

    #[test]
    fn roundabout_counts_exits_clockwise() {
        let r = object(ObjectKind::Roundabout, &["N", "E", "S", "W"]);
        assert_eq!(say(&r, "N", "E"), "Enter roundabout and take exit 1");
        assert_eq!(say(&r, "N", "S"), "Enter roundabout and take exit 2");
        assert_eq!(say(&r, "E", "N"), "Enter roundabout and take exit 3");
        assert_eq!(say(&r, "W", "N"), "Enter roundabout and take exit 1");
    }

    #[test]
    fn roundabout_back_to_the_entry_goes_all_the_way_round() {
        let r = object(ObjectKind::Roundabout, &["N", "E", "S", "W"]);
        assert_eq!(r.instruction("S", "S").unwrap(), Instruction::Roundabout { exit: 4 });
    }

    #[test]
    fn motorway_and_level_crossing() {
        let m = object(ObjectKind::MotorJunction { number: 14 }, &["M1", "A421"]);
        assert_eq!(say(&m, "M1", "A421"), "Exit left onto A421");
        let c = object(ObjectKind::TrainCrossing, &["Station Road", "Mill Lane"]);
        assert_eq!(say(&c, "Station Road", "Mill Lane"), "Cross the level crossing onto Mill Lane");
        let other = object(ObjectKind::Other("ford".into()), &["A", "B"]);
        assert_eq!(say(&other, "A", "B"), "Cross the level crossing onto B");
    }

    #[test]
    fn unknown_roads_are_malformed() {
        let r = object(ObjectKind::Roundabout, &["N", "E", "S", "W"]);
        assert_eq!(r.instruction("Z", "N").unwrap_err().kind, ErrorKind::MalformedInput);
        assert_eq!(r.instruction("N", "Z").unwrap_err().kind, ErrorKind::MalformedInput);

        let t = object(ObjectKind::RtJunction, &["A", "B", "C"]);
        assert_eq!(t.instruction("D", "A").unwrap_err().kind, ErrorKind::MalformedInput);
        assert_eq!(t.instruction("A", "D").unwrap_err().kind, ErrorKind::MalformedInput);

        let x = object(ObjectKind::XJunction, &["N", "W", "E", "S"]);
        assert_eq!(x.instruction("Q", "N").unwrap_err().kind, ErrorKind::MalformedInput);
    }

    #[test]
    fn u_turns_at_junctions_are_malformed() {
        let t = object(ObjectKind::LtJunction, &["A", "B", "C"]);
        assert_eq!(t.instruction("B", "B").unwrap_err().kind, ErrorKind::MalformedInput);
        let x = object(ObjectKind::XJunction, &["N", "W", "E", "S"]);
        assert_eq!(x.instruction("E", "E").unwrap_err().kind, ErrorKind::MalformedInput);
    }

    #[test]
    fn short_junctions_are_malformed_not_panics() {
        let t = object(ObjectKind::RtJunction, &["A", "B"]);
        assert_eq!(t.instruction("A", "B").unwrap_err().kind, ErrorKind::MalformedInput);
        let r = object(ObjectKind::Roundabout, &[]);
        assert_eq!(r.instruction("A", "B").unwrap_err().kind, ErrorKind::MalformedInput);
    }
}
