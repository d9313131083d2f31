use std::fmt;

use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{Error, Result};
use crate::instruction::{self, Instruction};

const STREETSWITCH_TAG: &str = "streetswitch";
const RTJUNCTION_TAG: &str = "rtjunction";
const LTJUNCTION_TAG: &str = "ltjunction";
const TJUNCTION_TAG: &str = "tjunction";
const XJUNCTION_TAG: &str = "xjunction";
const ROUNDABOUT_TAG: &str = "roundabout";
const MOTORJUNCTION_TAG: &str = "motorjunction";
const TRAINCROSSING_TAG: &str = "traincrossing";

/// What kind of junction or feature an object is.
///
/// The order of an object's connected roads encodes its physical layout,
/// and each kind reads that order differently:
///
/// * `StreetSwitch`: `[before, after]`, a road that changes name.
/// * `RtJunction`: `[bar, bar, branch]`, branch on the right going from the
///   first road to the second.
/// * `LtJunction`: `[branch, bar, bar]`, branch on the left going from the
///   second road to the third.
/// * `TJunction`: the single T-junction of the collapsed schema, laid out
///   like `RtJunction`.
/// * `XJunction`: `[north, west, east, south]`.
/// * `Roundabout`: every arm, clockwise, starting anywhere.
/// * `MotorJunction`: `[motorway, slip road]`.
/// * `TrainCrossing`: `[before, after]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    StreetSwitch,
    RtJunction,
    LtJunction,
    TJunction,
    XJunction,
    Roundabout,
    MotorJunction { number: u32 },
    TrainCrossing,
    /// A tag this crate does not know. Traversed like a level crossing.
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    Any,
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
            Arity::Any => write!(f, "any number of"),
        }
    }
}

impl ObjectKind {
    /// Parses a tag without a junction number. `motorjunction` needs one, so it
    /// is handled by the deserializer.
    fn from_simple_tag(tag: &str) -> ObjectKind {
        match tag {
            STREETSWITCH_TAG => ObjectKind::StreetSwitch,
            RTJUNCTION_TAG => ObjectKind::RtJunction,
            LTJUNCTION_TAG => ObjectKind::LtJunction,
            TJUNCTION_TAG => ObjectKind::TJunction,
            XJUNCTION_TAG => ObjectKind::XJunction,
            ROUNDABOUT_TAG => ObjectKind::Roundabout,
            TRAINCROSSING_TAG => ObjectKind::TrainCrossing,
            other => ObjectKind::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            ObjectKind::StreetSwitch => STREETSWITCH_TAG,
            ObjectKind::RtJunction => RTJUNCTION_TAG,
            ObjectKind::LtJunction => LTJUNCTION_TAG,
            ObjectKind::TJunction => TJUNCTION_TAG,
            ObjectKind::XJunction => XJUNCTION_TAG,
            ObjectKind::Roundabout => ROUNDABOUT_TAG,
            ObjectKind::MotorJunction { .. } => MOTORJUNCTION_TAG,
            ObjectKind::TrainCrossing => TRAINCROSSING_TAG,
            ObjectKind::Other(tag) => tag,
        }
    }

    /// How many connected roads an object of this kind must have.
    pub fn arity(&self) -> Arity {
        match self {
            ObjectKind::StreetSwitch
            | ObjectKind::MotorJunction { .. }
            | ObjectKind::TrainCrossing => Arity::Exactly(2),
            ObjectKind::RtJunction | ObjectKind::LtJunction | ObjectKind::TJunction => {
                Arity::Exactly(3)
            }
            ObjectKind::XJunction => Arity::Exactly(4),
            ObjectKind::Roundabout => Arity::AtLeast(2),
            ObjectKind::Other(_) => Arity::Any,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A junction or feature, stored as `[roads, type]` or, for motorway
/// junctions, `[roads, "motorjunction", number]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapObject {
    pub roads: Vec<String>,
    pub kind: ObjectKind,
}

impl MapObject {
    /// Builds an object, rejecting a road count that does not fit its kind.
    pub fn new(roads: Vec<String>, kind: ObjectKind) -> Result<MapObject> {
        let object = MapObject { roads, kind };
        object.check_arity()?;
        Ok(object)
    }

    pub fn check_arity(&self) -> Result<()> {
        let arity = self.kind.arity();
        if arity.accepts(self.roads.len()) {
            Ok(())
        } else {
            Err(Error::malformed(format!(
                "{} connects {} roads, got {}",
                self.kind,
                arity,
                self.roads.len()
            )))
        }
    }

    pub fn position(&self, road: &str) -> Option<usize> {
        self.roads.iter().position(|r| r == road)
    }

    pub fn instruction(&self, in_road: &str, out_road: &str) -> Result<Instruction> {
        instruction::instruction_for(self, in_road, out_road)
    }
}

impl Serialize for MapObject {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let number = match self.kind {
            ObjectKind::MotorJunction { number } => Some(number),
            _ => None,
        };
        let mut seq = serializer.serialize_seq(Some(if number.is_some() { 3 } else { 2 }))?;
        seq.serialize_element(&self.roads)?;
        seq.serialize_element(self.kind.tag())?;
        if let Some(number) = number {
            seq.serialize_element(&number)?;
        }
        seq.end()
    }
}

struct MapObjectVisitor;

impl<'de> Visitor<'de> for MapObjectVisitor {
    type Value = MapObject;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a list of [roads, type] or [roads, \"motorjunction\", number]")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let roads: Vec<String> = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let tag: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;

        let (kind, len) = if tag == MOTORJUNCTION_TAG {
            let number: u32 = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(2, &self))?;
            (ObjectKind::MotorJunction { number }, 3)
        } else {
            (ObjectKind::from_simple_tag(&tag), 2)
        };

        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(len + 1, &self));
        }
        Ok(MapObject { roads, kind })
    }
}

impl<'de> Deserialize<'de> for MapObject {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(MapObjectVisitor)
    }
}
