//! Slot classification: bucketing a flat ad list into named placement slots.
//!
//! Column slots are keyed `{SIDE}_{N}` (`LEFT_SIDE_3`), center slots by the
//! side name alone (`CENTER_TOP`). Ads without a position, or whose position
//! names no known slot, are dropped without error.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ads::{Ad, PageType, Position, Side};
use crate::error::CoreError;

/// Lowest numbered slot in a column.
pub const MIN_SLOT_POSITION: u8 = 1;

/// Highest numbered slot in a column.
pub const MAX_SLOT_POSITION: u8 = 6;

// ---------------------------------------------------------------------------
// Slot keys
// ---------------------------------------------------------------------------

/// Name of a placement region that shows one ad at a time.
///
/// Ordering follows page layout: left column top to bottom, right column top
/// to bottom, then `CENTER_TOP` and `CENTER_BOTTOM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotKey {
    Column { side: Side, position: u8 },
    Center(Side),
}

impl SlotKey {
    /// A numbered column slot. `None` for center sides or out-of-range numbers.
    pub fn column(side: Side, position: u8) -> Option<Self> {
        let in_range = (MIN_SLOT_POSITION..=MAX_SLOT_POSITION).contains(&position);
        (!side.is_center() && in_range).then_some(Self::Column { side, position })
    }

    /// A center singleton slot. `None` for column sides.
    pub fn center(side: Side) -> Option<Self> {
        side.is_center().then_some(Self::Center(side))
    }

    /// The slot an ad booked at `position` belongs to, if any.
    pub fn for_position(position: &Position) -> Option<Self> {
        if position.side.is_center() {
            return Self::center(position.side);
        }
        let number = u8::try_from(position.position?).ok()?;
        Self::column(position.side, number)
    }

    pub fn side(&self) -> Side {
        match self {
            Self::Column { side, .. } | Self::Center(side) => *side,
        }
    }

    /// Every slot a page can render, in layout order.
    pub fn all() -> Vec<SlotKey> {
        let mut keys = Vec::with_capacity(2 * MAX_SLOT_POSITION as usize + 2);
        for side in [Side::LeftSide, Side::RightSide] {
            keys.extend(
                (MIN_SLOT_POSITION..=MAX_SLOT_POSITION)
                    .map(|position| Self::Column { side, position }),
            );
        }
        keys.push(Self::Center(Side::CenterTop));
        keys.push(Self::Center(Side::CenterBottom));
        keys
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column { side, position } => write!(f, "{side}_{position}"),
            Self::Center(side) => f.write_str(side.as_str()),
        }
    }
}

impl FromStr for SlotKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("Invalid slot key '{s}'"));

        if let Ok(side) = s.parse::<Side>() {
            return Self::center(side).ok_or_else(invalid);
        }

        let (side, number) = s.rsplit_once('_').ok_or_else(invalid)?;
        let side: Side = side.parse().map_err(|_| invalid())?;
        let number: u8 = number.parse().map_err(|_| invalid())?;
        Self::column(side, number).ok_or_else(invalid)
    }
}

impl Serialize for SlotKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

fn booked_on(position: &Position, side: Side, page_type: Option<PageType>) -> bool {
    position.side == side && page_type.is_none_or(|pt| position.page_type == pt)
}

/// Group the ads booked into a column (`LEFT_SIDE` / `RIGHT_SIDE`) by slot
/// number, restricted to `page_type` when given.
///
/// Returns an empty map for center sides; use [`classify_center`] for those.
/// Input order is preserved within each bucket.
pub fn classify_side(ads: &[Ad], side: Side, page_type: Option<PageType>) -> BTreeMap<u8, Vec<Ad>> {
    let mut buckets: BTreeMap<u8, Vec<Ad>> = BTreeMap::new();
    if side.is_center() {
        return buckets;
    }

    for ad in ads {
        let Some(position) = ad.position() else {
            continue;
        };
        if !booked_on(position, side, page_type) {
            continue;
        }
        if let Some(SlotKey::Column { position, .. }) = SlotKey::for_position(position) {
            buckets.entry(position).or_default().push(ad.clone());
        }
    }

    buckets
}

/// The ads booked into a center region, restricted to `page_type` when given.
///
/// Returns an empty list for column sides.
pub fn classify_center(ads: &[Ad], side: Side, page_type: Option<PageType>) -> Vec<Ad> {
    if !side.is_center() {
        return Vec::new();
    }

    ads.iter()
        .filter(|ad| {
            ad.position()
                .is_some_and(|position| booked_on(position, side, page_type))
        })
        .cloned()
        .collect()
}

/// Every occupied slot of a page and its candidate ads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotLayout {
    slots: BTreeMap<SlotKey, Vec<Ad>>,
}

impl SlotLayout {
    pub fn get(&self, key: &SlotKey) -> &[Ad] {
        self.slots.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Occupied slots in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (&SlotKey, &[Ad])> {
        self.slots.iter().map(|(key, ads)| (key, ads.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<SlotKey, Vec<Ad>> {
        self.slots
    }
}

/// Resolve every slot of a page in one pass.
pub fn classify_all(ads: &[Ad], page_type: Option<PageType>) -> SlotLayout {
    let mut slots: BTreeMap<SlotKey, Vec<Ad>> = BTreeMap::new();

    for ad in ads {
        let Some(position) = ad.position() else {
            continue;
        };
        if page_type.is_some_and(|pt| position.page_type != pt) {
            continue;
        }
        if let Some(key) = SlotKey::for_position(position) {
            slots.entry(key).or_default().push(ad.clone());
        }
    }

    SlotLayout { slots }
}
