//! Form faults raised during a rep attempt.

use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

/// A single form violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Fault {
    BackRounded = 0,
    HeelRaised = 1,
    ShallowHipDrop = 2,
    ElbowDrift = 3,
    BodyLineBroken = 4,
    TorsoLean = 5,
    ElbowsForward = 6,
    KneePastToes = 7,
}

impl Fault {
    pub const ALL: [Fault; 8] = [
        Fault::BackRounded,
        Fault::HeelRaised,
        Fault::ShallowHipDrop,
        Fault::ElbowDrift,
        Fault::BodyLineBroken,
        Fault::TorsoLean,
        Fault::ElbowsForward,
        Fault::KneePastToes,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of latched faults. Faults are only ever added; the owner replaces
/// the whole set when an attempt ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaultSet(u8);

impl FaultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, fault: Fault) {
        self.0 |= fault.bit();
    }

    pub fn contains(&self, fault: Fault) -> bool {
        self.0 & fault.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Fault> + '_ {
        Fault::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

impl FromIterator<Fault> for FaultSet {
    fn from_iter<I: IntoIterator<Item = Fault>>(iter: I) -> Self {
        let mut set = FaultSet::new();
        for fault in iter {
            set.insert(fault);
        }
        set
    }
}

impl Serialize for FaultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
