use crate::global::{DIE_MAX, DIE_MIN, MAX_TARGET};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum RollError {
    OutOfRange(u8),
}

impl Error for RollError {}
impl fmt::Display for RollError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RollError::OutOfRange(v) => write!(f, "die value {:?} out of range", v),
        }
    }
}

/// One set of rolled die faces. Immutable once built; all the combinatorial
/// queries for target availability live here.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct DiceRoll(Vec<u8>);

impl DiceRoll {
    pub fn new(values: Vec<u8>) -> Result<Self, RollError> {
        for &v in values.iter() {
            if v < DIE_MIN || v > DIE_MAX {
                return Err(RollError::OutOfRange(v));
            }
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// How many dice show exactly `target`. Only meaningful for single-die
    /// targets (<= 6).
    pub fn count_target(&self, target: u8) -> usize {
        self.0.iter().filter(|&&v| v == target).count()
    }

    /// All combinations of dice from this roll that make `target`, each die
    /// used at most once. Single-die targets give one singleton per matching
    /// die, in roll order. Double-die targets (7..=12) pair distinct die
    /// positions summing to `target`: scan index pairs i < j and commit the
    /// first unused pair found for each i, so counts stay deterministic and
    /// bounded by half the dice.
    pub fn combinations_for_target(&self, target: u8) -> Vec<Vec<u8>> {
        if target <= DIE_MAX {
            return self
                .0
                .iter()
                .filter(|&&v| v == target)
                .map(|&v| vec![v])
                .collect();
        }
        let n = self.0.len();
        let mut combinations = Vec::new();
        let mut used = vec![false; n];
        for i in 0..n {
            if used[i] {
                continue;
            }
            for j in (i + 1)..n {
                if used[j] {
                    continue;
                }
                if self.0[i] + self.0[j] == target {
                    combinations.push(vec![self.0[i], self.0[j]]);
                    used[i] = true;
                    used[j] = true;
                    // next i after committing a pair
                    break;
                }
            }
        }
        combinations
    }

    /// Every target this roll can make, mapped to how many times it can be
    /// made at once. Each die backs at most one combination per target, but
    /// targets are counted independently, so one die may contribute to
    /// several different targets' counts.
    pub fn available_targets(&self) -> BTreeMap<u8, u8> {
        let mut result: BTreeMap<u8, u8> = BTreeMap::new();
        // single-die targets count by face frequency
        for &v in self.0.iter() {
            *result.entry(v).or_insert(0) += 1;
        }
        // double-die targets use the same disjoint pairing as
        // combinations_for_target, tracked per target
        let mut used_for_target: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
        let n = self.0.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let total = self.0[i] + self.0[j];
                if total <= DIE_MAX || total > MAX_TARGET {
                    continue;
                }
                let used = used_for_target.entry(total).or_insert_with(Vec::new);
                if used.contains(&i) || used.contains(&j) {
                    continue;
                }
                *result.entry(total).or_insert(0) += 1;
                used.push(i);
                used.push(j);
            }
        }
        result
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let faces: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        write!(f, "Roll<{}>", faces.join(" "))
    }
}
