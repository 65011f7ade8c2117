/*!
 * Placement Policies
 * First-fit, best-fit and worst-fit block selection
 */

use super::traits::PlacementPolicy;
use super::types::Block;
use crate::core::types::Size;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// First qualifying block in arena order
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

/// Smallest qualifying block; ties go to the earliest
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFit;

/// Largest qualifying block; ties go to the earliest
///
/// A single scan. A failed scan is final: rescanning unchanged state
/// cannot find anything new.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorstFit;

impl PlacementPolicy for FirstFit {
    fn name(&self) -> &'static str {
        "first_fit"
    }

    fn select(&self, blocks: &[Block], requested: Size) -> Option<usize> {
        blocks.iter().position(|block| block.fits(requested))
    }
}

impl PlacementPolicy for BestFit {
    fn name(&self) -> &'static str {
        "best_fit"
    }

    fn select(&self, blocks: &[Block], requested: Size) -> Option<usize> {
        scan(blocks, requested, |candidate, current| candidate < current)
    }
}

impl PlacementPolicy for WorstFit {
    fn name(&self) -> &'static str {
        "worst_fit"
    }

    fn select(&self, blocks: &[Block], requested: Size) -> Option<usize> {
        scan(blocks, requested, |candidate, current| candidate > current)
    }
}

/// Left-to-right scan that replaces the candidate only on strict improvement
#[inline]
fn scan(blocks: &[Block], requested: Size, better: impl Fn(Size, Size) -> bool) -> Option<usize> {
    let mut chosen: Option<usize> = None;
    for (idx, block) in blocks.iter().enumerate() {
        if !block.fits(requested) {
            continue;
        }
        match chosen {
            Some(current) if !better(block.size, blocks[current].size) => {}
            _ => chosen = Some(idx),
        }
    }
    chosen
}

/// Built-in placement policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    FirstFit,
    BestFit,
    WorstFit,
}

impl Policy {
    pub const ALL: [Policy; 3] = [Policy::FirstFit, Policy::BestFit, Policy::WorstFit];

    /// Parse from string representation
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "first_fit" | "firstfit" | "first" | "ff" => Ok(Self::FirstFit),
            "best_fit" | "bestfit" | "best" | "bf" => Ok(Self::BestFit),
            "worst_fit" | "worstfit" | "worst" | "wf" => Ok(Self::WorstFit),
            _ => Err(format!(
                "Invalid policy '{}'. Valid: first_fit, best_fit, worst_fit",
                s
            )),
        }
    }

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstFit => "first_fit",
            Self::BestFit => "best_fit",
            Self::WorstFit => "worst_fit",
        }
    }

    /// Human-readable title, as printed in trace headers
    pub const fn title(&self) -> &'static str {
        match self {
            Self::FirstFit => "First Fit",
            Self::BestFit => "Best Fit",
            Self::WorstFit => "Worst Fit",
        }
    }
}

impl PlacementPolicy for Policy {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn select(&self, blocks: &[Block], requested: Size) -> Option<usize> {
        match self {
            Self::FirstFit => FirstFit.select(blocks, requested),
            Self::BestFit => BestFit.select(blocks, requested),
            Self::WorstFit => WorstFit.select(blocks, requested),
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl Serialize for Policy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
