//! Lane-change requests.

/// Signed lane-change request relative to the current lane.
///
/// Lane 0 is the curb lane, so `TowardCurb` lowers the lane index.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaneChange {
    /// Stay in the current lane.
    #[default]
    Keep,
    /// One lane toward the curb (`-1`).
    TowardCurb,
    /// One lane away from the curb (`+1`).
    AwayFromCurb,
}

impl LaneChange {
    /// Signed lane offset: `-1`, `0` or `+1`.
    #[inline]
    pub fn offset(self) -> i8 {
        match self {
            LaneChange::Keep         => 0,
            LaneChange::TowardCurb   => -1,
            LaneChange::AwayFromCurb => 1,
        }
    }

    /// Target lane index from `lane`, or `None` if it would drop below the curb.
    ///
    /// The upper bound depends on the edge and is the caller's job.
    #[inline]
    pub fn target_lane(self, lane: u8) -> Option<u8> {
        match self {
            LaneChange::Keep         => Some(lane),
            LaneChange::TowardCurb   => lane.checked_sub(1),
            LaneChange::AwayFromCurb => lane.checked_add(1),
        }
    }
}

impl std::fmt::Display for LaneChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}", self.offset())
    }
}
