//! Corridor configuration and the derived geometry queries.
//!
//! # Coordinates
//!
//! Two coordinate systems are used:
//!
//! - **Global**: metres from the start of `inflow`.  Used for leader search
//!   and output.
//! - **Approach**: metres from the start of `parking_1`, so that the stop
//!   point of zone `z` sits at `z * zone_length` (the downstream end of
//!   `parking_z`).  Used only by the controlled-approach law.

use cb_core::ZoneId;

use crate::{CorridorEdge, CorridorError, CorridorResult};

// ── CorridorConfig ────────────────────────────────────────────────────────────

/// Static corridor parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CorridorConfig {
    /// Lanes on each parking edge (lane 0 is the curb).  Collector edges
    /// carry one lane fewer.
    pub lanes: u8,
    /// Speed limit on every edge, m/s.
    pub speed_limit: f64,
    /// Number of parking zones `N`.
    pub number_parking_zones: u32,
    /// Length of the inflow collector edge, m.
    pub length_inflow: f64,
    /// Length of the outflow collector edge, m.
    pub length_outflow: f64,
    /// Total length of the parking corridor, m (split evenly across zones).
    pub length_parking: f64,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            lanes:                2,
            speed_limit:          10.0,
            number_parking_zones: 5,
            length_inflow:        200.0,
            length_outflow:       100.0,
            length_parking:       200.0,
        }
    }
}

impl CorridorConfig {
    /// Fail fast on any parameter the geometry cannot be built from.
    pub fn validate(&self) -> CorridorResult<()> {
        if self.number_parking_zones == 0 {
            return Err(CorridorError::Config(
                "number_parking_zones must be at least 1".into(),
            ));
        }
        if self.lanes < 2 {
            return Err(CorridorError::Config(format!(
                "lanes must be at least 2 (curb lane plus a through lane), got {}",
                self.lanes
            )));
        }
        let lengths = [
            ("speed_limit", self.speed_limit),
            ("length_inflow", self.length_inflow),
            ("length_outflow", self.length_outflow),
            ("length_parking", self.length_parking),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(CorridorError::Config(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

// ── Corridor ──────────────────────────────────────────────────────────────────

/// Validated corridor geometry.
///
/// Construct with [`Corridor::new`]; all queries are cheap arithmetic on the
/// stored config.
#[derive(Clone, Debug)]
pub struct Corridor {
    config:      CorridorConfig,
    zone_length: f64,
}

impl Corridor {
    /// Validate `config` and derive the per-zone length.
    pub fn new(config: CorridorConfig) -> CorridorResult<Self> {
        config.validate()?;
        let zone_length = config.length_parking / config.number_parking_zones as f64;
        Ok(Self { config, zone_length })
    }

    pub fn config(&self) -> &CorridorConfig {
        &self.config
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    /// Number of parking zones `N`.
    #[inline]
    pub fn zone_count(&self) -> u32 {
        self.config.number_parking_zones
    }

    /// Length of one zone, `L_total / N`.
    #[inline]
    pub fn zone_length(&self) -> f64 {
        self.zone_length
    }

    #[inline]
    pub fn speed_limit(&self) -> f64 {
        self.config.speed_limit
    }

    /// Highest valid zone index, `N - 1`.
    #[inline]
    pub fn last_zone(&self) -> ZoneId {
        ZoneId(self.config.number_parking_zones - 1)
    }

    /// End-to-end length from the start of `inflow` to the end of `outflow`.
    pub fn total_length(&self) -> f64 {
        self.config.length_inflow + self.config.length_parking + self.config.length_outflow
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    /// The curbside edge of `zone`.
    #[inline]
    pub fn parking_edge(&self, zone: ZoneId) -> CorridorEdge {
        CorridorEdge::Parking(zone)
    }

    /// `true` if `edge` exists in this corridor.
    pub fn contains(&self, edge: CorridorEdge) -> bool {
        match edge {
            CorridorEdge::Parking(zone) => zone.0 < self.zone_count(),
            CorridorEdge::Inflow | CorridorEdge::Outflow => true,
        }
    }

    /// Every edge in driving order.
    pub fn edges(&self) -> Vec<CorridorEdge> {
        self.route_from(CorridorEdge::Inflow)
    }

    /// The edges still ahead from `edge` (inclusive), ending with `outflow`.
    pub fn route_from(&self, edge: CorridorEdge) -> Vec<CorridorEdge> {
        let mut route = Vec::with_capacity(self.zone_count() as usize + 2);
        let mut current = Some(edge);
        while let Some(e) = current {
            route.push(e);
            current = self.next_edge(e);
        }
        route
    }

    /// The edge that follows `edge`, or `None` after `outflow`.
    pub fn next_edge(&self, edge: CorridorEdge) -> Option<CorridorEdge> {
        match edge {
            CorridorEdge::Inflow => Some(CorridorEdge::Parking(ZoneId(0))),
            CorridorEdge::Parking(zone) if zone.0 + 1 < self.zone_count() => {
                Some(CorridorEdge::Parking(ZoneId(zone.0 + 1)))
            }
            CorridorEdge::Parking(_) => Some(CorridorEdge::Outflow),
            CorridorEdge::Outflow => None,
        }
    }

    /// Length of `edge`, m.
    pub fn edge_length(&self, edge: CorridorEdge) -> f64 {
        match edge {
            CorridorEdge::Inflow     => self.config.length_inflow,
            CorridorEdge::Parking(_) => self.zone_length,
            CorridorEdge::Outflow    => self.config.length_outflow,
        }
    }

    /// Global coordinate of the start of `edge`.
    pub fn edge_start(&self, edge: CorridorEdge) -> f64 {
        match edge {
            CorridorEdge::Inflow => 0.0,
            CorridorEdge::Parking(zone) => {
                self.config.length_inflow + zone.0 as f64 * self.zone_length
            }
            CorridorEdge::Outflow => self.config.length_inflow + self.config.length_parking,
        }
    }

    /// Global coordinate of a position `position` metres into `edge`.
    #[inline]
    pub fn global_position(&self, edge: CorridorEdge, position: f64) -> f64 {
        self.edge_start(edge) + position
    }

    // ── Lanes ─────────────────────────────────────────────────────────────

    /// Number of lanes on `edge`.
    pub fn lane_count(&self, edge: CorridorEdge) -> u8 {
        match edge {
            CorridorEdge::Parking(_) => self.config.lanes,
            CorridorEdge::Inflow | CorridorEdge::Outflow => self.config.lanes - 1,
        }
    }

    /// `true` if `lane` exists on `edge`.
    #[inline]
    pub fn has_lane(&self, edge: CorridorEdge, lane: u8) -> bool {
        lane < self.lane_count(edge)
    }

    /// Lane a vehicle lands in when it crosses from `from` (in `lane`) to `to`.
    ///
    /// `inflow` lane 0 feeds `parking_0` lane 1 and the last parking edge's
    /// lane 1 feeds `outflow` lane 0; otherwise the lane index is kept.  The
    /// result is always clamped to the lanes of `to`.
    pub fn entry_lane(&self, from: CorridorEdge, lane: u8, to: CorridorEdge) -> u8 {
        let mapped = match (from, to) {
            (CorridorEdge::Inflow, CorridorEdge::Parking(_)) => lane.saturating_add(1),
            (CorridorEdge::Parking(_), CorridorEdge::Outflow) => lane.saturating_sub(1),
            _ => lane,
        };
        mapped.min(self.lane_count(to) - 1)
    }

    // ── Zones ─────────────────────────────────────────────────────────────

    /// Zone implied by the vehicle's current edge, or `None` on collectors.
    #[inline]
    pub fn zone_of(&self, edge: CorridorEdge) -> Option<ZoneId> {
        edge.zone()
    }

    /// Clamp an arbitrary zone index into `[0, N-1]`.
    #[inline]
    pub fn clamp_zone(&self, zone: ZoneId) -> ZoneId {
        ZoneId(zone.0.min(self.last_zone().0))
    }

    /// Approach coordinate of a vehicle `position` metres into parking edge
    /// `edge`, or `None` on a collector edge.
    pub fn approach_position(&self, edge: CorridorEdge, position: f64) -> Option<f64> {
        let zone = edge.zone()?;
        Some(position + (zone.0 as f64 - 1.0) * self.zone_length)
    }

    /// Approach coordinate of the stop point for `zone`.
    #[inline]
    pub fn approach_target(&self, zone: ZoneId) -> f64 {
        zone.0 as f64 * self.zone_length
    }

    /// Signed distance from a vehicle on a parking edge to the stop point of
    /// `zone`; negative once the stop point is behind it.  `None` on the
    /// collector edges.
    pub fn approach_gap(&self, edge: CorridorEdge, position: f64, zone: ZoneId) -> Option<f64> {
        self.approach_position(edge, position)
            .map(|x| self.approach_target(zone) - x)
    }
}
