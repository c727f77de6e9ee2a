//! Unit tests for cb-corridor.

use cb_core::ZoneId;

use crate::{Corridor, CorridorConfig, CorridorEdge};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Ten 20 m zones behind a 50 m inflow, as in the training scenario.
fn ten_zone_corridor() -> Corridor {
    Corridor::new(CorridorConfig {
        number_parking_zones: 10,
        length_inflow:        50.0,
        ..CorridorConfig::default()
    })
    .unwrap()
}

fn parking(n: u32) -> CorridorEdge {
    CorridorEdge::Parking(ZoneId(n))
}

// ── Edge names ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod edge_tests {
    use super::*;

    #[test]
    fn display_matches_network_names() {
        assert_eq!(CorridorEdge::Inflow.to_string(), "inflow");
        assert_eq!(parking(3).to_string(), "parking_3");
        assert_eq!(CorridorEdge::Outflow.to_string(), "outflow");
    }

    #[test]
    fn parse_names() {
        assert_eq!("inflow".parse::<CorridorEdge>().unwrap(), CorridorEdge::Inflow);
        assert_eq!("parking_12".parse::<CorridorEdge>().unwrap(), parking(12));
        assert_eq!("outflow".parse::<CorridorEdge>().unwrap(), CorridorEdge::Outflow);
        assert!("parking_".parse::<CorridorEdge>().is_err());
        assert!(":junction_0".parse::<CorridorEdge>().is_err());
    }

    #[test]
    fn driving_order() {
        assert!(CorridorEdge::Inflow < parking(0));
        assert!(parking(0) < parking(1));
        assert!(parking(99) < CorridorEdge::Outflow);
    }

    #[test]
    fn zone_of_collectors_is_none() {
        assert_eq!(CorridorEdge::Inflow.zone(), None);
        assert_eq!(CorridorEdge::Outflow.zone(), None);
        assert_eq!(parking(4).zone(), Some(ZoneId(4)));
        assert!(CorridorEdge::Inflow.is_collector());
        assert!(!parking(0).is_collector());
    }
}

// ── Config validation ─────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(Corridor::new(CorridorConfig::default()).is_ok());
    }

    #[test]
    fn zero_zones_rejected() {
        let config = CorridorConfig { number_parking_zones: 0, ..CorridorConfig::default() };
        assert!(Corridor::new(config).is_err());
    }

    #[test]
    fn single_lane_rejected() {
        let config = CorridorConfig { lanes: 1, ..CorridorConfig::default() };
        assert!(Corridor::new(config).is_err());
    }

    #[test]
    fn non_positive_lengths_rejected() {
        let config = CorridorConfig { length_parking: 0.0, ..CorridorConfig::default() };
        assert!(Corridor::new(config).is_err());
        let config = CorridorConfig { speed_limit: f64::INFINITY, ..CorridorConfig::default() };
        assert!(Corridor::new(config).is_err());
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod geometry_tests {
    use super::*;

    #[test]
    fn zone_length_is_uniform() {
        let c = ten_zone_corridor();
        assert_eq!(c.zone_count(), 10);
        assert!((c.zone_length() - 20.0).abs() < 1e-12);
        assert_eq!(c.last_zone(), ZoneId(9));
    }

    #[test]
    fn edge_starts() {
        let c = ten_zone_corridor();
        assert_eq!(c.edge_start(CorridorEdge::Inflow), 0.0);
        assert!((c.edge_start(parking(0)) - 50.0).abs() < 1e-12);
        assert!((c.edge_start(parking(3)) - 110.0).abs() < 1e-12);
        assert!((c.edge_start(CorridorEdge::Outflow) - 250.0).abs() < 1e-12);
        assert!((c.total_length() - 350.0).abs() < 1e-12);
    }

    #[test]
    fn route_ends_in_outflow() {
        let c = ten_zone_corridor();
        let route = c.route_from(parking(8));
        assert_eq!(route, vec![parking(8), parking(9), CorridorEdge::Outflow]);
        assert_eq!(c.edges().len(), 12);
        assert_eq!(c.next_edge(CorridorEdge::Outflow), None);
    }

    #[test]
    fn contains_checks_zone_range() {
        let c = ten_zone_corridor();
        assert!(c.contains(parking(9)));
        assert!(!c.contains(parking(10)));
    }

    #[test]
    fn lanes_per_edge_type() {
        let c = ten_zone_corridor();
        assert_eq!(c.lane_count(parking(0)), 2);
        assert_eq!(c.lane_count(CorridorEdge::Inflow), 1);
        assert!(c.has_lane(parking(0), 1));
        assert!(!c.has_lane(CorridorEdge::Outflow, 1));
    }

    #[test]
    fn lane_connections() {
        let c = ten_zone_corridor();
        assert_eq!(c.entry_lane(CorridorEdge::Inflow, 0, parking(0)), 1);
        assert_eq!(c.entry_lane(parking(9), 1, CorridorEdge::Outflow), 0);
        // A curb-lane straggler still lands on the single outflow lane.
        assert_eq!(c.entry_lane(parking(9), 0, CorridorEdge::Outflow), 0);
        assert_eq!(c.entry_lane(parking(2), 0, parking(3)), 0);
    }

    #[test]
    fn approach_gap_measures_to_end_of_zone() {
        let c = ten_zone_corridor();
        // On the target edge itself the stop point is the edge end.
        let gap = c.approach_gap(parking(3), 5.0, ZoneId(3)).unwrap();
        assert!((gap - 15.0).abs() < 1e-12);
        // Two zones upstream adds two zone lengths.
        let gap = c.approach_gap(parking(1), 5.0, ZoneId(3)).unwrap();
        assert!((gap - 55.0).abs() < 1e-12);
        // Past the target the gap goes negative.
        let gap = c.approach_gap(parking(4), 5.0, ZoneId(3)).unwrap();
        assert!(gap < 0.0);
        assert!(c.approach_gap(CorridorEdge::Inflow, 5.0, ZoneId(3)).is_none());
    }

    #[test]
    fn clamp_zone_caps_at_last() {
        let c = ten_zone_corridor();
        assert_eq!(c.clamp_zone(ZoneId(42)), ZoneId(9));
        assert_eq!(c.clamp_zone(ZoneId(4)), ZoneId(4));
    }
}
