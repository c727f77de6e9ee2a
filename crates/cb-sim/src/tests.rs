//! Integration tests for cb-sim.

use cb_behavior::{ControllerConfig, CurbsideController, FreeFlowController, Transition};
use cb_core::{ParkingState, SimConfig, Tick, VehicleId, ZoneId};
use cb_corridor::{Corridor, CorridorConfig, CorridorEdge};
use cb_demand::Arrival;
use cb_vehicle::{VehicleStore, VehicleStoreBuilder};

use crate::{NoopObserver, Sim, SimBuilder, SimError, SimObserver, TickStats};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        step_secs:             0.2,
        total_ticks,
        seed:                  10,
        output_interval_ticks: 0,
    }
}

fn corridor() -> Corridor {
    Corridor::new(CorridorConfig::default()).unwrap()
}

fn store(n: usize) -> VehicleStore {
    VehicleStoreBuilder::new(n).build().unwrap()
}

fn arrival(vehicle: u32, tick: u64, zone: u32, dwell_secs: f64) -> Arrival {
    Arrival {
        vehicle:      VehicleId(vehicle),
        depart_tick:  Tick(tick),
        desired_zone: ZoneId(zone),
        dwell_secs,
    }
}

fn curbside_sim(total_ticks: u64, arrivals: Vec<Arrival>) -> Sim<CurbsideController> {
    let controller = CurbsideController::new(ControllerConfig::default()).unwrap();
    SimBuilder::new(test_config(total_ticks), corridor(), store(arrivals.len()), controller)
        .arrivals(arrivals)
        .build()
        .unwrap()
}

/// Records everything the tick loop reports.
#[derive(Default)]
struct Recorder {
    transitions: Vec<(Tick, VehicleId, Transition)>,
    exits:       Vec<(Tick, VehicleId)>,
    ticks:       Vec<TickStats>,
    snapshots:   Vec<Tick>,
    ended_at:    Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_state_change(&mut self, tick: Tick, vehicle: VehicleId, transition: Transition) {
        self.transitions.push((tick, vehicle, transition));
    }
    fn on_vehicle_exit(&mut self, tick: Tick, vehicle: VehicleId) {
        self.exits.push((tick, vehicle));
    }
    fn on_tick_end(&mut self, _tick: Tick, stats: &TickStats) {
        self.ticks.push(*stats);
    }
    fn on_snapshot(&mut self, tick: Tick, _store: &VehicleStore, _corridor: &Corridor) {
        self.snapshots.push(tick);
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended_at = Some(final_tick);
    }
}

impl Recorder {
    fn states_of(&self, vehicle: VehicleId) -> Vec<ParkingState> {
        let mut states = vec![ParkingState::Inflow];
        states.extend(
            self.transitions
                .iter()
                .filter(|(_, v, _)| *v == vehicle)
                .map(|(_, _, t)| t.to),
        );
        states
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(test_config(10), corridor(), store(2), FreeFlowController)
            .build()
            .unwrap();
        assert_eq!(sim.entry_speed, 10.0);
        assert!(sim.arrivals.is_empty());
        assert!(sim.is_drained());
    }

    #[test]
    fn arrival_outside_roster_errors() {
        let result = SimBuilder::new(test_config(10), corridor(), store(1), FreeFlowController)
            .arrivals(vec![arrival(3, 0, 1, 5.0)])
            .build();
        assert!(matches!(result, Err(SimError::VehicleOutOfRange { capacity: 1, .. })));
    }

    #[test]
    fn duplicate_arrival_errors() {
        let result = SimBuilder::new(test_config(10), corridor(), store(2), FreeFlowController)
            .arrivals(vec![arrival(0, 0, 1, 5.0), arrival(0, 9, 2, 5.0)])
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn entry_speed_above_limit_errors() {
        let result = SimBuilder::new(test_config(10), corridor(), store(1), FreeFlowController)
            .entry_speed(12.0)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn bad_step_errors() {
        let config = SimConfig { step_secs: 0.0, ..test_config(10) };
        let result = SimBuilder::new(config, corridor(), store(1), FreeFlowController).build();
        assert!(matches!(result, Err(SimError::Core(_))));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_loop_tests {
    use super::*;

    #[test]
    fn run_stops_at_horizon_and_reports_end() {
        let mut sim = curbside_sim(25, vec![]);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(25));
        assert_eq!(rec.ticks.len(), 25);
        assert_eq!(rec.ended_at, Some(Tick(25)));
    }

    #[test]
    fn snapshots_follow_interval() {
        let controller = CurbsideController::new(ControllerConfig::default()).unwrap();
        let config = SimConfig { output_interval_ticks: 4, ..test_config(10) };
        let mut sim = SimBuilder::new(config, corridor(), store(0), controller).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.snapshots, vec![Tick(0), Tick(4), Tick(8)]);
    }

    #[test]
    fn arrival_spawns_on_inflow_with_clamped_zone() {
        let mut sim = curbside_sim(10, vec![arrival(0, 2, 9, 5.0)]);
        sim.run_ticks(2, &mut NoopObserver).unwrap();
        assert!(!sim.store.is_active(VehicleId(0)));

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        let v = VehicleId(0);
        assert!(sim.store.is_active(v));
        assert_eq!(sim.store.edge[v.index()], CorridorEdge::Inflow);
        assert_eq!(sim.store.zone[v.index()], ZoneId(4));
        assert_eq!(sim.store.dwell_required[v.index()], 5.0);
    }

    #[test]
    fn blocked_entry_defers_spawn() {
        // Both due at tick 0; the second waits until the first is 7 m in.
        let mut sim = curbside_sim(20, vec![arrival(0, 0, 4, 5.0), arrival(1, 0, 4, 5.0)]);
        let mut rec = Recorder::default();
        sim.run_ticks(4, &mut rec).unwrap();
        assert!(sim.store.is_active(VehicleId(0)));
        assert!(!sim.store.is_active(VehicleId(1)));
        assert_eq!(rec.ticks[0].spawned, 1);
        assert_eq!(rec.ticks[0].deferred, 1);

        sim.run_ticks(1, &mut rec).unwrap();
        assert!(sim.store.is_active(VehicleId(1)));
        assert_eq!(rec.ticks[4].spawned, 1);
    }

    #[test]
    fn free_flow_traffic_passes_through() {
        let controller = FreeFlowController;
        let arrivals = vec![arrival(0, 0, 2, 5.0), arrival(1, 10, 3, 5.0)];
        let mut sim = SimBuilder::new(test_config(400), corridor(), store(2), controller)
            .arrivals(arrivals)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert!(rec.transitions.is_empty());
        assert_eq!(rec.exits.len(), 2);
        assert!(sim.is_drained());
    }
}

// ── End-to-end curbside episodes ──────────────────────────────────────────────

#[cfg(test)]
mod episode_tests {
    use cb_behavior::{BehaviorResult, ControlCommand, SimulationAdapter, VehicleController};

    use super::*;

    #[test]
    fn single_vehicle_parks_and_leaves() {
        let mut sim = curbside_sim(3_000, vec![arrival(0, 0, 2, 2.1)]);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let v = VehicleId(0);
        assert_eq!(
            rec.states_of(v),
            vec![ParkingState::Inflow, ParkingState::Parking, ParkingState::Parked, ParkingState::Outflow]
        );
        let parked_on = rec
            .transitions
            .iter()
            .find(|(_, _, t)| t.to == ParkingState::Parked)
            .map(|(tick, _, _)| *tick)
            .unwrap();
        let released_on = rec
            .transitions
            .iter()
            .find(|(_, _, t)| t.to == ParkingState::Outflow)
            .map(|(tick, _, _)| *tick)
            .unwrap();
        // 2.1 s of dwell at 0.2 s per tick rounds up to 11 ticks.
        assert_eq!(released_on.since(parked_on), 11);
        assert_eq!(rec.exits.len(), 1);
        assert!(sim.is_drained());
    }

    #[test]
    fn parked_vehicle_stops_in_its_zone() {
        let mut sim = curbside_sim(3_000, vec![arrival(0, 0, 2, 1_000.0)]);
        let v = VehicleId(0);
        let mut rec = Recorder::default();
        while sim.store.state[v.index()] != ParkingState::Parked && sim.clock.current_tick < Tick(3_000) {
            sim.run_ticks(1, &mut rec).unwrap();
        }
        assert_eq!(sim.store.state[v.index()], ParkingState::Parked);
        assert_eq!(sim.store.edge[v.index()], CorridorEdge::Parking(ZoneId(2)));
        assert_eq!(sim.store.lane[v.index()], 0);
        assert!(sim.store.speed[v.index()] < 1e-3);
    }

    #[test]
    fn state_sequences_stay_on_lifecycle() {
        let arrivals: Vec<Arrival> = (0..6).map(|i| arrival(i, u64::from(i) * 15, 1 + i % 3, 3.0)).collect();
        let mut sim = curbside_sim(3_000, arrivals);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        for (_, v, t) in &rec.transitions {
            let ok = matches!(
                (t.from, t.to),
                (ParkingState::Inflow, ParkingState::Parking)
                    | (ParkingState::Parking, ParkingState::Parked)
                    | (ParkingState::Parked, ParkingState::Parking)
                    | (ParkingState::Parked, ParkingState::Outflow)
            );
            assert!(ok, "{v}: {} -> {}", t.from, t.to);
        }
    }

    /// Wraps the curbside controller and checks the zone invariant right
    /// after each control call, before the apply phase moves anyone.
    struct ZoneChecked(CurbsideController);

    impl VehicleController for ZoneChecked {
        fn control<A: SimulationAdapter + ?Sized>(
            &self,
            adapter: &mut A,
            vehicle: VehicleId,
        ) -> BehaviorResult<ControlCommand> {
            let command = self.0.control(adapter, vehicle)?;
            if command.transition.to == ParkingState::Parking {
                if let Some(current) = adapter.get_edge(vehicle).zone() {
                    assert!(command.zone >= current, "{vehicle} zone behind its edge");
                }
            }
            Ok(command)
        }
    }

    #[test]
    fn assigned_zone_never_behind_current_zone_while_parking() {
        let arrivals: Vec<Arrival> = (0..5).map(|i| arrival(i, u64::from(i) * 10, 2, 4.0)).collect();
        let controller = ZoneChecked(CurbsideController::new(ControllerConfig::default()).unwrap());
        let mut sim = SimBuilder::new(test_config(1_500), corridor(), store(arrivals.len()), controller)
            .arrivals(arrivals)
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();
    }

    #[test]
    fn contended_corridor_drains() {
        let arrivals: Vec<Arrival> = (0..6).map(|i| arrival(i, u64::from(i) * 15, 1 + i % 3, 3.0)).collect();
        let mut sim = curbside_sim(3_000, arrivals);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.exits.len(), 6);
        assert!(sim.is_drained());
    }
}
