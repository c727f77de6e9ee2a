//! Leader lookup over the roster.

use cb_behavior::Leader;
use cb_core::{VehicleId, VEHICLE_LENGTH};
use cb_corridor::Corridor;
use cb_vehicle::VehicleStore;

/// Nearest other active vehicle ahead of `vehicle` in its lane.
///
/// Looks at the current edge and the next one; on the next edge the lane
/// compared is the one `vehicle` would enter.  The gap is bumper to bumper
/// (centre distance minus one vehicle length) and may be negative when two
/// vehicles overlap.  A vehicle level with `vehicle` counts as ahead only if
/// its id is higher, so two overlapping vehicles never lead each other.
pub fn find_leader(corridor: &Corridor, store: &VehicleStore, vehicle: VehicleId) -> Option<Leader> {
    let i = vehicle.index();
    let edge = store.edge[i];
    let lane = store.lane[i];
    let here = corridor.global_position(edge, store.position[i]);
    let next = corridor
        .next_edge(edge)
        .map(|next| (next, corridor.entry_lane(edge, lane, next)));

    store
        .active_ids()
        .filter(|&other| other != vehicle)
        .filter(|&other| {
            let j = other.index();
            (store.edge[j] == edge && store.lane[j] == lane)
                || next.is_some_and(|(e, l)| store.edge[j] == e && store.lane[j] == l)
        })
        .filter_map(|other| {
            let j = other.index();
            let ahead = corridor.global_position(store.edge[j], store.position[j]) - here;
            let in_front = ahead > 0.0 || (ahead == 0.0 && other > vehicle);
            in_front.then_some((ahead, store.speed[j]))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(ahead, speed)| Leader { gap: ahead - VEHICLE_LENGTH, speed })
}
