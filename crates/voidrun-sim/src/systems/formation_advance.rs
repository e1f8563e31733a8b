//! Formation drift and rank refill.
//!
//! Every live formation integrates its velocity and wraps behind the
//! ship like any other object. Then each vacant rank (except the last,
//! which stays free as the refill sink) walks its refill precedence
//! list and claims the first formation-slaved occupant it finds. The
//! claim is immediate so no other vacancy grabs the same enemy this
//! tick; the enemy itself glides over during the following ticks in
//! rank transit.

use hecs::World;

use voidrun_core::components::AiState;
use voidrun_core::enums::MotionMode;
use voidrun_core::types::SimTime;

use crate::field::normalize_position_y;
use crate::formation::Formation;
use crate::systems::ship_state;

pub fn run(world: &mut World, formations: &mut [Formation], time: &SimTime, level: u32) {
    let Some((_, ship_position, _)) = ship_state(world) else {
        return;
    };
    let now = time.game_secs;
    let dt = time.dt();

    for formation in formations.iter_mut().filter(|f| !f.is_inert()) {
        formation.position += formation.velocity * dt;
        normalize_position_y(ship_position.y, level, &mut formation.position);

        let rank_count = formation.ranks.len();
        for vacant in 0..rank_count.saturating_sub(1) {
            if formation.ranks[vacant].occupant.is_some() {
                continue;
            }
            let fill_from = formation.ranks[vacant].fill_from;
            for source in fill_from.into_iter().flatten() {
                let Some(candidate) = formation.ranks[source].occupant else {
                    continue;
                };
                let Ok(mut ai) = world.get::<&mut AiState>(candidate) else {
                    continue;
                };
                // Enemies already in transit keep their claim; only a
                // parked occupant may be pulled forward.
                if ai.mode != MotionMode::FormationSlaved {
                    continue;
                }
                ai.mode = MotionMode::RankTransit;
                ai.target_rank = Some(vacant);
                ai.transit_started_at = now;
                drop(ai);
                formation.ranks[vacant].occupant = Some(candidate);
                formation.ranks[source].occupant = None;
                break;
            }
        }
    }
}
