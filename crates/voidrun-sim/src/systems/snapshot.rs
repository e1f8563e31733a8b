//! Builds the read-only state view handed out after each tick.

use hecs::World;

use voidrun_core::components::{
    AiState, BonusBubble, Combatant, Enemy, Explosion, LaserBeam, Ship, ShipSystems,
};
use voidrun_core::constants::EXPLOSION_SECS;
use voidrun_core::enums::RunMode;
use voidrun_core::events::GameEvent;
use voidrun_core::state::{
    BeamView, BlackHoleView, BubbleView, EnemyView, ExplosionView, FormationView,
    GameStateSnapshot, ScoreView, ShipView,
};
use voidrun_core::types::{Position, SimTime, Velocity};
use voidrun_formation::profiles::tier_profile;

use crate::formation::Formation;
use crate::session::{Census, ScoreState};
use crate::systems::black_hole::BlackHole;
use crate::systems::bonus::bubble_radius;

#[allow(clippy::too_many_arguments)]
pub fn build(
    world: &World,
    formations: &[Formation],
    black_hole: &BlackHole,
    time: &SimTime,
    run_mode: RunMode,
    level: u32,
    score: &ScoreState,
    census: &Census,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let now = time.game_secs;

    let mut ship = ShipView::default();
    let mut ship_position = None;
    {
        let mut query = world.query::<(&Ship, &Position, &Velocity, &ShipSystems)>();
        if let Some((_, (_, position, velocity, systems))) = query.iter().next() {
            ship_position = Some(position.0);
            ship = ShipView {
                position: *position,
                velocity: *velocity,
                hit_flash: systems.hit_flash_until > now,
                weapons: systems.weapons,
            };
        }
    }

    let mut enemies = Vec::with_capacity(census.enemies_total);
    {
        let mut query = world.query::<(&Enemy, &Position, &Combatant, &AiState)>();
        for (_, (enemy, position, combatant, ai)) in query.iter() {
            enemies.push(EnemyView {
                position: *position,
                tier: enemy.tier,
                color: tier_profile(enemy.tier).color,
                hit_points: combatant.hit_points,
                mode: ai.mode,
                hit_flash: combatant.hit_flash_until > now,
            });
        }
    }

    let formations = formations
        .iter()
        .filter(|f| !f.is_inert())
        .map(|f| FormationView {
            position: Position(f.position),
            velocity: Velocity(f.velocity),
            rank_count: f.ranks.len(),
            occupied_ranks: f.ranks.iter().filter(|r| r.occupant.is_some()).count(),
        })
        .collect();

    let mut beams = Vec::with_capacity(census.beams);
    {
        let mut query = world.query::<(&LaserBeam, &Position, &Velocity)>();
        for (_, (beam, position, velocity)) in query.iter() {
            beams.push(BeamView {
                position: *position,
                velocity: *velocity,
                owner: beam.owner,
            });
        }
    }

    let mut bubbles = Vec::with_capacity(census.bubbles);
    {
        let mut query = world.query::<(&BonusBubble, &Position)>();
        for (_, (bubble, position)) in query.iter() {
            bubbles.push(BubbleView {
                position: *position,
                tier: bubble.tier,
                resource: bubble.resource,
                radius: bubble_radius(bubble.resource),
            });
        }
    }

    let mut explosions = Vec::with_capacity(census.explosions);
    {
        let mut query = world.query::<(&Explosion, &Position)>();
        for (_, (explosion, position)) in query.iter() {
            explosions.push(ExplosionView {
                position: *position,
                progress: ((now - explosion.started_at) / EXPLOSION_SECS).clamp(0.0, 1.0),
            });
        }
    }

    GameStateSnapshot {
        time: *time,
        run_mode,
        level,
        ship,
        enemies,
        formations,
        beams,
        bubbles,
        explosions,
        black_hole: BlackHoleView {
            position: Position(black_hole.position),
            distance_to_ship: ship_position
                .map(|p| black_hole.distance_to(p))
                .unwrap_or(f64::INFINITY),
        },
        score: ScoreView {
            score: score.score,
            resource: score.resource,
            best_resource: score.best_resource,
            shots_fired: score.shots_fired,
            shots_missed: score.shots_missed,
            shots_en_route: score.shots_en_route,
            enemies_killed: score.enemies_killed,
            active_enemies_total: census.enemies_total,
            active_enemies_by_tier: census.enemies_by_tier,
        },
        events,
    }
}
