//! Integration tests for the tick loop and its observer contract.

use glam::Vec3;

use plaza_agent::{AgentSpec, AgentStore, DirectionChoice};
use plaza_core::{AgentClass, AvoidancePolicy, RouteId, SimConfig, Tick};
use plaza_engine::{ClassProfile, FaultKind, MovementEngine, RouteFault, TickReport};
use plaza_route::Route;

use crate::{NoopObserver, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64, dt_secs: f32) -> SimConfig {
    SimConfig {
        total_ticks,
        dt_secs,
        seed: 42,
        num_threads: Some(1),
    }
}

/// Square loop of side 10 (L = 40) in the XZ plane.
fn square(id: u16) -> Route {
    Route::new(
        RouteId(id),
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 10.0),
        ],
    )
    .unwrap()
}

fn forward_npc(route: u16) -> AgentSpec {
    AgentSpec::npc(RouteId(route)).with_direction(DirectionChoice::Forward)
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully() {
        let sim = SimBuilder::new(test_config(10, 1.0))
            .route(square(0))
            .spawn_many(forward_npc(0), 3)
            .build()
            .unwrap();
        assert_eq!(sim.agents.count, 3);
        assert_eq!(sim.routes.len(), 1);
        assert_eq!(sim.clock.current_tick, Tick(0));
    }

    #[test]
    fn zero_dt_rejected() {
        let result = SimBuilder::new(test_config(10, 0.0))
            .route(square(0))
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn non_finite_dt_rejected() {
        let result = SimBuilder::new(test_config(10, f32::NAN))
            .route(square(0))
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn duplicate_route_rejected() {
        let result = SimBuilder::new(test_config(10, 1.0))
            .route(square(0))
            .route(square(0))
            .build();
        assert!(matches!(result, Err(SimError::Route(_))));
    }

    #[test]
    fn bad_spec_propagates_as_agent_error() {
        let result = SimBuilder::new(test_config(10, 1.0))
            .route(square(0))
            .spawn(forward_npc(3)) // no such route
            .build();
        assert!(matches!(result, Err(SimError::Agent(_))));
    }

    #[test]
    fn custom_engine_is_kept() {
        let profile = ClassProfile {
            policy: AvoidancePolicy::AccumulateAll,
            ahead_dot_threshold: 0.4,
            min_slow_factor: 0.1,
            steers: true,
            emits_animation_rate: true,
        };
        let sim = SimBuilder::new(test_config(10, 1.0))
            .route(square(0))
            .engine(MovementEngine::new().with_profile(AgentClass::Vehicle, profile))
            .build()
            .unwrap();
        assert_eq!(sim.engine.profile(AgentClass::Vehicle), &profile);
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_advances_clock_to_end_tick() {
        let mut sim = SimBuilder::new(test_config(10, 1.0))
            .route(square(0))
            .spawn_many(forward_npc(0), 2)
            .build()
            .unwrap();
        sim.run(&mut NoopObserver);
        assert_eq!(sim.clock.current_tick, Tick(10));
    }

    #[test]
    fn run_ticks_advances_incrementally() {
        let mut sim = SimBuilder::new(test_config(100, 1.0))
            .route(square(0))
            .spawn(forward_npc(0))
            .build()
            .unwrap();
        sim.run_ticks(5, &mut NoopObserver);
        assert_eq!(sim.clock.current_tick, Tick(5));
        sim.run_ticks(3, &mut NoopObserver);
        assert_eq!(sim.clock.current_tick, Tick(8));
    }

    /// Observer that counts every callback.
    #[derive(Default)]
    struct CallCounter {
        starts: usize,
        frames: usize,
        ends: usize,
        sim_ends: usize,
        final_tick: Option<Tick>,
    }

    impl SimObserver for CallCounter {
        fn on_tick_start(&mut self, _t: Tick) {
            self.starts += 1;
        }
        fn on_frame(&mut self, _t: Tick, _agents: &AgentStore) {
            self.frames += 1;
        }
        fn on_tick_end(&mut self, _t: Tick, _r: &TickReport) {
            self.ends += 1;
        }
        fn on_sim_end(&mut self, t: Tick) {
            self.sim_ends += 1;
            self.final_tick = Some(t);
        }
    }

    #[test]
    fn observer_called_once_per_tick() {
        let mut sim = SimBuilder::new(test_config(7, 1.0))
            .route(square(0))
            .spawn(forward_npc(0))
            .build()
            .unwrap();
        let mut obs = CallCounter::default();
        sim.run(&mut obs);
        assert_eq!(obs.starts, 7);
        assert_eq!(obs.frames, 7);
        assert_eq!(obs.ends, 7);
        assert_eq!(obs.sim_ends, 1);
        assert_eq!(obs.final_tick, Some(Tick(7)));
    }

    #[test]
    fn frames_see_committed_state() {
        // Each frame's published position must match the distance the agent
        // has accumulated by the end of that tick — never a stale pose.
        struct FrameChecker {
            checked: usize,
        }
        impl SimObserver for FrameChecker {
            fn on_frame(&mut self, tick: Tick, agents: &AgentStore) {
                let expected_x = 2.0 * (tick.0 + 1) as f32;
                if expected_x < 10.0 {
                    assert!(
                        (agents.position[0].x - expected_x).abs() < 1e-4,
                        "tick {tick}: expected x={expected_x}, got {}",
                        agents.position[0].x
                    );
                }
                self.checked += 1;
            }
        }

        let mut sim = SimBuilder::new(test_config(4, 1.0))
            .route(square(0))
            .spawn(forward_npc(0).with_max_speed(2.0))
            .build()
            .unwrap();
        let mut obs = FrameChecker { checked: 0 };
        sim.run(&mut obs);
        assert_eq!(obs.checked, 4);
    }
}

// ── End-to-end scenario properties ────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn one_full_loop_in_twenty_ticks() {
        // Single agent, maxSpeed 2, L = 40, Δt = 1, 20 ticks, no neighbors:
        // exactly one lap, ending back at waypoint 0 with zero offset.
        struct DistanceMeter {
            travelled: f32,
        }
        impl SimObserver for DistanceMeter {
            fn on_frame(&mut self, _t: Tick, agents: &AgentStore) {
                self.travelled += agents.speed[0] * 1.0;
            }
        }

        let mut sim = SimBuilder::new(test_config(20, 1.0))
            .route(square(0))
            .spawn(forward_npc(0).with_max_speed(2.0))
            .build()
            .unwrap();
        let mut meter = DistanceMeter { travelled: 0.0 };
        sim.run(&mut meter);

        assert!((meter.travelled - 40.0).abs() < 1e-3, "one loop length");
        assert_eq!(sim.agents.current_waypoint[0], 0);
        assert_eq!(sim.agents.distance_along[0], 0.0);
        assert!((sim.agents.position[0] - Vec3::ZERO).length() < 1e-4);
    }

    #[test]
    fn speed_bounds_hold_for_every_frame() {
        struct BoundsChecker;
        impl SimObserver for BoundsChecker {
            fn on_frame(&mut self, tick: Tick, agents: &AgentStore) {
                for i in 0..agents.count {
                    assert!(
                        agents.speed[i] >= 0.0 && agents.speed[i] <= agents.max_speed[i],
                        "tick {tick}, agent {i}: speed {} out of bounds",
                        agents.speed[i]
                    );
                    assert!(agents.position[i].is_finite());
                }
            }
        }

        let mut sim = SimBuilder::new(test_config(60, 0.25))
            .route(square(0))
            .spawn_many(AgentSpec::npc(RouteId(0)), 10)
            .spawn(AgentSpec::vehicle(RouteId(0)).placed_at(1, 0.5))
            .build()
            .unwrap();
        sim.run(&mut BoundsChecker);
    }

    #[test]
    fn separate_routes_never_interact() {
        // Two coincident square loops; agents on each should cruise at max
        // speed for the whole run despite sharing world space.
        struct IsolationChecker;
        impl SimObserver for IsolationChecker {
            fn on_frame(&mut self, tick: Tick, agents: &AgentStore) {
                // Skip the spacing tick (tick 0 poses start coincident).
                if tick.0 == 0 {
                    return;
                }
                for i in 0..agents.count {
                    assert_eq!(
                        agents.speed[i], agents.max_speed[i],
                        "tick {tick}: agent {i} slowed by a foreign route"
                    );
                }
            }
        }

        let mut sim = SimBuilder::new(test_config(40, 0.5))
            .route(square(0))
            .route(square(1))
            .spawn_many(forward_npc(0), 2)
            .spawn_many(forward_npc(1), 2)
            .build()
            .unwrap();
        sim.run(&mut IsolationChecker);
    }

    #[test]
    fn npc_animation_rate_published_every_frame() {
        struct AnimChecker;
        impl SimObserver for AnimChecker {
            fn on_frame(&mut self, _t: Tick, agents: &AgentStore) {
                for i in 0..agents.count {
                    let expected = agents.speed[i] / agents.max_speed[i];
                    assert!((agents.animation_rate[i] - expected).abs() < 1e-6);
                }
            }
        }

        let mut sim = SimBuilder::new(test_config(30, 0.5))
            .route(square(0))
            .spawn_many(forward_npc(0), 6)
            .build()
            .unwrap();
        sim.run(&mut AnimChecker);
    }

    #[test]
    fn identical_seeds_reproduce_identical_runs() {
        let run = || {
            let mut sim = SimBuilder::new(test_config(50, 0.2))
                .route(square(0))
                .spawn_many(AgentSpec::npc(RouteId(0)), 8)
                .build()
                .unwrap();
            sim.run(&mut NoopObserver);
            (
                sim.agents.position,
                sim.agents.orientation,
                sim.agents.current_waypoint,
            )
        };
        assert_eq!(run(), run());
    }
}

// ── Fault delivery ────────────────────────────────────────────────────────────

#[cfg(test)]
mod fault_tests {
    use super::*;

    #[test]
    fn degenerate_route_fault_reaches_observer_once() {
        struct FaultCollector {
            faults: Vec<(Tick, RouteFault)>,
        }
        impl SimObserver for FaultCollector {
            fn on_route_fault(&mut self, tick: Tick, fault: &RouteFault) {
                self.faults.push((tick, *fault));
            }
        }

        // P0 == P1 collapses segment 0.
        let pinched = Route::new(
            RouteId(0),
            [
                Vec3::ZERO,
                Vec3::ZERO,
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 10.0),
            ],
        )
        .unwrap();

        let mut sim = SimBuilder::new(test_config(10, 1.0))
            .route(pinched)
            .spawn(AgentSpec::vehicle(RouteId(0)).placed_at(0, 0.0))
            .build()
            .unwrap();
        let mut obs = FaultCollector { faults: Vec::new() };
        sim.run(&mut obs);

        assert_eq!(
            obs.faults,
            vec![(
                Tick(0),
                RouteFault {
                    route: RouteId(0),
                    kind: FaultKind::DegenerateSegment(0),
                }
            )]
        );
        // The frozen agent held a finite pose for the whole run.
        assert!(sim.agents.position[0].is_finite());
        assert_eq!(sim.agents.speed[0], 0.0);
    }
}
