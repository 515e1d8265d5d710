//! The boss's pattern scheduler.
//!
//! A run is a main sequence that walks Pattern1 → 2 → 3 → 4 with gaps in
//! between, repeating while looping is enabled. Pattern1's fire loop is the
//! only child that runs alongside its parent; every other pattern is awaited.
//!
//! Ordering within one tick: an active child is stepped first, up to but not
//! including the instant its parent resumes, then the parent continues. So
//! the side-fire window is half-open and a volley due exactly as the window
//! closes is cancelled with it.

use std::time::Duration;

use bevy::prelude::*;

use super::config::{BossConfig, SIDE_FIRE_WINDOW, STARTUP_DELAY};
use super::host::{PatternContext, PatternHost};
use super::patterns::{Bombardment, BossBody, ChargeAndReturn, FanSpread, SideFire};
use crate::core::clock::secs;

/// Which pattern the boss is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BossState {
    #[default]
    Idle,
    /// Continuous side fire
    Pattern1,
    /// Fan spread
    Pattern2,
    /// Telegraphed bombardment
    Pattern3,
    /// Charge and return
    Pattern4,
}

/// Where the main sequence goes once a gap runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterGap {
    Bombardment,
    Charge,
    NextCycle,
}

/// Suspension point of the main sequence.
#[derive(Debug)]
enum Stage {
    Startup { until: Duration },
    SideFire { until: Duration },
    FanSpread(FanSpread),
    Bombardment(Bombardment),
    Charge(ChargeAndReturn),
    Gap { until: Duration, then: AfterGap },
    Finished,
}

/// One run of the main sequence and the child it may own.
#[derive(Debug)]
struct MainSequence {
    stage: Stage,
    side_fire: Option<SideFire>,
}

/// Cycles a boss through its attack patterns.
///
/// Time only moves when [`tick`](Self::tick) is called. Everything the
/// patterns need from the scene comes in through the [`PatternContext`].
#[derive(Component, Debug)]
pub struct PatternScheduler {
    config: BossConfig,
    body: BossBody,
    state: BossState,
    running: bool,
    /// Scheduler clock, advanced by each tick's delta
    now: Duration,
    run: Option<MainSequence>,
}

impl PatternScheduler {
    pub fn new(config: BossConfig, spawn_position: Vec3) -> Self {
        Self {
            config,
            body: BossBody {
                position: spawn_position,
                spawn_position,
            },
            state: BossState::Idle,
            running: false,
            now: Duration::ZERO,
            run: None,
        }
    }

    pub fn state(&self) -> BossState {
        self.state
    }

    /// Current boss position. Only Pattern4 moves it.
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn spawn_position(&self) -> Vec3 {
        self.body.spawn_position
    }

    /// True while a main sequence exists, including its final gap.
    pub fn is_running(&self) -> bool {
        self.running && self.run.is_some()
    }

    /// Whether Pattern1's fire loop is currently alive.
    pub fn is_side_fire_active(&self) -> bool {
        self.run.as_ref().is_some_and(|run| run.side_fire.is_some())
    }

    /// Replace any current run with a fresh one.
    pub fn start(&mut self, host: &mut dyn PatternHost) {
        self.stop(host);
        self.running = true;
        self.body.position = self.body.spawn_position;
        self.run = Some(MainSequence {
            stage: Stage::Startup {
                until: self.now + secs(STARTUP_DELAY),
            },
            side_fire: None,
        });
    }

    /// Cancel the current run and go Idle. Safe to call when nothing runs.
    ///
    /// Cancelled patterns get no chance to clean up, so markers still
    /// waiting for their bomb are released here.
    pub fn stop(&mut self, host: &mut dyn PatternHost) {
        self.running = false;
        if let Some(mut run) = self.run.take() {
            run.side_fire = None;
            if let Stage::Bombardment(bombardment) = &mut run.stage {
                for marker in bombardment.take_pending_markers() {
                    host.despawn(marker);
                }
            }
        }
        self.state = BossState::Idle;
    }

    /// Advance the scheduler by `delta`.
    pub fn tick(&mut self, delta: Duration, cx: &mut PatternContext) {
        let end = self.now + delta;

        if let Some(mut run) = self.run.take() {
            self.advance(&mut run, end, cx);
            if !matches!(run.stage, Stage::Finished) {
                self.run = Some(run);
            }
        }

        self.now = end;
    }

    fn advance(&mut self, run: &mut MainSequence, end: Duration, cx: &mut PatternContext) {
        let config = &self.config;

        loop {
            match &mut run.stage {
                Stage::Startup { until } => {
                    let at = *until;
                    if at > end {
                        return;
                    }
                    Self::begin_side_fire(run, &mut self.state, at, config);
                }
                Stage::SideFire { until } => {
                    let window_end = *until;
                    if let Some(fire) = run.side_fire.as_mut() {
                        fire.advance(end, window_end, config, cx);
                    }
                    if window_end > end {
                        return;
                    }
                    run.side_fire = None;
                    enter(&mut self.state, BossState::Pattern2);
                    run.stage = Stage::FanSpread(FanSpread::new(window_end, config));
                }
                Stage::FanSpread(fan) => {
                    let Some(at) = fan.advance(end, config, cx) else {
                        return;
                    };
                    run.stage = gap(at, config, AfterGap::Bombardment);
                }
                Stage::Bombardment(bombardment) => {
                    let Some(at) = bombardment.advance(end, config, cx) else {
                        return;
                    };
                    run.stage = gap(at, config, AfterGap::Charge);
                }
                Stage::Charge(charge) => {
                    let Some(at) = charge.advance(end, config, &mut self.body) else {
                        return;
                    };
                    run.stage = gap(at, config, AfterGap::NextCycle);
                }
                Stage::Gap { until, then } => {
                    let (at, then) = (*until, *then);
                    if at > end {
                        return;
                    }
                    match then {
                        AfterGap::Bombardment => {
                            enter(&mut self.state, BossState::Pattern3);
                            // No player: the pattern ends where it began
                            run.stage = match Bombardment::begin(at, config, cx) {
                                Some(task) => Stage::Bombardment(task),
                                None => gap(at, config, AfterGap::Charge),
                            };
                        }
                        AfterGap::Charge => {
                            enter(&mut self.state, BossState::Pattern4);
                            run.stage = Stage::Charge(ChargeAndReturn::new(at, config));
                        }
                        AfterGap::NextCycle => {
                            if self.running && config.loop_patterns {
                                Self::begin_side_fire(run, &mut self.state, at, config);
                            } else {
                                run.side_fire = None;
                                enter(&mut self.state, BossState::Idle);
                                self.running = false;
                                run.stage = Stage::Finished;
                            }
                        }
                    }
                }
                Stage::Finished => return,
            }
        }
    }

    fn begin_side_fire(run: &mut MainSequence, state: &mut BossState, at: Duration, config: &BossConfig) {
        enter(state, BossState::Pattern1);
        run.side_fire = Some(SideFire::new(at, config));
        run.stage = Stage::SideFire {
            until: at + secs(SIDE_FIRE_WINDOW),
        };
    }
}

fn enter(state: &mut BossState, next: BossState) {
    if *state != next {
        debug!("Boss pattern {:?} -> {:?}", state, next);
    }
    *state = next;
}

fn gap(at: Duration, config: &BossConfig, then: AfterGap) -> Stage {
    Stage::Gap {
        until: at + secs(config.pattern_gap),
        then,
    }
}
