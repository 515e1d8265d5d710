//! The four attack patterns as resumable tasks.
//!
//! Each task keeps its own resume instant on the scheduler's clock and is
//! advanced with the end instant of the current tick. Timed waits are
//! deadline based: when one expires inside a tick the task continues from
//! the exact deadline, not from the tick end. A task that finishes returns
//! the instant it finished at, so the parent can keep consuming the rest of
//! the tick from there.

use std::time::Duration;

use bevy::prelude::*;

use super::config::{BossConfig, CHARGE_OFFSET};
use super::host::{PatternContext, SpawnPoint};
use crate::core::clock::{progress, secs};
use crate::core::{ease_between, EaseCurve};
use crate::projectiles::ProjectileKind;

/// Shortest interval between side-fire volleys, whatever the config says.
const MIN_VOLLEY_INTERVAL: Duration = Duration::from_millis(1);

/// The boss's own position, owned by the scheduler.
#[derive(Debug, Clone, Copy)]
pub(super) struct BossBody {
    pub position: Vec3,
    /// Recorded once when the scheduler is built
    pub spawn_position: Vec3,
}

/// Horizontal angles (degrees) for one fan wave.
///
/// `count` evenly spaced angles covering `arc_degrees`, centered on zero.
/// A count of one or less gives a single straight shot.
pub fn fan_angles(arc_degrees: f32, count: u32) -> Vec<f32> {
    if count <= 1 {
        return vec![0.0];
    }
    let start = -arc_degrees * 0.5;
    let step = arc_degrees / (count - 1) as f32;
    (0..count).map(|i| start + step * i as f32).collect()
}

/// Direction bombs fall along: down and back, flipped by the forward sign.
pub fn bomb_direction(forward_sign: f32) -> Vec3 {
    (Vec3::NEG_Y + Vec3::NEG_Z * 0.35).normalize() * forward_sign
}

/// Pattern1's fire loop. Never finishes on its own; the parent drops it.
#[derive(Debug)]
pub(super) struct SideFire {
    next_volley: Duration,
    interval: Duration,
}

impl SideFire {
    /// Start the loop at `at`. The first volley is due immediately.
    pub fn new(at: Duration, config: &BossConfig) -> Self {
        Self {
            next_volley: at,
            interval: secs(config.side_fire.fire_rate).max(MIN_VOLLEY_INTERVAL),
        }
    }

    /// Fire every volley due at or before `end` and strictly before `cutoff`.
    /// Returns how many volleys went out.
    pub fn advance(
        &mut self,
        end: Duration,
        cutoff: Duration,
        config: &BossConfig,
        cx: &mut PatternContext,
    ) -> u32 {
        let fire = &config.side_fire;
        let forward = Vec3::Z * config.forward_sign();
        let mut volleys = 0;

        while self.next_volley <= end && self.next_volley < cutoff {
            for point in [SpawnPoint::Left, SpawnPoint::Right] {
                cx.fire_from(point, ProjectileKind::Bullet, forward, fire.bullet_speed, fire.bullet_life);
            }
            self.next_volley += self.interval;
            volleys += 1;
        }

        volleys
    }
}

/// Pattern2: a pre-delay, then a fixed number of fan waves.
#[derive(Debug)]
pub(super) struct FanSpread {
    next_wave: Duration,
    waves_fired: u32,
}

impl FanSpread {
    pub fn new(at: Duration, config: &BossConfig) -> Self {
        Self {
            next_wave: at + secs(config.fan_spread.pre_delay),
            waves_fired: 0,
        }
    }

    pub fn advance(
        &mut self,
        end: Duration,
        config: &BossConfig,
        cx: &mut PatternContext,
    ) -> Option<Duration> {
        let fan = &config.fan_spread;

        while self.next_wave <= end {
            if self.waves_fired >= fan.waves {
                return Some(self.next_wave);
            }

            let forward = Vec3::Z * config.forward_sign();
            for angle in fan_angles(fan.arc_degrees, fan.bullets_per_wave) {
                let direction = Quat::from_rotation_y(angle.to_radians()) * forward;
                cx.fire_from(
                    SpawnPoint::Center,
                    ProjectileKind::Bullet,
                    direction,
                    fan.bullet_speed,
                    fan.bullet_life,
                );
            }

            self.waves_fired += 1;
            self.next_wave += secs(fan.wave_interval);
        }

        None
    }
}

#[derive(Debug, Clone, Copy)]
struct Lane {
    x: f32,
    marker: Option<Entity>,
}

/// Pattern3: telegraph markers, then one synchronized bomb volley.
#[derive(Debug)]
pub(super) struct Bombardment {
    lanes: Vec<Lane>,
    release_at: Duration,
    /// Player position when the lanes were picked
    target: Vec3,
}

impl Bombardment {
    /// Pick lanes and place markers. `None` when there is no player to
    /// aim at, in which case the pattern is skipped.
    pub fn begin(at: Duration, config: &BossConfig, cx: &mut PatternContext) -> Option<Self> {
        let Some(target) = cx.host.player_position() else {
            debug!("No player position, bombardment skipped");
            return None;
        };
        let bomb = &config.bombardment;

        let offsets: Vec<f32> = (0..bomb.count)
            .map(|_| {
                let lane = cx.sampler.uniform(-bomb.lane_width, bomb.lane_width);
                lane + cx.sampler.uniform(-bomb.random_jitter, bomb.random_jitter)
            })
            .collect();

        let lanes = offsets
            .into_iter()
            .map(|x| Lane {
                x,
                marker: cx.host.spawn_marker(Vec3::new(x, target.y, target.z)),
            })
            .collect();

        Some(Self {
            lanes,
            release_at: at + secs(bomb.warn_time),
            target,
        })
    }

    pub fn advance(
        &mut self,
        end: Duration,
        config: &BossConfig,
        cx: &mut PatternContext,
    ) -> Option<Duration> {
        if self.release_at > end {
            return None;
        }

        let bomb = &config.bombardment;
        let target = cx.host.player_position().unwrap_or(self.target);
        let direction = bomb_direction(config.forward_sign());

        for lane in &mut self.lanes {
            if let Some(marker) = lane.marker.take() {
                cx.host.despawn(marker);
            }
            let origin = Vec3::new(
                lane.x,
                target.y + bomb.spawn_height,
                target.z + bomb.forward_offset,
            );
            cx.fire(ProjectileKind::Bomb, origin, direction, bomb.fall_speed, bomb.bomb_life);
        }

        Some(self.release_at)
    }

    /// Markers still waiting for their bomb.
    pub fn take_pending_markers(&mut self) -> Vec<Entity> {
        self.lanes.iter_mut().filter_map(|lane| lane.marker.take()).collect()
    }
}

/// One eased move between two points, stepped once per tick.
#[derive(Debug)]
struct Motion {
    from: Vec3,
    to: Vec3,
    elapsed: Duration,
    /// Instant of the previous step
    last: Duration,
}

impl Motion {
    fn new(from: Vec3, to: Vec3, at: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            last: at,
        }
    }

    /// Move to the eased point for this tick. True once the duration is used up.
    fn step(&mut self, end: Duration, duration: Duration, curve: &EaseCurve, position: &mut Vec3) -> bool {
        self.elapsed += end.saturating_sub(self.last);
        self.last = end;
        *position = ease_between(self.from, self.to, curve, progress(self.elapsed, duration));
        self.elapsed >= duration
    }
}

#[derive(Debug)]
enum ChargePhase {
    Anticipation { until: Duration },
    Charge(Motion),
    Return(Motion),
}

/// Pattern4: wind up, charge along world Z, glide back to the spawn position.
#[derive(Debug)]
pub(super) struct ChargeAndReturn {
    phase: ChargePhase,
}

impl ChargeAndReturn {
    pub fn new(at: Duration, config: &BossConfig) -> Self {
        Self {
            phase: ChargePhase::Anticipation {
                until: at + secs(config.charge.anticipation),
            },
        }
    }

    pub fn advance(&mut self, end: Duration, config: &BossConfig, body: &mut BossBody) -> Option<Duration> {
        let charge = &config.charge;

        loop {
            match &mut self.phase {
                ChargePhase::Anticipation { until } => {
                    let until = *until;
                    if until > end {
                        return None;
                    }
                    let start = body.position;
                    let target = start + Vec3::Z * CHARGE_OFFSET;
                    self.phase = ChargePhase::Charge(Motion::new(start, target, until));
                }
                ChargePhase::Charge(motion) => {
                    let duration = secs(charge.charge_duration);
                    if duration.is_zero() {
                        let at = motion.last;
                        self.phase = ChargePhase::Return(Motion::new(body.position, body.spawn_position, at));
                        continue;
                    }
                    if motion.step(end, duration, &charge.charge_ease, &mut body.position) {
                        self.phase = ChargePhase::Return(Motion::new(body.position, body.spawn_position, end));
                    }
                    return None;
                }
                ChargePhase::Return(motion) => {
                    let duration = secs(charge.return_duration);
                    let finished_at = if duration.is_zero() {
                        motion.last
                    } else if motion.step(end, duration, &charge.return_ease, &mut body.position) {
                        end
                    } else {
                        return None;
                    };
                    // Land exactly on the spawn position, whatever the curve did
                    body.position = body.spawn_position;
                    return Some(finished_at);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::host::testing::{RecordingHost, ScriptedSampler};

    fn tick(seconds: f32) -> Duration {
        secs(seconds)
    }

    #[test]
    fn fan_angles_cover_arc_symmetrically() {
        let angles = fan_angles(70.0, 11);
        assert_eq!(angles.len(), 11);
        for (i, angle) in angles.iter().enumerate() {
            let expected = -35.0 + 7.0 * i as f32;
            assert!((angle - expected).abs() < 1e-4, "{angle} vs {expected}");
        }
        assert!((angles[5]).abs() < 1e-4);
    }

    #[test]
    fn fan_angles_single_or_empty_count_fires_straight() {
        assert_eq!(fan_angles(70.0, 1), vec![0.0]);
        assert_eq!(fan_angles(70.0, 0), vec![0.0]);
    }

    #[test]
    fn bomb_direction_is_unit_and_flips_with_sign() {
        let down = bomb_direction(1.0);
        assert!((down.length() - 1.0).abs() < 1e-6);
        assert!(down.y < 0.0 && down.z < 0.0);
        assert_eq!(bomb_direction(-1.0), -down);
    }

    #[test]
    fn side_fire_stops_before_cutoff() {
        let config = BossConfig::default();
        let mut host = RecordingHost::default();
        let mut sampler = ScriptedSampler::default();
        let mut cx = PatternContext::new(&mut host, &mut sampler);

        let mut fire = SideFire::new(Duration::ZERO, &config);
        let cutoff = tick(3.0);
        let volleys = fire.advance(tick(10.0), cutoff, &config, &mut cx);

        assert_eq!(volleys, 25);
        assert_eq!(host.launches().count(), 50);
    }

    #[test]
    fn fan_spread_fires_every_wave_then_waits_out_last_interval() {
        let config = BossConfig::default();
        let mut host = RecordingHost::default();
        let mut sampler = ScriptedSampler::default();
        let mut cx = PatternContext::new(&mut host, &mut sampler);

        let mut fan = FanSpread::new(Duration::ZERO, &config);
        assert_eq!(fan.advance(tick(1.99), &config, &mut cx), None);
        assert_eq!(fan.advance(tick(2.0), &config, &mut cx), None);
        let finished = fan.advance(tick(60.0), &config, &mut cx);

        assert_eq!(finished, Some(tick(2.0) + tick(0.35) * 4));
        assert_eq!(host.launches().count(), 4 * 11);
    }

    #[test]
    fn bombardment_without_player_does_nothing() {
        let config = BossConfig::default();
        let mut host = RecordingHost {
            player: None,
            ..default()
        };
        let mut sampler = ScriptedSampler::default();
        let mut cx = PatternContext::new(&mut host, &mut sampler);

        assert!(Bombardment::begin(Duration::ZERO, &config, &mut cx).is_none());
        assert!(host.events.is_empty());
        assert!(sampler.requests.is_empty());
    }

    #[test]
    fn bombardment_sums_two_draws_per_lane() {
        let mut config = BossConfig::default();
        config.bombardment.count = 2;
        let mut host = RecordingHost::default();
        let mut sampler = ScriptedSampler::new([1.0, 0.25, -3.0, -0.5]);
        let mut cx = PatternContext::new(&mut host, &mut sampler);

        Bombardment::begin(Duration::ZERO, &config, &mut cx);

        let xs: Vec<f32> = host.markers().iter().map(|(_, p)| p.x).collect();
        assert_eq!(xs, vec![1.25, -3.5]);
        assert_eq!(
            sampler.requests,
            vec![(-6.0, 6.0), (-0.6, 0.6), (-6.0, 6.0), (-0.6, 0.6)]
        );
    }

    #[test]
    fn charge_ends_on_spawn_position() {
        let mut config = BossConfig::default();
        config.charge.charge_ease = EaseCurve::Keyframes(vec![(0.0, 0.0), (0.5, 1.4), (1.0, 0.9)]);
        config.charge.return_ease = EaseCurve::EaseOut;
        let spawn = Vec3::new(0.0, 3.0, 10.0);
        let mut body = BossBody {
            position: spawn,
            spawn_position: spawn,
        };

        let mut task = ChargeAndReturn::new(Duration::ZERO, &config);
        let dt = tick(1.0 / 60.0);
        let mut now = Duration::ZERO;
        let mut deepest = spawn.z;
        let finished = loop {
            now += dt;
            if let Some(at) = task.advance(now, &config, &mut body) {
                break at;
            }
            deepest = deepest.min(body.position.z);
            assert!(now < tick(5.0), "charge never finished");
        };

        assert_eq!(body.position, spawn);
        assert_eq!(finished, now);
        assert!(deepest < spawn.z - 5.0, "overshooting curve should pass the target");
    }

    #[test]
    fn zero_durations_skip_motion() {
        let mut config = BossConfig::default();
        config.charge.charge_duration = 0.0;
        config.charge.return_duration = 0.0;
        let spawn = Vec3::ZERO;
        let mut body = BossBody {
            position: Vec3::new(1.0, 0.0, 0.0),
            spawn_position: spawn,
        };

        let mut task = ChargeAndReturn::new(Duration::ZERO, &config);
        assert_eq!(task.advance(tick(1.0), &config, &mut body), Some(tick(0.5)));
        assert_eq!(body.position, spawn);
    }
}
