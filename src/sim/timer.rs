//! Wall-clock timers and the difficulty ramp
//!
//! Timers are polled once per frame against the current clock reading
//! instead of sleeping or queueing events. A poll fires at most once, so a
//! stall longer than the period coalesces the missed fires into one.

use crate::tuning::Tuning;

/// Fixed-period timer measured against a millisecond clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    period_ms: u64,
    last_fired_ms: u64,
}

impl Timer {
    /// Create a timer whose first fire is one period after `now_ms`
    pub fn new(period_ms: u64, now_ms: u64) -> Self {
        Self {
            period_ms,
            last_fired_ms: now_ms,
        }
    }

    /// Whether a full period has elapsed, without firing
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_fired_ms) >= self.period_ms
    }

    /// When the next fire is scheduled
    pub fn next_due_ms(&self) -> u64 {
        self.last_fired_ms.saturating_add(self.period_ms)
    }

    /// Fire if due. The timer stays on its period grid: late polls do not
    /// push later fires back, and every missed period collapses into this
    /// one fire.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        if !self.is_due(now_ms) {
            return false;
        }
        if self.period_ms == 0 {
            self.last_fired_ms = now_ms;
        } else {
            let periods = (now_ms - self.last_fired_ms) / self.period_ms;
            self.last_fired_ms += periods * self.period_ms;
        }
        true
    }

    /// Fire if due and start the next period at `now_ms`. For cooldowns,
    /// which count from the moment of use.
    pub fn trigger(&mut self, now_ms: u64) -> bool {
        if self.is_due(now_ms) {
            self.last_fired_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Change the period and restart the countdown from `now_ms`
    pub fn rearm(&mut self, period_ms: u64, now_ms: u64) {
        self.period_ms = period_ms;
        self.last_fired_ms = now_ms;
    }
}

/// Current meteoroid difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Meteoroid movement per frame (pixels)
    pub meteoroid_speed: f32,
    /// Meteoroid spawn period
    pub spawn_interval_ms: u64,
}

/// Timer fires observed during one poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scheduled {
    /// Spawn one meteoroid
    pub spawn: bool,
    /// Difficulty went up this frame
    pub escalated: bool,
}

/// Spawn cadence and difficulty escalation
#[derive(Debug, Clone)]
pub struct Scheduler {
    spawn: Timer,
    escalation: Timer,
    difficulty: Difficulty,
    speed_step: f32,
    interval_step_ms: u64,
    min_interval_ms: u64,
}

impl Scheduler {
    pub fn new(tuning: &Tuning, now_ms: u64) -> Self {
        Self {
            spawn: Timer::new(tuning.spawn_interval_ms, now_ms),
            escalation: Timer::new(tuning.escalation_period_ms, now_ms),
            difficulty: Difficulty {
                meteoroid_speed: tuning.meteoroid_speed,
                spawn_interval_ms: tuning.spawn_interval_ms,
            },
            speed_step: tuning.speed_step,
            interval_step_ms: tuning.spawn_interval_step_ms,
            min_interval_ms: tuning.min_spawn_interval_ms,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Check both timers. When both are due in one poll they run in
    /// schedule order: a spawn scheduled no later than the escalation fires
    /// first; a later one is superseded by the re-armed spawn timer.
    pub fn poll(&mut self, now_ms: u64) -> Scheduled {
        let spawn_first = self.spawn.next_due_ms() <= self.escalation.next_due_ms();
        let mut spawn = spawn_first && self.spawn.fire(now_ms);
        let escalated = self.escalation.fire(now_ms);
        if escalated {
            self.escalate(self.escalation.last_fired_ms);
        }
        if !spawn_first {
            spawn = self.spawn.fire(now_ms);
        }
        Scheduled { spawn, escalated }
    }

    /// Raise meteoroid speed, shorten the spawn period (down to the floor) and
    /// re-arm the spawn timer with the new period from `at_ms`.
    pub fn escalate(&mut self, at_ms: u64) {
        self.difficulty.meteoroid_speed += self.speed_step;
        self.difficulty.spawn_interval_ms = self
            .difficulty
            .spawn_interval_ms
            .saturating_sub(self.interval_step_ms)
            .max(self.min_interval_ms);
        self.spawn.rearm(self.difficulty.spawn_interval_ms, at_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_after_period() {
        let mut timer = Timer::new(500, 1000);
        assert!(!timer.fire(1499));
        assert!(timer.fire(1500));
        assert!(!timer.fire(1999));
        assert!(timer.fire(2000));
    }

    #[test]
    fn test_late_poll_keeps_grid() {
        let mut timer = Timer::new(500, 0);
        assert!(timer.fire(530));
        // Next fire is still due at 1000, not 1030
        assert!(!timer.fire(999));
        assert!(timer.fire(1000));
    }

    #[test]
    fn test_timer_coalesces_stalls() {
        let mut timer = Timer::new(100, 0);
        // Five periods late: one fire, not five
        assert!(timer.fire(550));
        assert!(!timer.fire(599));
        assert!(timer.fire(600));
    }

    #[test]
    fn test_trigger_counts_from_use() {
        let mut timer = Timer::new(500, 0);
        assert!(timer.trigger(700));
        assert!(!timer.trigger(1000));
        assert!(!timer.trigger(1199));
        assert!(timer.trigger(1200));
    }

    #[test]
    fn test_timer_rearm() {
        let mut timer = Timer::new(1500, 0);
        timer.rearm(1400, 1000);
        assert_eq!(timer.next_due_ms(), 2400);
        assert!(!timer.is_due(2399));
        assert!(timer.is_due(2400));
    }

    #[test]
    fn test_three_escalations() {
        let tuning = Tuning::default();
        let mut scheduler = Scheduler::new(&tuning, 0);

        for now in [15_000, 30_000, 45_000] {
            assert!(scheduler.poll(now).escalated);
        }

        let difficulty = scheduler.difficulty();
        assert_eq!(difficulty.spawn_interval_ms, 1200);
        assert!((difficulty.meteoroid_speed - 4.75).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_interval_floor() {
        let tuning = Tuning::default();
        let mut scheduler = Scheduler::new(&tuning, 0);

        let mut previous = scheduler.difficulty();
        for i in 1..=40 {
            scheduler.escalate(i * 15_000);
            let current = scheduler.difficulty();
            assert!(current.spawn_interval_ms <= previous.spawn_interval_ms);
            assert!(current.meteoroid_speed >= previous.meteoroid_speed);
            assert!(current.spawn_interval_ms >= 200);
            previous = current;
        }
        assert_eq!(previous.spawn_interval_ms, 200);
    }

    #[test]
    fn test_escalation_rearms_spawn_timer() {
        let tuning = Tuning::default();
        let mut scheduler = Scheduler::new(&tuning, 0);

        // Spawn timer last fired at 14_000
        assert!(scheduler.poll(1_500).spawn);
        scheduler.spawn.rearm(1_500, 14_000);

        let scheduled = scheduler.poll(15_000);
        assert!(scheduled.escalated);
        assert!(!scheduled.spawn);
        // New 1400ms period counts from the escalation
        assert!(!scheduler.poll(16_399).spawn);
        assert!(scheduler.poll(16_400).spawn);
    }

    /// Scheduled instants of every spawn and escalation up to `until_ms`,
    /// polling once every `frame_ms`
    fn schedule_at_frame_rate(frame_ms: u64, until_ms: u64) -> (Vec<u64>, Vec<u64>) {
        let mut scheduler = Scheduler::new(&Tuning::default(), 0);
        let mut spawns = Vec::new();
        let mut escalations = Vec::new();
        let mut now = 0;
        while now < until_ms + frame_ms {
            now += frame_ms;
            let scheduled = scheduler.poll(now);
            if scheduled.spawn {
                spawns.push(scheduler.spawn.last_fired_ms);
            }
            if scheduled.escalated {
                escalations.push(scheduler.escalation.last_fired_ms);
            }
        }
        spawns.retain(|&t| t <= until_ms);
        escalations.retain(|&t| t <= until_ms);
        (spawns, escalations)
    }

    #[test]
    fn test_cadence_independent_of_frame_rate() {
        let until = 120_000;
        let (spawns, escalations) = schedule_at_frame_rate(1, until);
        assert_eq!(escalations, (1..=8).map(|i| i * 15_000).collect::<Vec<_>>());
        // Ten spawns before the first escalation, then the spawn timer
        // restarts from each escalation
        assert_eq!(&spawns[..10], &(1..=10).map(|i| i * 1_500).collect::<Vec<_>>()[..]);
        assert_eq!(spawns[10], 15_000 + 1_400);

        for frame_ms in [16, 33] {
            assert_eq!(schedule_at_frame_rate(frame_ms, until), (spawns.clone(), escalations.clone()));
        }
    }
}
