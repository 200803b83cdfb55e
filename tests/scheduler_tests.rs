//! Integration tests for Scheduler timing guarantees

use keypad_clock::{NextDue, Scheduler, SchedulerError, TaskSchedule, Tick};

/// Records the tick at which each job fired
struct Recorder {
    now: Tick,
    fast: heapless::Vec<Tick, 128>,
    slow: heapless::Vec<Tick, 128>,
    stretch_next: Option<Tick>,
}

impl Recorder {
    fn new() -> Self {
        Self {
            now: 0,
            fast: heapless::Vec::new(),
            slow: heapless::Vec::new(),
            stretch_next: None,
        }
    }
}

fn fast_job(ctx: &mut Recorder) -> NextDue {
    let _ = ctx.fast.push(ctx.now);
    NextDue::Period
}

fn slow_job(ctx: &mut Recorder) -> NextDue {
    let _ = ctx.slow.push(ctx.now);
    match ctx.stretch_next.take() {
        Some(ticks) => NextDue::After(ticks),
        None => NextDue::Period,
    }
}

fn poll_at(scheduler: &mut Scheduler<Recorder, 4>, ctx: &mut Recorder, tick: Tick) -> usize {
    ctx.now = tick;
    scheduler.run_pending(tick, ctx)
}

#[test]
fn kth_fire_never_early_and_deadline_exact() {
    const PERIOD: Tick = 7;
    let mut scheduler = Scheduler::<Recorder, 4>::new();
    scheduler.add("slow", PERIOD, 0, slow_job).unwrap();
    let mut ctx = Recorder::new();

    // Irregular poll spacing between 1 and 5 ticks
    let mut tick = 0;
    for step in 0..100u32 {
        poll_at(&mut scheduler, &mut ctx, tick);
        tick += 1 + (step * 7 + 3) % 5;
    }

    let fires = ctx.slow.len() as Tick;
    assert!(fires > 10);
    for (k, &fired_at) in ctx.slow.iter().enumerate() {
        assert!(fired_at >= k as Tick * PERIOD);
    }
    assert_eq!(
        scheduler.task("slow").unwrap().schedule().next_due(),
        fires * PERIOD
    );
}

#[test]
fn late_poll_catches_up_without_shifting_phase() {
    let mut scheduler = Scheduler::<Recorder, 4>::new();
    scheduler.add("slow", 10, 0, slow_job).unwrap();
    let mut ctx = Recorder::new();

    poll_at(&mut scheduler, &mut ctx, 0);
    // Three deadlines missed
    assert_eq!(poll_at(&mut scheduler, &mut ctx, 35), 1);
    assert_eq!(poll_at(&mut scheduler, &mut ctx, 35), 1);
    assert_eq!(poll_at(&mut scheduler, &mut ctx, 35), 1);
    assert_eq!(poll_at(&mut scheduler, &mut ctx, 35), 0);

    // Original phase kept: next fire at 40, not 45
    assert_eq!(poll_at(&mut scheduler, &mut ctx, 39), 0);
    assert_eq!(poll_at(&mut scheduler, &mut ctx, 40), 1);
    assert_eq!(ctx.slow.as_slice(), &[0, 35, 35, 35, 40]);
}

#[test]
fn not_due_poll_has_no_side_effects() {
    let mut scheduler = Scheduler::<Recorder, 4>::new();
    scheduler.add("slow", 10, 5, slow_job).unwrap();
    let mut ctx = Recorder::new();

    for tick in 0..5 {
        assert_eq!(poll_at(&mut scheduler, &mut ctx, tick), 0);
    }
    assert!(ctx.slow.is_empty());
    assert_eq!(scheduler.task("slow").unwrap().schedule().next_due(), 5);
}

#[test]
fn job_can_stretch_a_single_period() {
    let mut scheduler = Scheduler::<Recorder, 4>::new();
    scheduler.add("slow", 10, 0, slow_job).unwrap();
    let mut ctx = Recorder::new();

    ctx.stretch_next = Some(3);
    for tick in 0..=23 {
        poll_at(&mut scheduler, &mut ctx, tick);
    }

    assert_eq!(ctx.slow.as_slice(), &[0, 3, 13, 23]);
}

#[test]
fn tasks_keep_registration_order_and_rates() {
    let mut scheduler = Scheduler::<Recorder, 4>::new();
    scheduler.add("fast", 2, 0, fast_job).unwrap();
    scheduler.add("slow", 5, 0, slow_job).unwrap();
    let mut ctx = Recorder::new();

    for tick in 0..20 {
        poll_at(&mut scheduler, &mut ctx, tick);
    }

    assert_eq!(ctx.fast.len(), 10);
    assert_eq!(ctx.slow.as_slice(), &[0, 5, 10, 15]);

    let names: heapless::Vec<&str, 4> = scheduler.tasks().iter().map(|t| t.name()).collect();
    assert_eq!(names.as_slice(), &["fast", "slow"]);
}

#[test]
fn registration_errors() {
    let mut scheduler = Scheduler::<Recorder, 1>::new();
    assert_eq!(
        scheduler.add("slow", 0, 0, slow_job),
        Err(SchedulerError::ZeroPeriod { task: "slow" })
    );
    scheduler.add("slow", 1, 0, slow_job).unwrap();
    assert_eq!(scheduler.add("fast", 1, 0, fast_job), Err(SchedulerError::Full));
    assert_eq!(scheduler.len(), 1);
    assert!(scheduler.task("fast").is_none());
}

#[test]
fn standalone_schedule_is_drift_free() {
    let mut schedule = TaskSchedule::new(16);
    let mut fires = 0;

    for tick in (0..=16 * 50).step_by(3) {
        if schedule.poll(tick) {
            fires += 1;
        }
    }

    assert_eq!(schedule.next_due(), fires * 16);
    assert_eq!(fires, 50);
}
