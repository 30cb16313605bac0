//! Seeded randomized checks over generated timelines.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use u_schedtex::models::{Plan, SchedData, Schedule, SlotEvent, Task, TaskSlot};
use u_schedtex::summary::SummaryInput;
use u_schedtex::{DiagramRenderer, RenderOptions, SummaryExtractor, SummaryOptions};

const SEEDS: u64 = 64;
const MESSAGES: [&str; 4] = ["preempt", "io", "wake", ""];
const COLORS: [&str; 2] = ["red", "blue"];

fn random_schedule(rng: &mut SmallRng) -> Schedule {
    let timer = [0.5, 1.0, 2.0][rng.random_range(0..3usize)];
    let runfor = timer * rng.random_range(4..12) as f64;
    let tasks = rng.random_range(1..5usize);

    let mut plan = Plan::new(timer, runfor);
    for i in 0..tasks {
        let mut task = Task::new(i, format!("T{i}"))
            .with_arrival(timer * rng.random_range(0..3) as f64)
            .with_computation(timer * rng.random_range(1..6) as f64);
        if rng.random_bool(0.5) {
            task = task.with_exit(timer * rng.random_range(3..14) as f64);
        }
        plan = plan.with_task(task);
    }

    let mut schedule =
        Schedule::new(plan).with_sched_data(SchedData::new("Random workload", ""));
    for _ in 0..rng.random_range(0..24) {
        let tstart = timer * rng.random_range(0..16) as f64;
        let tend = tstart + timer * rng.random_range(1..3) as f64;
        let index = rng.random_range(0..tasks);
        let event = match rng.random_range(0..5) {
            0 | 1 => SlotEvent::Ran,
            2 => SlotEvent::Blocked,
            3 => SlotEvent::Runnable,
            _ => SlotEvent::Exited,
        };
        let mut slot = TaskSlot::new(index, tstart, tend, event);
        if rng.random_bool(0.4) {
            slot = slot.with_annotation(
                MESSAGES[rng.random_range(0..MESSAGES.len())],
                COLORS[rng.random_range(0..COLORS.len())],
            );
        }
        schedule = schedule.with_slot(slot);
    }
    schedule
}

fn for_each_schedule(mut check: impl FnMut(&Schedule)) {
    for seed in 0..SEEDS {
        let mut rng = SmallRng::seed_from_u64(seed);
        check(&random_schedule(&mut rng));
    }
}

#[test]
fn bars_match_visible_slots() {
    for_each_schedule(|s| {
        let expected = s
            .visible_slots()
            .filter(|slot| matches!(slot.event, SlotEvent::Ran | SlotEvent::Blocked))
            .count();
        let statements = DiagramRenderer::new().statements(s);
        assert_eq!(statements.iter().filter(|st| st.is_rect()).count(), expected);
    });
}

#[test]
fn rendering_is_deterministic() {
    for_each_schedule(|s| {
        let renderer = DiagramRenderer::new();
        assert_eq!(renderer.render(s), renderer.render(s));
        let extractor = SummaryExtractor::new();
        assert_eq!(extractor.summarize(s), extractor.summarize(s));
    });
}

#[test]
fn blank_diagram_keeps_frame_only() {
    let renderer = DiagramRenderer::with_options(RenderOptions::new().with_blank(true));
    for_each_schedule(|s| {
        let tikz = renderer.render(s);
        assert!(!tikz.contains("rectangle"));
        assert!(!tikz.contains("Legend:"));
        assert!(!tikz.contains("circle"));
        assert_eq!(tikz.matches("[->]").count(), s.plan.task_count());
    });
}

#[test]
fn legend_follows_first_occurrence() {
    for_each_schedule(|s| {
        let mut expected: Vec<(&str, &str)> = Vec::new();
        for slot in s.visible_slots() {
            if matches!(slot.event, SlotEvent::Exited | SlotEvent::Other) {
                continue;
            }
            if let Some(a) = slot.annotation() {
                let key = (a.message.as_str(), a.color.as_str());
                if !expected.contains(&key) {
                    expected.push(key);
                }
            }
        }

        let statements = DiagramRenderer::new().statements(s);
        let header = statements
            .iter()
            .position(|st| st.text_content() == Some("Legend:"));
        let Some(header) = header else {
            assert!(expected.is_empty());
            return;
        };

        let entries: Vec<_> = statements[header + 1..].chunks(2).collect();
        assert_eq!(entries.len(), expected.len());
        for (n, (pair, (message, _))) in entries.iter().zip(&expected).enumerate() {
            let number = (n + 1).to_string();
            assert_eq!(pair[0].text_content(), Some(number.as_str()));
            assert_eq!(pair[1].text_content(), Some(*message));
        }
    });
}

#[test]
fn summary_rows_cover_every_task() {
    let blank = SummaryExtractor::with_options(SummaryOptions::new().with_blank(true));
    for_each_schedule(|s| {
        let complete = SummaryExtractor::new().rows(s);
        let worksheet = blank.rows(s);
        let plan_only = SummaryExtractor::new().rows(SummaryInput::Plan(&s.plan));

        assert_eq!(complete.len(), s.plan.task_count());
        assert_eq!(worksheet.len(), complete.len());
        assert_eq!(plan_only.len(), complete.len());

        for (c, b) in complete.iter().zip(&worksheet) {
            assert_eq!((c.row, &c.name, c.arrival), (b.row, &b.name, b.arrival));
            assert!(!b.has_dynamic());

            let waiting = c.waiting.unwrap_or_default();
            let quanta = waiting / s.plan.timer;
            assert!((quanta - quanta.round()).abs() < 1e-9);
        }
        assert!(plan_only.iter().all(|r| !r.has_dynamic()));
    });
}
