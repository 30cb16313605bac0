//! Input validation for simulated schedules.
//!
//! Rendering itself is permissive: missing optional fields just produce
//! no markup. This module is the opt-in strict path. It detects:
//! - Slots whose interval is reversed (`tstart > tend`)
//! - Slots referring to a task row that does not exist
//! - Two tasks claiming the same row
//! - Sleep/wakeup lists of odd length
//! - A non-positive quantum, which would make the grid scale infinite
//! - A negative or non-finite horizon
//! - More quanta than the time axis draws (`MAX_QUANTA`)
//!
//! Every error is attributed to a single task row and/or timeline slot.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Plan, Schedule, MAX_QUANTA};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Offending task row, when attributable to one.
    pub task: Option<usize>,
    /// Offending position in the timeline, when attributable to one.
    pub slot: Option<usize>,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A slot ends before it starts.
    MalformedSlot,
    /// A slot references a task row that is not in the plan.
    UnknownTaskIndex,
    /// Two tasks share the same row index.
    DuplicateTaskIndex,
    /// A task's sleep/wakeup list has odd length.
    OddEventCount,
    /// The quantum is zero or negative.
    InvalidTimer,
    /// The horizon is negative, infinite or NaN.
    InvalidHorizon,
    /// The horizon spans more quanta than the time axis draws.
    TooManyQuanta,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            task: None,
            slot: None,
        }
    }

    fn at_task(mut self, task: usize) -> Self {
        self.task = Some(task);
        self
    }

    fn at_slot(mut self, slot: usize) -> Self {
        self.slot = Some(slot);
        self
    }

    /// A reversed slot interval.
    pub fn malformed_slot(slot: usize, task: usize, tstart: f64, tend: f64) -> Self {
        Self::new(
            ValidationErrorKind::MalformedSlot,
            format!("slot {slot} of task {task} ends before it starts ({tstart} > {tend})"),
        )
        .at_task(task)
        .at_slot(slot)
    }
}

/// Validates a plan on its own (no timeline).
///
/// Checks:
/// 1. The quantum is positive
/// 2. The horizon is finite and non-negative
/// 3. The horizon holds at most `MAX_QUANTA` quanta
/// 4. No two tasks share a row index
/// 5. Every event list has even length
pub fn validate_plan(plan: &Plan) -> ValidationResult {
    let errors = plan_errors(plan);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a schedule.
///
/// Runs the plan checks, then walks the timeline once checking that:
/// 1. Every slot has `tstart <= tend`
/// 2. Every slot's `index` names a task in the plan
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues,
/// plan problems first, then slot problems in timeline order.
pub fn validate_schedule(schedule: &Schedule) -> ValidationResult {
    let mut errors = plan_errors(&schedule.plan);

    let rows: HashSet<usize> = schedule.plan.tasks.iter().map(|t| t.index).collect();

    for (pos, slot) in schedule.timeline.iter().enumerate() {
        if slot.tstart > slot.tend {
            errors.push(ValidationError::malformed_slot(
                pos, slot.index, slot.tstart, slot.tend,
            ));
        }
        if !rows.contains(&slot.index) {
            errors.push(
                ValidationError::new(
                    ValidationErrorKind::UnknownTaskIndex,
                    format!("slot {pos} references unknown task {}", slot.index),
                )
                .at_task(slot.index)
                .at_slot(pos),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn plan_errors(plan: &Plan) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if plan.timer <= 0.0 || !plan.timer.is_finite() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTimer,
            format!("timer must be positive, got {}", plan.timer),
        ));
    }

    if !plan.runfor.is_finite() || plan.runfor < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHorizon,
            format!("runfor must be finite and non-negative, got {}", plan.runfor),
        ));
    } else if plan.timer > 0.0 && plan.runfor / plan.timer > MAX_QUANTA as f64 {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooManyQuanta,
            format!(
                "runfor {} spans more than {MAX_QUANTA} quanta of {}",
                plan.runfor, plan.timer
            ),
        ));
    }

    let mut seen = HashSet::new();
    for task in &plan.tasks {
        if !seen.insert(task.index) {
            errors.push(
                ValidationError::new(
                    ValidationErrorKind::DuplicateTaskIndex,
                    format!("duplicate task index {} ('{}')", task.index, task.name),
                )
                .at_task(task.index),
            );
        }

        if let Some(events) = &task.events {
            if events.len() % 2 != 0 {
                errors.push(
                    ValidationError::new(
                        ValidationErrorKind::OddEventCount,
                        format!(
                            "task {} has {} sleep/wakeup events, expected an even count",
                            task.index,
                            events.len()
                        ),
                    )
                    .at_task(task.index),
                );
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Task, TaskSlot};

    fn sample_schedule() -> Schedule {
        let plan = Plan::new(1.0, 10.0)
            .with_task(Task::new(0, "A").with_events(vec![3.0, 2.0]))
            .with_task(Task::new(1, "B").with_arrival(2.0));
        Schedule::new(plan)
            .with_slot(TaskSlot::ran(0, 0.0, 3.0))
            .with_slot(TaskSlot::blocked(0, 3.0, 5.0))
            .with_slot(TaskSlot::ran(1, 3.0, 6.0))
    }

    #[test]
    fn test_valid_schedule() {
        assert!(validate_schedule(&sample_schedule()).is_ok());
    }

    #[test]
    fn test_zero_length_slot_is_valid() {
        let s = sample_schedule().with_slot(TaskSlot::runnable(1, 6.0, 6.0));
        assert!(validate_schedule(&s).is_ok());
    }

    #[test]
    fn test_malformed_slot() {
        let s = sample_schedule().with_slot(TaskSlot::ran(1, 8.0, 7.0));
        let errors = validate_schedule(&s).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::MalformedSlot);
        assert_eq!(errors[0].slot, Some(3));
        assert_eq!(errors[0].task, Some(1));
    }

    #[test]
    fn test_unknown_task_index() {
        let s = sample_schedule().with_slot(TaskSlot::ran(7, 0.0, 1.0));
        let errors = validate_schedule(&s).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownTaskIndex && e.task == Some(7)));
    }

    #[test]
    fn test_duplicate_task_index() {
        let plan = Plan::new(1.0, 5.0)
            .with_task(Task::new(0, "A"))
            .with_task(Task::new(0, "B"));
        let errors = validate_plan(&plan).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateTaskIndex);
        assert!(errors[0].message.contains("'B'"));
    }

    #[test]
    fn test_odd_event_count() {
        let plan = Plan::new(1.0, 5.0).with_task(Task::new(0, "A").with_events(vec![3.0]));
        let errors = validate_plan(&plan).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::OddEventCount);
        assert_eq!(errors[0].task, Some(0));
    }

    #[test]
    fn test_invalid_timer() {
        let errors = validate_plan(&Plan::new(0.0, 5.0)).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidTimer);
        assert!(validate_plan(&Plan::new(-1.0, 5.0)).is_err());
    }

    #[test]
    fn test_invalid_horizon() {
        for runfor in [f64::INFINITY, f64::NAN, -1.0] {
            let errors = validate_plan(&Plan::new(1.0, runfor)).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].kind, ValidationErrorKind::InvalidHorizon);
        }
        assert!(validate_plan(&Plan::new(1.0, 0.0)).is_ok());
    }

    #[test]
    fn test_too_many_quanta() {
        let errors = validate_plan(&Plan::new(1e-6, 1000.0)).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::TooManyQuanta);
        assert!(validate_plan(&Plan::new(1.0, MAX_QUANTA as f64)).is_ok());
    }

    #[test]
    fn test_multiple_errors_ordered() {
        let plan = Plan::new(0.0, 5.0).with_task(Task::new(0, "A"));
        let s = Schedule::new(plan)
            .with_slot(TaskSlot::ran(0, 2.0, 1.0))
            .with_slot(TaskSlot::ran(4, 0.0, 1.0));
        let errors = validate_schedule(&s).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidTimer);
        assert_eq!(errors[1].kind, ValidationErrorKind::MalformedSlot);
        assert_eq!(errors[2].kind, ValidationErrorKind::UnknownTaskIndex);
    }
}
