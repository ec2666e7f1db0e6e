//! Cooperative timer queue on a virtual millisecond clock
//!
//! Every repeating callback the session owns (frame tick, enemy spawn) sits
//! in one queue. The host moves the clock forward and pops due work one
//! callback at a time, so callbacks never overlap. Cancelling removes the
//! task immediately; a cancelled task is never popped again.

/// Shortest period a task can repeat at; anything below (or non-finite)
/// is raised to this so a drain always terminates
pub const MIN_PERIOD_MS: f64 = 1.0;

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Task<T> {
    id: TaskId,
    payload: T,
    period_ms: f64,
    next_due_ms: f64,
}

/// Single run queue of repeating tasks
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: f64,
    next_id: u64,
    tasks: Vec<Task<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            next_id: 1,
            tasks: Vec::new(),
        }
    }

    /// Current clock reading
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Schedule `payload` to fire every `period_ms`, first at `now + period_ms`
    ///
    /// Periods below `MIN_PERIOD_MS`, NaN and infinities run at `MIN_PERIOD_MS`.
    pub fn every(&mut self, period_ms: f64, payload: T) -> TaskId {
        let period_ms = clamp_period(period_ms);
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            payload,
            period_ms,
            next_due_ms: self.now_ms + period_ms,
        });
        id
    }

    /// Remove every task
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Pop the earliest task due at or before `until_ms`
    ///
    /// The clock jumps to that task's due time and the task is re-armed one
    /// period later. Ties go to the task scheduled first.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<(TaskId, T)> {
        let task = self
            .tasks
            .iter_mut()
            .filter(|t| t.next_due_ms <= until_ms)
            .min_by(|a, b| {
                a.next_due_ms
                    .partial_cmp(&b.next_due_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.id.0.cmp(&b.id.0))
            })?;

        self.now_ms = self.now_ms.max(task.next_due_ms);
        task.next_due_ms += task.period_ms;
        Some((task.id, task.payload.clone()))
    }

    /// Move the clock to `until_ms` once all due work has been popped
    pub fn advance_to(&mut self, until_ms: f64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

/// Raise a period to `MIN_PERIOD_MS` unless it is finite and at least that
pub fn clamp_period(period_ms: f64) -> f64 {
    if period_ms.is_finite() && period_ms >= MIN_PERIOD_MS {
        period_ms
    } else {
        MIN_PERIOD_MS
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
