//! Ready-set management: arrival admission and idle-skip queries.

use crate::models::{Job, JobState, Time};

/// Tracks which jobs have arrived by the current clock.
///
/// Admission order is precomputed once — indices sorted by
/// `(arrival, index)` — so admission is a cursor walk and the next-arrival
/// query is O(1), whatever the input order of the workload.
#[derive(Debug)]
pub struct ReadySet {
    /// Job indices in ascending `(arrival, index)` order.
    order: Vec<usize>,
    /// First entry of `order` not yet admitted.
    cursor: usize,
}

impl ReadySet {
    /// Builds the admission order for a workload.
    pub fn new(jobs: &[Job]) -> Self {
        let mut order: Vec<usize> = (0..jobs.len()).collect();
        order.sort_by_key(|&i| (jobs[i].arrival, i));
        Self { order, cursor: 0 }
    }

    /// Marks every not-yet-admitted job with `arrival <= clock` as `Ready`.
    ///
    /// Idempotent: already-admitted jobs are untouched. Returns the newly
    /// admitted indices in ascending `(arrival, index)` order.
    pub fn admit(&mut self, jobs: &mut [Job], clock: Time) -> Vec<usize> {
        let mut admitted = Vec::new();
        while let Some(&index) = self.order.get(self.cursor) {
            if jobs[index].arrival > clock {
                break;
            }
            debug_assert_eq!(jobs[index].state, JobState::New);
            jobs[index].state = JobState::Ready;
            admitted.push(index);
            self.cursor += 1;
        }
        admitted
    }

    /// Whether at least one job is currently `Ready`.
    pub fn has_ready(&self, jobs: &[Job]) -> bool {
        jobs.iter().any(|j| j.state == JobState::Ready)
    }

    /// Earliest arrival among jobs not yet admitted, or `None` once every
    /// job has arrived. The idle-skip target.
    pub fn next_arrival(&self, jobs: &[Job]) -> Option<Time> {
        self.order.get(self.cursor).map(|&i| jobs[i].arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_jobs(arrivals: &[Time]) -> Vec<Job> {
        arrivals
            .iter()
            .enumerate()
            .map(|(i, &a)| Job::new(i, a, 10))
            .collect()
    }

    #[test]
    fn test_admit_in_arrival_order() {
        // Out-of-order input arrivals are tolerated.
        let mut jobs = make_jobs(&[7, 0, 3]);
        let mut ready = ReadySet::new(&jobs);

        assert_eq!(ready.admit(&mut jobs, 5), vec![1, 2]);
        assert_eq!(jobs[1].state, JobState::Ready);
        assert_eq!(jobs[2].state, JobState::Ready);
        assert_eq!(jobs[0].state, JobState::New);
    }

    #[test]
    fn test_admit_is_idempotent() {
        let mut jobs = make_jobs(&[0, 2]);
        let mut ready = ReadySet::new(&jobs);

        assert_eq!(ready.admit(&mut jobs, 1), vec![0]);
        assert_eq!(ready.admit(&mut jobs, 1), Vec::<usize>::new());
        assert_eq!(ready.admit(&mut jobs, 2), vec![1]);
    }

    #[test]
    fn test_same_tick_arrival_admitted() {
        let mut jobs = make_jobs(&[3]);
        let mut ready = ReadySet::new(&jobs);

        assert!(ready.admit(&mut jobs, 2).is_empty());
        // Arrival exactly at the clock value must not be missed.
        assert_eq!(ready.admit(&mut jobs, 3), vec![0]);
    }

    #[test]
    fn test_tie_break_by_index() {
        let mut jobs = make_jobs(&[4, 4, 4]);
        let mut ready = ReadySet::new(&jobs);
        assert_eq!(ready.admit(&mut jobs, 4), vec![0, 1, 2]);
    }

    #[test]
    fn test_next_arrival() {
        let mut jobs = make_jobs(&[7, 0, 3]);
        let mut ready = ReadySet::new(&jobs);

        assert_eq!(ready.next_arrival(&jobs), Some(0));
        ready.admit(&mut jobs, 0);
        assert_eq!(ready.next_arrival(&jobs), Some(3));
        ready.admit(&mut jobs, 7);
        assert_eq!(ready.next_arrival(&jobs), None);
    }

    #[test]
    fn test_has_ready() {
        let mut jobs = make_jobs(&[0, 5]);
        let mut ready = ReadySet::new(&jobs);

        assert!(!ready.has_ready(&jobs));
        ready.admit(&mut jobs, 0);
        assert!(ready.has_ready(&jobs));

        jobs[0].state = JobState::Done;
        assert!(!ready.has_ready(&jobs));
    }
}
