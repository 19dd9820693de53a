//! Per-iteration progress observers.
//!
//! The colony calls [`Observer::on_iteration`] synchronously after every
//! iteration's pheromone update. Returning [`Control::Stop`] ends the run
//! cooperatively at that point; the result is marked cancelled and keeps
//! the history gathered so far.
//!
//! Any `FnMut(&IterationReport) -> Control` closure is an observer.

use super::config::AcoConfig;
use super::pheromone::PheromoneMatrix;
use super::runner::AcoResult;
use std::time::Duration;

/// Decision returned by an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Control {
    #[default]
    Continue,
    Stop,
}

/// Snapshot handed to observers after each iteration.
#[derive(Debug, Clone, Copy)]
pub struct IterationReport<'a> {
    /// Zero-based index of the iteration that just finished.
    pub iteration: usize,

    /// Best route found so far.
    pub best_route: &'a [usize],

    /// Length of `best_route`.
    pub best_length: f64,

    /// Shortest route among this iteration's ants.
    pub iteration_best_route: &'a [usize],

    /// Length of `iteration_best_route`.
    pub iteration_best_length: f64,

    /// Wall time since the run started.
    pub elapsed: Duration,

    /// Pheromone after this iteration's update.
    pub pheromone: &'a PheromoneMatrix,
}

/// Receives progress notifications from a colony run.
pub trait Observer {
    /// Called once before the first iteration.
    fn on_start(&mut self, _cities: usize, _config: &AcoConfig) {}

    /// Called once per completed iteration.
    fn on_iteration(&mut self, report: &IterationReport<'_>) -> Control;

    /// Called once with the final result, whether completed or cancelled.
    fn on_finish(&mut self, _result: &AcoResult) {}

    /// Runs `self` then `other` on every event. The run stops if either
    /// asks to.
    fn chain<B: Observer>(self, other: B) -> Chain<Self, B>
    where
        Self: Sized,
    {
        Chain {
            first: self,
            second: other,
        }
    }
}

impl<F> Observer for F
where
    F: FnMut(&IterationReport<'_>) -> Control,
{
    fn on_iteration(&mut self, report: &IterationReport<'_>) -> Control {
        self(report)
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl Observer for NoOpObserver {
    fn on_iteration(&mut self, _report: &IterationReport<'_>) -> Control {
        Control::Continue
    }
}

/// Two observers run in sequence. Built by [`Observer::chain`].
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: Observer, B: Observer> Observer for Chain<A, B> {
    fn on_start(&mut self, cities: usize, config: &AcoConfig) {
        self.first.on_start(cities, config);
        self.second.on_start(cities, config);
    }

    fn on_iteration(&mut self, report: &IterationReport<'_>) -> Control {
        let a = self.first.on_iteration(report);
        let b = self.second.on_iteration(report);
        if a == Control::Stop || b == Control::Stop {
            Control::Stop
        } else {
            Control::Continue
        }
    }

    fn on_finish(&mut self, result: &AcoResult) {
        self.first.on_finish(result);
        self.second.on_finish(result);
    }
}

/// Stops the run once the elapsed time reaches a wall-clock budget.
///
/// The check happens after each iteration, so a run may overshoot the
/// limit by up to one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLimitObserver {
    limit: Duration,
}

impl TimeLimitObserver {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl Observer for TimeLimitObserver {
    fn on_iteration(&mut self, report: &IterationReport<'_>) -> Control {
        if report.elapsed >= self.limit {
            Control::Stop
        } else {
            Control::Continue
        }
    }
}

/// Prints a progress table to stdout.
///
/// A header is printed at start, then one row every `every` iterations and
/// for the final iteration, then a one-line summary.
#[derive(Debug, Clone)]
pub struct LogObserver {
    every: usize,
    total: usize,
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(10)
    }
}

impl LogObserver {
    /// Logs every `every` iterations (values below 1 are treated as 1).
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
            total: 0,
        }
    }

    fn should_log(&self, iteration: usize) -> bool {
        (iteration + 1) % self.every == 0 || iteration + 1 == self.total || iteration == 0
    }

    fn print_header(&self) {
        println!(
            "{:<9} | {:<9} | {:<16} | {:<16}",
            "Iter", "Elapsed", "Best", "Iter best"
        );
        println!("{}", "-".repeat(58));
    }
}

impl Observer for LogObserver {
    fn on_start(&mut self, cities: usize, config: &AcoConfig) {
        self.total = config.iterations;
        println!(
            "ACO: {} cities, {} ants, {} iterations (alpha={}, beta={}, rho={}, q={})",
            cities,
            config.ants,
            config.iterations,
            config.alpha,
            config.beta,
            config.evaporation_rate,
            config.q
        );
        self.print_header();
    }

    fn on_iteration(&mut self, report: &IterationReport<'_>) -> Control {
        if self.should_log(report.iteration) {
            let progress = format!("{}/{}", report.iteration + 1, self.total);
            let elapsed = format!("{:.2}s", report.elapsed.as_secs_f64());
            println!(
                "{:<9} | {:<9} | {:<16.4} | {:<16.4}",
                progress, elapsed, report.best_length, report.iteration_best_length
            );
        }
        Control::Continue
    }

    fn on_finish(&mut self, result: &AcoResult) {
        println!(
            "ACO {}: best length {:.4} after {} iterations in {:.2}s",
            result.termination,
            result.best_length,
            result.iterations,
            result.elapsed.as_secs_f64()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(
        pheromone: &PheromoneMatrix,
        iteration: usize,
        elapsed: Duration,
    ) -> IterationReport<'_> {
        IterationReport {
            iteration,
            best_route: &[0, 1],
            best_length: 2.0,
            iteration_best_route: &[0, 1],
            iteration_best_length: 2.0,
            elapsed,
            pheromone,
        }
    }

    #[test]
    fn test_closure_observer() {
        let p = PheromoneMatrix::new(2);
        let mut seen = Vec::new();
        let mut obs = |r: &IterationReport<'_>| {
            seen.push(r.iteration);
            if r.iteration >= 1 {
                Control::Stop
            } else {
                Control::Continue
            }
        };
        assert_eq!(obs.on_iteration(&report(&p, 0, Duration::ZERO)), Control::Continue);
        assert_eq!(obs.on_iteration(&report(&p, 1, Duration::ZERO)), Control::Stop);
        assert_eq!(seen, vec![0, 1]);
    }

    #[test]
    fn test_time_limit() {
        let p = PheromoneMatrix::new(2);
        let mut obs = TimeLimitObserver::new(Duration::from_millis(100));
        assert_eq!(
            obs.on_iteration(&report(&p, 0, Duration::from_millis(50))),
            Control::Continue
        );
        assert_eq!(
            obs.on_iteration(&report(&p, 1, Duration::from_millis(100))),
            Control::Stop
        );
    }

    #[test]
    fn test_chain_stops_if_either_stops() {
        let p = PheromoneMatrix::new(2);
        let mut obs = NoOpObserver.chain(TimeLimitObserver::new(Duration::from_millis(1)));
        assert_eq!(
            obs.on_iteration(&report(&p, 0, Duration::from_secs(1))),
            Control::Stop
        );

        let mut calls = 0;
        let mut obs = (|_: &IterationReport<'_>| Control::Stop).chain(|_: &IterationReport<'_>| {
            calls += 1;
            Control::Continue
        });
        assert_eq!(obs.on_iteration(&report(&p, 0, Duration::ZERO)), Control::Stop);
        drop(obs);
        assert_eq!(calls, 1, "second observer must still see the event");
    }

    #[test]
    fn test_log_observer_schedule() {
        let mut obs = LogObserver::new(5);
        obs.total = 12;
        let logged: Vec<usize> = (0..12).filter(|&i| obs.should_log(i)).collect();
        assert_eq!(logged, vec![0, 4, 9, 11]);
        assert_eq!(LogObserver::new(0).every, 1);
    }
}
