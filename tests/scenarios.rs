//! End-to-end colony scenarios.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::Cell;
use std::time::Duration;
use u_aco::aco::{
    AcoConfig, AntColony, Control, IterationReport, LogObserver, Observer, RunState,
    TimeLimitObserver,
};
use u_aco::cities::{generate_cities, parse_tsplib, City};
use u_aco::distance::DistanceMatrix;
use u_aco::AcoError;

fn unit_square() -> DistanceMatrix {
    let cities = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)].map(City::from);
    DistanceMatrix::from_points(&cities).expect("finite coordinates")
}

#[test]
fn test_unit_square_for_various_parameters() {
    for (alpha, beta, rho, q) in [
        (1.0, 5.0, 0.5, 100.0),
        (1.0, 2.0, 0.1, 1.0),
        (2.0, 1.0, 0.9, 10.0),
        (0.0, 0.0, 0.0, 0.5),
    ] {
        for seed in 0..5 {
            let config = AcoConfig::default()
                .with_ants(10)
                .with_iterations(20)
                .with_alpha(alpha)
                .with_beta(beta)
                .with_evaporation_rate(rho)
                .with_q(q)
                .with_seed(seed);
            let result = AntColony::new(unit_square(), config)
                .expect("valid")
                .run()
                .expect("run");
            assert!(
                (result.best_length - 4.0).abs() < 1e-9,
                "alpha={alpha} beta={beta} rho={rho} q={q} seed={seed}: got {}",
                result.best_length
            );
            assert!(result.history.iter().all(|&h| h >= 4.0 - 1e-9));
        }
    }
}

#[test]
fn test_two_cities_every_iteration() {
    let dm = DistanceMatrix::from_points(&[City::new(1.0, 1.0), City::new(4.0, 5.0)])
        .expect("finite coordinates");
    let expected = 2.0 * dm.get(0, 1);
    let config = AcoConfig::default().with_iterations(10).with_seed(3);
    let mut colony = AntColony::new(dm, config).expect("valid");

    let mut observer = |r: &IterationReport<'_>| {
        assert!((r.best_length - expected).abs() < 1e-12);
        assert!((r.iteration_best_length - expected).abs() < 1e-12);
        Control::Continue
    };
    let result = colony.run_with_observer(&mut observer).expect("run");
    assert_eq!(result.history.len(), 10);
}

#[test]
fn test_cancellation_prefix_matches_full_run() {
    let mut rng = StdRng::seed_from_u64(5);
    let dm = DistanceMatrix::from_points(&generate_cities(18, &mut rng)).expect("finite");
    let config = AcoConfig::default().with_ants(6).with_iterations(25).with_seed(17);

    let full = AntColony::new(dm.clone(), config.clone())
        .expect("valid")
        .run()
        .expect("run");

    for k in [0usize, 3, 24] {
        let mut stop = |r: &IterationReport<'_>| {
            if r.iteration == k {
                Control::Stop
            } else {
                Control::Continue
            }
        };
        let partial = AntColony::new(dm.clone(), config.clone())
            .expect("valid")
            .run_with_observer(&mut stop)
            .expect("run");
        assert_eq!(partial.history.len(), k + 1);
        assert_eq!(partial.history[..], full.history[..=k]);
        assert!(partial.cancelled());
    }
}

#[test]
fn test_time_limit_zero_stops_after_one_iteration() {
    let config = AcoConfig::default().with_iterations(500).with_seed(1);
    let mut colony = AntColony::new(unit_square(), config).expect("valid");
    let mut observer = TimeLimitObserver::new(Duration::ZERO);
    let result = colony.run_with_observer(&mut observer).expect("run");
    assert_eq!(result.iterations, 1);
    assert_eq!(colony.state(), RunState::Cancelled);
}

#[test]
fn test_observer_lifecycle_hooks() {
    struct Recorder<'a> {
        started: &'a Cell<bool>,
        finished: &'a Cell<usize>,
    }

    impl Observer for Recorder<'_> {
        fn on_start(&mut self, cities: usize, config: &AcoConfig) {
            assert_eq!(cities, 4);
            assert_eq!(config.iterations, 4);
            self.started.set(true);
        }

        fn on_iteration(&mut self, report: &IterationReport<'_>) -> Control {
            assert!(report.pheromone.is_well_formed());
            Control::Continue
        }

        fn on_finish(&mut self, result: &u_aco::aco::AcoResult) {
            self.finished.set(result.iterations);
        }
    }

    let started = Cell::new(false);
    let finished = Cell::new(0);
    let mut observer = Recorder {
        started: &started,
        finished: &finished,
    }
    .chain(LogObserver::new(2));

    let config = AcoConfig::default().with_iterations(4).with_seed(2);
    AntColony::new(unit_square(), config)
        .expect("valid")
        .run_with_observer(&mut observer)
        .expect("run");

    assert!(started.get());
    assert_eq!(finished.get(), 4);
}

#[test]
fn test_tsplib_end_to_end() {
    let text = "NAME: square\nTYPE: TSP\nDIMENSION: 4\nNODE_COORD_SECTION\n\
                1 0 0\n2 10 0\n3 10 10\n4 0 10\nEOF\n";
    let cities = parse_tsplib(text).expect("valid");
    let dm = DistanceMatrix::from_points(&cities).expect("finite coordinates");
    let config = AcoConfig::default().with_ants(10).with_iterations(20).with_seed(4);
    let result = AntColony::new(dm, config).expect("valid").run().expect("run");
    assert!((result.best_length - 40.0).abs() < 1e-9);
}

#[test]
fn test_configuration_errors() {
    let cases = [
        AcoConfig::default().with_ants(0),
        AcoConfig::default().with_iterations(0),
        AcoConfig::default().with_evaporation_rate(-0.5),
        AcoConfig::default().with_q(0.0),
    ];
    for config in cases {
        let err = AntColony::new(unit_square(), config).unwrap_err();
        assert!(matches!(err, AcoError::InvalidConfig { .. }), "got {err}");
    }

    let one = DistanceMatrix::from_points(&[City::new(0.0, 0.0)]).expect("single city");
    assert!(matches!(
        AntColony::new(one, AcoConfig::default()),
        Err(AcoError::TooFewCities { count: 1 })
    ));
}

#[test]
fn test_far_apart_tsplib_cities_are_rejected() {
    // Each coordinate parses as finite, the distance between them does not.
    let text = "NODE_COORD_SECTION\n1 -1e308 0\n2 1e308 0\n3 0 5\nEOF\n";
    let cities = parse_tsplib(text).expect("coordinates are finite");
    let err = DistanceMatrix::from_points(&cities).unwrap_err();
    assert!(matches!(err, AcoError::InvalidDistanceMatrix { .. }), "got {err}");
}

#[test]
fn test_pheromone_concentrates_on_best_tour() {
    let config = AcoConfig::default()
        .with_ants(20)
        .with_iterations(40)
        .with_evaporation_rate(0.3)
        .with_seed(9);
    let mut colony = AntColony::new(unit_square(), config).expect("valid");
    colony.run().expect("run");

    let strong = colony.pheromone().strong_edges(0.5);
    // The perimeter edges dominate the diagonals.
    for (i, j, _) in strong {
        assert_ne!((i, j), (0, 2));
        assert_ne!((i, j), (1, 3));
    }
}
