//! Falsification tests for the published queueing results.
//!
//! Each test names the null hypothesis it tries to reject.

use queue_metrics::prelude::*;

const EPS: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < EPS,
        "{what}: expected {expected}, got {actual}"
    );
}

// H0: M/M/1 with λ=20, μ=25 deviates from the textbook values
// Falsification: compare every metric against ρ=0.8, P0=0.2, Lq=3.2, L=4, Wq=0.16, W=0.2
#[test]
fn h0_1_mm1_reference_values() {
    let q = MM1Queue::new(20.0, 25.0);
    assert_close(q.utilization(), 0.8, "rho");
    assert_close(q.p0(), 0.2, "P0");
    assert_close(q.lq(), 3.2, "Lq");
    assert_close(q.l(), 4.0, "L");
    assert_close(q.wq(), 0.16, "Wq");
    assert_close(q.w(), 0.2, "W");
    assert_eq!(q.state(), MetricState::Value);
}

// H0: deterministic service does not halve the M/M/1 queue length
#[test]
fn h0_2_md1_is_half_of_mm1() {
    let md1 = MD1Queue::new(20.0, 25.0);
    let mm1 = MM1Queue::new(20.0, 25.0);
    assert_close(md1.lq(), 1.6, "M/D/1 Lq");
    assert_close(mm1.lq(), 2.0 * md1.lq(), "M/M/1 = 2 x M/D/1");
    assert_close(md1.p0(), 0.2, "M/D/1 P0");
}

// H0: Pollaczek-Khinchine does not reduce to its two classical limits
#[test]
fn h0_3_mg1_limits() {
    let exponential = MG1Queue::new(20.0, 25.0, 1.0 / 25.0);
    let deterministic = MG1Queue::new(20.0, 25.0, 0.0);
    assert_close(exponential.lq(), MM1Queue::new(20.0, 25.0).lq(), "sigma = 1/mu");
    assert_close(deterministic.lq(), MD1Queue::new(20.0, 25.0).lq(), "sigma = 0");
}

// H0: Erlang-C with one server differs from M/M/1
#[test]
fn h0_4_mmc_single_server() {
    let mmc = MMcQueue::new(20.0, 25.0, 1);
    let mm1 = MM1Queue::new(20.0, 25.0);
    for (a, b, what) in [
        (mmc.p0(), mm1.p0(), "P0"),
        (mmc.lq(), mm1.lq(), "Lq"),
        (mmc.l(), mm1.l(), "L"),
        (mmc.wq(), mm1.wq(), "Wq"),
        (mmc.w(), mm1.w(), "W"),
    ] {
        assert_close(a, b, what);
    }
}

// H0: adding a server can lengthen the queue
#[test]
fn h0_5_servers_shorten_queue() {
    let two = MMcQueue::new(20.0, 25.0, 2);
    let three = MMcQueue::new(20.0, 25.0, 3);
    assert!(two.lq() >= three.lq());
    assert!(two.wq() >= three.wq());
}

// H0: the priority decomposition disagrees with the worked example
#[test]
fn h0_6_priority_reference_values() {
    let q = MMcPriorityQueue::new([5.0, 10.0, 5.0], 25.0, 1);
    assert_close(q.p0(), 0.2, "P0");
    assert_close(q.lq(), 3.2, "Lq");

    for (k, (wq, lq)) in [(0.04, 0.2), (0.10, 1.0), (0.40, 2.0)].into_iter().enumerate() {
        assert_close(q.wq_k(k + 1), wq, "Wq_k");
        assert_close(q.lq_k(k + 1), lq, "Lq_k");
    }

    let total: f64 = (1..=q.class_count()).map(|k| q.lq_k(k)).sum();
    assert_close(total, q.lq(), "sum of Lq_k");
}

// H0: an overloaded queue reports finite metrics
#[test]
fn h0_7_overload_is_infinite() {
    let queues: Vec<Queue> = vec![
        MM1Queue::new(30.0, 25.0).into(),
        MD1Queue::new(30.0, 25.0).into(),
        MG1Queue::new(30.0, 25.0, 0.01).into(),
        MMcQueue::new(30.0, 25.0, 1).into(),
        MMcPriorityQueue::new([10.0, 20.0], 25.0, 1).into(),
    ];
    for q in &queues {
        assert!(q.is_valid(), "{} should be valid", q.name());
        assert!(!q.is_feasible(), "{} should be infeasible", q.name());
        for metric in [q.p0(), q.lq(), q.l(), q.wq(), q.w()] {
            assert!(metric.is_infinite() && metric > 0.0, "{}", q.name());
        }
        assert_eq!(q.state(), MetricState::Infeasible);
    }
}

// H0: inadmissible parameters produce numbers instead of NaN
#[test]
fn h0_8_invalid_parameters_are_nan() {
    let queues: Vec<Queue> = vec![
        MM1Queue::new(20.0, 0.0).into(),
        MM1Queue::new(0.0, 25.0).into(),
        MM1Queue::new(-5.0, 25.0).into(),
        MMcQueue::new(20.0, 25.0, 0).into(),
        MMcQueue::new(20.0, 25.0, 1.5).into(),
        MMcPriorityQueue::new([0.0, 0.0], 25.0, 1).into(),
    ];
    for q in &queues {
        assert!(!q.is_valid());
        assert!(!q.is_feasible());
        for metric in [q.p0(), q.lq(), q.l(), q.wq(), q.w()] {
            assert!(metric.is_nan(), "{q}");
        }
        assert_eq!(q.state(), MetricState::Invalid);
    }
}

// H0: repeated reads recompute or drift
// Falsification: read twice, compare bits and the recompute counter
#[test]
fn h0_9_reads_are_cached_and_stable() {
    let mut q = MMcQueue::new(24.0, 25.0, 2);
    assert!(q.is_dirty());

    let first = (q.p0().to_bits(), q.lq().to_bits(), q.w().to_bits());
    let second = (q.p0().to_bits(), q.lq().to_bits(), q.w().to_bits());
    assert_eq!(first, second);
    assert_eq!(q.recompute_count(), 1);

    q.set_mu(30.0);
    assert!(q.is_dirty());
    let _ = (q.p0(), q.lq(), q.l(), q.wq(), q.w());
    assert_eq!(q.recompute_count(), 2);
}

// H0: a scenario file disagrees with the programmatic API
#[test]
fn h0_10_scenario_file_matches_api() {
    let yaml = r"
scenarios:
  - name: triage
    discipline: priority
    lambda: [5.0, 10.0, 5.0]
    mu: 25.0
  - name: counter
    discipline: mmc
    lambda: 24.0
    mu: 25.0
    servers: 2
";
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenarios.yaml");
    std::fs::write(&path, yaml).unwrap();

    let config = ScenarioConfig::load(&path).unwrap();
    let built = config.build_all();

    let triage = built[0].1.as_priority().unwrap();
    assert_close(triage.wq_k(3), 0.4, "Wq_3 from file");
    assert_close(built[1].1.lq(), MMcQueue::new(24.0, 25.0, 2).lq(), "M/M/c from file");
}

// H0: Little's Law solutions are inconsistent with the closed form
#[test]
fn h0_11_littles_law_agrees_with_closed_form() {
    let q = MMcQueue::new(24.0, 25.0, 2);
    let solution = solve_littles_law(24.0, 25.0, 2, KnownMetric::Wq, q.wq()).unwrap();
    assert_close(solution.lq, q.lq(), "Lq");
    assert_close(solution.l, q.l(), "L");
    assert_close(solution.w, q.w(), "W");
    assert_close(solution.ro, q.ro(), "rho");
}
