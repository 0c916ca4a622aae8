//! End-to-end runs over the default topology: build, export, solve, report.

use rstest::rstest;

use supply_flow_planner::config::{Config, NodeSpec};
use supply_flow_planner::model::ObjectivePolicy;
use supply_flow_planner::network::{ArcKey, SupplyNetwork};
use supply_flow_planner::run::OptimizationRun;
use supply_flow_planner::PlanError;

fn config_with_demands(w1: f64, w2: f64) -> Config {
    let mut cfg = Config::default();
    for node in &mut cfg.network.nodes {
        if let NodeSpec::Warehouse { id, demand } = node {
            if id.as_str() == "W1" {
                *demand = w1;
            } else if id.as_str() == "W2" {
                *demand = w2;
            }
        }
    }
    cfg
}

fn run(cfg: &Config, policy: ObjectivePolicy) -> OptimizationRun {
    let network = SupplyNetwork::from_config(&cfg.network).unwrap();
    OptimizationRun::new(network, policy)
}

#[test]
fn transport_plan_reaches_golden_optimum() {
    let outcome = run(&Config::default(), ObjectivePolicy::TransportCost)
        .execute()
        .unwrap();

    assert!((outcome.solution.primary_objective() - 49000.0).abs() < 1e-4);
    assert!(outcome
        .report
        .to_string()
        .ends_with("Sum of Total Cost: 49000 $"));
}

#[test]
fn conservation_and_demand_hold_at_optimum() {
    let outcome = run(&Config::default(), ObjectivePolicy::TransportCost)
        .execute()
        .unwrap();
    let s = &outcome.solution;

    let into_dc = s.flow(&ArcKey::new("F1", "DC")) + s.flow(&ArcKey::new("F2", "DC"));
    let out_of_dc = s.flow(&ArcKey::new("DC", "W2"));
    assert!((into_dc - out_of_dc).abs() < 1e-6, "DC must not store flow");

    let into_w1 = s.flow(&ArcKey::new("F1", "W1")) + s.flow(&ArcKey::new("W2", "W1"));
    let out_of_w1 = s.flow(&ArcKey::new("W1", "W2"));
    assert!((into_w1 - out_of_w1 - 30.0).abs() < 1e-6);

    let into_w2 = s.flow(&ArcKey::new("DC", "W2")) + s.flow(&ArcKey::new("W1", "W2"));
    let out_of_w2 = s.flow(&ArcKey::new("W2", "W1"));
    assert!((into_w2 - out_of_w2 - 60.0).abs() < 1e-6);
}

#[test]
fn bounds_are_respected_at_optimum() {
    let outcome = run(&Config::default(), ObjectivePolicy::TransportCost)
        .execute()
        .unwrap();
    let s = &outcome.solution;

    let f1_out = s.flow(&ArcKey::new("F1", "DC"))
        + s.flow(&ArcKey::new("F1", "F2"))
        + s.flow(&ArcKey::new("F1", "W1"));
    assert!(f1_out <= 50.0 + 1e-6);
    assert!(s.flow(&ArcKey::new("F1", "F2")) <= 10.0 + 1e-6);

    let into_dc = s.flow(&ArcKey::new("F1", "DC")) + s.flow(&ArcKey::new("F2", "DC"));
    assert!(into_dc <= 80.0 + 1e-6);
}

#[test]
fn lexicographic_plan_keeps_transport_optimum() {
    let cfg = Config::default();
    let single = run(&cfg, ObjectivePolicy::TransportCost).execute().unwrap();
    let lex = run(&cfg, ObjectivePolicy::TransportThenRoads)
        .execute()
        .unwrap();

    let lex_transport = lex.solution.objective_value("transport_cost").unwrap();
    assert!((lex_transport - single.solution.primary_objective()).abs() < 1e-3);

    // 49000 transport optimum plus five activated roads at 1000 each.
    assert!(lex
        .report
        .to_string()
        .ends_with("Sum of Total Cost: 54000 $"));
}

#[test]
fn report_filters_differ_on_zero_flow_arcs() {
    let cfg = Config::default();
    let transport = run(&cfg, ObjectivePolicy::TransportCost).execute().unwrap();
    let roads = run(&cfg, ObjectivePolicy::TransportThenRoads)
        .execute()
        .unwrap();

    assert_eq!(transport.report.rows().len(), 7);
    assert_eq!(roads.report.rows().len(), 5);

    let zero_arc_listed = |rows: &[supply_flow_planner::report::ReportRow]| {
        rows.iter()
            .any(|r| r.from.as_str() == "W1" && r.to.as_str() == "W2")
    };
    assert!(zero_arc_listed(transport.report.rows()));
    assert!(!zero_arc_listed(roads.report.rows()));
}

#[rstest]
#[case(200.0, 60.0)]
#[case(30.0, 200.0)]
#[case(100.0, 100.0)]
fn unreachable_demand_reports_infeasible(#[case] w1: f64, #[case] w2: f64) {
    let cfg = config_with_demands(w1, w2);
    let err = run(&cfg, ObjectivePolicy::TransportCost)
        .execute()
        .unwrap_err();
    assert!(matches!(err, PlanError::Infeasible));
}

#[test]
fn resolving_identical_model_is_stable() {
    let cfg = Config::default();
    let first = run(&cfg, ObjectivePolicy::TransportThenRoads)
        .execute()
        .unwrap();
    let second = run(&cfg, ObjectivePolicy::TransportThenRoads)
        .execute()
        .unwrap();
    assert_eq!(
        first.solution.primary_objective(),
        second.solution.primary_objective()
    );
    assert_eq!(
        first.solution.objective_value("road_cost"),
        second.solution.objective_value("road_cost")
    );
}

#[test]
fn model_dump_is_written_before_solve() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roads.lp");

    // Even an infeasible run leaves the audit dump behind.
    let cfg = config_with_demands(500.0, 500.0);
    let err = run(&cfg, ObjectivePolicy::TransportThenRoads)
        .with_export_path(&path)
        .execute()
        .unwrap_err();
    assert!(matches!(err, PlanError::Infeasible));

    let dump = std::fs::read_to_string(&path).unwrap();
    assert!(dump.contains("w1_demand:"));
    assert!(dump.contains("\\ road_cost:"));
}
