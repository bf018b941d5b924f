use collapse_core::{SweepBuilder, UnionFindOracle, simulate_collapse};
use collapse_test_support::tracing::RecordingLayer;
use rand::{SeedableRng, rngs::SmallRng};
use tracing_subscriber::layer::SubscriberExt;

#[test]
fn simulate_span_records_trial_totals() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let outcome = tracing::subscriber::with_default(subscriber, || {
        let mut oracle = UnionFindOracle::with_nodes(12);
        simulate_collapse(12, &mut oracle, &mut SmallRng::seed_from_u64(12))
    })
    .expect("trial must succeed");

    let span = layer
        .span_named("collapse.simulate")
        .expect("simulate span must be recorded");
    assert_eq!(span.fields.get("nodes").map(String::as_str), Some("12"));
    assert_eq!(
        span.fields.get("edges"),
        Some(&outcome.edges().to_string())
    );
    assert_eq!(
        span.fields.get("draws"),
        Some(&outcome.draws().to_string())
    );
}

#[test]
fn sweep_span_wraps_every_trial() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        let plan = SweepBuilder::new(20).build().expect("valid plan");
        let mut rng = SmallRng::seed_from_u64(20);
        let points = plan.run(&mut rng).count();
        assert_eq!(points, 3);
    });

    let sweep = layer
        .span_named("collapse.sweep")
        .expect("sweep span must be recorded");
    assert_eq!(sweep.fields.get("max_nodes").map(String::as_str), Some("20"));
    assert_eq!(sweep.fields.get("step").map(String::as_str), Some("10"));

    let simulated = layer
        .spans()
        .iter()
        .filter(|span| span.name == "collapse.simulate")
        .count();
    assert_eq!(simulated, 3);

    let completed = layer
        .events()
        .iter()
        .filter(|event| {
            event.fields.get("message").map(String::as_str) == Some("trial completed")
        })
        .count();
    assert_eq!(completed, 3);
}
