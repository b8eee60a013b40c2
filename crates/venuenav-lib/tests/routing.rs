mod common;

use venuenav_lib::{
    plan_route, LabelMode, MapOverlay, RouteOutcome, RouteRenderMode, RouteSummary,
};

use common::expo_venue;

fn solved(outcome: RouteOutcome) -> venuenav_lib::RoutePlan {
    match outcome {
        RouteOutcome::Solved(plan) => plan,
        other => panic!("expected a route, got {other:?}"),
    }
}

#[test]
fn entrance_to_coffee_shop() {
    let venue = expo_venue();
    let plan = solved(plan_route(&venue, "Coffee Shop").expect("planned"));

    assert_eq!(plan.start, 1);
    assert_eq!(plan.goal, 6);
    assert_eq!(plan.path.nodes, vec![1, 2, 3, 5, 6]);
    assert_eq!(plan.distance(), 240.0 + 297.0 + 101.0 + 181.0);
    assert_eq!(plan.distance(), 819.0);
    assert_eq!(plan.segments.len(), 4);
}

#[test]
fn entrance_to_hace_administration() {
    let venue = expo_venue();
    let plan = solved(plan_route(&venue, "Hace Administration").expect("planned"));

    assert_eq!(plan.path.nodes, vec![1, 2, 3, 5, 9, 11, 13, 15, 17, 18]);
    assert_eq!(plan.distance(), 1760.0);
    assert_eq!(plan.hop_count(), 9);
}

#[test]
fn entrance_to_itself() {
    let venue = expo_venue();
    let plan = solved(plan_route(&venue, "Entrance").expect("planned"));
    assert_eq!(plan.path.nodes, vec![1]);
    assert_eq!(plan.distance(), 0.0);
    assert!(plan.segments.is_empty());
}

#[test]
fn unknown_destination_is_an_outcome_not_an_error() {
    let venue = expo_venue();
    let outcome = plan_route(&venue, "Nonexistent Booth").expect("no error");
    assert!(matches!(
        outcome,
        RouteOutcome::UnknownDestination { ref name, .. } if name == "Nonexistent Booth"
    ));
    assert!(outcome.plan().is_none());
}

#[test]
fn closing_all_corridors_to_a_booth_makes_it_unreachable() {
    let venue = expo_venue();
    let goal = venue.directory().resolve("Bakery").expect("mapped");
    let closed = venue.without_node_edges(goal).expect("known node");

    let outcome = plan_route(&closed, "Bakery").expect("no error");
    assert_eq!(
        outcome,
        RouteOutcome::Unreachable {
            destination: "Bakery".to_string(),
            goal,
        }
    );
    assert!(outcome.no_route_reason().is_some());
}

#[test]
fn every_mapped_destination_is_routable() {
    let venue = expo_venue();
    for (name, id) in venue.directory().entries() {
        let plan = solved(plan_route(&venue, name).expect("planned"));
        assert_eq!(plan.goal, id);
        assert_eq!(plan.path.source(), Some(venue.entrance()));
        assert_eq!(plan.path.target(), Some(id));
    }
}

#[test]
fn summary_and_overlay_for_hace_administration() {
    let venue = expo_venue();
    let plan = solved(plan_route(&venue, "Hace Administration").expect("planned"));

    let summary = RouteSummary::from_plan(&venue, &plan, LabelMode::Omit).expect("summary");
    assert_eq!(summary.route, vec!["Entrance", "Hace Administration"]);
    assert!(summary
        .render(RouteRenderMode::PlainText)
        .contains("Total Distance: 1760.0 units"));

    let overlay = MapOverlay::baseline(venue.graph()).with_route(&plan);
    let svg = overlay.render_svg(venue.viewbox());
    assert_eq!(svg.matches("path-line").count(), 9);
}
