//! Offline helpers behind the `routeglobe` command: scene summaries, arc
//! exports and damping traces computed without a browser.

use formats::{FlightDataset, GlobeConfig, GlobeScene};
use runtime::{PitchDamping, RotationState};
use scene::components::Shape3D;
use serde::Serialize;

/// One drawn route with its sampled arc, in group space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcExport {
    pub index: usize,
    pub dep: String,
    pub arr: String,
    /// `#rrggbb`
    pub color: String,
    pub points: Vec<[f64; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub airports: usize,
    pub routes: usize,
    pub route_count: usize,
    pub routes_drawn: usize,
    pub skipped: Vec<String>,
    pub entities: usize,
}

impl SceneSummary {
    pub fn new(dataset: &FlightDataset, config: &GlobeConfig, scene: &GlobeScene) -> Self {
        Self {
            airports: dataset.airports.len(),
            routes: dataset.routes.len(),
            route_count: config.scene.route_count,
            routes_drawn: scene.report.routes_drawn,
            skipped: scene
                .report
                .skipped
                .iter()
                .map(|s| {
                    format!(
                        "#{} {} -> {}: {}",
                        s.index, s.route.departure, s.route.arrival, s.reason
                    )
                })
                .collect(),
            entities: scene.world.entity_count(),
        }
    }
}

/// Read every drawn arc back out of the scene world.
pub fn export_arcs(scene: &GlobeScene) -> Vec<ArcExport> {
    scene
        .routes
        .iter()
        .filter_map(|drawn| {
            let drawable = scene.world.drawable_3d(drawn.entities.arc)?;
            let Shape3D::Polyline { geometry } = drawable.shape else {
                return None;
            };
            let polyline = scene.world.polyline(geometry)?;
            Some(ArcExport {
                index: drawn.index,
                dep: drawn.route.departure.clone(),
                arr: drawn.route.arrival.clone(),
                color: format!("#{:06x}", drawn.color.to_hex()),
                points: polyline.points.iter().map(|p| [p.x, p.y, p.z]).collect(),
            })
        })
        .collect()
}

/// Pitch after each of `ticks` damping ticks, starting from `pitch`.
pub fn damping_trace(pitch: f64, ticks: usize, damping: &PitchDamping) -> Vec<f64> {
    let mut rotation = RotationState::new(0.0, pitch);
    (0..ticks)
        .map(|_| {
            rotation.damp_pitch(damping);
            rotation.pitch
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{SceneSummary, damping_trace, export_arcs};
    use formats::{FlightDataset, GlobeConfig, build_globe_scene};
    use runtime::PitchDamping;

    const AIRPORTS: &str = r#"{"AAA": [0, 0], "BBB": [0, 90], "CCC": [45, -45]}"#;
    const ROUTES: &str = r#"[
        {"depAirport": "AAA", "arrAirport": "BBB"},
        {"depAirport": "AAA", "arrAirport": "ZZZ"},
        {"depAirport": "CCC", "arrAirport": "BBB"}
    ]"#;

    fn small_config() -> GlobeConfig {
        let mut config = GlobeConfig::default();
        config.scene.stars.count = 16;
        config
    }

    #[test]
    fn arcs_are_exported_for_drawn_routes_only() {
        let dataset = FlightDataset::from_json_strs(AIRPORTS, ROUTES).unwrap();
        let scene = build_globe_scene(&dataset, &small_config());
        let arcs = export_arcs(&scene);

        assert_eq!(arcs.len(), 2);
        assert_eq!((arcs[0].dep.as_str(), arcs[0].arr.as_str()), ("AAA", "BBB"));
        assert_eq!(arcs[1].index, 2);
        assert_eq!(arcs[0].points.len(), 50);
        assert_eq!(arcs[0].color, "#d71f1f");

        // Equator at lon 0 projects onto +X at the arc radius.
        let first = arcs[0].points[0];
        assert!((first[0] - 16.0).abs() < 1e-9);
        assert!(first[1].abs() < 1e-9);
    }

    #[test]
    fn summary_reports_skips() {
        let dataset = FlightDataset::from_json_strs(AIRPORTS, ROUTES).unwrap();
        let config = small_config();
        let scene = build_globe_scene(&dataset, &config);
        let summary = SceneSummary::new(&dataset, &config, &scene);

        assert_eq!(summary.airports, 3);
        assert_eq!(summary.routes, 3);
        assert_eq!(summary.routes_drawn, 2);
        assert_eq!(summary.skipped.len(), 1);
        assert!(summary.skipped[0].contains("ZZZ"));
    }

    #[test]
    fn damping_decays_then_snaps_to_zero() {
        let trace = damping_trace(0.5, 600, &PitchDamping::default());
        assert!((trace[0] - 0.495).abs() < 1e-12);
        assert!(trace.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(*trace.last().unwrap(), 0.0);
    }

    #[test]
    fn small_negative_pitch_snaps_immediately() {
        assert_eq!(damping_trace(-0.02, 1, &PitchDamping::default()), vec![0.0]);
    }
}
