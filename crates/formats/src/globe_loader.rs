use std::fmt;

use foundation::color::Rgb;
use scene::World;
use scene::entity::EntityId;
use scene::prefabs::{
    FlightRouteEntities, LightRig, route_color, spawn_atmosphere, spawn_earth, spawn_flight_route,
    spawn_globe_group, spawn_light_rig, spawn_starfield,
};

use crate::config::GlobeConfig;
use crate::dataset::FlightDataset;
use crate::routes::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnknownAirport(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownAirport(code) => write!(f, "unknown airport {code}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRoute {
    /// Position in the route list.
    pub index: usize,
    pub route: Route,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub routes_drawn: usize,
    pub skipped: Vec<SkippedRoute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnRoute {
    pub index: usize,
    pub route: Route,
    pub color: Rgb,
    pub entities: FlightRouteEntities,
}

/// A populated world plus handles the host needs every frame.
#[derive(Debug)]
pub struct GlobeScene {
    pub world: World,
    pub group: EntityId,
    pub earth: EntityId,
    pub atmosphere: EntityId,
    pub starfield: EntityId,
    pub light_rig: LightRig,
    pub routes: Vec<DrawnRoute>,
    pub report: LoadReport,
}

/// Build the whole globe: earth, atmosphere, stars, lights, and the first
/// `route_count` routes. Routes naming an unknown airport are skipped.
pub fn build_globe_scene(dataset: &FlightDataset, config: &GlobeConfig) -> GlobeScene {
    let scene_cfg = &config.scene;
    let mut world = World::new();

    let starfield = spawn_starfield(&mut world, &scene_cfg.stars);
    let group = spawn_globe_group(&mut world);
    let earth = spawn_earth(&mut world, group, &scene_cfg.globe);
    let atmosphere = spawn_atmosphere(&mut world, &scene_cfg.globe);
    let light_rig = spawn_light_rig(&mut world, group, &scene_cfg.lighting);

    let mut routes = Vec::new();
    let mut report = LoadReport::default();

    for (index, route) in dataset.routes.prefix(scene_cfg.route_count).iter().enumerate() {
        let lookup = |code: &str| {
            dataset
                .airports
                .get(code)
                .ok_or_else(|| SkipReason::UnknownAirport(code.to_string()))
        };
        let endpoints = lookup(&route.departure).and_then(|dep| Ok((dep, lookup(&route.arrival)?)));

        let (departure, arrival) = match endpoints {
            Ok(pair) => pair,
            Err(reason) => {
                tracing::warn!(
                    index,
                    dep = %route.departure,
                    arr = %route.arrival,
                    %reason,
                    "skipping route"
                );
                report.skipped.push(SkippedRoute {
                    index,
                    route: route.clone(),
                    reason,
                });
                continue;
            }
        };

        let color = route_color(index, scene_cfg.route_count, &scene_cfg.route_palette);
        let entities = spawn_flight_route(
            &mut world,
            group,
            departure,
            arrival,
            color,
            &scene_cfg.routes,
        );
        routes.push(DrawnRoute {
            index,
            route: route.clone(),
            color,
            entities,
        });
        report.routes_drawn += 1;
    }

    tracing::info!(
        drawn = report.routes_drawn,
        skipped = report.skipped.len(),
        entities = world.entity_count(),
        "built globe scene"
    );

    GlobeScene {
        world,
        group,
        earth,
        atmosphere,
        starfield,
        light_rig,
        routes,
        report,
    }
}
