use serde::{Deserialize, Serialize};

/// One flight, referencing airports by code. Extra fields in the source
/// records (airline, equipment, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(rename = "depAirport")]
    pub departure: String,
    #[serde(rename = "arrAirport")]
    pub arrival: String,
}

impl Route {
    pub fn new(departure: impl Into<String>, arrival: impl Into<String>) -> Self {
        Self {
            departure: departure.into(),
            arrival: arrival.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteList {
    routes: Vec<Route>,
}

impl RouteList {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn from_json_str(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    /// At most the first `count` routes, in file order.
    pub fn prefix(&self, count: usize) -> &[Route] {
        &self.routes[..count.min(self.routes.len())]
    }
}
