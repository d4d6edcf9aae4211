use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::airports::AirportTable;
use crate::routes::RouteList;

pub const AIRPORTS_FILE_NAME: &str = "airports.json";
pub const ROUTES_FILE_NAME: &str = "routes.json";

#[derive(Debug)]
pub enum DatasetError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            DatasetError::Parse { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io { source, .. } => Some(source),
            DatasetError::Parse { source, .. } => Some(source),
        }
    }
}

/// Airports plus the routes between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightDataset {
    pub airports: AirportTable,
    pub routes: RouteList,
}

impl FlightDataset {
    pub fn new(airports: AirportTable, routes: RouteList) -> Self {
        Self { airports, routes }
    }

    /// Read `airports.json` and `routes.json` from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let dir = dir.as_ref();
        let airports_path = dir.join(AIRPORTS_FILE_NAME);
        let routes_path = dir.join(ROUTES_FILE_NAME);

        let airports = read(&airports_path)?;
        let routes = read(&routes_path)?;
        let dataset = Self::parse(&airports, &routes, &airports_path, &routes_path)?;

        tracing::info!(
            dir = %dir.display(),
            airports = dataset.airports.len(),
            routes = dataset.routes.len(),
            "loaded flight dataset"
        );
        Ok(dataset)
    }

    /// Parse already-fetched payloads. Errors name the conventional file names.
    pub fn from_json_strs(airports: &str, routes: &str) -> Result<Self, DatasetError> {
        Self::parse(
            airports,
            routes,
            Path::new(AIRPORTS_FILE_NAME),
            Path::new(ROUTES_FILE_NAME),
        )
    }

    fn parse(
        airports: &str,
        routes: &str,
        airports_path: &Path,
        routes_path: &Path,
    ) -> Result<Self, DatasetError> {
        let airports =
            AirportTable::from_json_str(airports).map_err(|source| DatasetError::Parse {
                path: airports_path.to_path_buf(),
                source,
            })?;
        let routes = RouteList::from_json_str(routes).map_err(|source| DatasetError::Parse {
            path: routes_path.to_path_buf(),
            source,
        })?;
        Ok(Self { airports, routes })
    }
}

fn read(path: &Path) -> Result<String, DatasetError> {
    fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{DatasetError, FlightDataset};
    use std::path::PathBuf;

    fn sample_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../apps/viewer_web/assets/data")
    }

    #[test]
    fn loads_sample_assets() {
        let dataset = FlightDataset::load_dir(sample_data_dir()).expect("load dataset");
        assert!(!dataset.airports.is_empty());
        assert!(!dataset.routes.is_empty());
        for route in dataset.routes.iter() {
            assert!(dataset.airports.contains(&route.departure), "{route:?}");
            assert!(dataset.airports.contains(&route.arrival), "{route:?}");
        }
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let err = FlightDataset::load_dir(sample_data_dir().join("does-not-exist"))
            .expect_err("missing dir");
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains("airports.json"));
    }

    #[test]
    fn bad_routes_payload_names_the_file() {
        let err = FlightDataset::from_json_strs(r#"{"AAA": [1, 2]}"#, "{not json")
            .expect_err("bad routes");
        match err {
            DatasetError::Parse { path, .. } => assert_eq!(path, PathBuf::from("routes.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
