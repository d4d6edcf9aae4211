/// What a scene entity represents, used for lookups and render routing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// Rotating container for the globe and everything attached to it.
    GlobeGroup,
    Earth,
    Atmosphere,
    /// Small sphere at a route endpoint.
    Marker,
    /// Straight line from the globe center to a route endpoint.
    Spoke,
    FlightArc,
    LightRig,
    Light,
    Starfield,
}
