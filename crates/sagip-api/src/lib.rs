// sagip-api: Async Rust clients for the municipal disaster backend and the
// public mapping services it leans on (Nominatim, OpenRouteService)

pub mod backend;
pub mod error;
pub mod geocoding;
pub mod lenient;
pub mod routing;
pub mod transport;

pub use backend::{
    BackendClient, CenterRecord, ContactRecord, Endpoints, HazardRecord, IncidentSubmission,
    MediaUpload, guess_mime,
};
pub use error::Error;
pub use geocoding::{AddressParts, GeocodingClient, ReversePlace};
pub use lenient::RawId;
pub use routing::{RouteFeature, RouteSegment, RouteStep, RoutingClient};
pub use transport::{TlsMode, TransportConfig};
