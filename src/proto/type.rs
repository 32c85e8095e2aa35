//! Types from the `google.type` package.

/// A latitude/longitude pair in degrees, conforming to the WGS84 standard.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct LatLng {
    #[prost(double, tag = "1")]
    pub latitude: f64,
    #[prost(double, tag = "2")]
    pub longitude: f64,
}
