//! Typed model of the Process API request payload for a Sentinel-1 GRD job.
//!
//! Field names and nesting follow the service's wire format exactly; the
//! evalscript text is rendered from the crate's declared band configuration.
//! The crate never sends the request itself — OAuth and transport belong to
//! an external orchestrator — it only produces the payload JSON.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::evalscript::{EvalSetup, render_evalscript};
use crate::error::{Error, Result};

/// CRS URI for UTM zone 31N, the zone of the reference site.
pub const DEFAULT_CRS_URI: &str = "http://www.opengis.net/def/crs/EPSG/0/32631";

/// Service identifier for Sentinel-1 GRD collections.
pub const SENTINEL1_GRD: &str = "sentinel-1-grd";

/// Default output resolution in meters per pixel.
pub const DEFAULT_RESOLUTION_M: f64 = 10.0;

/// Acquisition time window, serialized as RFC3339 `from`/`to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    /// Parse a `from/to` pair of RFC3339 timestamps, e.g.
    /// `2023-06-01T00:00:00Z/2023-06-30T23:59:59Z`.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidArgument {
            arg: "time_range",
            value: value.to_string(),
        };
        let (from, to) = value.split_once('/').ok_or_else(invalid)?;
        let from = DateTime::parse_from_rfc3339(from)
            .map_err(|_| invalid())?
            .with_timezone(&Utc);
        let to = DateTime::parse_from_rfc3339(to)
            .map_err(|_| invalid())?
            .with_timezone(&Utc);
        Ok(TimeRange { from, to })
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MosaickingOrder {
    #[serde(rename = "mostRecent")]
    MostRecent,
    #[serde(rename = "leastRecent")]
    LeastRecent,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Resolution {
    High,
    Medium,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AcquisitionMode {
    Iw,
    Ew,
    Sm,
}

/// Polarization channel combination as the dataFilter expects it
/// (`DV` = dual VV+VH).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolarizationFilter {
    Dv,
    Dh,
    Sv,
    Sh,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DemInstance {
    #[serde(rename = "COPERNICUS_30")]
    Copernicus30,
    #[serde(rename = "COPERNICUS_90")]
    Copernicus90,
}

/// Radiometric backscatter coefficient requested from the service.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum BackscatterCoeff {
    #[serde(rename = "GAMMA0_TERRAIN")]
    Gamma0Terrain,
    #[serde(rename = "GAMMA0_ELLIPSOID")]
    Gamma0Ellipsoid,
    #[serde(rename = "SIGMA0_ELLIPSOID")]
    Sigma0Ellipsoid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundsProperties {
    pub crs: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub bbox: [f64; 4],
    pub properties: BoundsProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFilter {
    pub time_range: TimeRange,
    pub mosaicking_order: MosaickingOrder,
    pub resolution: Resolution,
    pub acquisition_mode: AcquisitionMode,
    pub polarization: PolarizationFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingOptions {
    // The service accepts this flag as a string on the wire
    #[serde(with = "bool_string")]
    pub orthorectify: bool,
    #[serde(rename = "demInstance")]
    pub dem_instance: DemInstance,
    #[serde(rename = "backCoeff")]
    pub back_coeff: BackscatterCoeff,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "dataFilter")]
    pub data_filter: DataFilter,
    pub processing: ProcessingOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    pub bounds: Bounds,
    pub data: Vec<DataSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpec {
    pub identifier: String,
    pub format: ResponseFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRequest {
    pub resx: f64,
    pub resy: f64,
    pub responses: Vec<ResponseSpec>,
}

/// Full Process API request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub input: InputSpec,
    pub output: OutputRequest,
    pub evalscript: String,
}

impl ProcessRequest {
    /// Build a Sentinel-1 GRD request with the service defaults: most-recent
    /// mosaicking, high resolution, IW dual polarization, orthorectified
    /// gamma0 terrain backscatter over the Copernicus 30 m DEM, one
    /// `image/tiff` response.
    pub fn sentinel1_grd(bbox: [f64; 4], time_range: TimeRange, setup: &EvalSetup) -> Self {
        ProcessRequest {
            input: InputSpec {
                bounds: Bounds {
                    bbox,
                    properties: BoundsProperties {
                        crs: DEFAULT_CRS_URI.to_string(),
                    },
                },
                data: vec![DataSpec {
                    kind: SENTINEL1_GRD.to_string(),
                    data_filter: DataFilter {
                        time_range,
                        mosaicking_order: MosaickingOrder::MostRecent,
                        resolution: Resolution::High,
                        acquisition_mode: AcquisitionMode::Iw,
                        polarization: PolarizationFilter::Dv,
                    },
                    processing: ProcessingOptions {
                        orthorectify: true,
                        dem_instance: DemInstance::Copernicus30,
                        back_coeff: BackscatterCoeff::Gamma0Terrain,
                    },
                }],
            },
            output: OutputRequest {
                resx: DEFAULT_RESOLUTION_M,
                resy: DEFAULT_RESOLUTION_M,
                responses: vec![ResponseSpec {
                    identifier: "default".to_string(),
                    format: ResponseFormat {
                        kind: "image/tiff".to_string(),
                    },
                }],
            },
            evalscript: render_evalscript(setup),
        }
    }

    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.input.bounds.properties.crs = crs.into();
        self
    }

    pub fn with_resolution(mut self, meters: f64) -> Self {
        self.output.resx = meters;
        self.output.resy = meters;
        self
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The original client sent `orthorectify` as the string `"true"`; keep that
/// wire shape while exposing a bool in the typed model.
mod bool_string {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Bool(b) => Ok(b),
            Raw::Text(s) => match s.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(D::Error::custom(format!("invalid bool string: {other}"))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evalscript;

    const KINROOI_BBOX: [f64; 4] = [
        694512.806609,
        5666404.740308,
        694896.980069,
        5666790.60716,
    ];

    fn june_2023() -> TimeRange {
        TimeRange::parse("2023-06-01T00:00:00Z/2023-06-30T23:59:59Z").unwrap()
    }

    #[test]
    fn time_range_parses_rfc3339_pair() {
        let tr = june_2023();
        assert_eq!(tr.from.to_rfc3339(), "2023-06-01T00:00:00+00:00");
        assert_eq!(tr.to.to_rfc3339(), "2023-06-30T23:59:59+00:00");
    }

    #[test]
    fn malformed_time_range_is_rejected() {
        assert!(TimeRange::parse("2023-06-01T00:00:00Z").is_err());
        assert!(TimeRange::parse("yesterday/today").is_err());
    }

    #[test]
    fn payload_matches_service_wire_format() {
        let request =
            ProcessRequest::sentinel1_grd(KINROOI_BBOX, june_2023(), &evalscript::setup());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["input"]["bounds"]["bbox"][0], 694512.806609);
        assert_eq!(
            json["input"]["bounds"]["properties"]["crs"],
            DEFAULT_CRS_URI
        );

        let data = &json["input"]["data"][0];
        assert_eq!(data["type"], "sentinel-1-grd");
        assert_eq!(data["dataFilter"]["mosaickingOrder"], "mostRecent");
        assert_eq!(data["dataFilter"]["resolution"], "HIGH");
        assert_eq!(data["dataFilter"]["acquisitionMode"], "IW");
        assert_eq!(data["dataFilter"]["polarization"], "DV");
        assert!(
            data["dataFilter"]["timeRange"]["from"]
                .as_str()
                .unwrap()
                .starts_with("2023-06-01T00:00:00")
        );
        assert_eq!(data["processing"]["orthorectify"], "true");
        assert_eq!(data["processing"]["demInstance"], "COPERNICUS_30");
        assert_eq!(data["processing"]["backCoeff"], "GAMMA0_TERRAIN");

        assert_eq!(json["output"]["resx"], 10.0);
        assert_eq!(json["output"]["responses"][0]["identifier"], "default");
        assert_eq!(
            json["output"]["responses"][0]["format"]["type"],
            "image/tiff"
        );
        assert!(
            json["evalscript"]
                .as_str()
                .unwrap()
                .contains("function evaluatePixel(sample)")
        );
    }

    #[test]
    fn payload_round_trips_through_json() {
        let request = ProcessRequest::sentinel1_grd(KINROOI_BBOX, june_2023(), &evalscript::setup())
            .with_resolution(20.0)
            .with_crs("http://www.opengis.net/def/crs/EPSG/0/4326");
        let json = serde_json::to_string(&request).unwrap();
        let back: ProcessRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
