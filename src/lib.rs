#![doc = r#"
SARSEL — Sentinel-1 band-selection evalscript tooling.

This crate models the band-selection contract of a Sentinel-1 GRD evalscript
running inside a remote imagery processing service (Process API style): the
script declares the input bands `VV`, `VH`, `dataMask` and a 3-band FLOAT32
output once per job, then passes each pixel's values straight through. Around
that contract the crate provides the pieces a local workflow needs: a typed
Process API request builder that renders the evalscript from the declared
configuration, a host-style executor that runs the contract over whole band
planes, a reader for the returned FLOAT32 scene product, and dB quicklook
rendering with no-data and noise masking. It powers the SARSEL CLI and can be
embedded in your own Rust applications.

The remote side of the pipeline — OAuth token acquisition, the HTTP POST, and
GeoTIFF delivery — stays with an external orchestrator; this crate produces
the request payload and consumes the returned raster bytes.

Quick start: emit a request payload
-----------------------------------
```rust
use sarsel::api::build_request;

fn main() -> sarsel::Result<()> {
    let request = build_request(
        [694512.8, 5666404.7, 694897.0, 5666790.6],
        "2023-06-01T00:00:00Z/2023-06-30T23:59:59Z",
        "http://www.opengis.net/def/crs/EPSG/0/32631",
        10.0,
    )?;
    println!("{}", request.to_json_pretty()?);
    Ok(())
}
```

Render a quicklook from a fetched product
-----------------------------------------
```rust,no_run
use std::path::Path;
use sarsel::{api, SceneParams};

fn main() -> sarsel::Result<()> {
    let params = SceneParams::default(); // VV, JPEG, fixed -22..0 dB window
    api::quicklook_to_path(
        Path::new("/data/kinrooi_june.tiff"),
        Path::new("/out/kinrooi_vv.jpg"),
        &params,
    )
}
```

The contract itself
-------------------
```rust
use sarsel::{evaluate_pixel, setup, Sample};

let cfg = setup();
assert_eq!(cfg.output.bands, 3);

let out = evaluate_pixel(&Sample { vv: 0.0023, vh: 0.00041, data_mask: 1.0 });
assert_eq!(out, [0.0023, 0.00041, 1.0]);
```

Error handling
--------------
All public functions return `sarsel::Result<T>`; match on `sarsel::Error` to
handle specific cases, e.g. scene decode failures or setup validation errors.

Useful modules
--------------
- [`api`] — high-level entry points and the Process API request model.
- [`core`] — the evalscript contract, executor, and processing primitives.
- [`io`] — scene product reader and TIFF/JPEG writers.
- [`types`] — shared enums (`SampleType`, `QuicklookBand`, ...).
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::evalscript::{
    BAND_DATA_MASK, BAND_VH, BAND_VV, EvalSetup, OUTPUT_BANDS, OutputSpec, Sample,
    evaluate_pixel, render_evalscript, setup,
};
pub use core::executor::{ScenePlanes, evaluate_scene, validate_setup};
pub use core::params::SceneParams;
pub use error::{Error, Result};
pub use types::{AutoscaleStrategy, BitDepth, OutputFormat, QuicklookBand, SampleType};

// Readers
pub use io::geotiff::{SceneError, SceneReader};

// High-level API re-exports
pub use api::{
    ProcessRequest, QuicklookImage, TimeRange, build_request, evaluate_scene_to_path,
    quicklook_to_buffer, quicklook_to_path,
};
