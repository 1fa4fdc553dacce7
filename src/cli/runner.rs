use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use sarsel::SceneParams;
use sarsel::api;

use super::args::CliArgs;
use super::errors::AppError;

fn emit_request(args: &CliArgs, destination: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bbox_values = args.bbox.as_ref().ok_or(AppError::MissingArgument {
        arg: "--bbox".to_string(),
    })?;
    if bbox_values.len() != 4 {
        return Err(AppError::InvalidBbox {
            count: bbox_values.len(),
        }
        .into());
    }
    let bbox = [bbox_values[0], bbox_values[1], bbox_values[2], bbox_values[3]];

    let time_range = args.time_range.as_deref().ok_or(AppError::MissingArgument {
        arg: "--time-range".to_string(),
    })?;

    let request = api::build_request(bbox, time_range, &args.crs, args.resolution)?;
    let json = request.to_json_pretty()?;

    if destination == Path::new("-") {
        println!("{json}");
    } else {
        fs::write(destination, json)?;
        info!("Request payload written: {:?}", destination);
    }
    Ok(())
}

fn require_io(args: &CliArgs) -> Result<(PathBuf, PathBuf), AppError> {
    let input = args.input.clone().ok_or(AppError::MissingArgument {
        arg: "--input".to_string(),
    })?;
    let output = args.output.clone().ok_or(AppError::MissingArgument {
        arg: "--output".to_string(),
    })?;
    Ok((input, output))
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    if let Some(destination) = args.emit_request.clone() {
        return emit_request(&args, &destination);
    }

    let (input, output) = require_io(&args)?;

    if args.evaluate {
        api::evaluate_scene_to_path(&input, &output)?;
        info!("Successfully evaluated: {:?} -> {:?}", input, output);
        return Ok(());
    }

    let params = SceneParams {
        format: args.format,
        bit_depth: args.bit_depth,
        band: args.band,
        autoscale: args.autoscale,
        noise_floor_db: args.noise_floor,
        apply_noise_mask: !args.keep_noise,
    };
    api::quicklook_to_path(&input, &output, &params)?;
    info!("Successfully processed: {:?} -> {:?}", input, output);

    Ok(())
}
