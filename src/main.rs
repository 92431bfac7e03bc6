#![deny(clippy::all)]

use clap::{App, Arg, ArgMatches};
use env_logger::Env;
use log::{error, info, warn};
use objscene::{
    parse_color_override, parse_reflectiveness_override, EmissionOptions, MeshModel, Result,
    SceneConverter, ShadingVariant,
};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::process;
use std::time::Instant;

fn joined_values(matches: &ArgMatches, name: &str) -> String {
    matches
        .values_of(name)
        .map(|values| values.collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn emission_options(matches: &ArgMatches) -> Result<EmissionOptions> {
    let mut options = match matches.value_of("config") {
        Some(path) => EmissionOptions::from_json(BufReader::new(File::open(path)?))?,
        None => EmissionOptions::default(),
    };

    if matches.is_present("color") {
        options.color_override = parse_color_override(&joined_values(matches, "color"))?;
    }
    if matches.is_present("reflectiveness") {
        options.reflectiveness =
            parse_reflectiveness_override(&joined_values(matches, "reflectiveness"))?;
    }
    if matches.is_present("legacy") {
        options.variant = ShadingVariant::Legacy;
    }

    if options.variant == ShadingVariant::Legacy && options.color_override.is_some() {
        warn!("legacy shading ignores the color override");
    }

    Ok(options)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let options = emission_options(matches)?;
    let obj_path = Path::new(matches.value_of("obj").unwrap_or_default());

    let now = Instant::now();
    let model = MeshModel::load(obj_path)?;
    info!(
        "Took {:?} to load {} materials from {}.",
        now.elapsed(),
        model.materials().len(),
        obj_path.display()
    );

    let mut writer: Box<dyn Write> = match matches.value_of("output") {
        Some(filename) => Box::new(BufWriter::new(File::create(filename)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let converter = SceneConverter::new(&model, &options);
    info!(
        "Writing scene with {:?} shading, reflectiveness {:?}.",
        converter.shading().variant(),
        converter.shading().reflectiveness()
    );

    let now = Instant::now();
    let summary = converter.write_scene(&mut writer)?;
    info!(
        "Took {:?} to write {} triangles across {} materials.",
        now.elapsed(),
        summary.triangles,
        summary.materials
    );

    Ok(())
}

fn build_app() -> App<'static, 'static> {
    App::new("obj2scene")
        .about("Converts a Wavefront mesh into ray tracer scene triangles")
        .arg(
            Arg::with_name("obj")
                .index(1)
                .required(true)
                .takes_value(true)
                .help("wavefront file"),
        )
        .arg(
            Arg::with_name("color")
                .short("c")
                .long("color")
                .takes_value(true)
                .min_values(0)
                .max_values(1)
                .use_delimiter(false)
                .value_name("COLOR")
                .help(
                    "Override every triangle's color with a single value\n\
                     Accepts \"r,g,b\", a quoted \"r g b\", \"#rrggbb\", \"rgb(r,g,b)\" or \"default\"",
                ),
        )
        .arg(
            Arg::with_name("reflectiveness")
                .short("r")
                .long("reflectiveness")
                .takes_value(true)
                .min_values(0)
                .max_values(1)
                .help("Set reflectiveness for every triangle, or \"default\" for 0"),
        )
        .arg(
            Arg::with_name("legacy")
                .long("legacy")
                .help("Write raw specular intensity followed by the specular color"),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .takes_value(true)
                .help("Read emission options from a json file\nFlags take precedence"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help(
                    "Output scene to file\n\
                     If omitted, scene is written to stdout",
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let matches = build_app().get_matches();

    if let Err(err) = run(&matches) {
        error!("{}", err);
        process::exit(1);
    }
}
