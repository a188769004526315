#[macro_use]
extern crate log;

use sss_api::*;
use sss_core::app::*;
use sss_core::fileutil::*;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let options = options();
    let mut api = Api::new();

    // Process profile descriptions.
    for path in options.paths.iter() {
        // In case of error report it and continue.
        if let Err(e) = load(path, &mut api) {
            error!("{e}");
        }
    }

    if let Err(e) = bake(options, &api) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn load(path: &str, api: &mut Api) -> Result<(), String> {
    // Get absolute path to the description file. Includes resolve against
    // its directory.
    let abs_path = absolute_path(path)?;
    parser::parse(&abs_path, api)
}

fn bake(options: &Options, api: &Api) -> Result<(), String> {
    let baked = api.bake_profiles();
    let table = ProfileTable::from(baked.as_slice());
    info!("Baked {} profiles", table.names().len());

    if options.quiet {
        return Ok(());
    }

    let rows: Vec<usize> = match options.profile.as_deref() {
        Some(name) => vec![table
            .find_row(name)
            .ok_or(format!("Unknown SubsurfaceProfile '{name}'"))?],
        None => (0..table.names().len()).collect(),
    };

    for row in rows {
        if options.raw {
            print!("{}", baked[row]);
        } else {
            println!("row {} \"{}\"", row, table.names()[row]);
            for (column, t) in table.row(row).iter().enumerate() {
                println!("  {:3}: {} {} {} {}", column, t[0], t[1], t[2], t[3]);
            }
        }
    }

    Ok(())
}
