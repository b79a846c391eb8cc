//! Builds a shader program from disk and lists its active uniforms and attributes.
//!
//! Usage: `mp3d-shaderkit <name> [base-path]`

use std::{process::ExitCode, sync::Arc};

use mp3d_shaderkit::{
    FsFetcher, LoaderConfig, Location, ParameterClass, ProgramBuilder, abs::App,
};

fn setup_logger(level: log::LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn main() -> ExitCode {
    let config = match LoaderConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}, using defaults");
            LoaderConfig::default()
        }
    };

    if let Err(e) = setup_logger(config.log_level) {
        eprintln!("Failed to set up logging: {e}");
    }

    let mut args = std::env::args().skip(1);
    let Some(name) = args.next() else {
        eprintln!("Usage: mp3d-shaderkit <name> [base-path]");
        return ExitCode::FAILURE;
    };
    let path = args.next();

    let app = match App::hidden("mp3d-shaderkit") {
        Ok(app) => app,
        Err(e) => {
            log::error!("Could not create an OpenGL context: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut builder =
        match ProgramBuilder::with_config(Arc::clone(&app.gl), &name, path.as_deref(), &config) {
            Ok(builder) => builder,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        };

    let program = match pollster::block_on(builder.ready(&FsFetcher)) {
        Ok(program) => program,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    for class in ParameterClass::ALL {
        let mut parameters: Vec<_> = program.parameters(class).iter().collect();
        parameters.sort_by(|a, b| a.0.cmp(b.0));
        println!("{class}s ({}):", parameters.len());
        for (name, location) in parameters {
            match location {
                Location::Uniform(location) => println!("  {name} @ {}", location.0),
                Location::Attribute(index) => println!("  {name} @ {index}"),
            }
        }
    }

    ExitCode::SUCCESS
}
