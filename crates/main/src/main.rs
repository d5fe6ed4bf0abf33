use std::error::Error;

use clap::Parser;

/// Renders the SOJAI press release to `SOJAI_Press_Release.pdf` next to this
/// executable.
///
/// Liberation Sans is looked up under `PRESS_RELEASE_FONTS_DIR`, `assets/fonts`
/// and the usual system font directories. Set `RUST_LOG=debug` to trace
/// pagination.
#[derive(Parser)]
#[command(author, version, about = "Generate the SOJAI press release PDF")]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    env_logger::init();
    log::debug!("Output path: {}", press_release::default_output_path().display());

    match press_release::build_pdf() {
        Ok(path) => println!("Done! Open: {}", path.display()),
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(&err);
            std::process::exit(1);
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
