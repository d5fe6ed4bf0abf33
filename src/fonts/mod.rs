//! Font discovery for the press-release renderer.
//!
//! The layout is designed around Helvetica metrics.  Liberation Sans shares
//! those metrics and is looked up first; Arial from a Windows font directory
//! is the last resort.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::Error;
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

/// Environment variable naming a directory with the `LiberationSans-*.ttf` files.
pub const FONTS_DIR_ENV: &str = "PRESS_RELEASE_FONTS_DIR";
/// Environment variable overriding the Windows font directory.
pub const WINDOWS_FONTS_DIR_ENV: &str = "PRESS_RELEASE_WINDOWS_FONTS_DIR";

/// Name of the preferred font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "LiberationSans";

const FONT_FILES: &[&str] = &[
    "LiberationSans-Regular.ttf",
    "LiberationSans-Bold.ttf",
    "LiberationSans-Italic.ttf",
    "LiberationSans-BoldItalic.ttf",
];

const SYSTEM_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/TTF",
    "/usr/local/share/fonts",
    "/Library/Fonts",
];

/// Arial faces in the order regular, bold, italic, bold italic.
const WINDOWS_FONT_FILES: [&str; 4] = ["arial.ttf", "arialbd.ttf", "ariali.ttf", "arialbi.ttf"];

fn bundled_font_directory() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn executable_font_directory() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("assets/fonts")))
}

fn windows_font_directory() -> PathBuf {
    env::var_os(WINDOWS_FONTS_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| env::var_os("WINDIR").map(|dir| PathBuf::from(dir).join("Fonts")))
        .unwrap_or_else(|| PathBuf::from(r"C:\Windows\Fonts"))
}

/// Directories searched for the Liberation Sans family, in priority order.
pub fn search_directories() -> Vec<PathBuf> {
    let mut directories = Vec::new();
    if let Some(dir) = env::var_os(FONTS_DIR_ENV) {
        directories.push(PathBuf::from(dir));
    }
    directories.extend(executable_font_directory());
    directories.push(bundled_font_directory());
    directories.extend(SYSTEM_DIRECTORIES.iter().map(PathBuf::from));
    directories
}

fn has_required_fonts(directory: &Path) -> bool {
    FONT_FILES
        .iter()
        .all(|name| directory.join(name).is_file())
}

fn has_windows_fonts(directory: &Path) -> bool {
    WINDOWS_FONT_FILES
        .iter()
        .all(|name| directory.join(name).is_file())
}

fn load_face(path: PathBuf) -> Result<FontData, Error> {
    FontData::load(&path, None).map_err(|err| {
        Error::new(
            format!("Failed to load font {}: {}", path.display(), err),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn windows_font_family(directory: &Path) -> Result<FontFamily<FontData>, Error> {
    let [regular, bold, italic, bold_italic] =
        WINDOWS_FONT_FILES.map(|name| directory.join(name));
    Ok(FontFamily {
        regular: load_face(regular)?,
        bold: load_face(bold)?,
        italic: load_face(italic)?,
        bold_italic: load_face(bold_italic)?,
    })
}

/// Returns the first Liberation Sans family found, falling back to Arial.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    for directory in search_directories() {
        if !has_required_fonts(&directory) {
            continue;
        }
        debug!("Loading {} from {}", DEFAULT_FONT_FAMILY_NAME, directory.display());
        return fonts::from_files(&directory, DEFAULT_FONT_FAMILY_NAME, None).map_err(|err| {
            Error::new(
                format!(
                    "Failed to load font family '{}' from {}: {}",
                    DEFAULT_FONT_FAMILY_NAME,
                    directory.display(),
                    err
                ),
                io::Error::new(io::ErrorKind::Other, err.to_string()),
            )
        });
    }

    let windows = windows_font_directory();
    if has_windows_fonts(&windows) {
        warn!(
            "{} not found; falling back to Arial from {}",
            DEFAULT_FONT_FAMILY_NAME,
            windows.display()
        );
        return windows_font_family(&windows);
    }

    Err(Error::new(
        format!(
            "No usable fonts found. Install Liberation Sans, set {} or copy the files into {}. See assets/fonts/README.md.",
            FONTS_DIR_ENV,
            bundled_font_directory().display()
        ),
        io::Error::new(io::ErrorKind::NotFound, "fonts missing"),
    ))
}

/// Indicates whether [`default_font_family`] can find a usable family.
pub fn default_fonts_available() -> bool {
    search_directories()
        .iter()
        .any(|directory| has_required_fonts(directory))
        || has_windows_fonts(&windows_font_directory())
}
