//! `content` command: list the POI catalog.

use std::path::PathBuf;

use artlens::config::ConfigFile;
use artlens::content::{PoiCatalog, PointOfInterest};

use crate::error::CliError;

/// Print the catalog from `file`, or from the configured source.
pub fn run(file: Option<PathBuf>) -> Result<(), CliError> {
    let catalog = match file {
        Some(path) => PoiCatalog::load(&path)?,
        None => ConfigFile::load()?.load_catalog()?,
    };

    println!("{} point(s) of interest", catalog.len());
    for poi in catalog.iter() {
        println!();
        print!("{}", describe(poi));
    }

    Ok(())
}

fn describe(poi: &PointOfInterest) -> String {
    format!(
        "[{}] {}\n  anchor: {}\n  {}\n",
        poi.id.0, poi.title, poi.anchor, poi.body
    )
}
