//! Random selection over an inventory's path pools.
//!
//! A pick is a pure function of the pool plus the thread-local RNG: uniform
//! over the pool, independent across calls, repeats allowed. The only error
//! condition is an empty pool, reported as `None`; the dev server turns it
//! into a 404, the generated page hides the preview.

use crate::scan::Inventory;
use rand::seq::SliceRandom;

/// Draw one path uniformly at random. Empty pool → `None`.
pub fn pick_from(paths: &[String]) -> Option<&str> {
    paths.choose(&mut rand::thread_rng()).map(String::as_str)
}

/// Pick a random image path from the inventory.
///
/// With a folder filter the pool is exactly that folder's paths; a folder
/// name the inventory does not know yields `None` rather than falling back
/// to the full pool.
pub fn pick<'a>(inventory: &'a Inventory, folder: Option<&str>) -> Option<&'a str> {
    match folder {
        Some(name) => pick_from(inventory.paths_by_folder.get(name)?),
        None => pick_from(&inventory.all_paths),
    }
}
