//! # imgbed
//!
//! A static gallery generator and dev server for self-hosted image beds.
//! Your filesystem is the data source: a content root of images, one level
//! of folders, no database. One scan produces an inventory, and everything
//! else (the HTML page, the `/random` API, the JSON artifact) is a view of it.
//!
//! # Architecture: Scan Once, Consume Everywhere
//!
//! ```text
//! 1. Scan      website/   →  Inventory        (filesystem → structured data)
//! 2. Generate  Inventory  →  index.html       (browsable gallery page)
//!                         →  inventory.json   (serialized snapshot)
//! 3. Serve     Inventory  →  GET /random      (302 to a random image)
//! ```
//!
//! The original toolchain this replaces implemented the scan/random-pick
//! pair three separate times (build script, dev server, bundler plugin),
//! each with slightly different semantics. Here there is exactly one scanner
//! and one selector; the generator and the dev server are thin consumers.
//! Divergences between the old variants were resolved once:
//!
//! - Scanning is **one level deep**: root images plus immediate folders.
//! - An unknown folder filter on `/random` is **not found**, never a silent
//!   fall-back to the full pool.
//! - The dev server holds the inventory **in memory** and rebuilds it only
//!   on an explicit `/rescan`, instead of re-reading a generated data file
//!   on every request.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the content root, probes image metadata, produces the [`scan::Inventory`] |
//! | [`select`] | Uniform random pick from the full pool or one folder's pool |
//! | [`generate`] | Renders `index.html` with Maud and writes `inventory.json` |
//! | [`serve`] | Threaded dev server: static files, `/random`, `/rescan` |
//! | [`config`] | `config.toml` loading, validation, and color CSS generation |
//! | [`output`] | CLI output formatting (pure `format_*` functions) |
//! | [`filesize`] | Human-readable size badges (KB/MB/GB at half-unit thresholds) |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system: malformed HTML is a build error, interpolation is
//! auto-escaped, and there is no template directory to ship. The generated
//! page embeds its CSS, JS, and path-pool data, so `index.html` is a single
//! self-contained file that works from any static host.
//!
//! ## Soft Metadata Failures
//!
//! Pixel dimensions come from a header-only decode via the `image` crate.
//! A file that cannot be decoded (SVG, truncated upload) keeps its entry
//! with no dimensions; one bad file must never fail a scan.
//!
//! ## A Dev Server Without a Framework
//!
//! The server is a plain `TcpListener` accept loop with a thread per
//! connection. The whole HTTP surface is three routes and static files;
//! an async stack would be all ceremony for a tool that serves one user
//! on localhost.

pub mod config;
pub mod filesize;
pub mod generate;
pub mod output;
pub mod scan;
pub mod select;
pub mod serve;

#[cfg(test)]
pub(crate) mod test_helpers;
