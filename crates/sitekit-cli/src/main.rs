//! sitekit - sitemap planning and WordPress export CLI
//!
//! ## Quick Start
//!
//! ```bash
//! # Initialize in your project
//! sitekit init
//!
//! # Create a site and plan its pages
//! sitekit site create "Acme Plumbing" --production-url https://acme.example
//! sitekit sitemap add "Acme Plumbing" Home /
//! sitekit sitemap add "Acme Plumbing" Services /services --target / --position child
//!
//! # Export for the WordPress importer
//! sitekit export "Acme Plumbing" --format wxr
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
