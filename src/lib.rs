pub mod span;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod config;
pub mod modules;
pub mod locate;
pub mod qualify;
pub mod imports;
pub mod resolve;
pub mod flatten;

pub use config::Config;
pub use diagnostics::Error;
pub use flatten::Interfacer;
pub use locate::{ResolvedModule, Skipped};
pub use qualify::{Func, Param};
pub use resolve::InterfaceRef;

/// Resolve `reference` (e.g. `io.ReadWriter`) using `./interfacer.toml` or
/// the environment.
pub fn find_interface(reference: &str) -> Result<InterfaceRef, Error> {
    let config = Config::load_default()?;
    Interfacer::from_config(&config).find_interface(reference)
}

/// Flattened method list of `reference` (resolve, locate, qualify, expand embeds).
pub fn functions(reference: &str) -> Result<Vec<Func>, Error> {
    let config = Config::load_default()?;
    Interfacer::from_config(&config).functions(reference)
}
