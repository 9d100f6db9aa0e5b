/// The `mcmeta_parser` module is responsible for parsing `.mcmeta` files,
/// the JSON sidecar documents used in Minecraft resource packs to describe
/// texture animation properties and pack-level metadata.
///
/// This module provides types and functions to read and interpret `.mcmeta`
/// files into Rust data structures. Unknown fields are ignored so that files
/// written for newer game versions still parse.
pub mod mcmeta_parser;

/// The `options_parser` module provides functionality for parsing the flat
/// `key:value` lines of an `options.txt` preference file into an ordered
/// map, together with typed accessors (integers, floats, booleans, lists,
/// enumerations) that convert on read.
///
/// Typical usage involves parsing a file into an [`options_parser::OptionsMap`],
/// reading or updating settings, and serializing the map back to text.
pub mod options_parser;

/// The `filesystem` module contains stateless helper operations used by the
/// launcher when managing game directories: existence checks, recursive copy
/// and delete, home-directory expansion, and a traversal-guarded path join.
pub mod filesystem;
