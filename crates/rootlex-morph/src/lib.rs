//! rootlex-morph
//!
//! The morphological ingestion pipeline: parses the tagged per-segment
//! corpus, reassembles whole words, registers consonantal roots and links
//! words to verses and roots. See `pipeline` for the end-to-end batch and
//! the stage modules (`segment`, `assembler`, `registry`, `linker`) for
//! the individual contracts.

pub mod assembler;
pub mod linker;
pub mod pipeline;
pub mod registry;
pub mod segment;

pub use assembler::{AssembledWord, WordAssembler, WordKey};
pub use pipeline::{IngestReport, MorphPipeline};
pub use registry::RootRegistry;
pub use segment::{LineOutcome, PartOfSpeech, PosClass, Segment};
