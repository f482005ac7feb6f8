pub mod accumulator;
pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod frequencies;
pub mod generation;
pub mod morphology;
pub mod nlp;
pub mod records;
pub mod report;
pub mod stopwords;
pub mod translate;
