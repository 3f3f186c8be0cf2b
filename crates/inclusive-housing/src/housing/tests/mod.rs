mod budget;
mod common;
mod compliance;
mod scoring;
