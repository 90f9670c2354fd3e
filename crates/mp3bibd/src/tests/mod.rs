//! Test suites for the mp3bib backend.

pub(crate) mod support;
