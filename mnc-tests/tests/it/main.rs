// Copyright 2025-2026 Neil Henderson

//! Integration tests which run whole programs through the mnc compiler driver.

mod builder;
mod invalid_programs;
mod listings;
mod valid_programs;
