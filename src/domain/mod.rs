//! Domain layer containing business entities and logic.
//!
//! Independent of infrastructure and presentation concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`planning`] - Pure transport planning: buffer, time-slot buckets, vehicle policy
//! - [`repositories`] - Data access trait definitions
//!
//! # Generation Flow
//!
//! 1. [`repositories::TravelRepository::find_flight_arrivals`] reads eligible arrivals
//! 2. [`planning::plan_generation`] buckets them and sizes vehicles
//! 3. [`repositories::TransportRepository::save_generated_group`] writes each bucket

pub mod entities;
pub mod planning;
pub mod repositories;
