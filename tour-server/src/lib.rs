//! Football tour planner server.
//!
//! A web application that answers: "Which matches can I see in a row,
//! staying within a short distance and a few days?"

pub mod cache;
pub mod collect;
pub mod domain;
pub mod football;
pub mod grounds;
pub mod planner;
pub mod venues;
pub mod web;
