//! Freight rating domain: package model, classification, tariffs and
//! carrier serviceability rules

pub mod model;
pub mod service;
