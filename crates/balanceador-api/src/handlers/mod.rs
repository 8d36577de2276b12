//! HTTP request handlers for the balanceador API

pub mod cazadores;
pub mod servicios;
