#![allow(dead_code)]

pub mod auth;
pub mod logging;
pub mod records;
