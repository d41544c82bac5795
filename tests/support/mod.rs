#![allow(dead_code)]

pub mod fake_service;
pub mod images;
pub mod medlens_env;
