#![allow(dead_code)]

pub mod azw3;
pub mod image_server;
