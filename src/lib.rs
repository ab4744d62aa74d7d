pub mod banner;
pub mod config;
pub mod consts;
pub mod generator;
pub mod prompts;
pub mod web;
