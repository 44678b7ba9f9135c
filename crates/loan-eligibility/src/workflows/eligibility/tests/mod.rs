mod common;
mod service;
mod wizard;
