pub mod config_generation;
