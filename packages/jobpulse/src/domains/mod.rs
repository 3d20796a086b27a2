// Domain modules

pub mod jobs;
