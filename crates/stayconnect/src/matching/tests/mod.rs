mod common;
mod ranking;
