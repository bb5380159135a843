//! Networks bundled from `data/networks.json`, generated by the build script.

include!(concat!(env!("OUT_DIR"), "/network_generated.rs"));
