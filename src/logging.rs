use log::{debug, error, info};

use crate::query::QueryError;

pub struct QueryLogger;

impl QueryLogger {
    pub fn connecting(address: &str) {
        debug!("Connecting to {}", address);
    }

    pub fn connected(address: &str) {
        info!("Connected to {}", address);
    }

    pub fn tcp_nodelay_failed(err: &std::io::Error) {
        error!("Failed to set TCP_NODELAY: {err}");
    }

    pub fn handshake_sent(host: &str, protocol_version: i32) {
        debug!("Handshake sent for {host} (protocol {protocol_version})");
    }

    pub fn status_requested(host: &str) {
        debug!("Status request sent to {host}");
    }

    pub fn frame_received(len: usize) {
        debug!("Received frame of {len} bytes");
    }

    pub fn query_failed(host: &str, port: u16, err: &QueryError) {
        error!("Status query failed for {host}:{port}: {err}");
    }
}
