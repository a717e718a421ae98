//! Server configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::warn;

use crate::room::policy::{HostElection, DEFAULT_RESERVED_HOST_NAME, DEFAULT_RESERVED_ROOM};

/// Server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// Directory the shared document is written to and served from
    pub upload_dir: PathBuf,

    /// File name the uploaded document is stored under
    pub document_file_name: String,

    /// URL prefix the upload directory is served under
    pub uploads_route: String,

    /// Directories of client assets served as fallbacks, first match wins
    pub static_dirs: Vec<PathBuf>,

    /// Largest accepted upload body in bytes
    pub max_upload_bytes: usize,

    /// Inbound event queue size
    pub event_queue_capacity: usize,

    /// room id -> player name that hosts it
    pub reserved_rooms: Vec<(String, String)>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            upload_dir: PathBuf::from("uploads"),
            document_file_name: "slides.pdf".to_string(),
            uploads_route: "/uploads".to_string(),
            static_dirs: vec![
                PathBuf::from("host"),
                PathBuf::from("slides"),
                PathBuf::from("viewer"),
            ],
            max_upload_bytes: 50 * 1024 * 1024, // 50MB
            event_queue_capacity: 1024,
            reserved_rooms: vec![(
                DEFAULT_RESERVED_ROOM.to_string(),
                DEFAULT_RESERVED_HOST_NAME.to_string(),
            )],
        }
    }
}

impl ServerConfig {
    /// Reads overrides from the environment, keeping defaults for anything unset
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unparseable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        let host = lookup("HOST").unwrap_or_else(|| config.bind_addr.ip().to_string());
        let port = parse_or(lookup("PORT"), "PORT", config.bind_addr.port());
        match format!("{}:{}", host, port).parse() {
            Ok(addr) => config.bind_addr = addr,
            Err(_) => warn!(host = %host, port = port, "Invalid HOST, using default bind address"),
        }

        if let Some(dir) = lookup("UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }

        if let Some(dirs) = lookup("STATIC_DIRS") {
            config.static_dirs = dirs
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(PathBuf::from)
                .collect();
        }

        config.max_upload_bytes = parse_or(
            lookup("MAX_UPLOAD_BYTES"),
            "MAX_UPLOAD_BYTES",
            config.max_upload_bytes,
        );
        config.event_queue_capacity = parse_or(
            lookup("EVENT_QUEUE_CAPACITY"),
            "EVENT_QUEUE_CAPACITY",
            config.event_queue_capacity,
        )
        .max(1);

        if let Some(rooms) = lookup("RESERVED_ROOMS") {
            config.reserved_rooms = parse_reserved_rooms(&rooms);
        }

        config
    }

    /// Public URL of the shared document
    pub fn document_url(&self) -> String {
        format!(
            "{}/{}",
            self.uploads_route.trim_end_matches('/'),
            self.document_file_name
        )
    }

    pub fn host_election(&self) -> HostElection {
        self.reserved_rooms
            .iter()
            .fold(HostElection::new(), |election, (room, host)| {
                election.with_reserved_room(room.clone(), host.clone())
            })
    }
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(
    value: Option<String>,
    key: &str,
    default: T,
) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key = key, value = %raw, default = %default, "Invalid config value, using default");
            default
        }),
        None => default,
    }
}

/// Parses `room=host,room2=host2`. Malformed pairs are skipped.
fn parse_reserved_rooms(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .filter(|pair| !pair.trim().is_empty())
        .filter_map(|pair| match pair.split_once('=') {
            Some((room, host)) if !room.trim().is_empty() && !host.trim().is_empty() => {
                Some((room.trim().to_string(), host.trim().to_string()))
            }
            _ => {
                warn!(pair = %pair, "Ignoring malformed RESERVED_ROOMS entry");
                None
            }
        })
        .collect()
}
