//! Server configuration

use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use std::time::Duration;

use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use rustls::pki_types::CertificateDer;

/// SWEETer-Cat dashboard server
#[derive(Parser, Clone, Debug)]
#[command(name = "sweetercat-server")]
#[command(about = "Serves the SWEET-Cat catalog with interactive plotting")]
pub struct Config {
    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    pub port: u16,

    /// Path to the SWEET-Cat TSV table
    #[arg(long, default_value = "data/sweet-cat.tsv")]
    pub sweetcat_path: String,

    /// Path to the exoplanet.eu CSV export
    #[arg(long, default_value = "data/exoplanetEU.csv")]
    pub exoplanet_path: String,

    /// Catalog cache lifetime in seconds
    #[arg(long, default_value = "300")]
    pub cache_ttl: u64,

    /// Directory with the portal's static assets
    #[arg(long, default_value = "sweetercat-server/static")]
    pub static_dir: String,

    /// TLS certificate path (PEM format)
    #[arg(long)]
    pub tls_cert: Option<String>,

    /// TLS private key path (PEM format)
    #[arg(long)]
    pub tls_key: Option<String>,
}

impl Config {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

/// Load TLS configuration from cert and key files
pub fn load_tls_config(cert_path: &str, key_path: &str) -> anyhow::Result<RustlsConfig> {
    let cert_file = File::open(cert_path)?;
    let key_file = File::open(key_path)?;

    let mut cert_reader = BufReader::new(cert_file);
    let mut key_reader = BufReader::new(key_file);

    let certs: Vec<CertificateDer<'static>> =
        rustls_pemfile::certs(&mut cert_reader).collect::<Result<Vec<_>, _>>()?;

    let key = rustls_pemfile::private_key(&mut key_reader)?
        .ok_or_else(|| anyhow::anyhow!("No private key found in {}", key_path))?;

    let config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)?;

    Ok(RustlsConfig::from_config(Arc::new(config)))
}
