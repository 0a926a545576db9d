//! TCP / TLS transport to the IRC server.
//!
//! TLS uses rustls with the ring provider. Certificates are checked against the webpki roots,
//! unless `allow_self_signed` is set: then any certificate and host name are accepted, while
//! handshake signatures are still verified.

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, WebPkiSupportedAlgorithms};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;
use tracing::{info, instrument, warn};

use irc_core::{IrcError, Result};

use crate::config::IrcConfig;

/// Buffered read half of a connection.
pub type LineReader = BufReader<Box<dyn AsyncRead + Unpin + Send>>;
/// Write half of a connection.
pub type LineSink = Box<dyn AsyncWrite + Unpin + Send>;

/// An established connection, plain or TLS.
pub enum Connection {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl Connection {
    /// Splits into a line reader and a writer.
    pub fn split(self) -> (LineReader, LineSink) {
        match self {
            Connection::Plain(tcp) => {
                let (read, write) = tcp.into_split();
                let reader: Box<dyn AsyncRead + Unpin + Send> = Box::new(read);
                (BufReader::new(reader), Box::new(write))
            }
            Connection::Tls(tls) => {
                let (read, write) = tokio::io::split(*tls);
                let reader: Box<dyn AsyncRead + Unpin + Send> = Box::new(read);
                (BufReader::new(reader), Box::new(write))
            }
        }
    }

    pub fn is_tls(&self) -> bool {
        matches!(self, Connection::Tls(_))
    }
}

/// Connects to `config.server:config.port`, wrapping the stream in TLS when `config.tls` is set.
#[instrument(skip(config), fields(address = %config.address(), tls = config.tls))]
pub async fn connect(config: &IrcConfig) -> Result<Connection> {
    let tcp = TcpStream::connect((config.server.as_str(), config.port))
        .await
        .map_err(|e| {
            IrcError::Transport(format!("TCP connect to {} failed: {}", config.address(), e))
        })?;

    if !config.tls {
        info!("Connected (plain text)");
        return Ok(Connection::Plain(tcp));
    }

    if config.allow_self_signed {
        warn!("TLS certificate verification disabled");
    }
    let connector = TlsConnector::from(Arc::new(tls_config(config.allow_self_signed)?));
    let server_name = ServerName::try_from(config.server.clone())
        .map_err(|e| IrcError::Config(format!("invalid server name {}: {}", config.server, e)))?;
    let tls = connector
        .connect(server_name, tcp)
        .await
        .map_err(|e| IrcError::Transport(format!("TLS handshake failed: {}", e)))?;
    info!("Connected (TLS)");
    Ok(Connection::Tls(Box::new(tls)))
}

/// rustls client config: webpki roots, or [`AcceptAnyCertificate`] when self-signed certs are allowed.
pub fn tls_config(allow_self_signed: bool) -> Result<ClientConfig> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let algorithms = provider.signature_verification_algorithms;
    let builder = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| IrcError::Transport(format!("TLS setup failed: {}", e)))?;

    let config = if allow_self_signed {
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate { algorithms }))
            .with_no_client_auth()
    } else {
        let roots = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        builder.with_root_certificates(roots).with_no_client_auth()
    };
    Ok(config)
}

/// Accepts any server certificate and host name.
#[derive(Debug)]
struct AcceptAnyCertificate {
    algorithms: WebPkiSupportedAlgorithms,
}

impl ServerCertVerifier for AcceptAnyCertificate {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.algorithms.supported_schemes()
    }
}
