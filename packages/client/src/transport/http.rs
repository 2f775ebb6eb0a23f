//! HTTP chunk source for the upstream dataset GET
//!
//! The dataset body is consumed frame by frame, never buffered whole.
//! Speaks both plain HTTP and HTTPS; TLS uses rustls with the webpki root
//! set, so the production dataset URL works out of the box. Callers with
//! their own client can still wrap its body stream in
//! [`StreamChunkSource`](super::StreamChunkSource).

use std::sync::Arc;

use bytes::Bytes;
use http::{Method, Request, Uri, header};
use http_body_util::{BodyExt, Empty};
use hyper::body::Incoming;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

use super::ChunkSource;
use crate::error::{Error, Result};

/// Streams the body of one HTTP response as chunks.
#[derive(Debug)]
pub struct HttpChunkSource {
    body: Incoming,
}

/// Where and how to connect for one dataset request.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    tls: bool,
    host: String,
    port: u16,
    authority: String,
    path: String,
}

impl Target {
    fn from_url(url: &str) -> Result<Self> {
        let uri: Uri = url.parse().map_err(Error::transport)?;
        let tls = match uri.scheme_str() {
            Some("http") => false,
            Some("https") => true,
            other => {
                return Err(Error::transport_msg(format!(
                    "unsupported dataset URL scheme {other:?} in {url:?}"
                )));
            }
        };
        let host = uri
            .host()
            .ok_or_else(|| Error::transport_msg(format!("dataset URL has no host: {url:?}")))?
            .to_owned();
        let port = uri.port_u16().unwrap_or(if tls { 443 } else { 80 });
        let authority = uri
            .authority()
            .map(|a| a.as_str().to_owned())
            .unwrap_or_else(|| host.clone());
        let path = uri
            .path_and_query()
            .map(|p| p.as_str().to_owned())
            .unwrap_or_else(|| "/".to_owned());
        Ok(Self { tls, host, port, authority, path })
    }
}

/// GET `url` and return its body as a chunk source.
///
/// Fails with [`Error::Transport`] on an unsupported scheme, connection or
/// handshake failure, or a non-success status; the body is not inspected
/// here.
pub async fn fetch(url: &str) -> Result<HttpChunkSource> {
    let target = Target::from_url(url)?;
    tracing::debug!(host = %target.host, port = target.port, tls = target.tls, "fetching dataset");

    let tcp = TcpStream::connect((target.host.as_str(), target.port))
        .await
        .map_err(Error::transport)?;

    let body = if target.tls {
        let connector = TlsConnector::from(Arc::new(tls_client_config()));
        let server_name = ServerName::try_from(target.host.clone()).map_err(Error::transport)?;
        let stream = connector
            .connect(server_name, tcp)
            .await
            .map_err(Error::transport)?;
        send_get(TokioIo::new(stream), &target).await?
    } else {
        send_get(TokioIo::new(tcp), &target).await?
    };

    Ok(HttpChunkSource { body })
}

fn tls_client_config() -> ClientConfig {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth()
}

async fn send_get<T>(io: T, target: &Target) -> Result<Incoming>
where
    T: hyper::rt::Read + hyper::rt::Write + Unpin + Send + 'static,
{
    let (mut sender, connection) = http1::handshake(io).await.map_err(Error::transport)?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::debug!(error = %e, "dataset connection closed with error");
        }
    });

    let request = Request::builder()
        .method(Method::GET)
        .uri(target.path.as_str())
        .header(header::HOST, target.authority.as_str())
        .body(Empty::<Bytes>::new())
        .map_err(Error::transport)?;

    let response = sender.send_request(request).await.map_err(Error::transport)?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::transport_msg(format!(
            "dataset request failed with status {status}"
        )));
    }
    Ok(response.into_body())
}

impl ChunkSource for HttpChunkSource {
    async fn next_chunk(&mut self) -> Option<Result<Bytes>> {
        loop {
            match self.body.frame().await {
                None => return None,
                Some(Err(e)) => return Some(Err(Error::transport(e))),
                Some(Ok(frame)) => {
                    // Trailer frames carry no row bytes.
                    if let Ok(data) = frame.into_data() {
                        return Some(Ok(data));
                    }
                }
            }
        }
    }
}
