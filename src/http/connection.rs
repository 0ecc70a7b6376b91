use std::net::SocketAddr;
use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tracing::{debug, error, info};

use crate::http::parser::{parse_http_request, ParseError};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::resolve::RequestContext;
use crate::server::Site;

pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    site: Arc<Site>,
    buffer: BytesMut,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr, site: Arc<Site>) -> Self {
        Self {
            stream,
            peer,
            site,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::Reading => match self.read_request().await {
                    Ok(Some(req)) => ConnectionState::Processing(req),
                    Ok(None) => ConnectionState::Closed,
                    Err(e) => {
                        info!("Client {} sent a malformed request ({:?})", self.peer, e);
                        let writer = ResponseWriter::new(&close(Response::bad_request()));
                        ConnectionState::Writing(writer, false)
                    }
                },

                ConnectionState::Processing(req) => {
                    let keep_alive = req.keep_alive();
                    let mut response = self.handle_request(&req).await;
                    if !keep_alive {
                        response = close(response);
                    }

                    ConnectionState::Writing(ResponseWriter::new(&response), keep_alive)
                }

                ConnectionState::Writing(mut writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if keep_alive {
                        ConnectionState::Reading // go back for next request
                    } else {
                        ConnectionState::Closed
                    }
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    /// Reads until a full request is buffered.
    ///
    /// `Ok(None)` means the client closed the connection. Transport errors
    /// while reading are treated the same way.
    pub async fn read_request(&mut self) -> Result<Option<Request>, ParseError> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(Some(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => return Err(e),
            }

            match self.stream.read_buf(&mut self.buffer).await {
                Ok(0) => return Ok(None),
                Ok(_) => {}
                Err(e) => {
                    debug!("Read from {} failed: {}", self.peer, e);
                    return Ok(None);
                }
            }
        }
    }

    async fn handle_request(&self, req: &Request) -> Response {
        let response = match req.method {
            Method::GET | Method::HEAD => match req.decoded_path() {
                Some(path) => self.serve(path).await,
                None => Response::bad_request(),
            },
            _ => Response::method_not_allowed(),
        };

        info!(
            "Client {} {} {} ({} {})",
            self.peer,
            req.method.as_str(),
            req.path,
            response.status.as_u16(),
            response.status.reason_phrase()
        );

        if req.method == Method::HEAD {
            response.without_body()
        } else {
            response
        }
    }

    /// Resolves on a blocking thread so file I/O never stalls the runtime.
    async fn serve(&self, path: String) -> Response {
        let site = Arc::clone(&self.site);
        let mut ctx = RequestContext::new(path, self.peer.to_string());

        let resolved = tokio::task::spawn_blocking(move || {
            site.resolver.resolve(&mut ctx);
            ctx
        })
        .await;

        match resolved.map(RequestContext::into_outcome) {
            Ok(Some(outcome)) => self.site.respond(outcome),
            Ok(None) => Response::internal_error(),
            Err(e) => {
                error!("Resolver task for {} failed: {}", self.peer, e);
                Response::internal_error()
            }
        }
    }
}

fn close(mut response: Response) -> Response {
    response
        .headers
        .insert("Connection".to_string(), "close".to_string());
    response
}
