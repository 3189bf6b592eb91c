use http::header::{self, HeaderMap, HeaderValue};
use http::uri::{Authority, PathAndQuery, Scheme, Uri};
use http::{Request, Response, request, response};

/// Outcome of writing the transport host field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostUpdate {
    /// The host field now holds the new value
    Updated,
    /// The target has a host field but the value is not a valid authority
    Rejected,
    /// The target has no host field (responses, bare header maps)
    Unsupported,
}

/// Header collection of one in-flight exchange
///
/// Handlers only see this trait. Requests expose their URI authority as the
/// transport host field; responses and plain header maps do not have one.
pub trait HeaderTarget {
    /// Current headers
    fn headers(&self) -> &HeaderMap;

    /// Headers for in-place mutation
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Write the transport-level host
    ///
    /// On success the host field is the only host the exchange carries; any
    /// `Host` header already present is dropped.
    fn set_host(&mut self, _host: &HeaderValue) -> HostUpdate {
        HostUpdate::Unsupported
    }
}

impl HeaderTarget for HeaderMap {
    fn headers(&self) -> &HeaderMap {
        self
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        self
    }
}

impl HeaderTarget for request::Parts {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn set_host(&mut self, host: &HeaderValue) -> HostUpdate {
        let update = replace_authority(&mut self.uri, host);
        if update == HostUpdate::Updated {
            self.headers.remove(header::HOST);
        }
        update
    }
}

impl<B> HeaderTarget for Request<B> {
    fn headers(&self) -> &HeaderMap {
        Request::headers(self)
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        Request::headers_mut(self)
    }

    fn set_host(&mut self, host: &HeaderValue) -> HostUpdate {
        let update = replace_authority(self.uri_mut(), host);
        if update == HostUpdate::Updated {
            Request::headers_mut(self).remove(header::HOST);
        }
        update
    }
}

impl HeaderTarget for response::Parts {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

impl<B> HeaderTarget for Response<B> {
    fn headers(&self) -> &HeaderMap {
        Response::headers(self)
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        Response::headers_mut(self)
    }
}

/// Swap the authority of `uri`, keeping scheme, path and query
///
/// Origin-form URIs (`/path`) gain an `http` scheme since an absolute URI
/// cannot carry an authority without one.
fn replace_authority(uri: &mut Uri, host: &HeaderValue) -> HostUpdate {
    let Ok(authority) = Authority::try_from(host.as_bytes()) else {
        tracing::warn!(host = ?host, "ignoring host rewrite: value is not a valid authority");
        return HostUpdate::Rejected;
    };

    let mut parts = uri.clone().into_parts();
    parts.authority = Some(authority);
    if parts.scheme.is_none() {
        parts.scheme = Some(Scheme::HTTP);
    }
    if parts.path_and_query.is_none() {
        parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }

    match Uri::from_parts(parts) {
        Ok(rewritten) => {
            *uri = rewritten;
            HostUpdate::Updated
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring host rewrite: cannot rebuild request uri");
            HostUpdate::Rejected
        }
    }
}
