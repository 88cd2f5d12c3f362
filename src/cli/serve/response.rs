//! HTTP response framing.

use anyhow::Result;
use std::io::Cursor;
use tiny_http::{Header, Request, Response, StatusCode};

use crate::diagram::{ApiError, Rendered};
use crate::utils::mime::types::JSON;

/// A framed response, independent of the HTTP transport.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    /// Frame a rendered diagram with its format's content type.
    pub fn rendered(rendered: Rendered) -> Self {
        let format = rendered.format;
        let mut headers = vec![("Content-Type", format.content_type().to_string())];
        if let Some(disposition) = format.disposition() {
            headers.push(("Content-Disposition", disposition.to_string()));
        }

        Self {
            status: 200,
            headers,
            body: rendered.body,
        }
    }

    /// Frame an error as a JSON body.
    pub fn error(err: &ApiError) -> Self {
        Self {
            status: err.status(),
            headers: vec![("Content-Type", JSON.to_string())],
            body: err.to_json().to_string().into_bytes(),
        }
    }

    pub fn from_result(result: Result<Rendered, ApiError>) -> Self {
        match result {
            Ok(rendered) => Self::rendered(rendered),
            Err(err) => Self::error(&err),
        }
    }

    /// First header value with a case-insensitive name match.
    #[cfg(test)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body).with_status_code(StatusCode(self.status));
        for (key, value) in &self.headers {
            if let Ok(header) = Header::from_bytes(key.as_bytes(), value.as_bytes()) {
                response.add_header(header);
            }
        }
        response
    }
}

/// Send a reply. HEAD requests get headers only.
pub fn respond(request: Request, reply: Reply) -> Result<()> {
    request.respond(reply.into_response())?;
    Ok(())
}
