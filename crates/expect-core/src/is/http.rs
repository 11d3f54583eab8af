use crate::expectation::{expect_fn, Expectation};
use hyper::header::HeaderMap;
use hyper::{Request, Response, StatusCode};

/// An HTTP entity that carries headers.
pub trait HttpMessage {
    /// Name used in failure messages
    const NAME: &'static str;

    fn headers(&self) -> &HeaderMap;
}

impl<B> HttpMessage for Request<B> {
    const NAME: &'static str = "Request";

    fn headers(&self) -> &HeaderMap {
        Request::headers(self)
    }
}

impl<B> HttpMessage for Response<B> {
    const NAME: &'static str = "Response";

    fn headers(&self) -> &HeaderMap {
        Response::headers(self)
    }
}

impl HttpMessage for HeaderMap {
    const NAME: &'static str = "HeaderMap";

    fn headers(&self) -> &HeaderMap {
        self
    }
}

/// `got` has a header `name` with `value` among its values.
pub fn http_header<'a, M>(got: &'a M, name: &'a str, value: &'a str) -> impl Expectation + 'a
where
    M: HttpMessage,
{
    expect_fn(move |reporter| {
        let headers = got.headers();
        if !headers.contains_key(name) {
            reporter.error(&format!("expected {} to contain header {}", M::NAME, name));
            return;
        }
        if !headers
            .get_all(name)
            .iter()
            .any(|v| v.as_bytes() == value.as_bytes())
        {
            reporter.error(&format!(
                "expected {} to contain header {} with value {} but no such value found (although header with that name exists)",
                M::NAME, name, value
            ));
        }
    })
}

/// `got` has status code `status`.
pub fn http_status<B>(got: &Response<B>, status: StatusCode) -> impl Expectation + '_ {
    expect_fn(move |reporter| {
        if got.status() != status {
            reporter.error(&format!(
                "expected HTTP status code to be {} but got {}",
                status.as_u16(),
                got.status().as_u16()
            ));
        }
    })
}
