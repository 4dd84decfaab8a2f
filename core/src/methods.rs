//! Shortcuts for creating a `Request` with a common method.

use crate::request::Request;

/// A `GET` request to `url`.
pub fn get(url: impl Into<String>) -> Request {
    Request::new(url, "GET")
}

/// A `POST` request to `url`.
pub fn post(url: impl Into<String>) -> Request {
    Request::new(url, "POST")
}

/// A `PUT` request to `url`.
pub fn put(url: impl Into<String>) -> Request {
    Request::new(url, "PUT")
}

/// A `PATCH` request to `url`.
pub fn patch(url: impl Into<String>) -> Request {
    Request::new(url, "PATCH")
}

/// A `DELETE` request to `url`.
pub fn delete(url: impl Into<String>) -> Request {
    Request::new(url, "DELETE")
}
