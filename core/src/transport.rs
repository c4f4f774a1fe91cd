//! The I/O seam between the sans-IO client and an HTTP implementation.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP exchange.
///
/// Implementations return every received response as data, whatever its
/// status; only failures to complete the exchange are errors.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}
