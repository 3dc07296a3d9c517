use astra::{Body, ResponseBuilder};
use maud::Markup;

use crate::errors::ServerError;
use crate::responses::ResultResp;

pub fn html_response(markup: Markup) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(markup.into_string()))
        .map_err(|_| ServerError::InternalError)
}
