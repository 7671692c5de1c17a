use bytes::Bytes;

#[cfg(any(feature = "actix", feature = "hyper"))]
use crate::{LogBuffer, RequestScope, ScriptEmbed};

#[cfg(feature = "actix")]
use actix_web::HttpMessage;

/// Check whether a `Content-Type` value names an HTML document
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|media| media.trim().eq_ignore_ascii_case("text/html"))
}

/// Insert `script` before the last closing body tag, or append it when there is none
///
/// ```
/// use page_console::inject_script;
///
/// let page = inject_script("<html><BODY>hi</BODY></html>", "<script></script>");
/// assert_eq!(page, "<html><BODY>hi<script></script></BODY></html>");
/// ```
pub fn inject_script(html: &str, script: &str) -> String {
    // ASCII lowercasing keeps byte offsets stable
    let position = html
        .to_ascii_lowercase()
        .rfind("</body")
        .unwrap_or(html.len());

    let mut page = String::with_capacity(html.len() + script.len());
    page.push_str(&html[..position]);
    page.push_str(script);
    page.push_str(&html[position..]);
    page
}

/// Same as [`inject_script`] for a raw body
///
/// Bodies that are not valid UTF-8 are returned untouched.
pub fn inject_into_bytes(body: Bytes, script: &str) -> Bytes {
    match std::str::from_utf8(&body) {
        Ok(html) => Bytes::from(inject_script(html, script)),
        Err(_) => {
            tracing::debug!(len = body.len(), "skipping console injection into non UTF-8 body");
            body
        }
    }
}

// Actix-web integration (only available with actix feature)

/// Store the request scope in the actix request extensions
#[cfg(feature = "actix")]
pub fn attach_actix(req: &actix_web::HttpRequest, scope: RequestScope) {
    req.extensions_mut().insert(scope);
}

/// Run `f` against the request's console buffer
///
/// Returns `None` when no scope was attached to the request.
#[cfg(feature = "actix")]
pub fn with_actix_console<R, F>(req: &actix_web::HttpRequest, f: F) -> Option<R>
where
    F: FnOnce(&mut LogBuffer) -> R,
{
    let mut extensions = req.extensions_mut();
    extensions
        .get_mut::<RequestScope>()
        .map(|scope| f(scope.console()))
}

/// Render the attached scope's buffer, if any
#[cfg(feature = "actix")]
pub fn render_actix<E>(req: &actix_web::HttpRequest, embed: &E) -> Option<String>
where
    E: ScriptEmbed + ?Sized,
{
    req.extensions()
        .get::<RequestScope>()
        .and_then(|scope| scope.render_script(embed))
}

/// Discard the attached scope's buffer
#[cfg(feature = "actix")]
pub fn reset_actix(req: &actix_web::HttpRequest) {
    if let Some(scope) = req.extensions_mut().get_mut::<RequestScope>() {
        scope.reset_session();
    }
}

// Hyper integration (only available with hyper feature)

/// Store the request scope in the hyper request extensions
#[cfg(feature = "hyper")]
pub fn attach_hyper<B>(req: &mut hyper::Request<B>, scope: RequestScope) {
    req.extensions_mut().insert(scope);
}

/// The request's console buffer, created on first use
///
/// Returns `None` when no scope was attached to the request.
#[cfg(feature = "hyper")]
pub fn hyper_console<B>(req: &mut hyper::Request<B>) -> Option<&mut LogBuffer> {
    req.extensions_mut()
        .get_mut::<RequestScope>()
        .map(RequestScope::console)
}

/// Splice the rendered console script into an HTML response
///
/// Responses that are not `text/html`, or requests with nothing to emit, pass
/// through unchanged. A stale `content-length` is removed after injection.
#[cfg(feature = "hyper")]
pub fn inject_hyper_response<E>(
    response: hyper::Response<Bytes>,
    scope: &RequestScope,
    embed: &E,
) -> hyper::Response<http_body_util::Full<Bytes>>
where
    E: ScriptEmbed + ?Sized,
{
    use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};

    let (mut parts, body) = response.into_parts();

    let is_html = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(is_html_content_type);

    let body = match scope.render_script(embed) {
        Some(script) if is_html => {
            parts.headers.remove(CONTENT_LENGTH);
            inject_into_bytes(body, &script)
        }
        _ => body,
    };

    hyper::Response::from_parts(parts, http_body_util::Full::new(body))
}
