//! Echo operation enum.
//!
//! The router resolves every request to one of these operations; dispatch
//! maps each operation to its handler. Keeping the set closed makes the
//! route table an explicit, inspectable configuration.

use std::fmt;

/// All operations exposed by the echo service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EchoOperation {
    // Method echo
    /// `GET /get`: echo without the method field.
    Get,
    /// `POST /post`: echo with decoded body and method.
    Post,
    /// `PUT /put`: echo with decoded body and method.
    Put,
    /// `PATCH /patch`: echo with decoded body and method.
    Patch,
    /// `DELETE /delete`: echo with decoded body and method.
    Delete,
    /// `/any`: accepts every method, echoes the method name.
    Any,

    // Request inspection
    /// `GET /request`: full request echo.
    RequestInfo,
    /// `GET /headers`: request headers only.
    Headers,
    /// `GET /user-agent`: the `User-Agent` header only.
    UserAgent,
    /// `GET /ip`: client origin only.
    Ip,

    // Cookies
    /// `GET /cookies`: cookie mapping only.
    Cookies,
    /// `GET /cookies/set`: set cookies from query args, redirect.
    SetCookies,
    /// `GET /cookies/set/{name}/{value}`: set one cookie from the path.
    SetCookiePath,
    /// `GET /cookies/delete`: expire the named cookies, redirect.
    DeleteCookies,

    // Auth echo
    /// `GET /auth/basic/{user}/{passwd}`: Basic credentials check.
    BasicAuth,
    /// `GET /auth/basic-hidden/{user}/{passwd}`: Basic check without a
    /// `WWW-Authenticate` challenge.
    HiddenBasicAuth,
    /// `GET /auth/bearer`: Bearer token echo.
    BearerAuth,

    // Response shaping
    /// `/status/{code}`: respond with the requested status code.
    Status,
    /// `GET /response-headers`: echo query args as response headers.
    ResponseHeaders,
    /// `GET /cache`: conditional-request cache echo.
    Cache,
}

impl EchoOperation {
    /// Returns the operation name string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "Get",
            Self::Post => "Post",
            Self::Put => "Put",
            Self::Patch => "Patch",
            Self::Delete => "Delete",
            Self::Any => "Any",
            Self::RequestInfo => "RequestInfo",
            Self::Headers => "Headers",
            Self::UserAgent => "UserAgent",
            Self::Ip => "Ip",
            Self::Cookies => "Cookies",
            Self::SetCookies => "SetCookies",
            Self::SetCookiePath => "SetCookiePath",
            Self::DeleteCookies => "DeleteCookies",
            Self::BasicAuth => "BasicAuth",
            Self::HiddenBasicAuth => "HiddenBasicAuth",
            Self::BearerAuth => "BearerAuth",
            Self::Status => "Status",
            Self::ResponseHeaders => "ResponseHeaders",
            Self::Cache => "Cache",
        }
    }
}

impl fmt::Display for EchoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
