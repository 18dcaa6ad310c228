use thiserror::Error;
use url::Url;

pub const DEFAULT_HOMEPAGE_URL: &str = "https://primitive.kr/";
pub const DEFAULT_APPLY_URL: &str = "https://forms.gle/8aDB9L7XTZRxrhDv6";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LinkError {
    #[error("invalid url {raw}: {source}")]
    Invalid {
        raw: String,
        #[source]
        source: url::ParseError,
    },

    #[error("only http(s) links can be opened: {0}")]
    UnsupportedScheme(String),
}

/// The club pages the landing and result views point to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLinks {
    homepage: Url,
    apply: Url,
}

impl ExternalLinks {
    /// # Errors
    ///
    /// Returns `LinkError` if either value is not an absolute http(s) URL.
    pub fn new(homepage: &str, apply: &str) -> Result<Self, LinkError> {
        Ok(Self {
            homepage: parse_web_url(homepage)?,
            apply: parse_web_url(apply)?,
        })
    }

    #[must_use]
    pub fn homepage(&self) -> &Url {
        &self.homepage
    }

    #[must_use]
    pub fn apply(&self) -> &Url {
        &self.apply
    }
}

fn parse_web_url(raw: &str) -> Result<Url, LinkError> {
    let url = Url::parse(raw.trim()).map_err(|source| LinkError::Invalid {
        raw: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(LinkError::UnsupportedScheme(raw.to_string())),
    }
}
