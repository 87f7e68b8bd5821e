//! Building keyserver lookup URLs

use crate::Error;
use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use url::Url;

/// Accepted schemes of a keyserver endpoint. `hkp` is an alias for `http`, and a trailing `s`
/// selects the secure variant.
static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(http|hkp)s?://").expect("scheme pattern must compile"));

/// The scheme assumed for endpoints which don't carry one.
pub const DEFAULT_SCHEME: &str = "hkps";

/// The well-known path of the HKP lookup operation.
pub const LOOKUP_PATH: &str = "/pks/lookup";

/// Build the lookup URL for a keyserver endpoint.
///
/// The endpoint may be a plain host (`keyserver.ubuntu.com`) or a URL using one of the `http`,
/// `https`, `hkp`, or `hkps` schemes. Whatever was provided, the result always uses `https` and
/// the [`LOOKUP_PATH`].
///
/// The `query` is a flat list of key/value pairs, so it must have an even length. A key provided
/// twice keeps the last value. Keys are encoded in sorted order.
///
/// ```rust
/// let url = hkp_client::url::lookup_url(
///     "keyserver.example",
///     &["op", "get", "options", "mr", "search", "0x9DC858229FC7DD38854AE2D88D81803C0EBFCD88"],
/// )?;
/// assert_eq!(
///     url.as_str(),
///     "https://keyserver.example/pks/lookup?op=get&options=mr&search=0x9DC858229FC7DD38854AE2D88D81803C0EBFCD88"
/// );
/// # Ok::<_, hkp_client::Error>(())
/// ```
pub fn lookup_url<S: AsRef<str>>(endpoint: &str, query: &[S]) -> Result<Url, Error> {
    if query.len() % 2 != 0 {
        return Err(Error::InvalidParams);
    }

    let endpoint = match endpoint.contains("://") {
        true => Cow::Borrowed(endpoint),
        false => Cow::Owned(format!("{DEFAULT_SCHEME}://{endpoint}")),
    };

    let Some(scheme) = SCHEME.find(&endpoint) else {
        return Err(Error::InvalidScheme);
    };

    // `url` refuses to switch from a non-special scheme like `hkps` to `https`, so the scheme is
    // swapped before parsing.
    let mut url = Url::parse(&format!("https://{}", &endpoint[scheme.end()..]))?;

    url.set_path(LOOKUP_PATH);
    url.set_fragment(None);
    url.set_query(None);

    let params = query
        .chunks_exact(2)
        .map(|pair| (pair[0].as_ref(), pair[1].as_ref()))
        .collect::<BTreeMap<_, _>>();

    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }

    log::trace!("Lookup URL: {url}");

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "9DC858229FC7DD38854AE2D88D81803C0EBFCD88";

    fn get_params() -> Vec<String> {
        let search = format!("0x{ID}");
        ["op", "get", "options", "mr", "search", search.as_str()]
            .map(ToString::to_string)
            .to_vec()
    }

    #[test]
    fn lookup() {
        let url = lookup_url("keyserver.example", &get_params()).expect("must build");
        assert_eq!(
            url.as_str(),
            format!("https://keyserver.example/pks/lookup?op=get&options=mr&search=0x{ID}")
        );
    }

    #[test]
    fn schemes() {
        for endpoint in [
            "keyserver.example",
            "hkp://keyserver.example",
            "hkps://keyserver.example",
            "HKPS://keyserver.example",
            "http://keyserver.example",
            "https://keyserver.example",
            "Https://keyserver.example/",
        ] {
            let url = lookup_url::<&str>(endpoint, &[]).expect("must build");
            assert_eq!(url.as_str(), "https://keyserver.example/pks/lookup", "{endpoint}");
        }
    }

    #[test]
    fn invalid_scheme() {
        for endpoint in [
            "ftp://keyserver.example",
            "ldap://keyserver.example",
            "httpss://keyserver.example",
            "file:///etc/keys",
        ] {
            assert!(
                matches!(lookup_url::<&str>(endpoint, &[]), Err(Error::InvalidScheme)),
                "{endpoint}"
            );
        }
    }

    #[test]
    fn invalid_params() {
        assert!(matches!(
            lookup_url("keyserver.example", &["op"]),
            Err(Error::InvalidParams)
        ));
        assert!(matches!(
            lookup_url("keyserver.example", &["op", "get", "options"]),
            Err(Error::InvalidParams)
        ));
        // the params are checked first
        assert!(matches!(
            lookup_url("ftp://keyserver.example", &["op"]),
            Err(Error::InvalidParams)
        ));
    }

    #[test]
    fn overrides_path_and_fragment() {
        let url = lookup_url(
            "hkps://keyserver.example/some/path?foo=bar#fragment",
            &["op", "get"],
        )
        .expect("must build");
        assert_eq!(url.as_str(), "https://keyserver.example/pks/lookup?op=get");
    }

    #[test]
    fn keeps_port() {
        let url = lookup_url("hkp://keyserver.example:11371", &["op", "index"]).expect("must build");
        assert_eq!(
            url.as_str(),
            "https://keyserver.example:11371/pks/lookup?op=index"
        );
    }

    #[test]
    fn duplicate_keys() {
        let url = lookup_url(
            "keyserver.example",
            &["search", "first", "op", "get", "search", "second"],
        )
        .expect("must build");
        assert_eq!(
            url.as_str(),
            "https://keyserver.example/pks/lookup?op=get&search=second"
        );
    }

    #[test]
    fn encodes_values() {
        let url = lookup_url("keyserver.example", &["search", "Jane Doe <jane@example.org>"])
            .expect("must build");
        assert_eq!(
            url.query(),
            Some("search=Jane+Doe+%3Cjane%40example.org%3E")
        );
    }

    #[test]
    fn empty_host() {
        assert!(matches!(
            lookup_url::<&str>("https://", &[]),
            Err(Error::Url(_))
        ));
    }
}
