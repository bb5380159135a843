//! `${NAME}` placeholder rendering for RPC URL templates.

use crate::config::ProviderKeys;

/// Renders `template` with values from `keys`.
///
/// Returns `None` when a placeholder has no usable value or is left unterminated;
/// such URLs are omitted from the registry rather than emitted half-filled.
pub fn render(template: &str, keys: &ProviderKeys) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}')?;
        out.push_str(keys.get(&after[..end])?);
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    (!out.is_empty()).then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_url_passes_through() {
        let keys = ProviderKeys::default();
        assert_eq!(
            render("https://cloudflare-eth.com", &keys).as_deref(),
            Some("https://cloudflare-eth.com")
        );
    }

    #[test]
    fn fills_configured_key() {
        let keys = ProviderKeys::default().with_infura_key("abc");
        assert_eq!(
            render("https://mainnet.infura.io/v3/${INFURA_KEY}", &keys).as_deref(),
            Some("https://mainnet.infura.io/v3/abc")
        );
    }

    #[test]
    fn missing_key_drops_url() {
        let keys = ProviderKeys::default().with_alchemy_key("xyz");
        assert_eq!(render("https://mainnet.infura.io/v3/${INFURA_KEY}", &keys), None);
    }

    #[test]
    fn malformed_template_drops_url() {
        let keys = ProviderKeys::default().with_infura_key("abc");
        assert_eq!(render("https://host/${INFURA_KEY", &keys), None);
        assert_eq!(render("", &keys), None);
    }
}
