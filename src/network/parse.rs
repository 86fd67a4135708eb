use anyhow::{Context, Result};
use serde::Deserialize;

/// Raw document shape: `{ nodes: [...], links: [...] }`. Both arrays are
/// required; individual author fields other than `id` are tolerated missing.
#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawNetwork {
    pub(super) nodes: Vec<RawAuthor>,
    pub(super) links: Vec<RawLink>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawAuthor {
    pub(super) id: String,
    #[serde(default)]
    pub(super) affiliation: String,
    #[serde(default)]
    pub(super) country: Option<String>,
    #[serde(default)]
    pub(super) publications: u64,
    #[serde(default)]
    pub(super) titles: Option<Vec<String>>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawLink {
    pub(super) source: String,
    pub(super) target: String,
}

pub(super) fn parse_network(raw: &str) -> Result<RawNetwork> {
    serde_json::from_str(raw).context("invalid collaboration network JSON")
}

#[cfg(test)]
mod tests {
    use super::parse_network;

    #[test]
    fn parses_minimal_document() {
        let parsed = parse_network(
            r#"{
                "nodes": [
                    {"id": "a", "affiliation": "MIT", "country": "US", "publications": 3,
                     "titles": ["On graphs"]},
                    {"id": "b", "affiliation": "ENS"}
                ],
                "links": [{"source": "a", "target": "b"}]
            }"#,
        )
        .expect("document parses");

        assert_eq!(parsed.nodes.len(), 2);
        assert_eq!(parsed.links.len(), 1);
        assert_eq!(parsed.nodes[0].country.as_deref(), Some("US"));
        assert_eq!(parsed.nodes[1].publications, 0);
        assert!(parsed.nodes[1].titles.is_none());
    }

    #[test]
    fn missing_links_array_is_an_error() {
        assert!(parse_network(r#"{"nodes": []}"#).is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_network("not json").is_err());
    }
}
