use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{info, warn};

use super::graph::{Author, CollabNetwork, degree_table, rank_countries};
use super::parse::{RawNetwork, parse_network};

/// Reads and validates a collaboration network document from disk.
pub fn load_network(path: &Path) -> Result<CollabNetwork> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read network file {}", path.display()))?;
    let parsed = parse_network(&raw)
        .with_context(|| format!("failed to parse network file {}", path.display()))?;

    let network = build_network(parsed)?;
    info!(
        "loaded collaboration network: {} authors, {} links ({} dropped), {} ranked countries",
        network.author_count(),
        network.link_count(),
        network.dropped_links,
        network.top_countries.len(),
    );

    Ok(network)
}

/// Resolves link endpoints to author indices and derives the degree table and
/// country ranking. Links whose endpoints are unknown are dropped rather than
/// left to render at undefined positions; duplicate author ids keep the first
/// record.
pub(super) fn build_network(parsed: RawNetwork) -> Result<CollabNetwork> {
    if parsed.nodes.is_empty() {
        return Err(anyhow!("network document contains no authors"));
    }

    let mut authors = Vec::with_capacity(parsed.nodes.len());
    let mut index_by_id = HashMap::with_capacity(parsed.nodes.len());

    for raw in parsed.nodes {
        if index_by_id.contains_key(&raw.id) {
            warn!("duplicate author id {:?}; keeping the first record", raw.id);
            continue;
        }

        index_by_id.insert(raw.id.clone(), authors.len());
        authors.push(Author {
            id: raw.id,
            affiliation: raw.affiliation,
            country: raw.country.filter(|country| !country.is_empty()),
            publications: raw.publications,
            titles: raw.titles.unwrap_or_default(),
        });
    }

    let mut links = Vec::with_capacity(parsed.links.len());
    let mut dropped_links = 0usize;
    for link in parsed.links {
        match (index_by_id.get(&link.source), index_by_id.get(&link.target)) {
            (Some(&source), Some(&target)) => links.push((source, target)),
            _ => {
                dropped_links += 1;
                warn!(
                    "dropping link {:?} -> {:?}: endpoint not in node set",
                    link.source, link.target
                );
            }
        }
    }

    let degrees = degree_table(authors.len(), &links);
    let top_countries = rank_countries(&authors);

    Ok(CollabNetwork {
        authors,
        links,
        degrees,
        top_countries,
        dropped_links,
    })
}

#[cfg(test)]
mod tests {
    use super::build_network;
    use crate::network::parse::{RawAuthor, RawLink, RawNetwork};

    fn raw_author(id: &str) -> RawAuthor {
        RawAuthor {
            id: id.to_string(),
            affiliation: String::new(),
            country: None,
            publications: 0,
            titles: None,
        }
    }

    fn raw_link(source: &str, target: &str) -> RawLink {
        RawLink {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn resolves_links_to_indices() {
        let network = build_network(RawNetwork {
            nodes: vec![raw_author("a"), raw_author("b")],
            links: vec![raw_link("a", "b")],
        })
        .expect("network builds");

        assert_eq!(network.links, vec![(0, 1)]);
        assert_eq!(network.degrees, vec![1, 1]);
        assert_eq!(network.dropped_links, 0);
    }

    #[test]
    fn drops_links_with_unknown_endpoints() {
        let network = build_network(RawNetwork {
            nodes: vec![raw_author("a"), raw_author("b")],
            links: vec![raw_link("a", "b"), raw_link("a", "ghost")],
        })
        .expect("network builds");

        assert_eq!(network.link_count(), 1);
        assert_eq!(network.dropped_links, 1);
    }

    #[test]
    fn duplicate_author_ids_keep_the_first_record() {
        let mut first = raw_author("a");
        first.publications = 7;
        let network = build_network(RawNetwork {
            nodes: vec![first, raw_author("a"), raw_author("b")],
            links: vec![raw_link("a", "b")],
        })
        .expect("network builds");

        assert_eq!(network.author_count(), 2);
        assert_eq!(network.authors[0].publications, 7);
    }

    #[test]
    fn empty_node_set_is_an_error() {
        let result = build_network(RawNetwork {
            nodes: Vec::new(),
            links: Vec::new(),
        });
        assert!(result.is_err());
    }
}
