use std::collections::HashMap;

pub const TOP_COUNTRY_LIMIT: usize = 10;

#[derive(Clone, Debug)]
pub struct Author {
    pub id: String,
    pub affiliation: String,
    pub country: Option<String>,
    pub publications: u64,
    pub titles: Vec<String>,
}

/// Loaded collaboration network with ids resolved to indices.
#[derive(Clone, Debug)]
pub struct CollabNetwork {
    pub authors: Vec<Author>,
    pub links: Vec<(usize, usize)>,
    pub degrees: Vec<usize>,
    pub top_countries: Vec<String>,
    pub dropped_links: usize,
}

impl CollabNetwork {
    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn degree(&self, index: usize) -> usize {
        self.degrees.get(index).copied().unwrap_or(0)
    }
}

/// Counts incident links per author; each link increments both endpoints.
pub(super) fn degree_table(author_count: usize, links: &[(usize, usize)]) -> Vec<usize> {
    let mut degrees = vec![0usize; author_count];
    for &(source, target) in links {
        if let Some(entry) = degrees.get_mut(source) {
            *entry += 1;
        }
        if let Some(entry) = degrees.get_mut(target) {
            *entry += 1;
        }
    }
    degrees
}

/// Ranks countries by occurrence count, descending, keeping the first ten.
/// Counting is keyed in first-encounter order and the sort is stable, so ties
/// break by original encounter order.
pub(super) fn rank_countries(authors: &[Author]) -> Vec<String> {
    let mut order = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for author in authors {
        let Some(country) = author.country.as_deref() else {
            continue;
        };

        let entry = counts.entry(country).or_insert(0);
        if *entry == 0 {
            order.push(country);
        }
        *entry += 1;
    }

    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(TOP_COUNTRY_LIMIT);
    order.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::{Author, degree_table, rank_countries};

    fn author(id: &str, country: Option<&str>) -> Author {
        Author {
            id: id.to_string(),
            affiliation: String::new(),
            country: country.map(str::to_string),
            publications: 0,
            titles: Vec::new(),
        }
    }

    #[test]
    fn degrees_match_link_incidence() {
        // Worked example: nodes A, B, C with links A-B and B-C.
        let degrees = degree_table(3, &[(0, 1), (1, 2)]);
        assert_eq!(degrees, vec![1, 2, 1]);
    }

    #[test]
    fn degree_sum_is_twice_the_link_count() {
        let links = [(0, 1), (1, 2), (2, 3), (0, 3), (1, 3)];
        let degrees = degree_table(4, &links);
        assert_eq!(degrees.iter().sum::<usize>(), 2 * links.len());
    }

    #[test]
    fn isolated_authors_have_zero_degree() {
        let degrees = degree_table(3, &[(0, 1)]);
        assert_eq!(degrees[2], 0);
    }

    #[test]
    fn countries_rank_by_descending_count() {
        let authors = vec![
            author("a", Some("FR")),
            author("b", Some("US")),
            author("c", Some("US")),
            author("d", None),
        ];
        assert_eq!(rank_countries(&authors), vec!["US", "FR"]);
    }

    #[test]
    fn ties_break_by_encounter_order() {
        let authors = vec![
            author("a", Some("US")),
            author("b", Some("US")),
            author("c", Some("FR")),
        ];
        assert_eq!(rank_countries(&authors), vec!["US", "FR"]);
    }

    #[test]
    fn ranking_keeps_at_most_ten_countries() {
        let mut authors = Vec::new();
        for index in 0..14 {
            let code = format!("C{index:02}");
            // Later countries appear more often so they should rank first.
            for _ in 0..=index {
                authors.push(author(&format!("a{index}"), Some(&code)));
            }
        }

        let ranked = rank_countries(&authors);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0], "C13");
        assert!(!ranked.contains(&"C00".to_string()));
    }
}
