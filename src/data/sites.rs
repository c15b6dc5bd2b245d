//! Monitored site registry.
//!
//! Sites are referenced from every record by id. The registry is read-only
//! from the core's perspective: the ingestion pipeline treats site ids as
//! opaque string keys and performs no validation that a key exists here.

use serde::{Deserialize, Serialize};

/// A monitored site definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Stable slug used as the foreign key in records.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Primary domain.
    pub domain: &'static str,
}

/// The monitored production sites.
pub const SITES: [Site; 5] = [
    Site {
        id: "tax",
        name: "Tax Thomson Reuters",
        domain: "tax.thomsonreuters.com",
    },
    Site {
        id: "main",
        name: "Thomson Reuters",
        domain: "thomsonreuters.com",
    },
    Site {
        id: "legal",
        name: "Legal Thomson Reuters",
        domain: "legal.thomsonreuters.com",
    },
    Site {
        id: "writers",
        name: "Thompson Writers",
        domain: "thompsonwriters.co.ca",
    },
    Site {
        id: "legal-uk",
        name: "Legal UK Website",
        domain: "legal-uk.thomsonreuters.com",
    },
];

/// Looks up a site by its id slug.
pub fn get_site(id: &str) -> Option<&'static Site> {
    SITES.iter().find(|site| site.id == id)
}

/// All sites ordered by display name.
pub fn all_sites_sorted() -> Vec<&'static Site> {
    let mut sites: Vec<&'static Site> = SITES.iter().collect();
    sites.sort_by_key(|site| site.name);
    sites
}
