use serde::Serialize;

/// Collections exposed by the content API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    Events,
    Speakers,
    Sponsors,
    TicketCategories,
    Messages,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Events => "events",
            Resource::Speakers => "speakers",
            Resource::Sponsors => "sponsors",
            Resource::TicketCategories => "ticket-categories",
            Resource::Messages => "messages",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Query parameters understood by the content API's collection endpoints.
///
/// ```text
/// filters[Featured][$eq]=true&populate=*&sort[0]=StartDate:asc&pagination[limit]=3
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentQuery {
    filters: Vec<(String, String)>,
    populate_all: bool,
    sort: Vec<(String, Direction)>,
    limit: Option<u32>,
}

impl ContentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: &str, value: impl ToString) -> Self {
        self.filters.push((field.to_string(), value.to_string()));
        self
    }

    pub fn populate_all(mut self) -> Self {
        self.populate_all = true;
        self
    }

    /// Appends a sort key; earlier keys take precedence.
    pub fn sort(mut self, field: &str, direction: Direction) -> Self {
        self.sort.push((field.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Unencoded key/value pairs in a stable order: filters, populate, sort, limit.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|(field, value)| (format!("filters[{field}][$eq]"), value.clone()))
            .collect();
        if self.populate_all {
            pairs.push(("populate".to_string(), "*".to_string()));
        }
        for (i, (field, direction)) in self.sort.iter().enumerate() {
            pairs.push((format!("sort[{i}]"), format!("{field}:{}", direction.as_str())));
        }
        if let Some(limit) = self.limit {
            pairs.push(("pagination[limit]".to_string(), limit.to_string()));
        }
        pairs
    }

    /// Human-readable form for logs. Not percent-encoded.
    pub fn to_query_string(&self) -> String {
        self.to_pairs()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}
